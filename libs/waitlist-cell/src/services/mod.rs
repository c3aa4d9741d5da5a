pub mod queue;
pub mod processor;
pub mod rebooking;
pub mod service;

pub use queue::*;
pub use processor::*;
pub use rebooking::*;
pub use service::*;
