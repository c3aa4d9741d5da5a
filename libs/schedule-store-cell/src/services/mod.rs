pub mod seed;
pub mod store;

pub use store::*;
