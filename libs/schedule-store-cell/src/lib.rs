pub mod models;
pub mod services;
pub mod error;
pub mod state;
pub mod handlers;
pub mod router;

pub use models::*;
pub use error::*;
pub use services::*;
pub use state::*;
pub use router::schedule_store_routes;
