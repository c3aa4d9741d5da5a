pub mod confirmation;
pub mod dates;
pub mod test_utils;

pub use confirmation::generate_confirmation_code;
pub use dates::{age_on, hhmm};
