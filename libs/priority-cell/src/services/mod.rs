pub mod history;
pub mod priority;
pub mod no_show;
pub mod slot_suggestion;

pub use history::*;
pub use priority::*;
pub use no_show::BASELINE_NO_SHOW_PROBABILITY;
pub use slot_suggestion::PREFERRED_TIMES;
