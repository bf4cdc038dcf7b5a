pub mod types;
pub mod greedy;
pub mod repair;

pub use types::{Person, Roster, Timeframe};
pub use greedy::build_initial_schedule;
pub use repair::{repair_schedule, DEFAULT_REPAIR_BUDGET};
