pub mod extract;
pub mod labels;
pub mod miner;
pub mod topics;

pub use extract::{extract_percentage, NOT_APPLICABLE};
pub use labels::{resolve_labels, Breakpoint, Field, YearLabelSet};
pub use miner::{mine, run_all};
pub use topics::{Category, Topic};
