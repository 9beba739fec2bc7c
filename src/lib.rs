pub mod error;
pub mod fetch;
pub mod report;
pub mod survey;

pub use error::MineError;
