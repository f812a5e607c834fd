pub mod categories;
pub mod common;
pub mod consumption;
pub mod dash;
pub mod overconsumption;
pub mod overview;

pub use common::SourceOptions;
