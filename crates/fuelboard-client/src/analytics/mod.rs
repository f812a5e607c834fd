pub mod aggregate;
pub mod bounds;
pub mod histogram;
pub mod regression;
pub mod rounding;
