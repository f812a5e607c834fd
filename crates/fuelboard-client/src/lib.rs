pub mod analytics;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod dataset;
pub mod error;
pub mod views;

pub use contracts::envelope::{ErrorContract, SuccessEnvelope};
pub use dataset::cache::DatasetCache;
pub use dataset::{Dataset, TransactionRecord};
pub use error::{ClientError, ClientResult};
pub use views::{Selection, View, ViewResult, render};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
