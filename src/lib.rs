#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::suboptimal_flops
)]

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod evolution;
pub mod extractor;
pub mod fitness;
pub mod genome;
pub mod history;
pub mod logging;
pub mod pool;
pub mod rng;
pub mod rule;
pub mod stats;
pub mod summary;
pub mod witness;

pub use config::{Config, Json, MiningConfig};
pub use data::Dataset;
pub use engine::{Engine, ProgressHandler};
pub use error::MiningError;
pub use pool::GlobalPool;
pub use rule::Rule;
