pub mod config;
pub mod error;
pub mod output;
pub mod run;
pub mod sample;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use run::{run, Mode};
pub use sample::{Customer, Order, SampleContext};
