pub mod cli;
pub mod config;
pub mod discovery;
pub mod download;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod utils;

pub use config::Config;
pub use error::LexFetchError;
