pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod translator;

pub use error::{Error, Result};
