//! Resume portal library

pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod output;
pub mod router;
pub mod screens;
pub mod shell;

pub use config::Config;
pub use error::{PortalError, Result};
