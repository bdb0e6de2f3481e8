pub mod beautify;
pub mod buffer;
pub mod command;
pub mod config;
pub mod converter;
pub mod detect;
pub mod error;
pub mod process;

pub use beautify::{Outcome, beautify};
pub use error::{Error, Result};
