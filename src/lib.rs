pub mod config;
pub mod core;
pub mod finder;
pub mod models;
pub mod utils;

pub use crate::core::manager::ModManager;
pub use crate::models::error::{Error, Result};
