pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RosterConfig;

pub use crate::adapters::{local::LocalStorage, memory::InMemoryRoster};
pub use crate::core::{admin::RosterAdmin, export::Column, roster::RosterLinker};
pub use utils::error::{Result, RosterError};
