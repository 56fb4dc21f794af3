pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod fixtures;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileLoader, FixtureLoader, HttpLoader};
pub use config::Settings;
pub use crate::core::{parse_descriptor, DescriptorError, ServiceDescriptor};
pub use server::{AppState, HandlerTable};
pub use utils::error::{Error, Result};
