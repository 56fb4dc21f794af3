// Adapters layer: concrete document sources behind the DocumentLoader port.

pub mod loader;

pub use loader::{FileLoader, FixtureLoader, HttpLoader};
