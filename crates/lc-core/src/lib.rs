pub mod backup;
pub mod config;
pub mod confirm;
pub mod error;
pub mod instance;
pub mod io;
pub mod paths;
pub mod project;
pub mod registry;
pub mod runner;
pub mod selection;
pub mod store;

pub use error::{LcError, Result};
