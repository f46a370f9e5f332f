pub mod error;
pub mod executor;
pub mod io;
pub mod manifest;
pub mod platform;
pub mod resolver;
pub mod selection;

pub use error::{HabitatError, Result};
