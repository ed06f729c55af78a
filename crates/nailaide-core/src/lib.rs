pub mod config;
pub mod error;
pub mod types;

pub use config::NailAideConfig;
pub use error::{NailAideError, Result};
pub use types::*;
