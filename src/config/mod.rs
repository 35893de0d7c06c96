//! Configuration module
//!
//! Handles:
//! - User configuration (`config.toml` under the platform config directory)
//! - Declarative session layouts (TOML or JSON)

mod layout;
mod settings;

pub use layout::*;
pub use settings::*;
