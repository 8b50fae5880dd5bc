//! Shared types for Vally

mod error;

pub use error::{Result, VallyError};
