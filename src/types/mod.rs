pub mod error;

pub use error::{Result, ScoutError};
