// Utility functions
pub mod error;
pub mod html;
pub mod path;

pub use error::*;
pub use path::*;
