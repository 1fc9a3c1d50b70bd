//! Data models

pub mod record;
pub mod insight;

pub use record::*;
pub use insight::*;
