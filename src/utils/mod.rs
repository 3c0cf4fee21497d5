//! Utility functions

pub mod crypto;
pub mod filter;
pub mod safe;
pub mod time;

pub use filter::{filter_by_since_limit, Timestamped};
pub use safe::*;
