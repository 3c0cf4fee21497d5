//! Exchange Implementations
//!
//! 거래소별 구현체

pub mod mxc;

pub use mxc::{Mxc, MxcOptions};
