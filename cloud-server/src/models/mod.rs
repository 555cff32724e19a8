//! Data models

pub mod business;

pub use business::*;
