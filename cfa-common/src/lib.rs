//! # CFA Common Library
//!
//! Shared code for the client feedback analysis crates:
//! - Review model (`Review`, `Rating`)
//! - Common error type
//! - Bootstrap configuration loading

pub mod config;
pub mod error;
pub mod review;

pub use error::{Error, Result};
pub use review::{Rating, Review};
