//! Core types for Atrium.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;
pub mod timestamp;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_amount, format_price};
pub use status::*;
pub use timestamp::format_timestamp;
