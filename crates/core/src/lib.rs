//! Atrium Core - Canonical records and the list pipeline.
//!
//! This crate provides the pieces every list page of the Atrium dashboard
//! is built from:
//! - `console` - the application layer (REST collaborators, forms, search)
//! - `integration-tests` - end-to-end scenarios against in-memory fakes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Raw backend payloads go in, canonical records and
//! derived views come out.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, role/status vocabularies, emails, money, timestamps
//! - [`raw`] - Loosely-typed backend payloads (mixed camelCase/snake_case)
//! - [`normalize`] - Raw payload to canonical record conversion
//! - [`records`] - Canonical records for users, projects, services, notifications
//! - [`pipeline`] - Filter, sort, aggregate, paginate, and the list view reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod normalize;
pub mod pipeline;
pub mod raw;
pub mod records;
pub mod types;

pub use normalize::Canonical;
pub use records::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
pub use types::*;
