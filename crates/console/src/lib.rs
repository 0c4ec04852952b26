//! Atrium Console - the dashboard's application layer.
//!
//! This crate sits between the user and the REST backend:
//! - [`api`] - HTTP collaborators for users, projects, services, notifications
//! - [`list`] - list pages: load, filter, sort, paginate, confirm-then-delete
//! - [`mutation`] - forms, local validation, create/update round-trips
//! - [`search`] - debounced fan-out search across every collaborator
//! - [`components`] - table configuration for the list pages
//!
//! Record shapes and the pure list pipeline live in `atrium-core`.
//!
//! # Errors
//!
//! Nothing here panics on a failed request. Every operation degrades to an
//! inline [`error::ErrorBanner`] and logs the originating error through
//! `tracing` (and Sentry, when configured by [`telemetry::init`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod list;
pub mod mutation;
pub mod search;
pub mod telemetry;
