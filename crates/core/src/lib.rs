//! Game Harbor Core - Shared types library.
//!
//! This crate provides common types used across all Game Harbor components:
//! - `client` - Typed SDK for the storefront REST backend
//! - `cli` - Reference command-line shell built on the SDK
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
