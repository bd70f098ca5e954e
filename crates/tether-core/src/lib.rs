//! Core types, type registry, and configuration for tether.
//!
//! This crate provides the value objects shared by every tether crate:
//! - [`types`] — source units, code/contract endpoints, type references, warnings
//! - [`registry`] — the immutable [`TypeRegistry`](registry::TypeRegistry) of declared shapes
//! - [`path`] — route normalization used for endpoint matching
//! - [`config`] — configuration loading from `tether.json`

pub mod config;
pub mod path;
pub mod registry;
pub mod types;
