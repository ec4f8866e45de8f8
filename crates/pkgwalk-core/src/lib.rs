//! Core vocabulary for pkgwalk: repository and package identity, relative
//! path fragments, target patterns, and the shared error and event types.
//!
//! Everything here is a plain value type. Graph state lives in
//! `pkgwalk-graph`; the query operations live in `pkgwalk-provider`.

pub mod cancel;
pub mod error;
pub mod events;
pub mod package;
pub mod path;
pub mod pattern;
pub mod repo;
