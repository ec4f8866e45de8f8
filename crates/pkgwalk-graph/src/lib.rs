//! The frozen evaluation-graph snapshot pkgwalk queries run against.
//!
//! Provides the key space ([`key::GraphKey`]), the memoized node values
//! ([`node::NodeValue`]), the read-only access trait
//! ([`snapshot::WalkableGraph`]), and an in-memory snapshot
//! ([`snapshot::FrozenGraph`]) for embedders and tests.

pub mod key;
pub mod node;
pub mod snapshot;
