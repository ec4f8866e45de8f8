//! Package queries over a frozen, pre-evaluated graph snapshot.
//!
//! [`provider::GraphPackageProvider`] answers single and bulk package
//! lookups, existence checks, and recursive packages-under-directory
//! enumeration entirely from memoized state. Nothing here touches the
//! filesystem or computes new graph nodes; directories outside the
//! pre-evaluated universe simply answer empty.

pub mod config;
pub mod provider;
pub mod roots;
pub mod traversal;
pub mod universe;
