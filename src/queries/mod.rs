//! Read projections consumed by the presentation layer. Everything here is
//! a plain select over committed state; no caching sits in front.

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

/// Page size used by the admin tables.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
