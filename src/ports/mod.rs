//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces the signed client requires from the outside
//! world. Adapters implement these traits; tests substitute mocks.
//!
//! Port categories:
//! - `HttpTransport`: Issue one HTTP request, return status + body
//! - `Clock`: UNIX timestamp source used for request signing

pub mod clock;
pub mod transport;
