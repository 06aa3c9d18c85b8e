//! BPJS REST API Adapter
//!
//! Implements the HTTP side of the BPJS web services: credential
//! handling, request signing, transport and response normalization.
//!
//! Sub-modules:
//! - `auth`: Credentials and per-request HMAC-SHA256 headers
//! - `client`: Signed client exposing get/post/put/delete
//! - `transport`: `reqwest` implementation of the transport port

pub mod auth;
pub mod client;
pub mod transport;
