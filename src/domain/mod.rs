//! Domain layer - Pure request signing and response rules.
//!
//! Nothing in here touches the network or the clock. Timestamps are
//! passed in, HTTP bodies arrive as strings, and every outcome is a
//! plain value that can be tested in isolation.

pub mod response;
pub mod signature;
pub mod validation;

// Re-export core types for convenience
pub use response::{ApiError, ApiResult, ApiResultExt, ErrorKind, JsonMap};
pub use signature::{SecretKey, SignedHeaders};
