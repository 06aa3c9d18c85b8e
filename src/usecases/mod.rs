//! Use Cases Layer - BPJS Antrean Online Endpoints
//!
//! Each service validates caller input, calls exactly one verb on the
//! shared `SignedApiClient`, and checks the response envelope.
//!
//! - `dashboard`: Waiting-time dashboards and queue listings
//! - `queue`: Queue process actions (add, update time, cancel, schedules)
//! - `reference`: Polyclinic, doctor and patient lookups

pub mod dashboard;
pub mod queue;
pub mod reference;

pub use dashboard::{DashboardService, WaitTimeBasis};
pub use queue::QueueService;
pub use reference::{IdentityType, ReferenceService};
