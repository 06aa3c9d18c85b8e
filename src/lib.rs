//! BPJS Antrean Online Client — Library Root
//!
//! HMAC-signed REST client for the BPJS Kesehatan web services plus the
//! antrean (online queue) endpoint services built on top of it.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bpjs_antrol::adapters::api::client::SignedApiClient;
//! use bpjs_antrol::config::loader::load_config;
//! use bpjs_antrol::usecases::ReferenceService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = load_config("config.toml")?;
//! let client = Arc::new(SignedApiClient::new(config.credentials(), config.client_config())?);
//! let poli = ReferenceService::new(client).polyclinics().await;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
