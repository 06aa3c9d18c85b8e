//! Reference Service - Polyclinic, Doctor and Patient Lookups

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::adapters::api::client::SignedApiClient;
use crate::domain::ApiResult;
use crate::domain::response::require_envelope;
use crate::domain::validation::{require_date, require_non_empty};

/// Identity document used for fingerprint patient lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityType {
  /// National identity number.
  Nik,
  /// BPJS card number.
  Noka,
}

impl IdentityType {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Nik => "nik",
      Self::Noka => "noka",
    }
  }
}

impl fmt::Display for IdentityType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Reference endpoints of the antrean service.
#[derive(Clone)]
pub struct ReferenceService {
  client: Arc<SignedApiClient>,
}

impl ReferenceService {
  pub const fn new(client: Arc<SignedApiClient>) -> Self {
    Self { client }
  }

  /// Polyclinics registered with BPJS.
  #[instrument(skip(self))]
  pub async fn polyclinics(&self) -> ApiResult {
    require_envelope(self.client.get("ref/poli").await)
  }

  /// Doctors practicing at a polyclinic on a date.
  #[instrument(skip(self))]
  pub async fn doctors(&self, kodepoli: &str, tanggal: &str) -> ApiResult {
    require_non_empty(kodepoli)?;
    require_date(tanggal)?;

    let path = format!("ref/jadwaldokter/kodepoli/{kodepoli}/{tanggal}");
    require_envelope(self.client.get(&path).await)
  }

  /// Doctor schedules for a polyclinic on a date.
  #[instrument(skip(self))]
  pub async fn doctor_schedule(&self, kodepoli: &str, tanggal: &str) -> ApiResult {
    require_non_empty(kodepoli)?;
    require_date(tanggal)?;

    let path = format!("jadwaldokter/kodepoli/{kodepoli}/tanggal/{tanggal}");
    require_envelope(self.client.get(&path).await)
  }

  /// Fingerprint-registered patient by NIK or card number.
  #[instrument(skip(self, number))]
  pub async fn fingerprint_patient(&self, identity: IdentityType, number: &str) -> ApiResult {
    require_non_empty(number)?;

    let path = format!("ref/pasien/fp/identitas/{identity}/noidentitas/{number}");
    require_envelope(self.client.get(&path).await)
  }
}
