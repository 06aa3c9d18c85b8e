//! Queue Service - Antrean Process Actions
//!
//! Write-side endpoints: registering a queue, registering a pharmacy
//! queue, reporting task timestamps, cancelling, and updating doctor
//! schedules. Payloads are plain JSON mappings; only the presence of
//! the keys BPJS requires is checked here.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::adapters::api::client::SignedApiClient;
use crate::domain::response::require_envelope;
use crate::domain::validation::{coerce_integer, require_keys, require_non_empty};
use crate::domain::{ApiError, ApiResult, JsonMap};

/// Required keys for `jadwaldokter/updatejadwaldokter`.
pub const UPDATE_SCHEDULE_KEYS: &[&str] = &["kodepoli", "kodesubspesialis", "kodedokter", "jadwal"];

/// Required keys for `antrean/add`.
pub const ADD_QUEUE_KEYS: &[&str] = &[
  "kodebooking",
  "jenispasien",
  "nomorkartu",
  "nik",
  "nohp",
  "kodepoli",
  "namapoli",
  "pasienbaru",
  "norm",
  "tanggalperiksa",
  "kodedokter",
  "namadokter",
  "jampraktek",
  "jeniskunjungan",
  "nomorreferensi",
  "nomorantrean",
  "angkaantrean",
  "estimasidilayani",
  "sisakuotajkn",
  "kuotajkn",
  "sisakuotanonjkn",
  "kuotanonjkn",
  "keterangan",
];

/// Required keys for `antrean/farmasi/add`.
pub const ADD_PHARMACY_QUEUE_KEYS: &[&str] = &["kodebooking", "jenisresep", "nomorantrean", "keterangan"];

/// Required keys for `antrean/updatewaktu`.
pub const UPDATE_TIME_KEYS: &[&str] = &["kodebooking", "jenisresep", "waktu", "taskid"];

/// Process endpoints of the antrean service.
#[derive(Clone)]
pub struct QueueService {
  client: Arc<SignedApiClient>,
}

impl QueueService {
  pub const fn new(client: Arc<SignedApiClient>) -> Self {
    Self { client }
  }

  /// Update a doctor's practice schedule.
  #[instrument(skip_all)]
  pub async fn update_doctor_schedule(&self, data: &JsonMap) -> ApiResult {
    require_keys(data, UPDATE_SCHEDULE_KEYS)?;
    require_envelope(self.client.post("jadwaldokter/updatejadwaldokter", data).await)
  }

  /// Register a new queue.
  #[instrument(skip_all)]
  pub async fn add_queue(&self, data: &JsonMap) -> ApiResult {
    require_keys(data, ADD_QUEUE_KEYS)?;
    require_envelope(self.client.post("antrean/add", data).await)
  }

  /// Register a pharmacy queue.
  #[instrument(skip_all)]
  pub async fn add_pharmacy_queue(&self, data: &JsonMap) -> ApiResult {
    require_keys(data, ADD_PHARMACY_QUEUE_KEYS)?;
    require_envelope(self.client.post("antrean/farmasi/add", data).await)
  }

  /// Report the timestamp of a task (`taskid` 1-99).
  ///
  /// `taskid` is sent as an integer whatever JSON type it arrived as.
  #[instrument(skip_all)]
  pub async fn update_queue_time(&self, data: &JsonMap) -> ApiResult {
    require_keys(data, UPDATE_TIME_KEYS)?;

    let task_id = data
      .get("taskid")
      .and_then(coerce_integer)
      .ok_or_else(|| ApiError::validation("Invalid taskid"))?;

    let mut payload = data.clone();
    payload.insert("taskid".to_string(), Value::from(task_id));

    require_envelope(self.client.post("antrean/updatewaktu", &payload).await)
  }

  /// Cancel a queue with a reason.
  #[instrument(skip(self))]
  pub async fn cancel_queue(&self, kodebooking: &str, keterangan: &str) -> ApiResult {
    require_non_empty(kodebooking)?;
    require_non_empty(keterangan)?;

    let mut payload = JsonMap::new();
    payload.insert("kodebooking".to_string(), Value::from(kodebooking));
    payload.insert("keterangan".to_string(), Value::from(keterangan));

    require_envelope(self.client.post("antrean/batal", &payload).await)
  }
}
