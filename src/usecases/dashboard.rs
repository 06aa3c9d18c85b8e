//! Dashboard Service - Waiting Times and Queue Listings
//!
//! Read-only views over the hospital's queue: per-booking task
//! timelines, daily and monthly waiting-time dashboards, and lists of
//! registered or still-pending queues.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde_json::Value;
use tracing::instrument;

use crate::adapters::api::client::SignedApiClient;
use crate::domain::response::require_envelope;
use crate::domain::validation::{require_date, require_month_year, require_non_empty};
use crate::domain::{ApiResult, JsonMap};

/// Which clock the dashboard waiting times are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WaitTimeBasis {
  /// BPJS server time.
  #[default]
  Server,
  /// Hospital (rumah sakit) time.
  Rs,
}

impl WaitTimeBasis {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Server => "server",
      Self::Rs => "rs",
    }
  }
}

impl fmt::Display for WaitTimeBasis {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Dashboard endpoints of the antrean service.
#[derive(Clone)]
pub struct DashboardService {
  client: Arc<SignedApiClient>,
}

impl DashboardService {
  pub const fn new(client: Arc<SignedApiClient>) -> Self {
    Self { client }
  }

  /// Task timeline (task ids 1-7) for one booking.
  #[instrument(skip(self))]
  pub async fn list_task_times(&self, kodebooking: &str) -> ApiResult {
    require_non_empty(kodebooking)?;

    let mut payload = JsonMap::new();
    payload.insert("kodebooking".to_string(), Value::from(kodebooking));

    require_envelope(self.client.post("antrean/getlisttask", &payload).await)
  }

  /// Waiting-time dashboard for one day (`YYYY-MM-DD`).
  #[instrument(skip(self))]
  pub async fn dashboard_by_date(&self, tanggal: &str, waktu: WaitTimeBasis) -> ApiResult {
    require_date(tanggal)?;

    let path = format!("dashboard/waktutunggu/tanggal/{tanggal}/waktu/{waktu}");
    require_envelope(self.client.get(&path).await)
  }

  /// Waiting-time dashboard for one month (`MM`, `YYYY`).
  #[instrument(skip(self))]
  pub async fn dashboard_by_month(&self, bulan: &str, tahun: &str, waktu: WaitTimeBasis) -> ApiResult {
    require_month_year(bulan, tahun)?;

    let path = format!("dashboard/waktutunggu/bulan/{bulan}/tahun/{tahun}/waktu/{waktu}");
    require_envelope(self.client.get(&path).await)
  }

  /// Queues registered for one day.
  #[instrument(skip(self))]
  pub async fn queues_by_date(&self, tanggal: &str) -> ApiResult {
    require_date(tanggal)?;

    let path = format!("antrean/pendaftaran/tanggal/{tanggal}");
    require_envelope(self.client.get(&path).await)
  }

  /// Queue registered under a booking code.
  #[instrument(skip(self))]
  pub async fn queue_by_booking_code(&self, kodebooking: &str) -> ApiResult {
    require_non_empty(kodebooking)?;

    let path = format!("antrean/pendaftaran/kodebooking/{kodebooking}");
    require_envelope(self.client.get(&path).await)
  }

  /// Queues not yet served.
  #[instrument(skip(self))]
  pub async fn pending_queues(&self) -> ApiResult {
    require_envelope(self.client.get("antrean/pendaftaran/aktif").await)
  }

  /// Pending queues for one doctor's practice slot.
  #[instrument(skip(self))]
  pub async fn pending_queue_detail(
    &self,
    kodepoli: &str,
    kodedokter: &str,
    hari: &str,
    jampraktek: &str,
  ) -> ApiResult {
    for value in [kodepoli, kodedokter, hari, jampraktek] {
      require_non_empty(value)?;
    }

    let path = format!(
      "antrean/pendaftaran/aktif/detail/kodepoli/{kodepoli}/kodedokter/{kodedokter}/hari/{hari}/jampraktek/{jampraktek}"
    );
    require_envelope(self.client.get(&path).await)
  }
}
