//! Property-Based Tests — Signing, Validation and Payload Invariants
//!
//! Uses `proptest` to verify that header construction, date
//! validation and payload serialization hold across random inputs.

use std::sync::Arc;

use mockall::mock;
use proptest::prelude::*;
use serde_json::{Value, json};

use bpjs_antrol::adapters::api::auth::Credentials;
use bpjs_antrol::adapters::api::client::{ClientConfig, SignedApiClient};
use bpjs_antrol::domain::signature::SignedHeaders;
use bpjs_antrol::domain::validation::require_date;
use bpjs_antrol::domain::{ErrorKind, JsonMap, SecretKey};
use bpjs_antrol::ports::clock::FixedClock;
use bpjs_antrol::ports::transport::{
    HttpTransport, TransportError, TransportRequest, TransportResponse,
};
use bpjs_antrol::usecases::{DashboardService, ReferenceService, WaitTimeBasis};

mock! {
    pub Transport {}

    #[async_trait::async_trait]
    impl HttpTransport for Transport {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError>;
    }
}

fn client(mock: MockTransport) -> Arc<SignedApiClient> {
    let credentials = Credentials {
        consumer_id: "123456".to_string(),
        secret_key: SecretKey::new("abcdef123456"),
        user_key: "xyz123".to_string(),
        base_url: "https://apijkn-dev.bpjs-kesehatan.go.id".to_string(),
        service_name: "antreanrs_dev".to_string(),
    };
    Arc::new(
        SignedApiClient::with_transport(credentials, ClientConfig::default(), Arc::new(mock))
            .unwrap()
            .with_clock(Arc::new(FixedClock(1_700_000_000))),
    )
}

/// Strings that can never match `^\d{4}-\d{2}-\d{2}$`.
fn malformed_date() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,3}-[0-9]{2}-[0-9]{2}",
        "[0-9]{4}/[0-9]{2}/[0-9]{2}",
        "[0-9]{2}-[0-9]{2}-[0-9]{4}",
        "[a-zA-Z ]{0,12}",
        "[0-9]{4}-[0-9]{2}-[0-9]{3,4}",
    ]
}

/// Flat JSON objects with string, integer and boolean values.
fn payload() -> impl Strategy<Value = JsonMap> {
    prop::collection::btree_map(
        "[a-z]{1,12}",
        prop_oneof![
            "[a-zA-Z0-9 :-]{0,20}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ],
        1..8,
    )
    .prop_map(|m| m.into_iter().collect())
}

// ── Header Construction ─────────────────────────────────────

proptest! {
    /// Same inputs always give byte-identical headers.
    #[test]
    fn signature_is_deterministic(
        cons_id in "[0-9]{1,8}",
        secret in "[ -~]{1,32}",
        timestamp in 0i64..4_102_444_800,
        user_key in "[a-f0-9]{8,32}",
    ) {
        let a = SignedHeaders::compute(&cons_id, secret.as_bytes(), timestamp, &user_key);
        let b = SignedHeaders::compute(&cons_id, secret.as_bytes(), timestamp, &user_key);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.signature().len(), 44, "base64 of 32 bytes is 44 chars");
        prop_assert_eq!(a.to_pairs()[1].1.clone(), timestamp.to_string());
    }

    /// Different timestamps give different signatures.
    #[test]
    fn signature_depends_on_timestamp(
        secret in "[ -~]{1,32}",
        t1 in 0i64..2_000_000_000,
        delta in 1i64..1_000_000,
    ) {
        let a = SignedHeaders::compute("123456", secret.as_bytes(), t1, "k");
        let b = SignedHeaders::compute("123456", secret.as_bytes(), t1 + delta, "k");
        prop_assert_ne!(a.signature(), b.signature());
    }
}

// ── Date Validation ─────────────────────────────────────────

proptest! {
    /// Well-formed dates pass the shape check.
    #[test]
    fn well_formed_dates_accepted(date in "[0-9]{4}-[0-9]{2}-[0-9]{2}") {
        prop_assert!(require_date(&date).is_ok());
    }

    /// Malformed dates are rejected without touching the network.
    #[test]
    fn malformed_dates_never_reach_transport(date in malformed_date()) {
        let mut mock = MockTransport::new();
        mock.expect_execute().times(0);
        let client = client(mock);

        let results = tokio_test::block_on(async {
            vec![
                DashboardService::new(Arc::clone(&client))
                    .dashboard_by_date(&date, WaitTimeBasis::Server)
                    .await,
                DashboardService::new(Arc::clone(&client)).queues_by_date(&date).await,
                ReferenceService::new(Arc::clone(&client)).doctors("ANA", &date).await,
                ReferenceService::new(Arc::clone(&client))
                    .doctor_schedule("ANA", &date)
                    .await,
            ]
        });

        for result in results {
            let err = result.unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Validation);
            prop_assert_eq!(err.to_json(), json!({"error": true, "message": "Invalid date format"}));
        }
    }
}

// ── Payload Round-Trip ──────────────────────────────────────

proptest! {
    /// POST/PUT payloads survive JSON serialization through an echo transport.
    #[test]
    fn payload_round_trips_through_echo(map in payload(), use_put in any::<bool>()) {
        let mut mock = MockTransport::new();
        mock.expect_execute().times(1).returning(|req| {
            let mut echoed = JsonMap::new();
            echoed.insert("status".to_string(), json!(200));
            echoed.insert("echo".to_string(), req.body.unwrap_or(Value::Null));
            Ok(TransportResponse::new(200, Value::Object(echoed).to_string()))
        });
        let client = client(mock);

        let body = tokio_test::block_on(async {
            if use_put {
                client.put("echo", &map).await
            } else {
                client.post("echo", &map).await
            }
        })
        .unwrap();

        prop_assert_eq!(body.get("echo"), Some(&Value::Object(map)));
    }
}
