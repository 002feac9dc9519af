use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::{Value, json};

use meditrack_api::app::{AppServices, build_app};
use meditrack_core::FixedClock;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let services = AppServices::seeded(Arc::new(FixedClock(today))).expect("seed services");

        // Same router as prod, bound to an ephemeral port.
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn update_form(
    client: &reqwest::Client,
    srv: &TestServer,
    path: &str,
    field: &str,
    value: &str,
) -> (StatusCode, Value) {
    let res = client
        .post(srv.url(path))
        .form(&[("field", field), ("value", value)])
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn cost_update_returns_formatted_value() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) =
        update_form(&client, &srv, "/inventory/medicine/1/update", "cost", "19.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "formatted_value": "₹19.50"}));

    let rec: Value = client
        .get(srv.url("/inventory/medicine/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rec["display"]["cost"], "₹19.50");
    assert_eq!(rec["cost"], 19.5);
}

#[tokio::test]
async fn json_bodies_are_accepted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/inventory/surgery_supply/1/update"))
        .json(&json!({"field": "quantity", "value": 4}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["formatted_value"], "4");
}

#[tokio::test]
async fn logical_failures_are_200_with_success_false() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) =
        update_form(&client, &srv, "/inventory/medicine/42/update", "cost", "1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "medicine 42 not found");

    let (status, body) =
        update_form(&client, &srv, "/inventory/equipment/1/update", "quantity", "3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Invalid field: quantity");

    let (_, body) = update_form(
        &client,
        &srv,
        "/inventory/equipment/1/update",
        "next_maintenance",
        "2026-04-01",
    )
    .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Next maintenance must be after last maintenance");

    let (_, body) =
        update_form(&client, &srv, "/inventory/medicine/1/update", "expiry_date", "2026-02-30")
            .await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn transport_level_problems_use_non_2xx() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) =
        update_form(&client, &srv, "/inventory/furniture/1/update", "name", "Desk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown_kind");

    let res = client
        .post(srv.url("/inventory/medicine/1/update"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_carries_derived_status() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // 10 days out and only 3 left.
    update_form(&client, &srv, "/inventory/medicine/1/update", "expiry_date", "2026-10-29").await;
    update_form(&client, &srv, "/inventory/medicine/1/update", "quantity", "3").await;

    let list: Value = client
        .get(srv.url("/inventory/medicines"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let flags: Vec<&str> = list[0]["status"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["flag"].as_str().unwrap())
        .collect();
    assert!(flags.contains(&"expiring-soon"));
    assert!(flags.contains(&"low-stock"));
    assert!(!flags.contains(&"expired"));

    let alerts: Value = client
        .get(srv.url("/alerts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alerts["expiring_medicines"][0]["days_until_expiry"], 10);
    assert_eq!(alerts["low_stock"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn records_can_be_created_and_searched() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/inventory/medicine"))
        .json(&json!({
            "name": "Amoxicillin",
            "manufacturer": "Cipla",
            "quantity": 40,
            "cost": "12",
            "expiry_date": "2027-05-01",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 2);
    assert_eq!(created["display"]["cost"], "₹12.00");

    let res = client
        .post(srv.url("/inventory/medicine"))
        .form(&[
            ("id", "2"),
            ("name", "Amoxicillin"),
            ("manufacturer", "Cipla"),
            ("quantity", "40"),
            ("cost", "12"),
            ("expiry_date", "2027-05-01"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(srv.url("/inventory/medicine"))
        .json(&json!({"name": "Nothing else"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let found: Value = client
        .get(srv.url("/search?query=cip"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found["results"].as_array().unwrap().len(), 1);
    assert_eq!(found["results"][0]["name"], "Amoxicillin");

    let suggestions: Value = client
        .get(srv.url("/search/suggestions?query=a"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(suggestions, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_without_id_get_distinct_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let requests: Vec<_> = (0..100)
        .map(|i| {
            let client = client.clone();
            let url = srv.url("/inventory/medicine");
            tokio::spawn(async move {
                let res = client
                    .post(url)
                    .json(&json!({
                        "name": format!("Batch {i}"),
                        "manufacturer": "Cipla",
                        "quantity": 10,
                        "cost": "2",
                        "expiry_date": "2027-05-01",
                    }))
                    .send()
                    .await
                    .unwrap();
                let status = res.status();
                let body: Value = res.json().await.unwrap();
                (status, body["id"].as_u64())
            })
        })
        .collect();

    let mut ids = Vec::new();
    for req in requests {
        let (status, id) = req.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(id.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
    assert_eq!(ids.first(), Some(&2));
    assert_eq!(ids.last(), Some(&101));
}

#[tokio::test]
async fn report_totals_value_per_kind() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let report: Value = client
        .get(srv.url("/reports?report_type=medicine"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["total_items"], 1);
    // 100 x 5.99
    assert_eq!(report["total_value"], 599.0);

    let res = client
        .post(srv.url("/inventory/medicine"))
        .json(&json!({
            "name": "Ibuprofen",
            "manufacturer": "Abbott",
            "quantity": 10,
            "cost": "3",
            "expiry_date": "2027-05-01",
            "date_added": "2026-12-01",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Without an end date the range stops at today.
    let report: Value = client
        .get(srv.url("/reports?report_type=medicine&start_date=2026-01-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["total_items"], 1);

    let report: Value = client
        .get(srv.url("/reports?report_type=medicine&start_date=2026-01-01&end_date=2026-12-31"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["total_items"], 2);

    let res = client
        .get(srv.url("/reports?start_date=yesterday"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn portal_login_and_content() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/login/student"))
        .json(&json!({"email": "student@srms.ac.in", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Login successful!",
            "user": {"name": "Rohan Kumar", "email": "student@srms.ac.in"}
        })
    );

    let res = client
        .post(srv.url("/api/login/admin"))
        .json(&json!({"email": "admin@srms.ac.in", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Invalid credentials"}));

    let academics: Value = client
        .get(srv.url("/api/academics?q=mathematics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(academics.as_array().unwrap().len(), 1);

    let events: Value = client
        .get(srv.url("/api/events"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(events["tech"][0]["name"], "CodeClash 2025");
    assert_eq!(events["fest"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn event_registration_echoes_data() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/register"))
        .json(&json!({"name": "Asha", "email": "asha@example.com", "event": "CodeClash 2025"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful!");
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert!(body["data"]["id"].is_string());

    let res = client
        .post(srv.url("/api/register"))
        .json(&json!({"name": "Asha", "email": "not-an-email", "event": "CodeClash 2025"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
