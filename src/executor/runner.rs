//! API test runner
//!
//! Issues the scenario requests one after another, scores each on its status
//! code and keeps the ordered result log.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::http::{truncate, HttpClient, HttpRequest};
use crate::models::{HttpMethod, RunSummary, Scenario, TestResult};
use crate::utils::Timer;

/// Characters of a passing response echoed to the log
const LOG_PREVIEW_LEN: usize = 200;

/// Smoke tester for the contact and status-check API
pub struct ApiTester {
    client: HttpClient,
    base_url: String,
    api_url: String,
    preview_len: usize,
    tests_run: usize,
    tests_passed: usize,
    results: Vec<TestResult>,
    /// Set once a gating scenario fails
    halted: bool,
}

impl ApiTester {
    /// Create a new tester
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(config.timeout_secs)?;
        debug!(
            "Created tester for {} (timeout {}s)",
            config.api_url(),
            client.timeout_secs()
        );
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_url: config.api_url(),
            preview_len: config.preview_len,
            tests_run: 0,
            tests_passed: 0,
            results: Vec::new(),
            halted: false,
        })
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn tests_passed(&self) -> usize {
        self.tests_passed
    }

    /// Run a single check and record its outcome.
    ///
    /// Success depends only on the status code. The returned body is the
    /// parsed JSON of a successful non-empty response, or an empty object.
    pub async fn run_test(
        &mut self,
        name: &str,
        method: HttpMethod,
        endpoint: &str,
        expected_status: u16,
        body: Option<&Value>,
    ) -> (bool, Value) {
        let url = format!("{}/{}", self.api_url, endpoint);

        self.tests_run += 1;
        info!("🔍 Testing {}...", name);
        info!("   URL: {}", url);

        let mut request = HttpRequest::new(method, &url);
        if let (HttpMethod::Post, Some(body)) = (method, body) {
            request = request.json(body);
        }

        let timer = Timer::start(name);
        let response = match self.client.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("❌ Failed - Error: {}", e);
                self.results.push(TestResult::transport_error(
                    name,
                    method,
                    endpoint,
                    expected_status,
                    e.to_string(),
                    timer.elapsed_ms(),
                ));
                return (false, empty_body());
            }
        };

        let result = TestResult::completed(
            name,
            method,
            endpoint,
            expected_status,
            response.status_code,
            response.preview(self.preview_len),
            response.duration_ms,
        );
        let success = result.success;
        self.results.push(result);

        if !success {
            warn!(
                "❌ Failed - Expected {}, got {}",
                expected_status, response.status_code
            );
            warn!("   Response: {}...", response.preview(self.preview_len));
            return (false, empty_body());
        }

        self.tests_passed += 1;
        info!("✅ Passed - Status: {}", response.status_code);

        if response.body.is_empty() {
            return (true, empty_body());
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(parsed) => {
                let pretty = serde_json::to_string_pretty(&parsed)
                    .unwrap_or_else(|_| response.body.clone());
                info!("   Response: {}...", truncate(&pretty, LOG_PREVIEW_LEN));
                (true, parsed)
            }
            Err(e) => {
                info!("   Response: {}...", response.preview(LOG_PREVIEW_LEN));
                debug!("Response body of {} is not JSON: {}", name, e);
                (true, empty_body())
            }
        }
    }

    async fn run_scenario(&mut self, scenario: Scenario) -> (bool, Value) {
        let payload = scenario.payload();
        let outcome = self
            .run_test(
                scenario.name(),
                scenario.method(),
                scenario.endpoint(),
                scenario.expected_status(),
                payload.as_ref(),
            )
            .await;

        if !outcome.0 && scenario.is_gating() {
            self.halted = true;
        }
        outcome
    }

    /// GET the API root
    pub async fn test_api_root(&mut self) -> bool {
        let (success, _) = self.run_scenario(Scenario::ApiRoot).await;
        success
    }

    /// POST a contact message; returns the created id when the backend reports one
    pub async fn test_create_contact_message(&mut self) -> Option<Value> {
        let (success, response) = self.run_scenario(Scenario::CreateContactMessage).await;

        match response.get("id") {
            Some(id) if success => {
                info!("   Created contact message with ID: {}", display_id(id));
                Some(id.clone())
            }
            _ => None,
        }
    }

    /// GET contact messages; returns how many came back
    pub async fn test_get_contact_messages(&mut self) -> usize {
        let (success, response) = self.run_scenario(Scenario::GetContactMessages).await;
        if !success {
            return 0;
        }

        let count = collection_len(&response);
        info!("   Retrieved {} contact messages", count);
        count
    }

    /// POST a status check
    pub async fn test_create_status_check(&mut self) -> bool {
        let (success, _) = self.run_scenario(Scenario::CreateStatusCheck).await;
        success
    }

    /// GET status checks
    pub async fn test_get_status_checks(&mut self) -> bool {
        let (success, _) = self.run_scenario(Scenario::GetStatusChecks).await;
        success
    }

    /// Run every scenario in order, stopping after a failed root check
    pub async fn run_all(mut self) -> RunSummary {
        let started_at = Utc::now();
        info!("🚀 Starting API tests against {}", self.base_url);

        self.test_api_root().await;
        if self.halted {
            warn!("❌ API root endpoint failed, stopping tests");
            return self.into_summary(started_at, true);
        }

        info!("📧 Testing Contact Endpoints...");
        if self.test_create_contact_message().await.is_none() {
            warn!("❌ Contact message creation failed");
        }

        if self.test_get_contact_messages().await == 0 {
            warn!("⚠️  No contact messages retrieved (might be expected if database is empty)");
        }

        info!("📊 Testing Status Endpoints...");
        self.test_create_status_check().await;
        self.test_get_status_checks().await;

        self.into_summary(started_at, false)
    }

    fn into_summary(self, started_at: DateTime<Utc>, aborted: bool) -> RunSummary {
        info!(
            "Run finished: {}/{} passed",
            self.tests_passed(),
            self.tests_run()
        );
        RunSummary {
            base_url: self.base_url,
            started_at,
            tests_run: self.tests_run,
            tests_passed: self.tests_passed,
            aborted,
            results: self.results,
        }
    }
}

fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Number of items in a JSON collection; anything else counts as empty
fn collection_len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}

fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::models::ActualStatus;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            base_url: server.uri(),
            ..Default::default()
        }
    }

    async fn mount(server: &MockServer, verb: &str, route: &str, template: ResponseTemplate) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn ok_json(body: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn healthy_backend() -> MockServer {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/",
            ok_json(json!({ "message": "Hello World" })),
        )
        .await;
        mount(
            &server,
            "POST",
            "/api/contact",
            ok_json(json!({ "id": "c-1", "name": "João Silva" })),
        )
        .await;
        mount(
            &server,
            "GET",
            "/api/contact",
            ok_json(json!([{ "id": "c-1" }, { "id": "c-2" }])),
        )
        .await;
        mount(
            &server,
            "POST",
            "/api/status",
            ok_json(json!({ "id": "s-1", "client_name": "Test Client" })),
        )
        .await;
        mount(
            &server,
            "GET",
            "/api/status",
            ok_json(json!([{ "id": "s-1" }])),
        )
        .await;
        server
    }

    fn names(summary: &RunSummary) -> Vec<&str> {
        summary.results.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_full_run_passes() {
        let server = healthy_backend().await;
        let tester = ApiTester::new(&config_for(&server)).unwrap();

        let summary = tester.run_all().await;

        assert_eq!(summary.tests_run, 5);
        assert_eq!(summary.tests_passed, 5);
        assert!(!summary.aborted);
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(
            names(&summary),
            vec![
                "API Root",
                "Create Contact Message",
                "Get Contact Messages",
                "Create Status Check",
                "Get Status Checks",
            ]
        );
        assert!(summary.results.iter().all(|r| r.response_preview == "OK"));
    }

    #[tokio::test]
    async fn test_root_failure_aborts_run() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ResponseTemplate::new(503)).await;

        let tester = ApiTester::new(&config_for(&server)).unwrap();
        let summary = tester.run_all().await;

        assert!(summary.aborted);
        assert_eq!(summary.tests_run, 1);
        assert_eq!(summary.tests_passed, 0);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.results[0].actual_status, ActualStatus::Code(503));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_root_aborts_with_error_sentinel() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = AppConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            ..Default::default()
        };
        let summary = ApiTester::new(&config).unwrap().run_all().await;

        assert!(summary.aborted);
        assert_eq!(summary.tests_run, 1);
        let root = &summary.results[0];
        assert_eq!(root.actual_status, ActualStatus::Error);
        assert!(!root.success);
        assert!(root.response_preview.contains("Connection refused"));
    }

    #[tokio::test]
    async fn test_contact_500_continues_run() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ok_json(json!({}))).await;
        mount(
            &server,
            "POST",
            "/api/contact",
            ResponseTemplate::new(500).set_body_string("Internal Server Error"),
        )
        .await;
        mount(&server, "GET", "/api/contact", ok_json(json!([{ "id": 1 }]))).await;
        mount(&server, "POST", "/api/status", ok_json(json!({}))).await;
        mount(&server, "GET", "/api/status", ok_json(json!([]))).await;

        let summary = ApiTester::new(&config_for(&server)).unwrap().run_all().await;

        assert!(!summary.aborted);
        assert_eq!(summary.tests_run, 5);
        assert_eq!(summary.tests_passed, 4);
        assert_eq!(summary.exit_code(), 1);

        let contact = &summary.results[1];
        assert_eq!(contact.name, "Create Contact Message");
        assert!(!contact.success);
        assert_eq!(contact.actual_status, ActualStatus::Code(500));
        assert_eq!(contact.response_preview, "Internal Server Error");
        assert!(summary.results[2..].iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn test_timeout_on_later_check_is_recorded() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ResponseTemplate::new(200)).await;
        mount(&server, "POST", "/api/contact", ResponseTemplate::new(200)).await;
        mount(&server, "GET", "/api/contact", ok_json(json!([]))).await;
        mount(
            &server,
            "POST",
            "/api/status",
            ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
        )
        .await;
        mount(&server, "GET", "/api/status", ResponseTemplate::new(200)).await;

        let config = AppConfig {
            timeout_secs: 1,
            ..config_for(&server)
        };
        let summary = ApiTester::new(&config).unwrap().run_all().await;

        assert_eq!(summary.tests_run, 5);
        assert_eq!(summary.tests_passed, 4);
        let status = &summary.results[3];
        assert_eq!(status.actual_status, ActualStatus::Error);
        assert_eq!(status.response_preview, "Timeout after 1 seconds");
        assert!(summary.results[4].success);
    }

    #[tokio::test]
    async fn test_run_test_returns_parsed_body() {
        let server = healthy_backend().await;
        let mut tester = ApiTester::new(&config_for(&server)).unwrap();

        let (success, body) = tester
            .run_test("Get Status Checks", HttpMethod::Get, "status", 200, None)
            .await;

        assert!(success);
        assert_eq!(body, json!([{ "id": "s-1" }]));
        assert_eq!(tester.tests_run(), 1);
        assert_eq!(tester.tests_passed(), 1);
    }

    #[tokio::test]
    async fn test_non_json_success_is_not_an_error() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ResponseTemplate::new(200).set_body_string("hello")).await;

        let mut tester = ApiTester::new(&config_for(&server)).unwrap();
        let (success, body) = tester.run_test("API Root", HttpMethod::Get, "", 200, None).await;

        assert!(success);
        assert_eq!(body, json!({}));
        assert_eq!(tester.results.len(), 1);
        assert_eq!(tester.tests_passed(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_scored_on_code_only() {
        let server = MockServer::start().await;
        mount(
            &server,
            "POST",
            "/api/status",
            ResponseTemplate::new(201).set_body_json(json!({ "id": "s-1" })),
        )
        .await;

        let mut tester = ApiTester::new(&config_for(&server)).unwrap();
        assert!(!tester.test_create_status_check().await);
        assert_eq!(tester.tests_run(), 1);
        assert_eq!(tester.tests_passed(), 0);
    }

    #[tokio::test]
    async fn test_create_contact_without_id() {
        let server = MockServer::start().await;
        mount(&server, "POST", "/api/contact", ok_json(json!({ "ok": true }))).await;

        let mut tester = ApiTester::new(&config_for(&server)).unwrap();
        assert_eq!(tester.test_create_contact_message().await, None);
        assert_eq!(tester.tests_passed(), 1);
    }

    #[tokio::test]
    async fn test_empty_contact_list_is_tolerated() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ResponseTemplate::new(200)).await;
        mount(&server, "POST", "/api/contact", ok_json(json!({ "id": 7 }))).await;
        mount(&server, "GET", "/api/contact", ok_json(json!([]))).await;
        mount(&server, "POST", "/api/status", ResponseTemplate::new(200)).await;
        mount(&server, "GET", "/api/status", ResponseTemplate::new(200)).await;

        let summary = ApiTester::new(&config_for(&server)).unwrap().run_all().await;

        assert_eq!(summary.tests_passed, 5);
        assert_eq!(summary.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_only_gating_failure_halts() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/", ResponseTemplate::new(404)).await;
        mount(&server, "GET", "/api/status", ResponseTemplate::new(500)).await;

        let mut tester = ApiTester::new(&config_for(&server)).unwrap();
        assert!(!tester.test_get_status_checks().await);
        assert!(!tester.halted);

        assert!(!tester.test_api_root().await);
        assert!(tester.halted);
    }

    #[tokio::test]
    async fn test_unresolvable_host_reports_lookup_failure() {
        let config = AppConfig {
            base_url: "http://no-such-host.invalid".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let mut tester = ApiTester::new(&config).unwrap();

        assert!(!tester.test_get_status_checks().await);
        let result = &tester.results[0];
        assert_eq!(result.actual_status, ActualStatus::Error);
        assert!(!result.response_preview.contains("refused"));
        assert!(result.response_preview.contains("no-such-host.invalid"));
    }

    #[test]
    fn test_collection_len() {
        assert_eq!(collection_len(&json!([1, 2, 3])), 3);
        assert_eq!(collection_len(&json!({ "a": 1 })), 1);
        assert_eq!(collection_len(&json!("text")), 0);
        assert_eq!(display_id(&json!("abc")), "abc");
        assert_eq!(display_id(&json!(42)), "42");
    }
}
