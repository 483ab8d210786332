//! HTTP implementation of the `ScoringService` trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use scoredesk_core::model::{
    AttemptDetail, AttemptPage, AttemptsPayload, Flag, Student, StudentResult, Test,
};
use scoredesk_core::query::AttemptFilter;
use scoredesk_core::service::ScoringService;
use scoredesk_core::ServiceError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the remote scoring service's HTTP+JSON API.
pub struct HttpScoringService {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Error body convention of the scoring service.
#[derive(Deserialize)]
struct ApiErrorBody {
    detail: String,
}

impl HttpScoringService {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
            client,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout_secs)
        } else {
            ServiceError::Network(err.to_string())
        }
    }

    async fn error_from_response(
        resource: &str,
        response: reqwest::Response,
    ) -> ServiceError {
        let status = response.status().as_u16();
        if status == 404 {
            return ServiceError::NotFound(resource.to_string());
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body);
        ServiceError::Api { status, message }
    }

    #[instrument(skip(self, query), fields(request_id = %Uuid::new_v4()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(resource, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    #[instrument(skip(self, query), fields(request_id = %Uuid::new_v4()))]
    async fn post_empty(
        &self,
        resource: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(resource, response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn students(&self) -> Result<Vec<Student>, ServiceError> {
        self.get_json("students", "/api/students", &[]).await
    }

    async fn tests(&self) -> Result<Vec<Test>, ServiceError> {
        self.get_json("tests", "/api/tests", &[]).await
    }

    async fn attempts(&self, filter: &AttemptFilter) -> Result<AttemptPage, ServiceError> {
        let payload: AttemptsPayload = self
            .get_json("attempts", "/api/attempts", &filter.params())
            .await?;
        Ok(payload.into())
    }

    async fn flags(&self) -> Result<Vec<Flag>, ServiceError> {
        self.get_json("flags", "/api/flags", &[]).await
    }

    async fn attempt_detail(&self, attempt_id: &str) -> Result<AttemptDetail, ServiceError> {
        self.get_json("attempt", &format!("/api/attempts/{attempt_id}"), &[])
            .await
    }

    async fn leaderboard(&self, test_id: &str) -> Result<Vec<StudentResult>, ServiceError> {
        self.get_json(
            "leaderboard",
            "/api/leaderboard",
            &[("test_id", test_id.to_string())],
        )
        .await
    }

    async fn recompute(&self, attempt_id: &str) -> Result<(), ServiceError> {
        self.post_empty(
            "attempt",
            &format!("/api/attempts/{attempt_id}/recompute"),
            &[],
        )
        .await
    }

    async fn flag(&self, attempt_id: &str, reason: &str) -> Result<(), ServiceError> {
        // The service takes the reason as a query parameter, not a body.
        self.post_empty(
            "attempt",
            &format!("/api/attempts/{attempt_id}/flag"),
            &[("reason", reason.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoredesk_core::model::AttemptStatus;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_students() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"student_id": "s1", "name": "Ada Lovelace", "email": "ada@example.com"},
            {"student_id": "s2", "name": "Grace Hopper"}
        ]);
        Mock::given(method("GET"))
            .and(path("/api/students"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let students = service.students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Ada Lovelace");
        assert_eq!(students[1].email, None);
    }

    #[tokio::test]
    async fn attempts_accepts_bare_list_shape() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"attempt_id": "a1", "student_name": "Ada", "status": "SCORED", "score": 72}
        ]);
        Mock::given(method("GET"))
            .and(path("/api/attempts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let page = service.attempts(&AttemptFilter::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.attempts[0].score, Some(72));
    }

    #[tokio::test]
    async fn attempts_accepts_paged_shape() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "total": 120,
            "data": [{"attempt_id": "a1", "status": "INGESTED"}]
        });
        Mock::given(method("GET"))
            .and(path("/api/attempts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let page = service.attempts(&AttemptFilter::default()).await.unwrap();
        assert_eq!(page.total, 120);
        assert_eq!(page.attempts.len(), 1);
    }

    #[tokio::test]
    async fn attempts_sends_only_present_filter_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/attempts"))
            .and(query_param("status", "FLAGGED"))
            .and(query_param("search", "ada"))
            .and(query_param_is_missing("test_id"))
            .and(query_param_is_missing("has_duplicates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let filter = AttemptFilter {
            search: "ada".into(),
            status: Some(AttemptStatus::Flagged),
            test_id: String::new(),
            has_duplicates: None,
        };
        let page = service.attempts(&filter).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn detail_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/attempts/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Attempt not found"})),
            )
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let err = service.attempt_detail("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn error_detail_body_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leaderboard"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "database unavailable"})),
            )
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let err = service.leaderboard("t1").await.unwrap_err();
        match err {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn recompute_posts_to_attempt_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/attempts/a1/recompute"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Recomputed successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        service.recompute("a1").await.unwrap();
    }

    #[tokio::test]
    async fn flag_sends_reason_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/attempts/a1/flag"))
            .and(query_param("reason", "answer sheet mismatch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        service.flag("a1", "answer sheet mismatch").await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        // Port 9 (discard) is never bound in the test environment.
        let service = HttpScoringService::new("http://127.0.0.1:9");
        let err = service.students().await.unwrap_err();
        assert!(matches!(err, ServiceError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn undecodable_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let service = HttpScoringService::new(&server.uri());
        let err = service.tests().await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidResponse(_)), "got {err:?}");
    }
}
