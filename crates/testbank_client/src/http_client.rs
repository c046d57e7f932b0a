//! HTTP client for the Test Bank backend.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use testbank_core::{
    PublishConfig, Submission, SubmissionResult, TestRecord, TestStatistics, TestSummary,
};
use tracing::{debug, info};
use url::Url;

use crate::ClientError;
use crate::envelope::{Envelope, ErrorBody};
use crate::request::{BulkDelete, CreateTest, UpdateTest};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Client for the `/api/tests` endpoints.
///
/// Requests are sent once; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct TestBankClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Builder for TestBankClient.
#[derive(Debug)]
pub struct TestBankClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl TestBankClient {
    /// Create a new builder for TestBankClient.
    pub fn builder() -> TestBankClientBuilder {
        TestBankClientBuilder {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists the tests owned by `user_id`, newest first.
    pub async fn list_tests(&self, user_id: &str) -> Result<Vec<TestSummary>, ClientError> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut().append_pair("userId", user_id);
        self.send(self.http.get(url)).await?.into_data()
    }

    /// Creates a test.
    pub async fn create_test(&self, body: &CreateTest) -> Result<TestRecord, ClientError> {
        let url = self.endpoint(&[])?;
        self.send(self.http.post(url).json(body)).await?.into_data()
    }

    /// Fetches one test with its questions and choices.
    pub async fn get_test(&self, id: &str) -> Result<TestRecord, ClientError> {
        let url = self.endpoint(&[id])?;
        self.send(self.http.get(url)).await?.into_data()
    }

    /// Replaces the questions of a test.
    pub async fn update_test(&self, id: &str, body: &UpdateTest) -> Result<TestRecord, ClientError> {
        let url = self.endpoint(&[id])?;
        self.send(self.http.put(url).json(body)).await?.into_data()
    }

    /// Publishes a test with the given configuration.
    ///
    /// The configuration is sent as is; call [`PublishConfig::validate`]
    /// first.
    pub async fn publish_test(
        &self,
        id: &str,
        config: &PublishConfig,
    ) -> Result<TestRecord, ClientError> {
        let url = self.endpoint(&[id, "publish"])?;
        self.send(self.http.put(url).json(config)).await?.into_data()
    }

    /// Submits answers and returns the graded result.
    pub async fn submit_answers(
        &self,
        id: &str,
        submission: &Submission,
    ) -> Result<SubmissionResult, ClientError> {
        let url = self.endpoint(&[id, "submit"])?;
        self.send(self.http.post(url).json(submission))
            .await?
            .into_data()
    }

    /// Fetches submission statistics for a test.
    pub async fn statistics(&self, id: &str) -> Result<TestStatistics, ClientError> {
        let url = self.endpoint(&[id, "statistics"])?;
        self.send(self.http.get(url)).await?.into_data()
    }

    /// Deletes one test.
    pub async fn delete_test(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&[id])?;
        let envelope: Envelope<serde_json::Value> = self.send(self.http.delete(url)).await?;
        if let Some(message) = envelope.message {
            debug!("{}", message);
        }
        Ok(())
    }

    /// Deletes several tests and returns how many were removed.
    pub async fn bulk_delete(&self, ids: &[String]) -> Result<u64, ClientError> {
        let url = self.endpoint(&["bulk-delete"])?;
        let body = BulkDelete { test_ids: ids };
        let envelope: Envelope<serde_json::Value> =
            self.send(self.http.post(url).json(&body)).await?;
        envelope
            .count
            .ok_or_else(|| ClientError::invalid_response("response has no count"))
    }

    /// Builds `<base>/api/tests/<segments...>`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "tests"])
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let request = request.build()?;
        let method: Method = request.method().clone();
        info!("{} {}", method, request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = ErrorBody::message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            debug!(status = status.as_u16(), "{}", message);
            return Err(if status == StatusCode::NOT_FOUND {
                ClientError::NotFound(message)
            } else {
                ClientError::api(status.as_u16(), message)
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| ClientError::invalid_response(e.to_string()))?;

        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(ClientError::api(status.as_u16(), message));
        }

        Ok(envelope)
    }
}

impl TestBankClientBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set timeout for HTTP requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the TestBankClient.
    pub fn build(self) -> Result<TestBankClient, ClientError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(self.base_url));
        }

        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(TestBankClient { http, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use testbank_core::{Answer, ChoiceData, QuestionData, TestStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TestBankClient {
        TestBankClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    fn record_json() -> serde_json::Value {
        json!({
            "id": "t1",
            "title": "Math",
            "status": "draft",
            "userId": "u1",
            "questions": [{
                "id": "q1",
                "text": "What is 2+2?",
                "choices": [
                    { "id": "c1", "text": "Three", "isCorrect": false },
                    { "id": "c2", "text": "Four", "isCorrect": true }
                ]
            }]
        })
    }

    #[test]
    fn builder_default_values() {
        let client = TestBankClient::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3001/");
    }

    #[test]
    fn builder_rejects_bad_urls() {
        for url in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
            let result = TestBankClient::builder().base_url(url).build();
            assert!(
                matches!(result, Err(ClientError::InvalidUrl(_))),
                "expected {url} to be rejected"
            );
        }
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_ids() {
        let client = TestBankClient::builder()
            .base_url("https://example.com/backend/")
            .build()
            .unwrap();
        let url = client.endpoint(&["a b", "publish"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/backend/api/tests/a%20b/publish"
        );
    }

    #[tokio::test]
    async fn list_tests_sends_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .and(query_param("userId", "u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": "t1",
                    "title": "Math",
                    "status": "published",
                    "createdAt": "2025-01-01T00:00:00.000Z",
                    "_count": { "questions": 2 }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tests = client(&server).list_tests("u1").await.unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].status, TestStatus::Published);
        assert_eq!(tests[0].count.questions, 2);
    }

    #[tokio::test]
    async fn create_test_posts_payload() {
        let server = MockServer::start().await;
        let questions = vec![QuestionData {
            text: "What is 2+2?".to_string(),
            choices: vec![
                ChoiceData {
                    text: "Three".to_string(),
                    is_correct: false,
                },
                ChoiceData {
                    text: "Four".to_string(),
                    is_correct: true,
                },
            ],
        }];

        Mock::given(method("POST"))
            .and(path("/api/tests"))
            .and(body_json(json!({
                "title": "Math",
                "status": "draft",
                "userId": "u1",
                "questions": [{
                    "text": "What is 2+2?",
                    "choices": [
                        { "text": "Three", "isCorrect": false },
                        { "text": "Four", "isCorrect": true }
                    ]
                }]
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "success": true, "data": record_json() })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server)
            .create_test(&CreateTest::draft("Math", "u1", questions.clone()))
            .await
            .unwrap();
        assert_eq!(record.id, "t1");
        assert_eq!(record.question_data(), questions);
    }

    #[tokio::test]
    async fn get_test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "success": false, "error": "Test not found" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_test("missing").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref m) if m == "Test not found"));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tests/t1"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "success": false, "error": "Internal server error" })),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .update_test("t1", &UpdateTest::questions(vec![]))
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_uses_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests/t1/statistics"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server).statistics("t1").await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).get_test("t1").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn publish_sends_config() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tests/t1/publish"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "id": "t1", "title": "Final", "status": "published", "userId": "u1" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server)
            .publish_test("t1", &PublishConfig::new("Final"))
            .await
            .unwrap();
        assert_eq!(record.status, TestStatus::Published);
        assert!(record.questions.is_empty());

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent["title"], "Final");
        assert_eq!(sent["configType"], "test");
    }

    #[tokio::test]
    async fn submit_answers_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tests/t1/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "submissionId": "s1",
                    "correctCount": 1,
                    "totalQuestions": 1,
                    "score": 100,
                    "detailedAnswers": [{
                        "questionId": "q1",
                        "chosenChoiceId": "c2",
                        "isCorrect": true,
                        "correctChoiceId": "c2"
                    }]
                }
            })))
            .mount(&server)
            .await;

        let submission = Submission {
            user_id: "u2".to_string(),
            answers: vec![Answer {
                question_id: "q1".to_string(),
                chosen_choice_id: Some("c2".to_string()),
            }],
        };
        let result = client(&server)
            .submit_answers("t1", &submission)
            .await
            .unwrap();
        assert_eq!(result.score, 100);
        assert!(result.detailed_answers[0].is_correct);
    }

    #[tokio::test]
    async fn delete_and_bulk_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tests/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Test deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tests/bulk-delete"))
            .and(body_json(json!({ "testIds": ["t2", "t3"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "count": 2 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.delete_test("t1").await.unwrap();
        let count = client
            .bulk_delete(&["t2".to_string(), "t3".to_string()])
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn network_failure_maps_to_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = TestBankClient::builder()
            .base_url(uri)
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client.get_test("t1").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
