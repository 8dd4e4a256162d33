pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/documents",
            post(handlers::handle_analyze_documents),
        )
        .route("/api/v1/parse/resume", post(handlers::handle_parse_resume))
        .route("/api/v1/parse/job", post(handlers::handle_parse_job))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::analysis::engine::{EngineConfig, KeywordCompatibilityScorer};
    use crate::analysis::vocabulary::Vocabulary;

    /// Create a test server with the full router
    fn create_test_server() -> TestServer {
        let scorer =
            KeywordCompatibilityScorer::new(Arc::new(Vocabulary::default()), EngineConfig::default());
        let app = build_router(AppState {
            scorer: Arc::new(scorer),
        });
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-fit-api");
    }

    #[tokio::test]
    async fn test_analyze_text_pair() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/analyze")
            .json(&json!({
                "resume_text": "Python developer. Experience: 4 years with Django and PostgreSQL.",
                "job_text": "Backend developer\nRequirements: Python, PostgreSQL, Docker",
                "job_title": "Backend developer"
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["job"]["title"], "Backend developer");
        let pct = body["result"]["compatibility_percentage"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&pct));
        let table = body["result"]["skills_table"].as_array().unwrap();
        assert_eq!(table.len(), body["job"]["skills"].as_array().unwrap().len());

        let keys: Vec<&String> = body["result"]["breakdown"].as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["required_skills", "preferred_skills", "experience", "education", "soft_skills"]
        );
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_job() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/analyze")
            .json(&json!({ "resume_text": "Rust developer", "job_text": "   " }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_allows_empty_resume() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/analyze")
            .json(&json!({ "resume_text": "", "job_text": "Requirements: Rust, Kafka" }))
            .await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(
            body["result"]["breakdown"]["required_skills"]["not_specified"],
            true
        );
    }

    #[tokio::test]
    async fn test_analyze_documents_reference_scenario() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/analyze/documents")
            .json(&json!({
                "resume": { "skills": ["Python", "SQL"] },
                "job": {
                    "raw_text": "Python SQL Docker Kubernetes AWS",
                    "skills": ["Python", "SQL", "Docker", "Kubernetes", "AWS"]
                }
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["compatibility_percentage"], 53.33);
        assert_eq!(body["skills_table"][2]["status"], "missing");
        assert_eq!(body["gaps"][0]["category"], "skills");
    }

    #[tokio::test]
    async fn test_analyze_documents_rejects_empty_job_text() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/analyze/documents")
            .json(&json!({ "resume": {}, "job": { "skills": ["Rust"] } }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_parse_endpoints() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/parse/resume")
            .json(&json!({ "text": "Skills: Rust, Docker\nEducation: MIT, bachelor" }))
            .await;
        response.assert_status_ok();
        let resume = response.json::<Value>();
        let skills: Vec<&str> = resume["skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(skills.contains(&"Rust"));
        assert!(skills.contains(&"Docker"));

        let response = server
            .post("/api/v1/parse/job")
            .json(&json!({ "text": "We are hiring a Go engineer\nRequirements: 3+ years of Go" }))
            .await;
        response.assert_status_ok();
        let job = response.json::<Value>();
        assert_eq!(job["title"], "We are hiring a Go engineer");
        assert_eq!(job["experience_required"], "3+ years");

        let response = server
            .post("/api/v1/parse/job")
            .json(&json!({ "text": "" }))
            .await;
        response.assert_status_bad_request();
    }
}
