use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ai-assistant", post(handlers::run_assistant))
        .route("/health", get(handlers::health))
        .route("/models", get(handlers::list_models))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_application::testing::MockHub;
    use assistant_application::{ModelRegistry, PipelineConfig, RunAssistantUseCase};
    use assistant_domain::{ModelCatalog, ModelRole, Stage};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    const OCEAN_TEXT: &str = "Ocean currents are driven by wind, temperature and salinity. \
        Surface currents follow the prevailing winds while deep currents are driven by density \
        differences in a global conveyor belt that redistributes heat around the planet and \
        shapes regional climates over long periods of time.";

    fn ocean_hub() -> MockHub {
        MockHub::new(OCEAN_TEXT)
    }

    fn app(hub: Arc<MockHub>) -> (Router, AppState) {
        app_with(hub, PipelineConfig::default())
    }

    fn app_with(hub: Arc<MockHub>, config: PipelineConfig) -> (Router, AppState) {
        let registry = Arc::new(ModelRegistry::new(hub, ModelCatalog::default()));
        let use_case = Arc::new(RunAssistantUseCase::new(registry).with_config(config));
        let state = AppState::new(use_case, 4);
        (create_router(state.clone()), state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ai-assistant")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_full_pipeline_response() {
        let hub = Arc::new(ocean_hub());
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(
            router,
            post_json(r#"{"topic": "ocean currents", "question": "What drives ocean currents?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topic"], "ocean currents");
        let generated = body["generated_text"].as_str().unwrap();
        assert!(!generated.is_empty());
        assert!(!body["summary"].as_str().unwrap().is_empty());
        assert!(
            body["translated_summary_fr"]
                .as_str()
                .unwrap()
                .starts_with("[fr]")
        );
        assert_eq!(
            body["question_answer"]["question"],
            "What drives ocean currents?"
        );
        let answer = body["question_answer"]["answer"].as_str().unwrap();
        assert!(generated.contains(answer));
        let score = body["question_answer"]["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(hub.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_short_fields_are_rejected_without_model_calls() {
        let hub = Arc::new(ocean_hub());
        let (router, state) = app(Arc::clone(&hub));

        let (status, body) = send(router, post_json(r#"{"topic": "ab", "question": "ok"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["type"], "validation_error");
        assert_eq!(body["error"]["field"], "topic");
        assert_eq!(hub.calls().len(), 0);
        assert_eq!(hub.total_loads(), 0);
        assert!(state.registry().loaded_roles().is_empty());
    }

    #[tokio::test]
    async fn test_fields_are_trimmed_before_validation_and_echo() {
        let hub = Arc::new(ocean_hub());
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(
            router.clone(),
            post_json(r#"{"topic": "  a", "question": "What drives ocean currents?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["field"], "topic");

        let (status, body) = send(
            router,
            post_json(r#"{"topic": " ocean currents ", "question": "What drives ocean currents?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topic"], "ocean currents");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let hub = Arc::new(ocean_hub());
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(router, post_json(r#"{"topic": "ocean currents"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["field"], "question");
        assert_eq!(hub.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let hub = Arc::new(ocean_hub());
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(router, post_json(r#"{"topic": "ocean"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["type"], "validation_error");
        assert!(body["error"]["field"].is_null());
        assert_eq!(hub.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_stage_failure_is_500_with_stage_tag() {
        let hub = Arc::new(ocean_hub().failing_stage(Stage::Translate));
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(
            router,
            post_json(r#"{"topic": "ocean currents", "question": "What drives ocean currents?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["type"], "stage_error");
        assert_eq!(body["error"]["stage"], "translate");
        assert!(body.get("summary").is_none());
        // The runtime's own message never reaches the client
        assert!(
            !body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("runtime error")
        );
    }

    async fn empty_generation_response(
        config: PipelineConfig,
    ) -> (StatusCode, Value, Arc<MockHub>) {
        let hub = Arc::new(MockHub::new("   "));
        let (router, _) = app_with(Arc::clone(&hub), config);

        let (status, body) = send(
            router,
            post_json(r#"{"topic": "ocean currents", "question": "What drives ocean currents?"}"#),
        )
        .await;
        (status, body, hub)
    }

    #[tokio::test]
    async fn test_empty_generation_fails_at_summarize() {
        let (status, body, hub) = empty_generation_response(PipelineConfig::default()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["type"], "stage_error");
        assert_eq!(body["error"]["stage"], "summarize");
        assert!(!hub.calls().contains(&Stage::Translate));
        assert!(!hub.calls().contains(&Stage::Answer));
    }

    #[tokio::test]
    async fn test_empty_generation_fails_at_summarize_when_sequential() {
        let (status, body, hub) =
            empty_generation_response(PipelineConfig::default().with_parallel_branches(false))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["stage"], "summarize");
        assert!(!hub.calls().contains(&Stage::Translate));
    }

    #[tokio::test]
    async fn test_unavailable_model_is_503() {
        let hub = Arc::new(ocean_hub().failing_loads(ModelRole::Generator, usize::MAX));
        let (router, _) = app(Arc::clone(&hub));

        let (status, body) = send(
            router,
            post_json(r#"{"topic": "ocean currents", "question": "What drives ocean currents?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["type"], "model_unavailable");
        assert_eq!(body["error"]["role"], "generator");
    }

    #[tokio::test]
    async fn test_health_and_models_report_loaded_roles() {
        let hub = Arc::new(ocean_hub());
        let (router, state) = app(Arc::clone(&hub));

        let (status, health) = send(router.clone(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health, json!({"status": "ok", "models_loaded": []}));

        state.registry().summarizer().await.unwrap();

        let (_, health) = send(router.clone(), get("/health")).await;
        assert_eq!(health["models_loaded"], json!(["summarizer"]));

        let (status, models) = send(router, get("/models")).await;
        assert_eq!(status, StatusCode::OK);
        let models = models["models"].as_array().unwrap();
        assert_eq!(models.len(), 4);
        assert_eq!(models[1]["role"], "summarizer");
        assert_eq!(models[1]["model"], ModelCatalog::DEFAULT_SUMMARIZER);
        assert_eq!(models[1]["loaded"], true);
        assert_eq!(models[0]["loaded"], false);
    }

    #[tokio::test]
    async fn test_cancelled_run_is_503() {
        let hub = Arc::new(ocean_hub());
        let (_, state) = app(Arc::clone(&hub));
        state.shutdown.cancel();
        let router = create_router(state);

        let (status, body) = send(
            router,
            post_json(r#"{"topic": "ocean currents", "question": "What drives ocean currents?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["type"], "service_unavailable");
        assert_eq!(hub.calls().len(), 0);
    }
}
