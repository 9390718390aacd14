//! Router-level tests: requests go through the full middleware stack.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use careerpath_config::ValidationConfig;
use careerpath_model::{
    classifier::FixedClassifier, error::ClassifierError, CareerPredictor, Classifier,
    ClassifierArtifact, RobustScaler, Scorer,
};
use careerpath_test_utils::fixtures::{identity_scaler_json, logistic_model_json, sample_student_json};
use careerpath_web::{router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:3000";

fn fixture_scaler() -> RobustScaler {
    serde_json::from_str(&identity_scaler_json()).unwrap()
}

fn fixture_scorer() -> Scorer {
    let artifact: ClassifierArtifact = serde_json::from_str(&logistic_model_json()).unwrap();
    Scorer::new(Arc::new(fixture_scaler()), artifact.into_classifier().unwrap())
}

fn app_with(scorer: Scorer, validation: ValidationConfig) -> Router {
    build_router(AppState::new(CareerPredictor::new(scorer), validation), ORIGIN).unwrap()
}

fn app() -> Router {
    app_with(fixture_scorer(), ValidationConfig::default())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn health_is_constant() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn health_ignores_artifact_state() {
    let app = app_with(Scorer::uninitialized(), ValidationConfig::default());
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn predict_returns_top_three() {
    let (status, body) = send(app(), post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::OK);

    let preds = body["predictions"].as_array().unwrap();
    assert_eq!(preds.len(), 3);
    let probs: Vec<f64> = preds.iter().map(|p| p["probability"].as_f64().unwrap()).collect();
    assert!(probs.windows(2).all(|w| w[0] >= w[1]));
    assert!(probs.iter().all(|p| (0.0..=100.0).contains(p)));
    assert!(preds.iter().all(|p| p["career"].is_string()));
}

#[tokio::test]
async fn predict_is_reproducible() {
    let (_, a) = send(app(), post_json("/predict", &sample_student_json())).await;
    let (_, b) = send(app(), post_json("/predict", &sample_student_json())).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn predict_accepts_numeric_strings() {
    let mut body = sample_student_json();
    body["math_score"] = json!("90");
    body["gender"] = json!("1");
    let (status, _) = send(app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_field_is_422() {
    let mut body = sample_student_json();
    body.as_object_mut().unwrap().remove("weekly_study_hours");
    let (status, body) = send(app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("weekly_study_hours"));
}

#[tokio::test]
async fn wrong_type_is_422() {
    let mut body = sample_student_json();
    body["part_time_job"] = json!(0.5);
    let (status, _) = send(app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"gender\": 1,"))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn out_of_range_scores_are_permissive_by_default() {
    let mut body = sample_student_json();
    body["math_score"] = json!(140);
    let (status, _) = send(app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn out_of_range_scores_rejected_when_enforced() {
    let app = app_with(fixture_scorer(), ValidationConfig { enforce_score_range: true });
    let mut body = sample_student_json();
    body["math_score"] = json!(140);
    let (status, body) = send(app, post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("math_score"));
}

#[tokio::test]
async fn scaler_mismatch_lists_missing_features() {
    let mut scaler = fixture_scaler();
    if let Some(names) = scaler.feature_names_in.as_mut() {
        names[0] = "iq".to_string();
        names[1] = "shoe_size".to_string();
    }
    let artifact: ClassifierArtifact = serde_json::from_str(&logistic_model_json()).unwrap();
    let scorer = Scorer::new(Arc::new(scaler), artifact.into_classifier().unwrap());
    let app = app_with(scorer, ValidationConfig::default());

    let (status, body) = send(app, post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "Missing features for scaling: [\"iq\", \"shoe_size\"]"})
    );
}

#[tokio::test]
async fn overflowing_scores_fail_in_scaling() {
    let mut body = sample_student_json();
    body["math_score"] = json!(1e308);
    body["physics_score"] = json!(1e308);
    let (status, body) = send(app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "Error in data scaling: Input contains a non-finite value for feature total_score"})
    );
}

/// Classifier whose scoring call always panics.
struct PanickingClassifier {
    classes: Vec<i64>,
}

impl Classifier for PanickingClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        17
    }

    fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        panic!("classifier exploded")
    }
}

#[tokio::test]
async fn handler_panic_is_json_500() {
    let classifier = PanickingClassifier { classes: (0..16).collect() };
    let scorer = Scorer::new(Arc::new(fixture_scaler()), Arc::new(classifier));
    let app = app_with(scorer, ValidationConfig::default());
    let (status, body) = send(app, post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "classifier exploded"}));
}

#[tokio::test]
async fn uninitialized_scorer_is_500() {
    let app = app_with(Scorer::uninitialized(), ValidationConfig::default());
    let (status, body) = send(app, post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Error in data scaling: Scaler not initialized"}));
}

#[tokio::test]
async fn unmapped_classes_are_500() {
    let classifier = FixedClassifier::new(vec![100, 101], vec![0.4, 0.6], 17);
    let scorer = Scorer::new(Arc::new(fixture_scaler()), Arc::new(classifier));
    let app = app_with(scorer, ValidationConfig::default());
    let (status, body) = send(app, post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "Error in making prediction: Could not generate valid career predictions"})
    );
}

#[tokio::test]
async fn fixed_probabilities_rank_and_round() {
    let mut probs = vec![0.0; 16];
    probs[5] = 0.5;
    probs[14] = 0.3;
    probs[0] = 0.123456;
    probs[9] = 0.076544;
    let classifier = FixedClassifier::new((0..16).collect(), probs, 17);
    let scorer = Scorer::new(Arc::new(fixture_scaler()), Arc::new(classifier));
    let app = app_with(scorer, ValidationConfig::default());

    let (status, body) = send(app, post_json("/predict", &sample_student_json())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"predictions": [
            {"career": "Doctor", "probability": 50.0},
            {"career": "Scientist", "probability": 30.0},
            {"career": "Software Engineer", "probability": 12.35}
        ]})
    );
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let req = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
