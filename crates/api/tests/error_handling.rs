//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no HTTP server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use mealplan_api::error::AppError;
use mealplan_api::store::StoreError;
use mealplan_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn preferences_not_set_returns_400() {
    let (status, json) = error_to_response(AppError::Core(CoreError::PreferencesNotSet)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "preferences_not_set");
    assert_eq!(json["code"], 400);
    assert_eq!(json["message"], "Preferences have not been set for this user");
}

#[tokio::test]
async fn recipe_not_found_returns_400_with_id() {
    let (status, json) = error_to_response(AppError::Core(CoreError::RecipeNotFound(17))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "recipe_not_found");
    assert_eq!(json["message"], "Recipe with id 17 not found");
}

#[tokio::test]
async fn invalid_rating_returns_400() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidRating(7))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_rating");
    assert_eq!(json["message"], "Rating must be between 1 and 5, got 7");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "authentication_failed");
    assert_eq!(json["code"], 401);
}

#[tokio::test]
async fn bad_request_returns_invalid_request() {
    let (status, json) = error_to_response(AppError::BadRequest("missing field".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
    assert_eq!(json["message"], "missing field");
}

#[tokio::test]
async fn store_error_returns_500_and_sanitizes_message() {
    let err = AppError::Store(StoreError::History("password=hunter2 rejected".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "internal_error");
    assert_eq!(json["code"], 500);
    assert_eq!(json["message"], "An internal error occurred");
    assert!(!json.to_string().contains("hunter2"));
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret detail".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
}
