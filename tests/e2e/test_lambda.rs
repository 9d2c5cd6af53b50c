use crate::e2e::helpers;

use helpers::{aws_mocks, build_controller, fixtures::RecordingTtsRepository, TestContext};
use polly_speech_lambda::controllers::InvocationResponse;
use polly_speech_lambda::infrastructure::repositories::PollyTtsRepository;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use test_context::test_context;

fn body(response: &InvocationResponse) -> Value {
    response.body_json().expect("Response body is not JSON")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_direct_invocation(ctx: &TestContext) {
    let response = ctx
        .controller
        .handle(json!({"text": "Hello world", "voice_id": "Matthew"}))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );

    let body = body(&response);
    assert_eq!(body["voice_id"], "Matthew");
    assert!(body["local_path"].is_string());
    assert!(body.get("s3_url").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_gateway_invocation(ctx: &TestContext) {
    let envelope = json!({
        "httpMethod": "POST",
        "path": "/synthesize",
        "body": json!({"text": "Hello world", "s3_key": "out/a.mp3"}).to_string()
    });

    let response = ctx.controller.handle(envelope).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body(&response)["s3_url"],
        "https://test-audio-bucket.s3.amazonaws.com/out/a.mp3"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_cache_between_direct_and_gateway_invocations(ctx: &TestContext) {
    let direct = ctx.controller.handle(json!({"text": "Warm reuse"})).await;
    let gateway = ctx
        .controller
        .handle(json!({"body": "{\"text\": \"Warm reuse\"}"}))
        .await;

    assert_eq!(body(&direct)["local_path"], body(&gateway)["local_path"]);
    assert_eq!(ctx.tts_repo.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serialize_the_lambda_response_envelope(ctx: &TestContext) {
    let response = ctx.controller.handle(json!({"text": ""})).await;

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({
            "statusCode": 400,
            "headers": {"Content-Type": "application/json"},
            "body": "{\"error\":\"Missing required parameter: text\"}"
        })
    );
}

#[tokio::test]
async fn it_should_hide_transport_faults_behind_generic_error() {
    let audio_dir = tempfile::tempdir().unwrap();
    let polly_client = Arc::new(aws_mocks::create_unreachable_polly_client());
    let controller = build_controller(
        Arc::new(PollyTtsRepository::new(polly_client)),
        None,
        &audio_dir,
    );

    let response = controller.handle(json!({"text": "Hello world"})).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response), json!({"error": "AWS service error occurred"}));

    let mut entries = tokio::fs::read_dir(audio_dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn it_should_fail_uploads_when_no_bucket_is_configured() {
    let audio_dir = tempfile::tempdir().unwrap();
    let tts_repo = Arc::new(RecordingTtsRepository::new(aws_mocks::mock_audio_bytes()));
    let controller = build_controller(tts_repo.clone(), None, &audio_dir);

    let response = controller
        .handle(json!({"text": "Hello world", "s3_key": "out/a.mp3"}))
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response), json!({"error": "AWS service error occurred"}));

    // Nothing was cached, so the next attempt calls the provider again
    controller
        .handle(json!({"text": "Hello world", "s3_key": "out/a.mp3"}))
        .await;
    assert_eq!(tts_repo.call_count(), 2);
}
