use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

use crate::controllers::{InvocationResponse, TtsController};

/// Poll the Lambda runtime API and hand every event to the controller
pub async fn start_lambda_runtime(
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Lambda runtime loop");

    let handler = service_fn(move |event: LambdaEvent<Value>| {
        let controller = tts_controller.clone();
        async move {
            let (payload, context) = event.into_parts();
            let span = tracing::info_span!("invocation", request_id = %context.request_id);

            let response = controller.handle(payload).instrument(span).await;
            Ok::<InvocationResponse, lambda_runtime::Error>(response)
        }
    });

    lambda_runtime::run(handler)
        .await
        .map_err(|e| e as Box<dyn std::error::Error>)
}
