use polly_speech_lambda::domain::tts::{SynthesisCache, TtsService};
use polly_speech_lambda::infrastructure::config::{Config, LogFormat};
use polly_speech_lambda::infrastructure::http::start_http_server;
use polly_speech_lambda::infrastructure::lambda::start_lambda_runtime;
use polly_speech_lambda::infrastructure::repositories::{
    PollyTtsRepository, S3StorageRepository, StorageRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;
    let lambda_mode = Config::is_lambda();

    // Initialize logging
    init_logging(&config, lambda_mode);

    tracing::info!(
        lambda_mode,
        development = config.is_development(),
        audio_dir = %config.audio_dir.display(),
        "Starting polly-speech-lambda"
    );

    // Create AWS clients (reused across invocations)
    tracing::info!("Initializing AWS clients with region: {}", config.aws_region);

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    tracing::info!(
        region = ?aws_config.region(),
        "AWS configuration loaded"
    );

    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let storage_repo: Option<Arc<dyn StorageRepository>> = match &config.s3_bucket {
        Some(bucket) => {
            tracing::info!(bucket = %bucket, "S3 uploads enabled");
            let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
            Some(Arc::new(S3StorageRepository::new(s3_client, bucket.clone())))
        }
        None => {
            tracing::warn!("S3_BUCKET not set, requests with a storage key will fail");
            None
        }
    };

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories
    let tts_repo = Arc::new(PollyTtsRepository::new(polly_client));

    // 2. Cache and service (persist across warm invocations)
    let cache = SynthesisCache::new(
        config.tts_cache_max_capacity,
        Duration::from_secs(config.tts_cache_ttl_secs),
    );
    tracing::info!(
        max_capacity = config.tts_cache_max_capacity,
        ttl_secs = config.tts_cache_ttl_secs,
        "TTS cache initialized"
    );
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        storage_repo,
        config.audio_dir.clone(),
        cache,
    ));

    // 3. Controller
    let tts_controller = Arc::new(polly_speech_lambda::controllers::TtsController::new(
        tts_service,
    ));

    if lambda_mode {
        start_lambda_runtime(tts_controller).await?;
    } else {
        start_http_server(config, tts_controller).await?;
    }

    Ok(())
}

fn init_logging(config: &Config, lambda_mode: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "polly_speech_lambda=debug,tower_http=debug".into());

    if lambda_mode || config.log_format == LogFormat::Json {
        // CloudWatch renders ANSI escapes literally
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
