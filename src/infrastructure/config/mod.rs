use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    /// Bucket for optional uploads. Requests carrying a storage key fail when unset.
    pub s3_bucket: Option<String>,
    pub audio_dir: PathBuf,
    pub environment: Environment,
    pub log_format: LogFormat,
    // TTS Cache
    pub tts_cache_max_capacity: u64,
    pub tts_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_bucket: env::var("S3_BUCKET").ok().filter(|bucket| !bucket.is_empty()),
            audio_dir: env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            tts_cache_max_capacity: env::var("TTS_CACHE_MAX_CAPACITY")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
            tts_cache_ttl_secs: env::var("TTS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// True when running inside the Lambda execution environment
    pub fn is_lambda() -> bool {
        env::var("AWS_LAMBDA_RUNTIME_API").is_ok()
    }
}
