use polly_speech_lambda::controllers::TtsController;
use polly_speech_lambda::domain::tts::{SynthesisCache, TtsService};
use polly_speech_lambda::infrastructure::http::build_router;
use polly_speech_lambda::infrastructure::repositories::{StorageRepository, TtsRepository};
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;

use api_client::TestClient;
use fixtures::{RecordingStorageRepository, RecordingTtsRepository};

pub struct TestContext {
    pub client: TestClient,
    pub controller: Arc<TtsController>,
    pub tts_repo: Arc<RecordingTtsRepository>,
    pub storage_repo: Arc<RecordingStorageRepository>,
    pub audio_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let audio_dir = tempfile::tempdir().expect("Failed to create audio dir");

            let tts_repo = Arc::new(RecordingTtsRepository::new(aws_mocks::mock_audio_bytes()));
            let storage_repo = Arc::new(RecordingStorageRepository::new());

            let controller = build_controller(
                tts_repo.clone(),
                Some(storage_repo.clone() as Arc<dyn StorageRepository>),
                &audio_dir,
            );

            // Start server
            let app = build_router(controller.clone());
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                controller,
                tts_repo,
                storage_repo,
                audio_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Audio files are removed when the TempDir drops
        }
    }
}

/// Wire a controller the same way main does, with injectable repositories
pub fn build_controller(
    tts_repo: Arc<dyn TtsRepository>,
    storage_repo: Option<Arc<dyn StorageRepository>>,
    audio_dir: &TempDir,
) -> Arc<TtsController> {
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        storage_repo,
        audio_dir.path().to_path_buf(),
        SynthesisCache::default(),
    ));

    Arc::new(TtsController::new(tts_service))
}
