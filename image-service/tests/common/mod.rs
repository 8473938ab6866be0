use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Claims;
use auth::TokenConfig;
use auth::TokenIssuer;
use auth::TokenVerifier;
use image_service::domain::image::models::Image;
use image_service::domain::image::models::OwnerId;
use image_service::domain::image::models::Page;
use image_service::domain::image::ports::ImageRepository;
use image_service::domain::image::service::ImageService;
use image_service::image::errors::ImageError;
use image_service::inbound::http::create_router;
use image_service::inbound::http::router::HttpLimits;
use image_service::outbound::storage::LocalImageStorage;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "imager-test";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Image records kept in memory, ordered and paged like the SQL query
#[derive(Default)]
pub struct InMemoryImageRepository {
    images: Mutex<Vec<Image>>,
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, image: &Image) -> Result<(), ImageError> {
        let mut images = self.images.lock().expect("Repository lock poisoned");
        if images.iter().any(|existing| existing.filename == image.filename) {
            return Err(ImageError::Database(format!(
                "duplicate filename {}",
                image.filename
            )));
        }
        images.push(image.clone());
        Ok(())
    }

    async fn find_by_owner(&self, owner: OwnerId, page: Page) -> Result<Vec<Image>, ImageError> {
        let images = self.images.lock().expect("Repository lock poisoned");

        let mut owned: Vec<Image> = images
            .iter()
            .filter(|image| image.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.filename.cmp(&b.filename));

        let limit = page.limit.map_or(usize::MAX, |l| l.get() as usize);
        Ok(owned
            .into_iter()
            .skip(page.offset as usize)
            .take(limit)
            .collect())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub storage_dir: TempDir,
    token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_config = Arc::new(
            TokenConfig::new(TEST_SECRET, TEST_ISSUER, Duration::from_secs(3600))
                .expect("Valid token config"),
        );

        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let storage = Arc::new(
            LocalImageStorage::open(storage_dir.path())
                .await
                .expect("Storage dir exists"),
        );
        let repository = Arc::new(InMemoryImageRepository::default());
        let image_service = Arc::new(ImageService::new(repository, storage));

        let router = create_router(
            image_service,
            Arc::new(TokenVerifier::new(Arc::clone(&token_config))),
            HttpLimits {
                request_timeout: Duration::from_secs(30),
                max_upload_bytes: MAX_UPLOAD_BYTES,
            },
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            storage_dir,
            token_issuer: TokenIssuer::new(token_config),
        }
    }

    /// Bearer header value for a freshly issued token
    pub fn bearer(&self, id: u64, login: &str) -> String {
        let id = NonZeroU64::new(id).expect("Test ids are positive");
        let token = self.token_issuer.issue(id, login).expect("Token signs");
        format!("Bearer {}", token)
    }

    /// Bearer header value for arbitrary claims signed with the test secret
    pub fn bearer_for_claims(&self, claims: &Claims) -> String {
        let token = self.token_issuer.sign(claims).expect("Token signs");
        format!("Bearer {}", token)
    }

    pub async fn list_images(&self, authorization: &str, query: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/images{}", self.address, query))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn upload_image(
        &self,
        authorization: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/images", self.address))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut files: Vec<String> = std::fs::read_dir(self.storage_dir.path())
            .expect("Storage dir readable")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        files
    }
}

pub fn image_form(filename: &str, content_type: &str, data: &[u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(data.to_vec())
        .file_name(filename.to_string())
        .mime_str(content_type)
        .expect("Valid mime type");
    reqwest::multipart::Form::new().part("image", part)
}
