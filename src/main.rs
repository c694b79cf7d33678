use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stowage::{
    build_router, AppState, ChunkUploader, Config, ProgressTracker, S3StoragePort, SessionManager,
    SessionStore, StoragePort, TimeoutStoragePort,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(Config::from_env());
    if config.bucket.is_empty() {
        return Err(anyhow::anyhow!("STOWAGE_BUCKET must be set"));
    }

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let client = aws_sdk_s3::Client::new(&aws_config);
    let s3 = Arc::new(S3StoragePort::new(
        client,
        config.bucket.clone(),
        config.public_url_base.clone(),
    ));
    let port: Arc<dyn StoragePort> =
        Arc::new(TimeoutStoragePort::new(s3, config.request_timeout));

    let store = Arc::new(SessionStore::new());
    let manager = Arc::new(SessionManager::new(
        store.clone(),
        port.clone(),
        config.clone(),
    ));
    let uploader = Arc::new(ChunkUploader::new(store.clone(), port.clone()));
    let tracker = Arc::new(ProgressTracker::new(store));

    SessionManager::spawn_idle_sweeper(manager.clone());

    let router = build_router(AppState {
        manager,
        uploader,
        tracker,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, bucket = %config.bucket, "stowage listening");
    axum::serve(listener, router).await?;

    Ok(())
}
