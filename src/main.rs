mod cell;
mod grid;
mod routes;
mod services;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use crate::services::storage::{FileStore, KvStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(&data_dir));

    // Restore the last saved layout, if any.
    let restored = services::storage::load_layout(store.as_ref());
    match &restored {
        Some(cells) => tracing::info!(cells = cells.len(), dir = %data_dir.display(), "layout snapshot restored"),
        None => tracing::info!(dir = %data_dir.display(), "no layout snapshot; starting empty"),
    }

    let state = state::AppState::new(store, restored.unwrap_or_default());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "lineboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
