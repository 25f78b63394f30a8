use std::path::PathBuf;

use samvaad::{routes, state};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let upload_dir = std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"));

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("failed to create upload directory");

    let state = state::AppState::new(upload_dir);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "samvaad relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
