mod article;
mod feed;
mod routes;
mod state;
mod store;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let source = feed::source_from_env().expect("feed source init failed");
    let store = store::store_from_env().expect("saved store init failed");
    let state = state::AppState::new(source, store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "newsstand listening");
    axum::serve(listener, app).await.expect("server failed");
}
