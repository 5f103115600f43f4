use ytmate_server::ServerConfig;

const DEFAULT_LOG_FILTER: &str = "ytmate_server=info,ytmate_core=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        )
        .init();

    if let Err(error) = ytmate_server::run(ServerConfig::from_env()).await {
        eprintln!("Server error: {error}");
        std::process::exit(1);
    }
}
