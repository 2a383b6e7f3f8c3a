use mcp_context_store::config::ServerConfig;
use mcp_context_store::corpus;
use mcp_context_store::server::McpServer;
use mcp_context_store::service::ContextService;
use mcp_context_store::store;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr; stdout carries the JSON-RPC channel.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let storage = match store::build_storage(&config).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("storage initialization failed: {e}");
            std::process::exit(1);
        }
    };
    let service = ContextService::new(storage);

    if let Some(path) = &config.corpus_path {
        if let Err(e) = corpus::seed_from_file(&service, path).await {
            tracing::error!("corpus seeding failed: {e}");
            std::process::exit(1);
        }
    }

    let mut server = McpServer::new(service);
    if let Err(e) = server.run().await {
        tracing::error!("fatal server error: {e}");
        std::process::exit(1);
    }
}
