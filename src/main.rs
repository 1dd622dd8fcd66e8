use n8n_mcp::api::N8nClient;
use n8n_mcp::mcp::WorkflowServer;
use n8n_mcp::options::ApiConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol stream, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ApiConfig::from_env();
    for var in config.missing() {
        tracing::error!("{} environment variable is not set; API requests will fail", var);
    }

    let client = N8nClient::new(&config)?;
    tracing::info!("Using n8n API at {}", client.api_base());

    WorkflowServer::new(client).serve_stdio().await?;
    Ok(())
}
