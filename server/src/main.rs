use clap::Parser;
use todo_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_server::telemetry::init()?;
    let config = ServerConfig::parse();
    let listener = config.bind().await?;
    todo_server::run(listener, config).await
}
