use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    actionchain_cli::cli::run().await
}
