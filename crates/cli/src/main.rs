use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dealscout_cli::run().await
}
