use std::env;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crypto_news::service::command::news as news_cmd;
use crypto_news::service::storage::MongoStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let text = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        println!("{}", news_cmd::help_text());
        return Ok(());
    }

    info!("Connecting to MongoDB...");
    let store = MongoStore::from_env().await?;

    let content = news_cmd::handle(&text, &store)
        .await
        .map_err(|err| anyhow!(err))?;
    println!("{content}");

    Ok(())
}
