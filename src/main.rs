mod app;
mod cli;
mod config;
mod logging;
mod mcp;
mod tools;
mod utils;


use crate::cli::Args;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    app::server::run(Args::parse()).await
}
