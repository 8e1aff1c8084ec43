// ABOUTME: Binary entry point for the kwdmod command line tool
// ABOUTME: Parses arguments, loads configuration and runs the selected command

use anyhow::Result;
use kwdmod::cli::{App, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();
    let app = App::from_args(&args)?;

    app.run(args).await?;

    Ok(())
}
