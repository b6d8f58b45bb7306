//! BSDS500 Dataset Fetch CLI Tool
//!
//! Command-line interface for downloading and preparing the BSDS500
//! edge-detection dataset using the bsds-fetch library.

#[cfg(feature = "cli")]
use bsds_fetch::cli;

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
