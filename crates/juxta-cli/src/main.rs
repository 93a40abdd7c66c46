//! Command-line client for a Juxta comparison service.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = juxta_cli::run().await;
    process::exit(exit_code);
}
