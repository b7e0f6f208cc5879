#[tokio::main]
async fn main() {
    if let Err(e) = cable_scan::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
