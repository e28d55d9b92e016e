#[tokio::main]
async fn main() -> std::io::Result<()> {
    duel_server::run_with_config().await
}
