#[tokio::main]
async fn main() -> anyhow::Result<()> {
  trainer_bot_lib::run().await
}
