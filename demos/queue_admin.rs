use dataq_client::{DataqClient, DataqError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = DataqClient::with_config(
        DataqClient::builder()
            .host("127.0.0.1")
            .port(50000)
            .credentials("admin", "secret")
            .build(),
    )
    .await?;

    println!("Queues on the server:");
    let queues = client.list_queues().await?;
    if queues.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for name in &queues {
        match client.queue_stats(name).await {
            Ok(stats) => println!(
                "  {} - type: {}, messages: {}/{}, overflow: {}",
                stats.name, stats.kind, stats.messages, stats.size, stats.overflow
            ),
            Err(DataqError::Protocol { code, message }) => {
                println!("  {} - server refused: {} ({})", name, message.trim_end(), code)
            }
            Err(e) => return Err(e.into()),
        }
    }

    for name in &queues {
        println!("Clearing {}...", name);
        client.clear(name).await?;
    }

    println!("Done.");
    Ok(())
}
