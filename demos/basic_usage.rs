use dataq_client::DataqClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = DataqClient::connect("127.0.0.1", 50000).await?;

    println!("Checking server health...");
    if client.health_check().await {
        println!("Server is reachable!");
    } else {
        println!("Server is not reachable");
        return Ok(());
    }

    println!("\nPushing a message...");
    client.push("jobs", "Hello, DataQ!").await?;

    println!("\nPeeking at the queue...");
    let message = client.peek("jobs").await?;
    println!("Next message: {}", message);

    println!("\nQueue statistics:");
    let stats = client.queue_stats("jobs").await?;
    println!(
        "  {} ({}) - {}/{} messages, overflow: {}",
        stats.name, stats.kind, stats.messages, stats.size, stats.overflow
    );

    println!("\nPopping the message...");
    let message = client.pop("jobs").await?;
    println!("Popped: {}", message);

    Ok(())
}
