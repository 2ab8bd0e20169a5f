//! Subscription command.

use anyhow::Result;
use lintel_reader::SubscriptionClient;

/// Run the subscribe command.
pub async fn run(email: &str, source: &str, endpoint: &str) -> Result<()> {
    let client = SubscriptionClient::new(endpoint)?;

    client.subscribe(email, source, "/cli").await?;

    tracing::info!("Subscription sent for {}", email);

    Ok(())
}
