use mongodb::Client;
use std::time::Instant;

/// Result of a detailed MongoDB health probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database answered the probe
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Time the probe took, in milliseconds
    pub response_time_ms: u64,
}

/// Check MongoDB connectivity.
///
/// Backs readiness endpoints; returns `false` instead of an error so the
/// caller can translate it into an HTTP status directly.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let healthy = check_health(&client).await;
/// ```
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Check MongoDB connectivity and measure the round-trip time.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health_detailed};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let outcome = client.list_database_names().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
