//! Orders source: fetches the current order set for one run.

use std::sync::Arc;

use herald_common::diag::DiagnosticSink;
use herald_common::error::HeraldError;
use herald_common::transport::Transport;
use herald_common::types::Order;

/// Fetches orders from the configured source URL.
pub struct OrdersSource {
    transport: Arc<dyn Transport>,
    url: String,
    diag: Arc<dyn DiagnosticSink>,
}

impl OrdersSource {
    pub fn new(transport: Arc<dyn Transport>, url: String, diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            transport,
            url,
            diag,
        }
    }

    /// Retrieve the current order set.
    ///
    /// Never fails the caller: transport errors, non-2xx responses, and parse
    /// failures all come back as an empty set with one "error" diagnostic. A
    /// successful fetch with zero orders is a distinct informational record —
    /// the business wants to know when the order count is none.
    pub async fn fetch_orders(&self) -> Vec<Order> {
        match self.try_fetch().await {
            Ok(orders) => {
                if orders.is_empty() {
                    self.diag.record("Zero orders found at the orders source");
                    tracing::info!(url = %self.url, "orders source returned zero orders");
                } else {
                    tracing::info!(count = orders.len(), "fetched orders");
                }
                orders
            }
            Err(e) => {
                self.diag.record(&format!("Error fetching orders: {e}"));
                tracing::warn!(url = %self.url, error = %e, "order fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Order>, HeraldError> {
        let body = self.transport.get_json(&self.url).await?;
        let raw = body.as_array().ok_or_else(|| {
            HeraldError::MalformedData("orders response is not a JSON array".to_string())
        })?;

        raw.iter()
            .map(|value| {
                serde_json::from_value::<Order>(value.clone())
                    .map_err(|e| HeraldError::MalformedData(format!("unreadable order: {e}")))
            })
            .collect()
    }
}
