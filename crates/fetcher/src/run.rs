//! Single-run orchestration: fetch, process each order in sequence, then
//! post the whole updated batch in one call.

use std::sync::Arc;
use std::time::Duration;

use herald_common::config::AppConfig;
use herald_common::diag::{DiagnosticSink, FileSink};
use herald_common::transport::{HttpTransport, Transport};
use herald_engine::processor::OrderProcessor;
use herald_notifier::alerts::AlertDelivery;
use herald_notifier::updates::UpdateSink;

use crate::fetch::OrdersSource;

/// One-shot pipeline over injected collaborators.
pub struct Herald {
    source: OrdersSource,
    processor: OrderProcessor,
    updates: UpdateSink,
    diag: Arc<dyn DiagnosticSink>,
}

impl Herald {
    /// Wire the pipeline over the given transport and diagnostic sink.
    pub fn new(
        transport: Arc<dyn Transport>,
        diag: Arc<dyn DiagnosticSink>,
        config: &AppConfig,
    ) -> Self {
        let alerts = Arc::new(AlertDelivery::new(
            transport.clone(),
            config.alerts_url.clone(),
            diag.clone(),
        ));

        Self {
            source: OrdersSource::new(transport.clone(), config.orders_url.clone(), diag.clone()),
            processor: OrderProcessor::new(alerts, diag.clone()),
            updates: UpdateSink::new(transport, config.update_url.clone(), diag.clone()),
            diag,
        }
    }

    /// Wire the pipeline with the production transport and file sink.
    pub fn from_config(config: &AppConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(Duration::from_secs(
            config.http_timeout_secs,
        )));
        let diag = Arc::new(FileSink::new(config.diag_log_path.clone()));
        Self::new(transport, diag, config)
    }

    /// Execute one run: fetch → process sequentially → batch update.
    ///
    /// Every failure is swallowed at its own boundary and recorded in the
    /// diagnostic sink; the run itself always completes. The update call is
    /// skipped entirely when there is nothing to post.
    pub async fn run_once(&self) {
        self.diag.record("Start of run");

        let orders = self.source.fetch_orders().await;

        let mut updated = Vec::with_capacity(orders.len());
        for order in &orders {
            updated.push(self.processor.process_order(order).await);
        }

        if !updated.is_empty() {
            self.updates.post_updated_orders(&updated).await;
        }

        tracing::info!(orders = updated.len(), "run complete");
        self.diag.record("End of run");
    }
}
