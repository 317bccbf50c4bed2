use std::sync::Arc;
use std::time::Duration;

use client_blockchain_core::{ChainTransport, TransactionId, TransactionStatus, TransportError};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
use crate::error::{OnChainFailure, Result, SubmissionError};

/// Polls transaction status at a fixed interval until it settles.
///
/// Dropping the returned future cancels polling.
#[derive(Clone)]
pub struct ConfirmationPoller {
    transport: Arc<dyn ChainTransport>,
    timeout: Duration,
    interval: Duration,
}

impl ConfirmationPoller {
    pub fn new(transport: Arc<dyn ChainTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_timing(mut self, timeout: Duration, interval: Duration) -> Self {
        self.timeout = timeout;
        self.interval = interval;
        self
    }

    /// Wait until `id` is confirmed or finalized.
    ///
    /// Unknown status and transport failures count as pending; an execution
    /// error ends polling immediately.
    pub async fn poll_until_confirmed(&self, id: &TransactionId) -> Result<TransactionStatus> {
        let started = Instant::now();
        let mut last_error: Option<TransportError> = None;
        let mut queries = 0u32;

        loop {
            queries += 1;
            match self.transport.transaction_status(id).await {
                Ok(Some(status)) => {
                    if let Some(failure) = &status.error {
                        let failure = OnChainFailure::new(failure.clone());
                        warn!(transaction = %id, %failure, "transaction failed on chain");
                        return Err(SubmissionError::OnChainExecution {
                            transaction_id: id.clone(),
                            failure,
                        });
                    }
                    if status.is_settled() {
                        info!(
                            transaction = %id,
                            finalized = status.finalized,
                            queries,
                            "transaction confirmed"
                        );
                        return Ok(status);
                    }
                    debug!(transaction = %id, "transaction seen, not yet confirmed");
                }
                Ok(None) => debug!(transaction = %id, "transaction status not yet available"),
                Err(e) => {
                    warn!(transaction = %id, error = %e, "status query failed, retrying");
                    last_error = Some(e);
                }
            }

            if started.elapsed() >= self.timeout {
                return Err(SubmissionError::ConfirmationTimeout {
                    transaction_id: id.clone(),
                    timeout: self.timeout,
                    last_error,
                });
            }
            sleep(self.interval).await;
        }
    }
}
