//! Network actor - runs fetches in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::Transport;

/// Network actor that processes fetch commands
pub struct NetworkActor<T: Transport> {
    transport: Arc<T>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<T: Transport> NetworkActor<T> {
    pub fn new(transport: T, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            transport: Arc::new(transport),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Fetch { id, label, path, params }) => {
                            let response_tx = self.response_tx.clone();
                            let transport = Arc::clone(&self.transport);

                            // One attempt, no retry. In-flight fetches are never cancelled.
                            self.active_requests.spawn(async move {
                                tracing::info!(id, label = %label, path = %path, ?params, "Executing fetch");
                                let start = Instant::now();
                                let result = transport.get(&path, &params).await;
                                let time_ms = start.elapsed().as_millis() as u64;

                                let response = match result {
                                    Ok(payload) => {
                                        tracing::info!(id, time_ms, "Fetch completed");
                                        NetworkResponse::Success { id, label, payload, time_ms }
                                    }
                                    Err(error) => {
                                        tracing::warn!(id, time_ms, error = %error, "Fetch failed");
                                        NetworkResponse::Error { id, label, error, time_ms }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - results are delivered by the tasks themselves
                }
            }
        }
    }
}
