//! The uploader service: wires configuration, filters, client, queue, and
//! worker together.

use crate::body::{FilterTable, PacketBuilder, Tags};
use crate::client::PacketClient;
use crate::queue::PacketQueue;
use crate::config::UploaderConfig;
use crate::worker::{self, WorkerOptions};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::info;
use weert_common::{LoopPacket, Result};

/// Running uploader: a queue fed by the caller and one background worker
/// posting to the server.
pub struct Uploader {
    queue: Arc<PacketQueue>,
    handle: Option<JoinHandle<()>>,
}

impl Uploader {
    /// Compile the filter table, build the client, and start the worker.
    ///
    /// Fails fast on invalid configuration or an unparsable expression.
    pub fn start(config: &UploaderConfig) -> Result<Self> {
        config.validate()?;
        let table = FilterTable::compile(&config.filters)?;
        let client = PacketClient::new(config)?;
        let builder = PacketBuilder::new(
            &config.measurement,
            Tags {
                platform: config.platform.clone(),
                stream: config.stream.clone(),
            },
            table,
        );
        let queue = Arc::new(PacketQueue::new(config.max_backlog));

        info!(url = client.url(), "LOOP packets will be posted");
        let handle = worker::spawn(
            Arc::clone(&queue),
            client,
            builder,
            WorkerOptions::from(config),
        )?;
        Ok(Self {
            queue,
            handle: Some(handle),
        })
    }

    /// Enqueue one loop packet for upload. Never blocks on the network.
    pub fn publish(&self, packet: LoopPacket) {
        self.queue.push(packet);
    }

    /// Current backlog length.
    pub fn backlog(&self) -> usize {
        self.queue.len()
    }

    /// Drain the backlog and stop the worker.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.queue.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Uploader {
    fn drop(&mut self) {
        self.stop();
    }
}
