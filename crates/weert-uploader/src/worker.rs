//! Background upload worker.
//!
//! Pops packets off the queue, drops the stale ones, and posts the rest
//! with bounded retries. An upload failure is logged and the packet is
//! dropped; it never tears down the worker.

use crate::body::PacketBuilder;
use crate::client::PacketClient;
use crate::config::UploaderConfig;
use crate::queue::PacketQueue;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};
use weert_common::LoopPacket;

/// Worker knobs, taken from the configuration.
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    pub stale_secs: Option<u64>,
    pub max_tries: u32,
    pub retry_wait: Duration,
    pub log_success: bool,
    pub log_failure: bool,
}

impl From<&UploaderConfig> for WorkerOptions {
    fn from(config: &UploaderConfig) -> Self {
        Self {
            stale_secs: config.stale_secs,
            max_tries: config.max_tries.max(1),
            retry_wait: Duration::from_secs(config.retry_wait_secs),
            log_success: config.log_success,
            log_failure: config.log_failure,
        }
    }
}

/// Spawn the upload worker thread.
pub fn spawn(
    queue: Arc<PacketQueue>,
    client: PacketClient,
    builder: PacketBuilder,
    options: WorkerOptions,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("weert-upload".to_string())
        .spawn(move || run(&queue, &client, &builder, &options))
}

fn run(queue: &PacketQueue, client: &PacketClient, builder: &PacketBuilder, options: &WorkerOptions) {
    while let Some(packet) = queue.pop() {
        if is_stale(&packet, options.stale_secs) {
            debug!(date_time = packet.date_time, "dropping stale packet");
            continue;
        }
        post_with_retries(client, builder, &packet, options);
    }
    debug!("upload worker shut down");
}

fn is_stale(packet: &LoopPacket, stale_secs: Option<u64>) -> bool {
    let Some(stale) = stale_secs else {
        return false;
    };
    packet.age_secs(chrono::Utc::now().timestamp()) > stale as i64
}

fn post_with_retries(
    client: &PacketClient,
    builder: &PacketBuilder,
    packet: &LoopPacket,
    options: &WorkerOptions,
) {
    let body = builder.body(packet);
    for attempt in 1..=options.max_tries {
        match client.post(&body) {
            Ok(()) => {
                if options.log_success {
                    info!(
                        timestamp = body.timestamp,
                        fields = body.fields.len(),
                        "published packet"
                    );
                }
                return;
            }
            Err(err) => {
                debug!(attempt, max_tries = options.max_tries, %err, "post attempt failed");
                if attempt < options.max_tries {
                    thread::sleep(options.retry_wait);
                } else if options.log_failure {
                    warn!(
                        timestamp = body.timestamp,
                        tries = options.max_tries,
                        %err,
                        "giving up on packet"
                    );
                }
            }
        }
    }
}
