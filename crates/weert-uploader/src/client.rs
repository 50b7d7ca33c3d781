//! HTTP client for the measurement packets endpoint.
//!
//! One POST per loop packet, JSON body, pre-shared credential in the
//! Authorization header. The server answers 201 on a successful insert;
//! every other status is a failed post.

use crate::body::MeasurementBody;
use crate::config::{AuthMode, UploaderConfig};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::time::Duration;
use tracing::trace;
use weert_common::{Error, Result};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("weert-tools/", env!("CARGO_PKG_VERSION"));

/// Status the server answers with on a successful insert.
const STATUS_CREATED: u16 = 201;

/// Client for one configured packets endpoint.
pub struct PacketClient {
    agent: ureq::Agent,
    url: String,
    authorization: String,
}

impl PacketClient {
    pub fn new(config: &UploaderConfig) -> Result<Self> {
        let authorization = match config.auth_mode {
            AuthMode::Basic => {
                let username = config
                    .username
                    .as_deref()
                    .ok_or_else(|| Error::Config("basic auth requires username".to_string()))?;
                let password = config
                    .password
                    .as_deref()
                    .ok_or_else(|| Error::Config("basic auth requires password".to_string()))?;
                format!(
                    "Basic {}",
                    STANDARD.encode(format!("{username}:{password}"))
                )
            }
            AuthMode::Bearer => {
                let token = config
                    .token
                    .as_deref()
                    .ok_or_else(|| Error::Config("bearer auth requires token".to_string()))?;
                format!("Bearer {token}")
            }
        };
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Ok(Self {
            agent,
            url: config.packets_url(),
            authorization,
        })
    }

    /// The URL this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post one measurement body.
    pub fn post(&self, body: &MeasurementBody) -> Result<()> {
        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .set("User-Agent", USER_AGENT)
            .set("Authorization", &self.authorization)
            .send_json(body);
        match response {
            Ok(resp) if resp.status() == STATUS_CREATED => {
                trace!(url = self.url.as_str(), "packet accepted");
                Ok(())
            }
            Ok(resp) => Err(Error::FailedPost {
                status: resp.status(),
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Status(status, resp)) => Err(Error::FailedPost {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(err) => Err(Error::Transport(err.to_string())),
        }
    }
}
