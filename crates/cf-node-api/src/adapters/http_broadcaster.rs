//! HTTP implementation of the peer broadcast port

use crate::domain::config::NodeApiConfig;
use crate::domain::error::NodeApiError;
use crate::domain::types::MessageBody;
use async_trait::async_trait;
use cf_consensus::{DeliveryFailure, Message, NodeId, PeerBroadcaster};
use reqwest::Client;
use tracing::trace;

/// Posts proposals to `POST /message` on each peer's port
pub struct HttpBroadcaster {
    client: Client,
    config: NodeApiConfig,
}

impl HttpBroadcaster {
    pub fn new(config: NodeApiConfig) -> Result<Self, NodeApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NodeApiConfig {
        &self.config
    }
}

#[async_trait]
impl PeerBroadcaster for HttpBroadcaster {
    async fn send_to(&self, peer: NodeId, message: Message) -> Result<(), DeliveryFailure> {
        let url = self
            .config
            .node_url(peer, "message")
            .map_err(|e| DeliveryFailure::Unreachable {
                peer,
                reason: e.to_string(),
            })?;

        trace!(peer, %url, value = %message.value, "Posting proposal");

        let response = self
            .client
            .post(&url)
            .json(&MessageBody::from(message))
            .send()
            .await
            .map_err(|e| classify(peer, e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryFailure::Rejected {
                peer,
                status: status.as_u16(),
            })
        }
    }
}

fn classify(peer: NodeId, err: reqwest::Error) -> DeliveryFailure {
    if err.is_timeout() {
        DeliveryFailure::Timeout { peer }
    } else {
        DeliveryFailure::Unreachable {
            peer,
            reason: err.to_string(),
        }
    }
}
