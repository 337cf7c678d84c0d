//! HTTP method invoker
//!
//! Reaches an endpoint through the gateway's method-invocation route. The
//! response timeout is enforced here as the client timeout; the dispatcher
//! applies its own overall call deadline on top.

use async_trait::async_trait;
use echotrace_dispatch::{InvokeError, MethodInvoker};
use echotrace_domain::{Destination, MethodReply, RequestPayload, ResponsePayload};
use std::time::Duration;

pub struct HttpMethodInvoker {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpMethodInvoker {
    pub fn new(gateway_url: &str, response_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(response_timeout)
            .build()?;

        Ok(Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, destination: &Destination, method: &str) -> String {
        format!(
            "{}/devices/{}/modules/{}/methods/{}",
            self.gateway_url, destination.device_id, destination.module_id, method
        )
    }
}

#[async_trait]
impl MethodInvoker for HttpMethodInvoker {
    async fn invoke(
        &self,
        destination: &Destination,
        method: &str,
        payload: &RequestPayload,
    ) -> Result<MethodReply, InvokeError> {
        let response = self
            .client
            .post(self.method_url(destination, method))
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    InvokeError::Timeout {
                        destination: destination.to_string(),
                    }
                } else {
                    InvokeError::Connection {
                        destination: destination.to_string(),
                        reason: err.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        let payload: ResponsePayload =
            response
                .json()
                .await
                .map_err(|err| InvokeError::MalformedReply {
                    destination: destination.to_string(),
                    reason: err.to_string(),
                })?;

        Ok(MethodReply { status, payload })
    }
}
