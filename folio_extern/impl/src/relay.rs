use std::{fmt, sync::Arc};

use anyhow::{ensure, Context};
use folio_extern_contracts::relay::{EmailRelayApiService, RelayResponse};
use folio_models::contact::MessagePayload;
use folio_utils::trace_instrument;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsRelayApiServiceImpl {
    config: EmailJsRelayApiServiceConfig,
    http: HttpClient,
}

#[derive(Clone)]
pub struct EmailJsRelayApiServiceConfig {
    send_endpoint: Arc<Url>,
    access_token: Option<Arc<str>>,
}

impl fmt::Debug for EmailJsRelayApiServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailJsRelayApiServiceConfig")
            .field("send_endpoint", &self.send_endpoint.as_str())
            .field("access_token", &self.access_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl EmailJsRelayApiServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>, access_token: Option<String>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
            access_token: access_token.map(Into::into),
        }
    }
}

impl EmailJsRelayApiServiceImpl {
    pub fn new(config: EmailJsRelayApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl EmailRelayApiService for EmailJsRelayApiServiceImpl {
    #[trace_instrument(skip(self, payload, public_key))]
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        payload: &MessagePayload,
        public_key: &str,
    ) -> anyhow::Result<RelayResponse> {
        let request = SendRequest {
            service_id,
            template_id,
            user_id: public_key,
            access_token: self.config.access_token.as_deref(),
            template_params: TemplateParams {
                from_name: &payload.sender_name,
                from_email: &payload.sender_contact,
                message: &payload.body,
                to_name: &payload.recipient_label,
            },
        };

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to send email relay request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read email relay response")?;

        if !status.is_success() {
            warn!(%status, text = %text, "email relay rejected the message");
        }
        ensure!(
            status.is_success(),
            "Email relay request returned {status}: {text}"
        );

        Ok(RelayResponse {
            status: status.as_u16(),
            text,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    to_name: &'a str,
}
