use std::future::Future;

use folio_models::contact::MessagePayload;

/// Third-party service that delivers a message via email on our behalf.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailRelayApiService: Send + Sync + 'static {
    /// Send `payload` using the given relay service and template.
    ///
    /// Resolves with the relay's status on success and fails for network
    /// errors as well as any non-success response.
    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        payload: &MessagePayload,
        public_key: &str,
    ) -> impl Future<Output = anyhow::Result<RelayResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub text: String,
}

#[cfg(feature = "mock")]
impl MockEmailRelayApiService {
    pub fn with_send(
        mut self,
        credentials: folio_models::relay::RelayCredentials,
        payload: MessagePayload,
        result: Result<RelayResponse, String>,
    ) -> Self {
        let folio_models::relay::RelayCredentials {
            service_id,
            template_id,
            public_key,
        } = credentials;
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(service_id),
                mockall::predicate::eq(template_id),
                mockall::predicate::eq(payload),
                mockall::predicate::eq(public_key),
            )
            .return_once(move |_, _, _, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
