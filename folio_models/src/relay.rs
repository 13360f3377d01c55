use std::fmt;

/// Identifiers the email relay needs to route a message.
///
/// They are opaque to the contact form and come straight from configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"[redacted]")
            .finish()
    }
}
