use std::future::Future;

use folio_models::contact::{FormField, FormFields, ValidationState};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Replace the sender name.
    fn set_name(&self, name: String);

    /// Replace the sender's email address or phone number.
    fn set_contact_info(&self, contact_info: String);

    /// Replace the message body.
    fn set_message(&self, message: String);

    /// Current values of all fields.
    fn fields(&self) -> FormFields;

    /// Invalid flags computed by the latest submit attempt.
    fn validation(&self) -> ValidationState;

    /// Inline error text for `field`, if the latest submit flagged it.
    fn field_error(&self, field: FormField) -> Option<&'static str>;

    /// Whether a message is currently being sent.
    fn is_dispatching(&self) -> bool;

    /// Validate the form and, if complete, send it through the email relay.
    ///
    /// Exactly one notification is shown for every attempt that is not refused
    /// with [`ContactSubmitError::InFlight`].
    fn submit(&self) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("One or more required fields are empty.")]
    Incomplete(ValidationState),
    #[error("Another message is still being sent.")]
    InFlight,
    #[error("Failed to send message.")]
    Send(anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_set_fields(mut self, fields: FormFields) -> Self {
        let FormFields {
            name,
            contact_info,
            message,
        } = fields;
        self.expect_set_name()
            .once()
            .with(mockall::predicate::eq(name))
            .return_const(());
        self.expect_set_contact_info()
            .once()
            .with(mockall::predicate::eq(contact_info))
            .return_const(());
        self.expect_set_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_const(());
        self
    }

    pub fn with_submit(mut self, result: Result<(), ContactSubmitError>) -> Self {
        self.expect_submit()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_field_error(mut self, field: FormField, error: Option<&'static str>) -> Self {
        self.expect_field_error()
            .once()
            .with(mockall::predicate::eq(field))
            .return_const(error);
        self
    }
}
