use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_core_contact_contracts::{ContactFormService, ContactSubmitError};
use folio_extern_contracts::relay::EmailRelayApiService;
use folio_models::{
    contact::{FormField, FormFields, ValidationState},
    notification::{NotificationEvent, NotificationSettings},
    relay::RelayCredentials,
};
use folio_shared_contracts::notification::NotificationService;
use folio_utils::trace_instrument;
use tracing::{info, warn};

pub use form::{
    failure_text, ContactForm, SubmissionOutcome, SubmissionPhase, SubmitStep, INCOMPLETE_TEXT,
    SENT_TEXT,
};

mod form;

#[cfg(test)]
mod tests;

#[derive(Debug)]
pub struct ContactFormServiceImpl<RelayApi, Notifications> {
    relay_api: RelayApi,
    notifications: Notifications,
    config: ContactFormServiceConfig,
    form: Mutex<ContactForm>,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    pub relay: RelayCredentials,
    /// Name of the person receiving the messages.
    pub recipient_label: String,
    /// Address shown to the user when sending fails.
    pub fallback_address: String,
    pub notifications: NotificationSettings,
}

impl<RelayApi, Notifications> ContactFormServiceImpl<RelayApi, Notifications> {
    pub fn new(
        relay_api: RelayApi,
        notifications: Notifications,
        config: ContactFormServiceConfig,
    ) -> Self {
        let form = ContactForm::new(&*config.recipient_label, &*config.fallback_address);
        Self {
            relay_api,
            notifications,
            config,
            form: Mutex::new(form),
        }
    }

    fn form(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<RelayApi, Notifications> ContactFormServiceImpl<RelayApi, Notifications>
where
    Notifications: NotificationService,
{
    fn notify(&self, event: NotificationEvent) {
        let kind = event.kind();
        let id = self.notifications.notify(
            kind,
            event.into_text(),
            self.config.notifications.options_for(kind),
        );
        info!(%kind, %id, "notification shown");
    }
}

impl<RelayApi, Notifications> ContactFormService for ContactFormServiceImpl<RelayApi, Notifications>
where
    RelayApi: EmailRelayApiService,
    Notifications: NotificationService,
{
    fn set_name(&self, name: String) {
        self.form().set_name(name);
    }

    fn set_contact_info(&self, contact_info: String) {
        self.form().set_contact_info(contact_info);
    }

    fn set_message(&self, message: String) {
        self.form().set_message(message);
    }

    fn fields(&self) -> FormFields {
        self.form().fields().clone()
    }

    fn validation(&self) -> ValidationState {
        self.form().validation()
    }

    fn field_error(&self, field: FormField) -> Option<&'static str> {
        self.form().field_error(field)
    }

    fn is_dispatching(&self) -> bool {
        self.form().is_dispatching()
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<(), ContactSubmitError> {
        let step = self.form().submit();
        let payload = match step {
            SubmitStep::Busy => return Err(ContactSubmitError::InFlight),
            SubmitStep::Rejected {
                validation,
                notification,
            } => {
                self.notify(notification);
                return Err(ContactSubmitError::Incomplete(validation));
            }
            SubmitStep::Dispatch(payload) => payload,
        };

        let mut dispatch = Dispatch {
            form: &self.form,
            finished: false,
        };

        let RelayCredentials {
            service_id,
            template_id,
            public_key,
        } = &self.config.relay;
        let result = self
            .relay_api
            .send(service_id, template_id, &payload, public_key)
            .await;
        dispatch.finished = true;

        match result {
            Ok(response) => {
                info!(status = response.status, text = %response.text, "message sent");
                let notification = self.form().dispatch_succeeded();
                self.notify(notification);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to send message: {err:#}");
                let notification = self.form().dispatch_failed();
                self.notify(notification);
                Err(ContactSubmitError::Send(err))
            }
        }
    }
}

/// Puts the form back to idle if the submit future is dropped while the relay
/// request is still pending.
struct Dispatch<'a> {
    form: &'a Mutex<ContactForm>,
    finished: bool,
}

impl Drop for Dispatch<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.form
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .abandon_dispatch();
        }
    }
}
