use folio_models::{
    contact::{FormField, FormFields, MessagePayload, ValidationState},
    notification::NotificationEvent,
};
use tracing::debug;

pub const INCOMPLETE_TEXT: &str = "Please fill in all fields before sending.";
pub const SENT_TEXT: &str = "Message sent successfully! I will get back to you soon.";

/// State machine behind the contact form.
///
/// Holds the field values and the latest validation snapshot and decides what
/// happens on each submit intent. It performs no I/O: a successful
/// [`ContactForm::submit`] hands out the payload to send, and the caller
/// reports the relay's verdict through [`ContactForm::dispatch_succeeded`] or
/// [`ContactForm::dispatch_failed`].
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: FormFields,
    validation: ValidationState,
    phase: SubmissionPhase,
    last_outcome: Option<SubmissionOutcome>,
    recipient_label: String,
    fallback_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Dispatching,
}

/// How the most recent finished submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Rejected,
    Dispatched,
    DispatchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// At least one field is empty; nothing is sent.
    Rejected {
        validation: ValidationState,
        notification: NotificationEvent,
    },
    /// A previous submission has not completed yet.
    Busy,
    /// The form is complete; send this payload exactly once.
    Dispatch(MessagePayload),
}

impl ContactForm {
    pub fn new(recipient_label: impl Into<String>, fallback_address: impl Into<String>) -> Self {
        Self {
            fields: FormFields::default(),
            validation: ValidationState::default(),
            phase: SubmissionPhase::Idle,
            last_outcome: None,
            recipient_label: recipient_label.into(),
            fallback_address: fallback_address.into(),
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.set(FormField::Name, name);
    }

    pub fn set_contact_info(&mut self, contact_info: String) {
        self.set(FormField::ContactInfo, contact_info);
    }

    pub fn set_message(&mut self, message: String) {
        self.set(FormField::Message, message);
    }

    /// Invalid flags are left alone; they only change on the next submit.
    pub fn set(&mut self, field: FormField, value: String) {
        self.fields.set(field, value);
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    pub fn validation(&self) -> ValidationState {
        self.validation
    }

    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        self.validation
            .is_invalid(field)
            .then(|| field.error_text())
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.last_outcome
    }

    pub fn is_dispatching(&self) -> bool {
        self.phase == SubmissionPhase::Dispatching
    }

    pub fn submit(&mut self) -> SubmitStep {
        if self.is_dispatching() {
            debug!("submit refused, dispatch in flight");
            return SubmitStep::Busy;
        }

        self.validation = ValidationState::of(&self.fields);

        match MessagePayload::from_fields(&self.fields, &self.recipient_label) {
            Some(payload) if self.validation.is_valid() => {
                debug!("form complete, dispatching");
                self.phase = SubmissionPhase::Dispatching;
                SubmitStep::Dispatch(payload)
            }
            _ => {
                debug!(validation = ?self.validation, "form incomplete, rejected");
                self.last_outcome = Some(SubmissionOutcome::Rejected);
                SubmitStep::Rejected {
                    validation: self.validation,
                    notification: NotificationEvent::Warning(INCOMPLETE_TEXT.into()),
                }
            }
        }
    }

    pub fn dispatch_succeeded(&mut self) -> NotificationEvent {
        self.finish(SubmissionOutcome::Dispatched);
        self.fields.clear();
        NotificationEvent::Success(SENT_TEXT.into())
    }

    pub fn dispatch_failed(&mut self) -> NotificationEvent {
        self.finish(SubmissionOutcome::DispatchFailed);
        NotificationEvent::Failure(failure_text(&self.fallback_address))
    }

    /// Return to idle after a dispatch whose result will never arrive.
    pub fn abandon_dispatch(&mut self) {
        if self.is_dispatching() {
            debug!("dispatch abandoned");
            self.phase = SubmissionPhase::Idle;
        }
    }

    fn finish(&mut self, outcome: SubmissionOutcome) {
        debug!(?outcome, "dispatch finished");
        self.phase = SubmissionPhase::Idle;
        self.last_outcome = Some(outcome);
    }
}

pub fn failure_text(fallback_address: &str) -> String {
    format!(
        "Failed to send message. Please try again or contact me directly at {fallback_address}."
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(name: &str, contact_info: &str, message: &str) -> ContactForm {
        let mut form = ContactForm::new("Owner", "owner@example.com");
        form.set_name(name.into());
        form.set_contact_info(contact_info.into());
        form.set_message(message.into());
        form
    }

    #[test]
    fn starts_empty_and_idle() {
        let form = ContactForm::new("Owner", "owner@example.com");

        assert_eq!(*form.fields(), FormFields::default());
        assert_eq!(form.validation(), ValidationState::default());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.last_outcome(), None);
    }

    #[test]
    fn all_empty_rejected() {
        let mut form = form("", "", "");

        let step = form.submit();

        assert_eq!(
            step,
            SubmitStep::Rejected {
                validation: ValidationState {
                    name_invalid: true,
                    contact_info_invalid: true,
                    message_invalid: true,
                },
                notification: NotificationEvent::Warning(INCOMPLETE_TEXT.into()),
            }
        );
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.last_outcome(), Some(SubmissionOutcome::Rejected));
        assert_eq!(form.field_error(FormField::Name), Some("Please enter your name"));
    }

    #[test]
    fn complete_form_dispatches() {
        let mut form = form("Ada", "ada@example.com", "Hello");

        let step = form.submit();

        let SubmitStep::Dispatch(payload) = step else {
            panic!("expected dispatch, got {step:?}");
        };
        assert_eq!(*payload.sender_name, "Ada");
        assert_eq!(*payload.sender_contact, "ada@example.com");
        assert_eq!(*payload.body, "Hello");
        assert_eq!(payload.recipient_label, "Owner");
        assert!(form.is_dispatching());
        assert_eq!(form.validation(), ValidationState::default());
    }

    #[test]
    fn busy_while_dispatching() {
        let mut form = form("Ada", "ada@example.com", "Hello");
        form.submit();

        assert_eq!(form.submit(), SubmitStep::Busy);
        assert!(form.is_dispatching());
    }

    #[test]
    fn success_clears_fields() {
        let mut form = form("Ada", "ada@example.com", "Hello");
        form.submit();

        let notification = form.dispatch_succeeded();

        assert_eq!(notification, NotificationEvent::Success(SENT_TEXT.into()));
        assert_eq!(*form.fields(), FormFields::default());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.last_outcome(), Some(SubmissionOutcome::Dispatched));
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = form("Ada", "ada@example.com", "Hello");
        form.submit();

        let notification = form.dispatch_failed();

        assert_eq!(
            notification,
            NotificationEvent::Failure(
                "Failed to send message. Please try again or contact me directly at \
                 owner@example.com."
                    .into()
            )
        );
        assert_eq!(*form.fields(), FormFields::new("Ada", "ada@example.com", "Hello"));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.last_outcome(), Some(SubmissionOutcome::DispatchFailed));
    }

    #[test]
    fn edit_keeps_invalid_flag_until_next_submit() {
        let mut form = form("Ada", "", "Hello");
        form.submit();
        assert!(form.validation().contact_info_invalid);

        form.set_contact_info("ada@example.com".into());
        assert!(form.validation().contact_info_invalid);
        assert_eq!(
            form.field_error(FormField::ContactInfo),
            Some("Please enter your email or phone number")
        );

        form.submit();
        assert!(!form.validation().contact_info_invalid);
        assert_eq!(form.field_error(FormField::ContactInfo), None);
    }

    #[test]
    fn abandon_returns_to_idle() {
        let mut form = form("Ada", "ada@example.com", "Hello");
        form.submit();

        form.abandon_dispatch();

        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.last_outcome(), None);
        assert_eq!(*form.fields(), FormFields::new("Ada", "ada@example.com", "Hello"));
    }

    #[test]
    fn resubmit_after_failure() {
        let mut form = form("Ada", "ada@example.com", "Hello");
        form.submit();
        form.dispatch_failed();

        assert!(matches!(form.submit(), SubmitStep::Dispatch(_)));
    }
}
