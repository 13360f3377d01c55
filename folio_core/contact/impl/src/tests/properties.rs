use std::sync::{Arc, Mutex};

use folio_core_contact_contracts::{ContactFormService, ContactSubmitError};
use folio_extern_contracts::relay::MockEmailRelayApiService;
use folio_models::{
    contact::{FormField, FormFields, ValidationState},
    notification::{NotificationId, NotificationKind},
};
use folio_shared_contracts::notification::MockNotificationService;
use proptest::prelude::*;

use super::{config, fill, relay_ok};
use crate::{ContactForm, ContactFormServiceImpl, SubmissionPhase, SubmitStep};

#[derive(Debug, Clone)]
enum Intent {
    Edit(FormField, String),
    Submit,
    RelaySucceeded,
    RelayFailed,
}

fn field_strategy() -> impl Strategy<Value = FormField> {
    prop_oneof![
        Just(FormField::Name),
        Just(FormField::ContactInfo),
        Just(FormField::Message),
    ]
}

/// Empty values are weighted up so incomplete forms show up often.
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => Just(String::new()),
        3 => "[ -~]{1,12}",
    ]
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        6 => (field_strategy(), value_strategy()).prop_map(|(field, value)| Intent::Edit(field, value)),
        3 => Just(Intent::Submit),
        1 => Just(Intent::RelaySucceeded),
        1 => Just(Intent::RelayFailed),
    ]
}

proptest! {
    /// Submitting sends iff every field is filled and flags exactly the empty
    /// fields otherwise.
    #[test]
    fn prop_submit_follows_emptiness(
        name in value_strategy(),
        contact_info in value_strategy(),
        message in value_strategy(),
    ) {
        let mut form = ContactForm::new("Owner", "owner@example.com");
        form.set_name(name.clone());
        form.set_contact_info(contact_info.clone());
        form.set_message(message.clone());
        let complete = !name.is_empty() && !contact_info.is_empty() && !message.is_empty();

        let step = form.submit();

        prop_assert_eq!(
            form.validation(),
            ValidationState {
                name_invalid: name.is_empty(),
                contact_info_invalid: contact_info.is_empty(),
                message_invalid: message.is_empty(),
            }
        );
        match step {
            SubmitStep::Dispatch(payload) => {
                prop_assert!(complete);
                prop_assert_eq!(&*payload.sender_name, &name);
                prop_assert_eq!(&*payload.sender_contact, &contact_info);
                prop_assert_eq!(&*payload.body, &message);
            }
            SubmitStep::Rejected { notification, .. } => {
                prop_assert!(!complete);
                prop_assert_eq!(notification.kind(), NotificationKind::Warning);
            }
            SubmitStep::Busy => prop_assert!(false, "fresh form reported busy"),
        }
    }

    /// At most one dispatch is outstanding and relay verdicts only ever
    /// resolve that dispatch.
    #[test]
    fn prop_single_dispatch_in_flight(intents in prop::collection::vec(intent_strategy(), 0..60)) {
        let mut form = ContactForm::new("Owner", "owner@example.com");
        let mut in_flight = false;

        for intent in intents {
            let before = form.fields().clone();
            let validation = form.validation();

            match intent {
                Intent::Edit(field, value) => {
                    form.set(field, value.clone());
                    prop_assert_eq!(form.field(field), value.as_str());
                    prop_assert_eq!(form.validation(), validation);
                }
                Intent::Submit => match form.submit() {
                    SubmitStep::Busy => prop_assert!(in_flight),
                    SubmitStep::Dispatch(_) => {
                        prop_assert!(!in_flight);
                        in_flight = true;
                    }
                    SubmitStep::Rejected { .. } => {
                        prop_assert!(!in_flight);
                        prop_assert!(!form.validation().is_valid());
                    }
                },
                Intent::RelaySucceeded if in_flight => {
                    let notification = form.dispatch_succeeded();
                    prop_assert_eq!(notification.kind(), NotificationKind::Success);
                    prop_assert_eq!(form.fields(), &FormFields::default());
                    in_flight = false;
                }
                Intent::RelayFailed if in_flight => {
                    let notification = form.dispatch_failed();
                    prop_assert_eq!(notification.kind(), NotificationKind::Failure);
                    prop_assert_eq!(form.fields(), &before);
                    in_flight = false;
                }
                Intent::RelaySucceeded | Intent::RelayFailed => {}
            }

            let expected = if in_flight { SubmissionPhase::Dispatching } else { SubmissionPhase::Idle };
            prop_assert_eq!(form.phase(), expected);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every submit of an idle form shows exactly one notification and calls
    /// the relay only for a complete form.
    #[test]
    fn prop_service_one_notification_per_submit(
        name in value_strategy(),
        contact_info in value_strategy(),
        message in value_strategy(),
        relay_accepts in any::<bool>(),
    ) {
        let fields = FormFields::new(name, contact_info, message);
        let complete = ValidationState::of(&fields).is_valid();

        let relay_calls = Arc::new(Mutex::new(0usize));
        let mut relay_api = MockEmailRelayApiService::new();
        relay_api.expect_send().returning({
            let relay_calls = Arc::clone(&relay_calls);
            move |_, _, _, _| {
                *relay_calls.lock().unwrap() += 1;
                let result = if relay_accepts {
                    Ok(relay_ok())
                } else {
                    Err(anyhow::anyhow!("rejected"))
                };
                Box::pin(std::future::ready(result))
            }
        });

        let shown = Arc::new(Mutex::new(Vec::new()));
        let mut notifications = MockNotificationService::new();
        notifications.expect_notify().returning({
            let shown = Arc::clone(&shown);
            move |kind, _, _| {
                shown.lock().unwrap().push(kind);
                NotificationId(1)
            }
        });

        let sut = ContactFormServiceImpl::new(relay_api, notifications, config());
        fill(&sut, &fields);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = runtime.block_on(sut.submit());

        let shown = shown.lock().unwrap().clone();
        let relay_calls = *relay_calls.lock().unwrap();
        match (complete, relay_accepts) {
            (false, _) => {
                prop_assert!(matches!(result, Err(ContactSubmitError::Incomplete(_))));
                prop_assert_eq!(shown, vec![NotificationKind::Warning]);
                prop_assert_eq!(relay_calls, 0);
                prop_assert_eq!(sut.fields(), fields);
            }
            (true, true) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(shown, vec![NotificationKind::Success]);
                prop_assert_eq!(relay_calls, 1);
                prop_assert_eq!(sut.fields(), FormFields::default());
            }
            (true, false) => {
                prop_assert!(matches!(result, Err(ContactSubmitError::Send(_))));
                prop_assert_eq!(shown, vec![NotificationKind::Failure]);
                prop_assert_eq!(relay_calls, 1);
                prop_assert_eq!(sut.fields(), fields);
            }
        }
    }
}
