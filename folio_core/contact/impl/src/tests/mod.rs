use folio_core_contact_contracts::ContactFormService;
use folio_extern_contracts::relay::{MockEmailRelayApiService, RelayResponse};
use folio_models::{
    contact::{FormFields, MessagePayload},
    notification::NotificationSettings,
    relay::RelayCredentials,
};
use folio_shared_contracts::notification::MockNotificationService;

use crate::{ContactFormServiceConfig, ContactFormServiceImpl};

mod properties;

type Sut = ContactFormServiceImpl<MockEmailRelayApiService, MockNotificationService>;

fn config() -> ContactFormServiceConfig {
    ContactFormServiceConfig {
        relay: credentials(),
        recipient_label: "Portfolio Owner".into(),
        fallback_address: "owner@example.com".into(),
        notifications: NotificationSettings::default(),
    }
}

fn credentials() -> RelayCredentials {
    RelayCredentials {
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        public_key: "public-key-test".into(),
    }
}

fn fill(sut: &Sut, fields: &FormFields) {
    sut.set_name(fields.name.clone());
    sut.set_contact_info(fields.contact_info.clone());
    sut.set_message(fields.message.clone());
}

fn payload(fields: &FormFields) -> MessagePayload {
    MessagePayload::from_fields(fields, "Portfolio Owner").unwrap()
}

fn relay_ok() -> RelayResponse {
    RelayResponse {
        status: 200,
        text: "OK".into(),
    }
}
