use folio_config::Config;
use folio_core_contact_impl::{ContactFormServiceConfig, ContactFormServiceImpl};
use folio_extern_impl::{
    http::HttpClient,
    relay::{EmailJsRelayApiServiceConfig, EmailJsRelayApiServiceImpl},
};
use folio_models::{notification::NotificationSettings, relay::RelayCredentials};
use folio_shared_impl::{
    notification::{NotificationServiceConfig, NotificationServiceImpl},
    time::TimeServiceImpl,
};
use types::{ContactForm, Notifications};

pub mod types;

/// Every service the CLI needs, wired from the loaded config.
///
/// `notifications` shares its stack with the one used by `contact_form`.
#[derive(Debug)]
pub struct Environment {
    pub contact_form: ContactForm,
    pub notifications: Notifications,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let notifications = NotificationServiceImpl::new(
            TimeServiceImpl,
            NotificationServiceConfig {
                limit: config.notifications.limit,
            },
        );

        let relay_api = EmailJsRelayApiServiceImpl::new(
            EmailJsRelayApiServiceConfig::new(
                config.relay.endpoint_override.clone(),
                config.relay.access_token.clone(),
            ),
            HttpClient::new()?,
        );

        let contact_form = ContactFormServiceImpl::new(
            relay_api,
            notifications.clone(),
            contact_form_config(config),
        );

        Ok(Self {
            contact_form,
            notifications,
        })
    }
}

fn contact_form_config(config: &Config) -> ContactFormServiceConfig {
    ContactFormServiceConfig {
        relay: RelayCredentials {
            service_id: config.relay.service_id.clone(),
            template_id: config.relay.template_id.clone(),
            public_key: config.relay.public_key.clone(),
        },
        recipient_label: config.contact.recipient_label.clone(),
        fallback_address: config.contact.fallback_address.clone(),
        notifications: NotificationSettings {
            position: config.notifications.position,
            dismissible: config.notifications.dismissible,
            pause_on_hover: config.notifications.pause_on_hover,
            warning_auto_close: *config.notifications.warning_auto_close,
            success_auto_close: *config.notifications.success_auto_close,
            failure_auto_close: *config.notifications.failure_auto_close,
        },
    }
}
