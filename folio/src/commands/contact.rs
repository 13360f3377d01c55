use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::ContactFormService;
use folio_models::{
    contact::{FormField, FormFields},
    notification::ActiveNotification,
};
use folio_shared_contracts::notification::NotificationService;

use crate::environment::Environment;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit the contact form once and show the outcome
    #[command(aliases(["s"]))]
    Send {
        /// Sender name
        #[arg(long, default_value = "")]
        name: String,
        /// Sender email address or phone number
        #[arg(long, default_value = "")]
        contact: String,
        /// Message body
        #[arg(long, default_value = "")]
        message: String,
    },
    /// List the form fields with their labels and placeholders
    #[command(aliases(["f"]))]
    Fields,
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                contact,
                message,
            } => {
                let environment = Environment::new(&config)?;
                send(
                    &environment.contact_form,
                    &environment.notifications,
                    FormFields::new(name, contact, message),
                )
                .await
            }
            ContactCommand::Fields => {
                field_lines().iter().for_each(|line| println!("{line}"));
                Ok(())
            }
        }
    }
}

fn field_lines() -> Vec<String> {
    FormField::ALL
        .into_iter()
        .map(|field| format!("{field}: {}", field.placeholder()))
        .collect()
}

fn notification_line(notification: &ActiveNotification) -> String {
    format!(
        "[{}] {} ({:.0}% left)",
        notification.kind,
        notification.text,
        notification.progress() * 100.0
    )
}

/// Fill in the form, submit it and print the resulting notifications and
/// inline field errors.
pub async fn send(
    form: &impl ContactFormService,
    notifications: &impl NotificationService,
    fields: FormFields,
) -> anyhow::Result<()> {
    let FormFields {
        name,
        contact_info,
        message,
    } = fields;
    form.set_name(name);
    form.set_contact_info(contact_info);
    form.set_message(message);

    let result = form.submit().await;

    for notification in notifications.visible() {
        println!("{}", notification_line(&notification));
    }
    for field in FormField::ALL {
        if let Some(error) = form.field_error(field) {
            println!("{field}: {error}");
        }
    }

    result.context("Contact form was not submitted")
}
