use std::fmt;

use crate::macros::nutype_string;

/// The three text fields of the contact form.
///
/// Every value is always a string; a freshly mounted form starts with three
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FormFields {
    pub name: String,
    pub contact_info: String,
    pub message: String,
}

impl FormFields {
    pub fn new(
        name: impl Into<String>,
        contact_info: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact_info: contact_info.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::ContactInfo => &self.contact_info,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::ContactInfo => self.contact_info = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|&field| self.get(field).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    ContactInfo,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::ContactInfo, Self::Message];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::ContactInfo => "Email / Phone",
            Self::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "What's your name?",
            Self::ContactInfo => "How can I reach you?",
            Self::Message => "Send me any inquiries or questions",
        }
    }

    /// Inline helper text shown below an invalid field.
    pub fn error_text(self) -> &'static str {
        match self {
            Self::Name => "Please enter your name",
            Self::ContactInfo => "Please enter your email or phone number",
            Self::Message => "Please enter the message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field invalid flags computed by the latest submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidationState {
    pub name_invalid: bool,
    pub contact_info_invalid: bool,
    pub message_invalid: bool,
}

impl ValidationState {
    /// Marks every empty field as invalid.
    pub fn of(fields: &FormFields) -> Self {
        Self {
            name_invalid: fields.name.is_empty(),
            contact_info_invalid: fields.contact_info.is_empty(),
            message_invalid: fields.message.is_empty(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !(self.name_invalid || self.contact_info_invalid || self.message_invalid)
    }

    pub fn is_invalid(&self, field: FormField) -> bool {
        match field {
            FormField::Name => self.name_invalid,
            FormField::ContactInfo => self.contact_info_invalid,
            FormField::Message => self.message_invalid,
        }
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FormField> + '_ {
        FormField::ALL
            .into_iter()
            .filter(|&field| self.is_invalid(field))
    }
}

/// Snapshot of a complete form, shaped for the email relay.
///
/// Sender name, contact and body can only hold non-empty strings, so a payload
/// never exists for an incomplete form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePayload {
    pub sender_name: SenderName,
    pub sender_contact: SenderContact,
    pub body: MessageBody,
    pub recipient_label: String,
}

impl MessagePayload {
    /// Returns `None` if any of the fields is empty.
    pub fn from_fields(fields: &FormFields, recipient_label: impl Into<String>) -> Option<Self> {
        Some(Self {
            sender_name: fields.name.clone().try_into().ok()?,
            sender_contact: fields.contact_info.clone().try_into().ok()?,
            body: fields.message.clone().try_into().ok()?,
            recipient_label: recipient_label.into(),
        })
    }
}

nutype_string!(SenderName(validate(not_empty)));
nutype_string!(SenderContact(validate(not_empty)));
nutype_string!(MessageBody(validate(not_empty)));

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn validation_flags_follow_empty_fields() {
        let fields = FormFields::new("Ada", "", "Hello");

        let validation = ValidationState::of(&fields);

        assert_eq!(
            validation,
            ValidationState {
                name_invalid: false,
                contact_info_invalid: true,
                message_invalid: false,
            }
        );
        assert!(!validation.is_valid());
        assert_eq!(
            validation.invalid_fields().collect::<Vec<_>>(),
            [FormField::ContactInfo]
        );
    }

    #[test]
    fn whitespace_counts_as_filled() {
        let fields = FormFields::new(" ", "\t", "\n");
        assert!(ValidationState::of(&fields).is_valid());
        assert!(MessagePayload::from_fields(&fields, "Owner").is_some());
    }

    #[test]
    fn payload_from_complete_fields() {
        let fields = FormFields::new("Ada", "ada@example.com", "Hello");

        let payload = MessagePayload::from_fields(&fields, "Owner").unwrap();

        assert_eq!(*payload.sender_name, "Ada");
        assert_eq!(*payload.sender_contact, "ada@example.com");
        assert_eq!(*payload.body, "Hello");
        assert_eq!(payload.recipient_label, "Owner");
    }

    #[test]
    fn payload_requires_every_field() {
        for field in FormField::ALL {
            let mut fields = FormFields::new("Ada", "ada@example.com", "Hello");
            fields.set(field, String::new());
            assert_eq!(MessagePayload::from_fields(&fields, "Owner"), None);
        }
    }

    #[test]
    fn empty_strings_are_rejected_by_newtypes() {
        assert!(SenderName::try_from(String::new()).is_err());
        assert!(SenderContact::try_from(String::new()).is_err());
        assert!(MessageBody::try_from(String::new()).is_err());
    }

    #[test]
    fn clear_resets_to_default() {
        let mut fields = FormFields::new("Ada", "ada@example.com", "Hello");
        fields.clear();
        assert_eq!(fields, FormFields::default());
        assert!(fields.is_empty());
    }
}
