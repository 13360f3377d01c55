use folio_core_contact_impl::ContactFormServiceImpl;
use folio_extern_impl::relay::EmailJsRelayApiServiceImpl;
use folio_shared_impl::{notification::NotificationServiceImpl, time::TimeServiceImpl};

pub type Time = TimeServiceImpl;
pub type Notifications = NotificationServiceImpl<Time>;
pub type RelayApi = EmailJsRelayApiServiceImpl;
pub type ContactForm = ContactFormServiceImpl<RelayApi, Notifications>;
