pub mod contact;
mod macros;
pub mod notification;
pub mod relay;
