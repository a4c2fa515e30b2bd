//! Client domain module.

mod aggregate;
mod email;

pub use aggregate::{
    Client, ClientDetails, MAX_CLIENT_NAME_LENGTH, MAX_NOTES_LENGTH, MAX_PHONE_LENGTH,
};
pub use email::{ClientEmail, MAX_EMAIL_LENGTH};
