use crate::phone::PhoneError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("display name is required")]
    EmptyDisplayName,
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("invalid digits_to_match_from_end: {0}")]
    InvalidDigitsToMatch(i64),
    #[error("a contact cannot be its own parent")]
    SelfParent,
    #[error("phone model already registered: {0}")]
    DuplicatePhoneModel(String),
    #[error("phone model {0} declares no phone fields")]
    EmptyPhoneModel(String),
    #[error(transparent)]
    Phone(#[from] PhoneError),
}
