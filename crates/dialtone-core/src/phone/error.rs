use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("invalid phone number: {0:?}")]
    InvalidPhoneFormat(String),
    #[error("phone number {number:?} has calling code +{found} but the country is {country}")]
    CountryMismatch {
        number: String,
        country: String,
        found: String,
    },
    #[error("cannot determine the country of phone number {0:?}")]
    AmbiguousCountryCode(String),
    #[error("unknown calling code in phone number {0:?}")]
    UnknownCallingCode(String),
    #[error("unknown phone field: {0}")]
    UnknownPhoneField(String),
}
