pub mod callerid;
pub mod domain;
pub mod dto;
pub mod error;
pub mod hook;
pub mod phone;
pub mod registry;
pub mod settings;

pub use callerid::{CallerIdResolver, CallerMatch, PhoneRecordSource, PhoneValue};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use hook::{on_phone_field_write, validate_phone_fields, PhoneBearing};
pub use phone::PhoneError;
pub use registry::{
    callerid_display_name, LabelParts, PhoneModel, PhoneModelRegistry, CONTACT_KIND,
    MOBILE_FIELD, PHONE_FIELD,
};
pub use settings::{CompanySettings, DialSettings};
