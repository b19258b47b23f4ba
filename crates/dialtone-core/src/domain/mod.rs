pub mod contact;
pub mod country;
pub mod ids;

pub use contact::Contact;
pub use country::{country_for_calling_code, match_calling_code, Country};
pub use ids::{ContactId, InvalidContactId};
