use crate::domain::ids::ContactId;
use crate::error::CoreError;
use crate::hook::PhoneBearing;
use crate::registry::{MOBILE_FIELD, PHONE_FIELD};
use crate::settings::resolve_country;
use serde::{Deserialize, Serialize};

const CONTACT_PHONE_FIELDS: &[&str] = &[PHONE_FIELD, MOBILE_FIELD];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub display_name: String,
    pub is_company: bool,
    pub parent_id: Option<ContactId>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.display_name.trim().is_empty() {
            return Err(CoreError::EmptyDisplayName);
        }

        if let Some(code) = self.country.as_deref() {
            resolve_country(code)?;
        }

        if self.parent_id == Some(self.id) {
            return Err(CoreError::SelfParent);
        }

        Ok(())
    }
}

impl PhoneBearing for Contact {
    fn phone_fields(&self) -> &'static [&'static str] {
        CONTACT_PHONE_FIELDS
    }

    fn phone_field(&self, field: &str) -> Option<&str> {
        match field {
            PHONE_FIELD => self.phone.as_deref(),
            MOBILE_FIELD => self.mobile.as_deref(),
            _ => None,
        }
    }

    fn set_phone_field(&mut self, field: &str, value: Option<String>) {
        match field {
            PHONE_FIELD => self.phone = value,
            MOBILE_FIELD => self.mobile = value,
            _ => {}
        }
    }

    fn country_code(&self) -> Option<&str> {
        self.country.as_deref()
    }
}
