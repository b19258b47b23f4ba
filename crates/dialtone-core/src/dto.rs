use crate::domain::ContactId;
use crate::registry::PhoneModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactListItemDto {
    pub id: ContactId,
    pub display_name: String,
    pub is_company: bool,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDto {
    pub id: ContactId,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetailDto {
    pub id: ContactId,
    pub display_name: String,
    pub callerid_label: String,
    pub is_company: bool,
    pub parent: Option<ParentDto>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneModelDto {
    pub kind: String,
    pub fields: Vec<String>,
}

impl From<&PhoneModel> for PhoneModelDto {
    fn from(model: &PhoneModel) -> Self {
        Self {
            kind: model.kind.clone(),
            fields: model.fields.clone(),
        }
    }
}
