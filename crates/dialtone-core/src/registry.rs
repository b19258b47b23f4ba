use crate::error::CoreError;

pub const CONTACT_KIND: &str = "contact";
pub const PHONE_FIELD: &str = "phone";
pub const MOBILE_FIELD: &str = "mobile";

/// Names used to build a caller-facing label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    pub display_name: String,
    pub parent_display_name: Option<String>,
}

pub type DisplayNameFn = fn(&LabelParts) -> String;

/// A record kind whose fields hold phone numbers.
#[derive(Debug, Clone)]
pub struct PhoneModel {
    pub kind: String,
    pub fields: Vec<String>,
    pub display_name: DisplayNameFn,
}

impl PhoneModel {
    pub fn new(kind: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            kind: kind.into(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
            display_name: callerid_display_name,
        }
    }

    pub fn with_display_name(mut self, display_name: DisplayNameFn) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn contacts() -> Self {
        Self::new(CONTACT_KIND, &[PHONE_FIELD, MOBILE_FIELD])
    }
}

/// "Parent, Child" when the record has a parent, its own name otherwise.
pub fn callerid_display_name(parts: &LabelParts) -> String {
    match parts.parent_display_name.as_deref() {
        Some(parent) if !parent.trim().is_empty() => {
            format!("{}, {}", parent, parts.display_name)
        }
        _ => parts.display_name.clone(),
    }
}

/// Phone-bearing record kinds, scanned in registration order.
#[derive(Debug, Clone, Default)]
pub struct PhoneModelRegistry {
    models: Vec<PhoneModel>,
}

impl PhoneModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        Self {
            models: vec![PhoneModel::contacts()],
        }
    }

    pub fn register(&mut self, model: PhoneModel) -> Result<(), CoreError> {
        if model.fields.is_empty() {
            return Err(CoreError::EmptyPhoneModel(model.kind));
        }
        if self.get(&model.kind).is_some() {
            return Err(CoreError::DuplicatePhoneModel(model.kind));
        }
        self.models.push(model);
        Ok(())
    }

    pub fn models(&self) -> &[PhoneModel] {
        &self.models
    }

    pub fn get(&self, kind: &str) -> Option<&PhoneModel> {
        self.models.iter().find(|model| model.kind == kind)
    }
}
