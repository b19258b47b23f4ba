use crate::domain::country::Country;
use crate::error::CoreError;

pub const DEFAULT_DIGITS_TO_MATCH_FROM_END: usize = 9;
pub const MAX_DIGITS_TO_MATCH_FROM_END: usize = 15;

/// Tenant-wide phone settings, read-only while a call is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySettings {
    /// Operating country, default for records without their own.
    pub country: Option<&'static Country>,
    pub digits_to_match_from_end: usize,
    pub dial: DialSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialSettings {
    /// Replaces the local country's international access sequence.
    pub international_prefix: Option<String>,
    /// Prepended to every dial string, e.g. a PBX outside-line digit.
    pub outgoing_prefix: Option<String>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            country: None,
            digits_to_match_from_end: DEFAULT_DIGITS_TO_MATCH_FROM_END,
            dial: DialSettings::default(),
        }
    }
}

impl CompanySettings {
    pub fn for_country(code: &str) -> Result<Self, CoreError> {
        Ok(Self {
            country: Some(resolve_country(code)?),
            ..Self::default()
        })
    }

    pub fn with_digits_to_match(mut self, digits: usize) -> Self {
        self.digits_to_match_from_end = digits;
        self
    }
}

pub fn resolve_country(code: &str) -> Result<&'static Country, CoreError> {
    Country::by_code(code).ok_or_else(|| CoreError::UnknownCountry(code.trim().to_string()))
}

pub fn validate_digits_to_match(value: i64) -> Result<usize, CoreError> {
    if value <= 0 || value > MAX_DIGITS_TO_MATCH_FROM_END as i64 {
        return Err(CoreError::InvalidDigitsToMatch(value));
    }
    Ok(value as usize)
}
