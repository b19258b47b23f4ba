use crate::domain::country::{country_for_calling_code, match_calling_code, Country};
use crate::phone::clean::clean_phone_input;
use crate::phone::error::PhoneError;

/// A phone number split into its country and national significant number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhone {
    pub country: &'static Country,
    pub national: String,
}

impl ParsedPhone {
    /// `+<calling code> <grouped national number>`.
    pub fn canonical(&self) -> String {
        format!(
            "+{} {}",
            self.country.calling_code,
            self.country.grouping.format(&self.national)
        )
    }

    /// Calling code followed by the national number, digits only.
    pub fn international_digits(&self) -> String {
        format!("{}{}", self.country.calling_code, self.national)
    }
}

/// Parses a raw or canonical number.
///
/// `declared` is the record's own country and is checked against an explicit
/// international prefix; `default_country` only resolves local formats.
pub fn parse_phone(
    raw: &str,
    declared: Option<&'static Country>,
    default_country: Option<&'static Country>,
) -> Result<ParsedPhone, PhoneError> {
    let cleaned =
        clean_phone_input(raw).ok_or_else(|| PhoneError::InvalidPhoneFormat(raw.to_string()))?;

    if let Some(digits) = cleaned.strip_prefix('+') {
        return parse_international(raw, digits, declared);
    }

    let country = declared
        .or(default_country)
        .ok_or_else(|| PhoneError::AmbiguousCountryCode(raw.to_string()))?;

    if let Some(digits) = cleaned.strip_prefix(country.international_prefix) {
        return parse_international(raw, digits, declared);
    }

    national_number(raw, country, &cleaned)
}

/// Canonical form of `raw`, see [`parse_phone`].
pub fn format_phone(
    raw: &str,
    declared: Option<&'static Country>,
    default_country: Option<&'static Country>,
) -> Result<String, PhoneError> {
    parse_phone(raw, declared, default_country).map(|parsed| parsed.canonical())
}

fn parse_international(
    raw: &str,
    digits: &str,
    declared: Option<&'static Country>,
) -> Result<ParsedPhone, PhoneError> {
    if digits.is_empty() {
        return Err(PhoneError::InvalidPhoneFormat(raw.to_string()));
    }
    let calling_code =
        match_calling_code(digits).ok_or_else(|| PhoneError::UnknownCallingCode(raw.to_string()))?;

    if let Some(declared) = declared {
        if declared.calling_code != calling_code {
            return Err(PhoneError::CountryMismatch {
                number: raw.to_string(),
                country: declared.code.to_string(),
                found: calling_code.to_string(),
            });
        }
    }

    let country = country_for_calling_code(calling_code, declared)
        .ok_or_else(|| PhoneError::UnknownCallingCode(raw.to_string()))?;
    national_number(raw, country, &digits[calling_code.len()..])
}

// "+33 (0)4 ..." carries the trunk prefix after the calling code too.
fn national_number(
    raw: &str,
    country: &'static Country,
    digits: &str,
) -> Result<ParsedPhone, PhoneError> {
    let national = match country.trunk_prefix {
        Some(trunk) => {
            let national = digits.strip_prefix(trunk).unwrap_or(digits);
            // National significant numbers never start with the trunk prefix.
            if national.starts_with(trunk) {
                return Err(PhoneError::InvalidPhoneFormat(raw.to_string()));
            }
            national
        }
        None => digits,
    };
    if national.is_empty() {
        return Err(PhoneError::InvalidPhoneFormat(raw.to_string()));
    }
    Ok(ParsedPhone {
        country,
        national: national.to_string(),
    })
}
