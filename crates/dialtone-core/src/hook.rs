use crate::error::CoreError;
use crate::phone::{format_phone, PhoneError};
use crate::settings::{resolve_country, CompanySettings};

/// A record owning phone-number fields.
pub trait PhoneBearing {
    fn phone_fields(&self) -> &'static [&'static str];
    fn phone_field(&self, field: &str) -> Option<&str>;
    fn set_phone_field(&mut self, field: &str, value: Option<String>);
    /// ISO code of the record's own country.
    fn country_code(&self) -> Option<&str>;
}

/// Normalizes `field` in place before the record is persisted.
///
/// Blank values clear the field; anything else must format or the write is
/// rejected and the record is left untouched.
pub fn on_phone_field_write<R>(
    record: &mut R,
    field: &str,
    settings: &CompanySettings,
) -> Result<(), CoreError>
where
    R: PhoneBearing + ?Sized,
{
    if !record.phone_fields().contains(&field) {
        return Err(PhoneError::UnknownPhoneField(field.to_string()).into());
    }

    let raw = match record.phone_field(field) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => {
            record.set_phone_field(field, None);
            return Ok(());
        }
    };

    let declared = record.country_code().map(resolve_country).transpose()?;
    let canonical = format_phone(&raw, declared, settings.country)?;
    record.set_phone_field(field, Some(canonical));
    Ok(())
}

/// Runs [`on_phone_field_write`] for every phone field of the record.
pub fn validate_phone_fields<R>(record: &mut R, settings: &CompanySettings) -> Result<(), CoreError>
where
    R: PhoneBearing + ?Sized,
{
    for field in record.phone_fields() {
        on_phone_field_write(record, field, settings)?;
    }
    Ok(())
}
