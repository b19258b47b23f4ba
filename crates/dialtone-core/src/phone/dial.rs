use crate::domain::country::Country;
use crate::phone::error::PhoneError;
use crate::phone::format::parse_phone;
use crate::settings::DialSettings;

/// Dial string for a PBX located in `local`, with default dial settings.
pub fn to_dial_number(number: &str, local: &'static Country) -> Result<String, PhoneError> {
    to_dial_number_with(number, local, &DialSettings::default())
}

/// Numbers in the local country get the national trunk prefix, others the
/// international access sequence followed by the full digit string.
pub fn to_dial_number_with(
    number: &str,
    local: &'static Country,
    settings: &DialSettings,
) -> Result<String, PhoneError> {
    let parsed = parse_phone(number, None, Some(local))?;

    let mut out = settings.outgoing_prefix.clone().unwrap_or_default();
    if parsed.country.calling_code == local.calling_code {
        if let Some(trunk) = local.trunk_prefix {
            out.push_str(trunk);
        }
        out.push_str(&parsed.national);
    } else {
        let international_prefix = settings
            .international_prefix
            .as_deref()
            .unwrap_or(local.international_prefix);
        out.push_str(international_prefix);
        out.push_str(&parsed.international_digits());
    }
    Ok(out)
}
