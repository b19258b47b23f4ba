use crate::domain::country::Country;
use crate::phone::clean::{clean_phone_input, digits_only};
use std::collections::BTreeSet;

/// Digits of an inbound caller number, in international form when the
/// prefix allows it.
///
/// `+` or the local international access prefix introduce an international
/// number, a local trunk prefix is replaced by the local calling code, and
/// anything else is kept as bare digits.
pub fn normalize_inbound(inbound: &str, local: Option<&Country>) -> Option<String> {
    let cleaned = clean_phone_input(inbound)?;
    if let Some(rest) = cleaned.strip_prefix('+') {
        return non_empty(rest.to_string());
    }
    let Some(local) = local else {
        return non_empty(cleaned);
    };
    if let Some(rest) = cleaned.strip_prefix(local.international_prefix) {
        return non_empty(rest.to_string());
    }
    if let Some(trunk) = local.trunk_prefix {
        if let Some(rest) = cleaned.strip_prefix(trunk) {
            if rest.is_empty() {
                return None;
            }
            return Some(format!("{}{}", local.calling_code, rest));
        }
    }
    non_empty(cleaned)
}

/// Last `n` digits, or all of them when there are fewer.
pub fn suffix_key(digits: &str, n: usize) -> &str {
    if digits.len() > n {
        &digits[digits.len() - n..]
    } else {
        digits
    }
}

pub fn suffix_matches(stored: &str, key: &str) -> bool {
    !key.is_empty() && digits_only(stored).ends_with(key)
}

/// Ids of every pooled value sharing the inbound number's trailing digits,
/// in ascending order.
pub fn find_candidates<I, T, S>(inbound_digits: &str, n: usize, pool: I) -> BTreeSet<T>
where
    I: IntoIterator<Item = (T, S)>,
    T: Ord,
    S: AsRef<str>,
{
    let digits = digits_only(inbound_digits);
    let key = suffix_key(&digits, n);
    pool.into_iter()
        .filter(|(_, value)| suffix_matches(value.as_ref(), key))
        .map(|(id, _)| id)
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
