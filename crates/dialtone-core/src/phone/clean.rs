/// Keeps a leading `+` and every digit, stopping at an extension marker.
/// Returns `None` when no digit precedes the marker.
pub fn clean_phone_input(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut saw_digit = false;

    if trimmed.starts_with('+') {
        out.push('+');
    }

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
            continue;
        }

        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            if !saw_digit {
                return None;
            }
            break;
        }
    }

    if !saw_digit {
        return None;
    }

    Some(out)
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}
