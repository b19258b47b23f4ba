pub mod clean;
pub mod dial;
pub mod error;
pub mod format;
pub mod grouping;
pub mod matching;

pub use clean::{clean_phone_input, digits_only};
pub use dial::{to_dial_number, to_dial_number_with};
pub use error::PhoneError;
pub use format::{format_phone, parse_phone, ParsedPhone};
pub use grouping::{GroupRule, Grouping};
pub use matching::{find_candidates, normalize_inbound, suffix_key, suffix_matches};
