/// Explicit grouping for national numbers that start with `leading` and have
/// `length` digits (0 accepts any length). A trailing group size of 0 takes
/// the remaining digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRule {
    pub leading: &'static str,
    pub length: usize,
    pub groups: &'static [usize],
}

impl GroupRule {
    pub const fn new(leading: &'static str, length: usize, groups: &'static [usize]) -> Self {
        Self {
            leading,
            length,
            groups,
        }
    }

    fn matches(&self, national: &str) -> bool {
        national.starts_with(self.leading) && (self.length == 0 || self.length == national.len())
    }
}

/// Presentation convention for the national part of a canonical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Pairs of digits, with a single leading digit when the length is odd.
    Pairs,
    /// First applicable rule wins; falls back to [`Grouping::Pairs`].
    Rules(&'static [GroupRule]),
}

impl Grouping {
    pub fn group<'a>(&self, national: &'a str) -> Vec<&'a str> {
        if let Grouping::Rules(rules) = self {
            for rule in rules.iter().filter(|rule| rule.matches(national)) {
                if let Some(groups) = apply_groups(national, rule.groups) {
                    return groups;
                }
            }
        }
        pairs(national)
    }

    pub fn format(&self, national: &str) -> String {
        self.group(national).join(" ")
    }
}

fn pairs(national: &str) -> Vec<&str> {
    let mut out = Vec::with_capacity(national.len() / 2 + 1);
    let mut start = 0;
    if national.len() % 2 == 1 {
        out.push(&national[..1]);
        start = 1;
    }
    while start < national.len() {
        out.push(&national[start..start + 2]);
        start += 2;
    }
    out
}

fn apply_groups<'a>(national: &'a str, groups: &[usize]) -> Option<Vec<&'a str>> {
    let mut out = Vec::with_capacity(groups.len());
    let mut start = 0;
    for (index, &size) in groups.iter().enumerate() {
        let remaining = national.len() - start;
        let size = if size == 0 && index + 1 == groups.len() {
            remaining
        } else {
            size
        };
        if size == 0 || size > remaining {
            return None;
        }
        out.push(&national[start..start + size]);
        start += size;
    }
    if start != national.len() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{GroupRule, Grouping};

    const SWISS: &[GroupRule] = &[GroupRule::new("", 9, &[2, 3, 2, 2])];
    const REMAINDER: &[GroupRule] = &[GroupRule::new("30", 0, &[2, 0])];

    #[test]
    fn pairs_put_single_digit_first_on_odd_length() {
        assert_eq!(Grouping::Pairs.format("472088732"), "4 72 08 87 32");
        assert_eq!(Grouping::Pairs.format("12345678"), "12 34 56 78");
    }

    #[test]
    fn rules_apply_explicit_groups() {
        let grouping = Grouping::Rules(SWISS);
        assert_eq!(grouping.format("216191010"), "21 619 10 10");
    }

    #[test]
    fn rules_fall_back_to_pairs_when_nothing_matches() {
        let grouping = Grouping::Rules(SWISS);
        assert_eq!(grouping.format("2161910"), "2 16 19 10");
    }

    #[test]
    fn trailing_zero_group_takes_remaining_digits() {
        let grouping = Grouping::Rules(REMAINDER);
        assert_eq!(grouping.format("301234567"), "30 1234567");
    }

    #[test]
    fn grouping_never_changes_digits() {
        let grouping = Grouping::Rules(SWISS);
        for national in ["216191010", "796064242", "1", "12"] {
            let formatted = grouping.format(national);
            assert_eq!(formatted.replace(' ', ""), national);
        }
    }
}
