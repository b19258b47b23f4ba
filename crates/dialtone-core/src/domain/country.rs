use crate::phone::grouping::{GroupRule, Grouping};

/// National dialing conventions for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    pub name: &'static str,
    /// Country calling code, without the `+`.
    pub calling_code: &'static str,
    /// Digits dialed before a national number for in-country calls.
    pub trunk_prefix: Option<&'static str>,
    /// Access sequence dialed before a foreign calling code.
    pub international_prefix: &'static str,
    pub grouping: Grouping,
}

impl Country {
    pub fn by_code(code: &str) -> Option<&'static Country> {
        let code = code.trim();
        COUNTRIES
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    pub fn all() -> &'static [Country] {
        COUNTRIES
    }

    /// Countries sharing `calling_code`, main country first.
    pub fn for_calling_code(calling_code: &str) -> impl Iterator<Item = &'static Country> + '_ {
        COUNTRIES
            .iter()
            .filter(move |country| country.calling_code == calling_code)
    }
}

/// Longest known calling code prefixing `digits`.
pub fn match_calling_code(digits: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .map(|country| country.calling_code)
        .filter(|code| digits.starts_with(*code))
        .max_by_key(|code| code.len())
}

/// Resolves a calling code to a country, preferring `declared` when it shares
/// the code.
pub fn country_for_calling_code(
    calling_code: &str,
    declared: Option<&'static Country>,
) -> Option<&'static Country> {
    if let Some(declared) = declared {
        if declared.calling_code == calling_code {
            return Some(declared);
        }
    }
    Country::for_calling_code(calling_code).next()
}

const EUROPE_IDD: &str = "00";
const NANP_IDD: &str = "011";

const AT_RULES: &[GroupRule] = &[
    GroupRule::new("1", 0, &[1, 0]),
    GroupRule::new("6", 0, &[3, 0]),
    GroupRule::new("", 0, &[4, 0]),
];
const BE_RULES: &[GroupRule] = &[
    GroupRule::new("4", 9, &[3, 2, 2, 2]),
    GroupRule::new("2", 8, &[1, 3, 2, 2]),
    GroupRule::new("3", 8, &[1, 3, 2, 2]),
    GroupRule::new("4", 8, &[1, 3, 2, 2]),
    GroupRule::new("9", 8, &[1, 3, 2, 2]),
    GroupRule::new("", 8, &[2, 2, 2, 2]),
];
const CH_RULES: &[GroupRule] = &[GroupRule::new("", 9, &[2, 3, 2, 2])];
const DE_RULES: &[GroupRule] = &[
    GroupRule::new("1", 0, &[3, 0]),
    GroupRule::new("30", 0, &[2, 0]),
    GroupRule::new("40", 0, &[2, 0]),
    GroupRule::new("69", 0, &[2, 0]),
    GroupRule::new("89", 0, &[2, 0]),
    GroupRule::new("", 0, &[3, 0]),
];
const ES_RULES: &[GroupRule] = &[GroupRule::new("", 9, &[3, 2, 2, 2])];
const GB_RULES: &[GroupRule] = &[
    GroupRule::new("20", 10, &[2, 4, 4]),
    GroupRule::new("", 10, &[4, 6]),
];
const IE_RULES: &[GroupRule] = &[
    GroupRule::new("8", 9, &[2, 3, 4]),
    GroupRule::new("1", 8, &[1, 3, 4]),
];
const IT_RULES: &[GroupRule] = &[
    GroupRule::new("3", 10, &[3, 3, 4]),
    GroupRule::new("0", 10, &[2, 4, 4]),
];
const LU_RULES: &[GroupRule] = &[GroupRule::new("6", 9, &[3, 3, 3])];
const NANP_RULES: &[GroupRule] = &[GroupRule::new("", 10, &[3, 3, 4])];
const NL_RULES: &[GroupRule] = &[
    GroupRule::new("6", 9, &[1, 8]),
    GroupRule::new("", 9, &[2, 3, 4]),
];
const NO_RULES: &[GroupRule] = &[
    GroupRule::new("4", 8, &[3, 2, 3]),
    GroupRule::new("9", 8, &[3, 2, 3]),
];
const PT_RULES: &[GroupRule] = &[GroupRule::new("", 9, &[3, 3, 3])];

static COUNTRIES: &[Country] = &[
    Country {
        code: "FR",
        name: "France",
        calling_code: "33",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Pairs,
    },
    Country {
        code: "BE",
        name: "Belgium",
        calling_code: "32",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(BE_RULES),
    },
    Country {
        code: "CH",
        name: "Switzerland",
        calling_code: "41",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(CH_RULES),
    },
    Country {
        code: "LU",
        name: "Luxembourg",
        calling_code: "352",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(LU_RULES),
    },
    Country {
        code: "MC",
        name: "Monaco",
        calling_code: "377",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Pairs,
    },
    Country {
        code: "DE",
        name: "Germany",
        calling_code: "49",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(DE_RULES),
    },
    Country {
        code: "AT",
        name: "Austria",
        calling_code: "43",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(AT_RULES),
    },
    Country {
        code: "NL",
        name: "Netherlands",
        calling_code: "31",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(NL_RULES),
    },
    Country {
        code: "GB",
        name: "United Kingdom",
        calling_code: "44",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(GB_RULES),
    },
    Country {
        code: "IE",
        name: "Ireland",
        calling_code: "353",
        trunk_prefix: Some("0"),
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(IE_RULES),
    },
    Country {
        code: "ES",
        name: "Spain",
        calling_code: "34",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(ES_RULES),
    },
    Country {
        code: "IT",
        name: "Italy",
        calling_code: "39",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(IT_RULES),
    },
    Country {
        code: "PT",
        name: "Portugal",
        calling_code: "351",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(PT_RULES),
    },
    Country {
        code: "DK",
        name: "Denmark",
        calling_code: "45",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Pairs,
    },
    Country {
        code: "NO",
        name: "Norway",
        calling_code: "47",
        trunk_prefix: None,
        international_prefix: EUROPE_IDD,
        grouping: Grouping::Rules(NO_RULES),
    },
    Country {
        code: "US",
        name: "United States",
        calling_code: "1",
        trunk_prefix: Some("1"),
        international_prefix: NANP_IDD,
        grouping: Grouping::Rules(NANP_RULES),
    },
    Country {
        code: "CA",
        name: "Canada",
        calling_code: "1",
        trunk_prefix: Some("1"),
        international_prefix: NANP_IDD,
        grouping: Grouping::Rules(NANP_RULES),
    },
];
