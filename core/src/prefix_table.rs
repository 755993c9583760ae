//! Static prefix tables: 3-digit prefix → operator, 2-digit code → circle.
//!
//! RULE: The tables are immutable configuration. They are built once when
//! a `PrefixTable` is constructed and never mutated afterwards.
//!
//! Operator prefix sets must be pairwise disjoint. Lookup is first-match in
//! table order, so an overlap would silently shadow the later operator;
//! `overlapping_prefixes()` exists so tests can prove there is none.

use crate::{
    rng::{RandomSource, WeightedChoice},
    types::{MobileNumber, NOT_AVAILABLE},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    RelianceJio,
    Airtel,
    VodafoneIdea,
    Bsnl,
    Mtnl,
    Unknown,
}

impl Operator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RelianceJio => "Reliance Jio",
            Self::Airtel => "Airtel",
            Self::VodafoneIdea => "Vodafone Idea",
            Self::Bsnl => "BSNL",
            Self::Mtnl => "MTNL",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Market-share weights used when a 6/7/8/9 number matches no prefix.
pub const FALLBACK_OPERATORS: WeightedChoice<Operator> = WeightedChoice::new(&[
    (Operator::RelianceJio, 0.35),
    (Operator::Airtel, 0.30),
    (Operator::VodafoneIdea, 0.25),
    (Operator::Bsnl, 0.08),
    (Operator::Mtnl, 0.02),
]);

/// Operator tables in lookup order.
pub const OPERATOR_TABLE: [(Operator, &[&str]); 5] = [
    (Operator::RelianceJio, RELIANCE_JIO_PREFIXES),
    (Operator::Airtel, AIRTEL_PREFIXES),
    (Operator::VodafoneIdea, VODAFONE_IDEA_PREFIXES),
    (Operator::Bsnl, BSNL_PREFIXES),
    (Operator::Mtnl, MTNL_PREFIXES),
];

pub struct PrefixTable {
    operators: HashMap<&'static str, Operator>,
    circles: HashMap<&'static str, &'static str>,
}

impl PrefixTable {
    pub fn new() -> Self {
        let mut operators = HashMap::new();
        for (operator, prefixes) in OPERATOR_TABLE {
            for prefix in prefixes {
                // First table wins, matching ordered lookup.
                operators.entry(*prefix).or_insert(operator);
            }
        }
        let circles = CIRCLES.iter().copied().collect();
        Self { operators, circles }
    }

    /// Pure table lookup on the first three digits.
    pub fn lookup_operator(&self, number: &MobileNumber) -> Option<Operator> {
        self.operators.get(number.prefix(3)).copied()
    }

    /// Table lookup, then the weighted fallback for unlisted 6/7/8/9 prefixes.
    pub fn operator_for(&self, number: &MobileNumber, rng: &mut dyn RandomSource) -> Operator {
        if let Some(operator) = self.lookup_operator(number) {
            return operator;
        }
        match number.series() {
            '6'..='9' => {
                let picked = FALLBACK_OPERATORS.sample(rng);
                log::debug!(
                    "prefix {} unlisted, fallback operator {picked}",
                    number.prefix(3)
                );
                picked
            }
            _ => Operator::Unknown,
        }
    }

    /// Circle for the first two digits, or "Unknown".
    pub fn circle_for(&self, number: &MobileNumber) -> &'static str {
        self.circles.get(number.prefix(2)).copied().unwrap_or(UNKNOWN)
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    /// Every prefix listed under more than one operator, sorted.
    pub fn overlapping_prefixes() -> Vec<&'static str> {
        let mut seen: HashMap<&'static str, usize> = HashMap::new();
        for (_, prefixes) in OPERATOR_TABLE {
            for prefix in prefixes {
                *seen.entry(*prefix).or_default() += 1;
            }
        }
        let mut overlaps: Vec<_> = seen
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(p, _)| p)
            .collect();
        overlaps.sort_unstable();
        overlaps
    }
}

/// Main language spoken in a circle; "Not available" for anything else.
pub fn language_for(circle: &str) -> &'static str {
    CIRCLE_LANGUAGES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(circle.trim()))
        .map(|(_, language)| *language)
        .unwrap_or(NOT_AVAILABLE)
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tables ─────────────────────────────────────────────────────────

const CIRCLE_LANGUAGES: [(&str, &str); 20] = [
    ("Andhra Pradesh", "Telugu"),
    ("Assam", "Assamese"),
    ("Bihar & Jharkhand", "Hindi"),
    ("Delhi NCR", "Hindi"),
    ("Gujarat", "Gujarati"),
    ("Haryana", "Hindi"),
    ("Himachal Pradesh", "Hindi"),
    ("Jammu & Kashmir", "Urdu"),
    ("Karnataka", "Kannada"),
    ("Kerala", "Malayalam"),
    ("Madhya Pradesh", "Hindi"),
    ("Maharashtra", "Marathi"),
    ("Odisha", "Odia"),
    ("Punjab", "Punjabi"),
    ("Rajasthan", "Hindi"),
    ("Tamil Nadu", "Tamil"),
    ("Uttar Pradesh (Central)", "Hindi"),
    ("Uttar Pradesh (East)", "Hindi"),
    ("Uttar Pradesh (West)", "Hindi"),
    ("West Bengal", "Bengali"),
];

// Operators own a band (second digit) across every series 6-9.

const RELIANCE_JIO_PREFIXES: &[&str] = &[
    "600", "601", "602", "603", "604", "605", "606", "607", "608", "609",
    "700", "701", "702", "703", "704", "705", "706", "707", "708", "709",
    "800", "801", "802", "803", "804", "805", "806", "807", "808", "809",
    "900", "901", "902", "903", "904", "905", "906", "907", "908", "909",
];

const AIRTEL_PREFIXES: &[&str] = &[
    "610", "611", "612", "613", "614", "615", "616", "617", "618", "619",
    "710", "711", "712", "713", "714", "715", "716", "717", "718", "719",
    "810", "811", "812", "813", "814", "815", "816", "817", "818", "819",
    "910", "911", "912", "913", "914", "915", "916", "917", "918", "919",
];

const VODAFONE_IDEA_PREFIXES: &[&str] = &[
    "620", "621", "622", "623", "624", "625", "626", "627", "628", "629",
    "720", "721", "722", "723", "724", "725", "726", "727", "728", "729",
    "820", "821", "822", "823", "824", "825", "826", "827", "828", "829",
    "920", "921", "922", "923", "924", "925", "926", "927", "928", "929",
];

const BSNL_PREFIXES: &[&str] = &[
    "630", "631", "632", "633", "634", "635", "636", "637", "638", "639",
    "730", "731", "732", "733", "734", "735", "736", "737", "738", "739",
    "830", "831", "832", "833", "834", "835", "836", "837", "838", "839",
    "930", "931", "932", "933", "934", "935", "936", "937", "938", "939",
];

const MTNL_PREFIXES: &[&str] = &[
    "640", "641", "642", "643", "644", "645", "646", "647", "648", "649",
    "740", "741", "742", "743", "744", "745", "746", "747", "748", "749",
    "840", "841", "842", "843", "844", "845", "846", "847", "848", "849",
    "940", "941", "942", "943", "944", "945", "946", "947", "948", "949",
];

// Codes "11".."99"; several codes share a region.
const CIRCLES: [(&str, &str); 89] = [
    ("11", "Delhi NCR"),
    ("12", "Haryana"),
    ("13", "Punjab"),
    ("14", "Himachal Pradesh"),
    ("15", "Jammu & Kashmir"),
    ("16", "Rajasthan"),
    ("17", "Uttar Pradesh (East)"),
    ("18", "Uttar Pradesh (West)"),
    ("19", "Uttar Pradesh (Central)"),
    ("20", "Maharashtra"),
    ("21", "Maharashtra"),
    ("22", "Maharashtra"),
    ("23", "Madhya Pradesh"),
    ("24", "Gujarat"),
    ("25", "Gujarat"),
    ("26", "Gujarat"),
    ("27", "Maharashtra"),
    ("28", "Maharashtra"),
    ("29", "Maharashtra"),
    ("30", "Rajasthan"),
    ("31", "Rajasthan"),
    ("32", "Rajasthan"),
    ("33", "West Bengal"),
    ("34", "West Bengal"),
    ("35", "West Bengal"),
    ("36", "Assam"),
    ("37", "Assam"),
    ("38", "Assam"),
    ("39", "Assam"),
    ("40", "Bihar & Jharkhand"),
    ("41", "Bihar & Jharkhand"),
    ("42", "Bihar & Jharkhand"),
    ("43", "Bihar & Jharkhand"),
    ("44", "Odisha"),
    ("45", "Odisha"),
    ("46", "Odisha"),
    ("47", "Odisha"),
    ("48", "Odisha"),
    ("49", "Odisha"),
    ("50", "Andhra Pradesh"),
    ("51", "Andhra Pradesh"),
    ("52", "Andhra Pradesh"),
    ("53", "Andhra Pradesh"),
    ("54", "Andhra Pradesh"),
    ("55", "Andhra Pradesh"),
    ("56", "Karnataka"),
    ("57", "Karnataka"),
    ("58", "Karnataka"),
    ("59", "Karnataka"),
    ("60", "Tamil Nadu"),
    ("61", "Tamil Nadu"),
    ("62", "Tamil Nadu"),
    ("63", "Tamil Nadu"),
    ("64", "Tamil Nadu"),
    ("65", "Tamil Nadu"),
    ("66", "Kerala"),
    ("67", "Kerala"),
    ("68", "Kerala"),
    ("69", "Kerala"),
    ("70", "Karnataka"),
    ("71", "Karnataka"),
    ("72", "Karnataka"),
    ("73", "Karnataka"),
    ("74", "Karnataka"),
    ("75", "Karnataka"),
    ("76", "Karnataka"),
    ("77", "Karnataka"),
    ("78", "Karnataka"),
    ("79", "Karnataka"),
    ("80", "Karnataka"),
    ("81", "Karnataka"),
    ("82", "Karnataka"),
    ("83", "Karnataka"),
    ("84", "Karnataka"),
    ("85", "Karnataka"),
    ("86", "Karnataka"),
    ("87", "Karnataka"),
    ("88", "Karnataka"),
    ("89", "Karnataka"),
    ("90", "Karnataka"),
    ("91", "Karnataka"),
    ("92", "Karnataka"),
    ("93", "Karnataka"),
    ("94", "Karnataka"),
    ("95", "Karnataka"),
    ("96", "Karnataka"),
    ("97", "Karnataka"),
    ("98", "Karnataka"),
    ("99", "Karnataka"),
];
