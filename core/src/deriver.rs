//! Deterministic synthetic identity derived from a number's digest.
//!
//! RULE: Every field is a pure function of the digest. Nothing here is
//! persisted; the identity is recomputed on every lookup and must come out
//! identical for the same number, across calls and across processes.

use crate::{
    digest::{DigestAlgorithm, Md5Digest, NumberDigest},
    types::MobileNumber,
};
use serde::{Deserialize, Serialize};

/// Trait vocabulary, indexed by `byte % len`.
pub const PERSONALITY_TRAITS: [&str; 6] = [
    "Simple",
    "Perverse",
    "Anticipative",
    "Treacherous",
    "Regretful",
    "Disputatious",
];

/// Digest bytes consulted for personality traits (hex offsets 0..12).
const PERSONALITY_STEPS: usize = 6;

/// Hometown pool, indexed by digest byte 6.
pub const HOMETOWNS: [&str; 3] = [
    "Fazilka, Punjab, India",
    "Moga, Punjab, India",
    "Sangrur, Punjab, India",
];

/// Reference city pool, indexed by digest byte 7.
pub const REFERENCE_CITIES: [&str; 3] = [
    "Pathankot, Punjab, India",
    "Jalandhar, Punjab, India",
    "Ludhiana, Punjab, India",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingHistory {
    pub today: u32,
    pub week: u32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedIdentity {
    pub imei: String,
    pub mac_address: String,
    pub ip_address: String,
    pub personality: Vec<String>,
    pub tracker_id: String,
    pub history: TrackingHistory,
    pub hometown: String,
    pub reference_city: String,
    pub mobile_locations: Vec<String>,
    pub tower_locations: Vec<String>,
}

/// "35" + hex[0..6] + "***" + hex[6..10].
pub fn imei(digest: &NumberDigest) -> String {
    let hex = digest.to_hex();
    format!("35{}***{}", &hex[0..6], &hex[6..10])
}

/// Six hex pairs, the third masked.
pub fn mac(digest: &NumberDigest) -> String {
    let b = digest.bytes();
    format!(
        "{:02x}:{:02x}:**:{:02x}:{:02x}:{:02x}",
        b[0], b[1], b[3], b[4], b[5]
    )
}

/// Four decimal octets, the third masked.
pub fn ip(digest: &NumberDigest) -> String {
    let b = digest.bytes();
    format!("{}.{}.**.{}", b[0], b[1], b[3])
}

/// Up to six distinct traits, in first-seen order.
pub fn personality(digest: &NumberDigest) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(PERSONALITY_TRAITS.len());
    for step in 0..PERSONALITY_STEPS {
        let index = digest.byte(step) as usize % PERSONALITY_TRAITS.len();
        let trait_name = PERSONALITY_TRAITS[index];
        if !selected.iter().any(|t| t == trait_name) {
            selected.push(trait_name.to_string());
        }
        if selected.len() >= PERSONALITY_TRAITS.len() {
            break;
        }
    }
    selected
}

/// The three counters are independent; no ordering between them holds.
pub fn history(digest: &NumberDigest) -> TrackingHistory {
    TrackingHistory {
        today: u32::from(digest.byte(0)) % 10 + 1,
        week: u32::from(digest.byte(1)) % 20 + 10,
        month: u32::from(digest.byte(2)) % 50 + 30,
    }
}

/// First ten hex characters, upper-cased.
pub fn tracker_id(digest: &NumberDigest) -> String {
    digest.to_hex()[..10].to_uppercase()
}

pub fn hometown(digest: &NumberDigest) -> &'static str {
    HOMETOWNS[digest.byte(6) as usize % HOMETOWNS.len()]
}

pub fn reference_city(digest: &NumberDigest) -> &'static str {
    REFERENCE_CITIES[digest.byte(7) as usize % REFERENCE_CITIES.len()]
}

/// Town names of the hometown and reference city, deduplicated.
pub fn mobile_locations(digest: &NumberDigest) -> Vec<String> {
    let mut towns: Vec<String> = Vec::with_capacity(2);
    for place in [hometown(digest), reference_city(digest)] {
        let town = place.split(',').next().unwrap_or(place).trim();
        if !towns.iter().any(|t| t == town) {
            towns.push(town.to_string());
        }
    }
    towns
}

/// Two tower ids from hex[16..20] and hex[20..24].
pub fn tower_locations(digest: &NumberDigest) -> Vec<String> {
    let hex = digest.to_hex().to_uppercase();
    vec![format!("TWR-{}", &hex[16..20]), format!("TWR-{}", &hex[20..24])]
}

/// Runs every derivation over one digest algorithm.
pub struct Deriver<A: DigestAlgorithm = Md5Digest> {
    algorithm: A,
}

impl Deriver<Md5Digest> {
    pub fn standard() -> Self {
        Self {
            algorithm: Md5Digest,
        }
    }
}

impl<A: DigestAlgorithm> Deriver<A> {
    pub fn with_algorithm(algorithm: A) -> Self {
        Self { algorithm }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn digest(&self, number: &MobileNumber) -> NumberDigest {
        self.algorithm.digest_number(number)
    }

    pub fn derive(&self, number: &MobileNumber) -> DerivedIdentity {
        let digest = self.digest(number);
        DerivedIdentity {
            imei: imei(&digest),
            mac_address: mac(&digest),
            ip_address: ip(&digest),
            personality: personality(&digest),
            tracker_id: tracker_id(&digest),
            history: history(&digest),
            hometown: hometown(&digest).to_string(),
            reference_city: reference_city(&digest).to_string(),
            mobile_locations: mobile_locations(&digest),
            tower_locations: tower_locations(&digest),
        }
    }
}

impl Default for Deriver<Md5Digest> {
    fn default() -> Self {
        Self::standard()
    }
}
