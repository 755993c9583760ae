//! The tracking service: the single orchestration point for a lookup.
//!
//! TRACK ORDER (fixed):
//!   1. Validate and normalize the raw input.
//!   2. Ask the enrichment collaborator (best effort, bounded by its timeout).
//!   3. Fill operator/circle the collaborator left empty from the prefix table.
//!   4. Read stored owner info and complaint count.
//!   5. Derive the synthetic identity from the number's digest.
//!   6. Upsert the tracked record, carrying owner fields over.
//!   7. Assemble the report.
//!
//! RULES:
//!   - An invalid number fails before any store access.
//!   - Enrichment failure is never an error for the caller.
//!   - Store failure is always an error for the caller.

use crate::{
    config::TrackerConfig,
    deriver::{DerivedIdentity, Deriver},
    enrichment::{provider_from_config, DisabledEnrichment, Enrichment, EnrichmentProvider},
    error::TrackResult,
    prefix_table::{language_for, PrefixTable},
    records::{Complaint, TrackedRecord},
    rng::{RandomSource, TrackerRng},
    store::LookupStore,
    types::{MobileNumber, NOT_AVAILABLE},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a single `track` call learned about a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub number: MobileNumber,
    pub operator: String,
    pub circle: String,
    /// Mirrors `circle`.
    pub location: String,
    /// Main language of the circle.
    pub language: String,
    pub owner_name: String,
    pub owner_address: String,
    pub complaints_count: i64,
    pub connection_type: String,
    /// True when at least one field came from the enrichment collaborator.
    pub enriched: bool,
    pub identity: DerivedIdentity,
    pub tracked_at: DateTime<Utc>,
}

/// Input for the map collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocation {
    pub number: MobileNumber,
    pub circle: String,
}

pub struct TrackingService {
    pub store: LookupStore,
    prefixes: PrefixTable,
    deriver: Deriver,
    enrichment: Box<dyn EnrichmentProvider>,
    rng: Box<dyn RandomSource>,
    recent_limit: usize,
}

impl TrackingService {
    pub fn new(
        store: LookupStore,
        enrichment: Box<dyn EnrichmentProvider>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            prefixes: PrefixTable::new(),
            deriver: Deriver::standard(),
            enrichment,
            rng,
            recent_limit: crate::config::DEFAULT_RECENT_LIMIT,
        }
    }

    /// Build a fully wired service from config.
    /// Opens (and migrates) the store; a failure there is fatal.
    pub fn build(config: &TrackerConfig, rng: TrackerRng) -> TrackResult<Self> {
        let store = LookupStore::open_migrated(&config.db_path)?;
        let enrichment = provider_from_config(&config.enrichment);
        log::debug!(
            "tracking service: db={} enrichment={}",
            config.db_path,
            enrichment.name()
        );
        Ok(Self::new(store, enrichment, Box::new(rng)).with_recent_limit(config.recent_limit))
    }

    /// In-memory store, enrichment disabled, seeded fallback RNG.
    pub fn build_test(seed: u64) -> TrackResult<Self> {
        let store = LookupStore::open_migrated(":memory:")?;
        Ok(Self::new(
            store,
            Box::new(DisabledEnrichment),
            Box::new(TrackerRng::seeded(seed)),
        ))
    }

    pub fn with_enrichment(mut self, enrichment: Box<dyn EnrichmentProvider>) -> Self {
        self.enrichment = enrichment;
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit.max(1);
        self
    }

    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    pub fn deriver(&self) -> &Deriver {
        &self.deriver
    }

    // ── Operations ─────────────────────────────────────────────────

    pub fn track(&mut self, raw: &str) -> TrackResult<TrackingReport> {
        let number = MobileNumber::parse(raw)?;
        self.track_number(&number)
    }

    pub fn track_number(&mut self, number: &MobileNumber) -> TrackResult<TrackingReport> {
        log::info!("tracking +91-{number}");

        let Enrichment {
            carrier,
            location,
            line_type,
        } = self.enrich(number).unwrap_or_default();
        let enriched = carrier.is_some() || location.is_some() || line_type.is_some();

        let operator = match carrier {
            Some(carrier) => carrier,
            None => self
                .prefixes
                .operator_for(number, self.rng.as_mut())
                .label()
                .to_string(),
        };
        let circle = location.unwrap_or_else(|| self.prefixes.circle_for(number).to_string());

        let owner = self.store.get_owner_info(number)?;
        let complaints_count = self.store.count_complaints(number)?;

        let identity = self.deriver.derive(number);

        let tracked_at = Utc::now();
        self.store.upsert_tracked(&TrackedRecord {
            number: number.clone(),
            operator: operator.clone(),
            circle: circle.clone(),
            owner_name: owner.name.clone(),
            owner_address: owner.address.clone(),
            tracked_at,
        })?;

        Ok(TrackingReport {
            number: number.clone(),
            operator,
            location: circle.clone(),
            language: language_for(&circle).to_string(),
            circle,
            owner_name: owner.name,
            owner_address: owner.address,
            complaints_count,
            connection_type: line_type.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            enriched,
            identity,
            tracked_at,
        })
    }

    /// File a complaint. Blank owner fields count as not supplied.
    pub fn report_complaint(
        &mut self,
        raw: &str,
        reporter_name: &str,
        complaint_text: &str,
        owner_name: Option<&str>,
        owner_address: Option<&str>,
    ) -> TrackResult<Complaint> {
        let number = MobileNumber::parse(raw)?;
        let mut complaint = Complaint {
            id: None,
            number,
            reporter_name: reporter_name.to_string(),
            complaint_text: complaint_text.to_string(),
            owner_name: supplied(owner_name),
            owner_address: supplied(owner_address),
            reported_at: Utc::now(),
        };
        let id = self.store.insert_complaint(&complaint)?;
        complaint.id = Some(id);
        log::info!(
            "complaint {id} filed against +91-{} (owner info: {})",
            complaint.number,
            complaint.carries_owner_info()
        );
        Ok(complaint)
    }

    pub fn recent_tracked(&self) -> TrackResult<Vec<TrackedRecord>> {
        self.store.recent_tracked(self.recent_limit)
    }

    pub fn recent_complaints(&self) -> TrackResult<Vec<Complaint>> {
        self.store.recent_complaints(self.recent_limit)
    }

    /// Validate and resolve the circle only. Touches neither the store
    /// nor the enrichment collaborator.
    pub fn locate(&self, raw: &str) -> TrackResult<NumberLocation> {
        let number = MobileNumber::parse(raw)?;
        let circle = self.prefixes.circle_for(&number).to_string();
        Ok(NumberLocation { number, circle })
    }

    fn enrich(&self, number: &MobileNumber) -> Option<Enrichment> {
        match self.enrichment.lookup(number) {
            Ok(enrichment) => {
                log::debug!("enrichment via {} succeeded", self.enrichment.name());
                // Blank answers leave the offline tables in charge.
                Some(Enrichment {
                    carrier: supplied(enrichment.carrier.as_deref()),
                    location: supplied(enrichment.location.as_deref()),
                    line_type: supplied(enrichment.line_type.as_deref()),
                })
            }
            Err(crate::error::EnrichmentError::Disabled) => None,
            Err(e) => {
                log::warn!(
                    "enrichment via {} unavailable, using offline lookup: {e}",
                    self.enrichment.name()
                );
                None
            }
        }
    }
}

fn supplied(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
