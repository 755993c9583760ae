//! End-to-end tracking: validation, enrichment fallback, derivation, store writes.

use mkc_core::{
    config::TrackerConfig,
    enrichment::{Enrichment, EnrichmentProvider},
    error::{EnrichmentError, TrackError},
    rng::{RandomSource, TrackerRng},
    service::TrackingService,
    types::{MobileNumber, NOT_AVAILABLE},
};

fn build(seed: u64) -> TrackingService {
    let _ = env_logger::builder().is_test(true).try_init();
    TrackingService::build_test(seed).expect("build test service")
}

fn num(raw: &str) -> MobileNumber {
    MobileNumber::parse(raw).unwrap()
}

struct FixedRoll(f64);

impl RandomSource for FixedRoll {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

struct CannedEnrichment(Enrichment);

impl EnrichmentProvider for CannedEnrichment {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn lookup(&self, _number: &MobileNumber) -> Result<Enrichment, EnrichmentError> {
        Ok(self.0.clone())
    }
}

struct TimingOut;

impl EnrichmentProvider for TimingOut {
    fn name(&self) -> &'static str {
        "timing-out"
    }

    fn lookup(&self, _number: &MobileNumber) -> Result<Enrichment, EnrichmentError> {
        Err(EnrichmentError::Transport("timed out".into()))
    }
}

/// Offline tables supply operator and circle; the identity comes from the digest.
#[test]
fn track_returns_table_values_and_identity() {
    let mut service = build(42);
    let report = service.track("+91 81234 56789").unwrap();

    assert_eq!(report.number.as_str(), "8123456789");
    assert_eq!(report.operator, "Airtel");
    assert_eq!(report.circle, "Karnataka");
    assert_eq!(report.location, report.circle);
    assert_eq!(report.language, "Kannada");
    assert_eq!(report.owner_name, NOT_AVAILABLE);
    assert_eq!(report.owner_address, NOT_AVAILABLE);
    assert_eq!(report.complaints_count, 0);
    assert_eq!(report.connection_type, NOT_AVAILABLE);
    assert!(!report.enriched);
    assert_eq!(report.identity.tracker_id, "555EBA92D3");
    assert_eq!(service.store.tracked_count().unwrap(), 1);
}

/// A malformed number touches neither table.
#[test]
fn invalid_number_fails_without_store_mutation() {
    let mut service = build(42);
    let err = service.track("12345").unwrap_err();
    assert!(matches!(err, TrackError::InvalidNumberFormat { .. }), "{err}");
    assert_eq!(service.store.tracked_count().unwrap(), 0);

    let err = service
        .report_complaint("5555", "Asha", "Spam", Some("X"), None)
        .unwrap_err();
    assert!(matches!(err, TrackError::InvalidNumberFormat { .. }));
    assert_eq!(service.store.complaint_total().unwrap(), 0);
}

/// Re-tracking keeps one row and the default owner pair.
#[test]
fn tracking_twice_keeps_default_owner_and_one_row() {
    let mut service = build(42);
    let first = service.track("9876543210").unwrap();
    let second = service.track("9876543210").unwrap();

    assert_eq!(first.owner_name, "Not available");
    assert_eq!(first.owner_address, "Not available");
    assert_eq!(second.owner_name, first.owner_name);
    assert_eq!(second.owner_address, first.owner_address);
    assert_eq!(first.identity, second.identity);
    assert_eq!(service.store.tracked_count().unwrap(), 1);
}

/// Owner info from a complaint appears on the next track and sticks.
#[test]
fn complaint_owner_info_shows_up_on_next_track() {
    let mut service = build(42);
    service.track("9876543210").unwrap();

    let complaint = service
        .report_complaint(
            "9876543210",
            "Asha Rao",
            "Repeated spam calls",
            Some("Ravi Kumar"),
            Some("Indiranagar, Bengaluru"),
        )
        .unwrap();
    assert!(complaint.id.is_some());

    let report = service.track("9876543210").unwrap();
    assert_eq!(report.owner_name, "Ravi Kumar");
    assert_eq!(report.owner_address, "Indiranagar, Bengaluru");
    assert_eq!(report.complaints_count, 1);

    // Carried over again on a further track.
    let report = service.track("9876543210").unwrap();
    assert_eq!(report.owner_name, "Ravi Kumar");
}

/// Whitespace-only owner fields are ignored.
#[test]
fn blank_owner_fields_count_as_absent() {
    let mut service = build(42);
    service.track("9876543210").unwrap();
    let complaint = service
        .report_complaint("9876543210", "Asha", "Spam", Some("  "), Some(""))
        .unwrap();
    assert!(!complaint.carries_owner_info());
    assert_eq!(service.track("9876543210").unwrap().owner_name, NOT_AVAILABLE);
}

/// A complaint filed before any track leaves the owner unknown.
#[test]
fn complaint_before_first_track_keeps_owner_unknown() {
    let mut service = build(42);
    service
        .report_complaint("7012345678", "Asha", "Spam", Some("Ravi"), Some("Pune"))
        .unwrap();
    assert_eq!(service.store.tracked_count().unwrap(), 0);

    let report = service.track("7012345678").unwrap();
    assert_eq!(report.owner_name, NOT_AVAILABLE);
    assert_eq!(report.complaints_count, 1);
}

/// Seven tracks, default limit: the five newest come back first.
#[test]
fn recent_tracked_after_seven_numbers_returns_five_newest_first() {
    let mut service = build(42);
    let numbers = [
        "9000000001", "9000000002", "9000000003", "9000000004", "9000000005", "9000000006",
        "9000000007",
    ];
    for raw in numbers {
        service.track(raw).unwrap();
    }
    let recent = service.recent_tracked().unwrap();
    let got: Vec<&str> = recent.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(
        got,
        ["9000000007", "9000000006", "9000000005", "9000000004", "9000000003"]
    );
}

/// The listing limit applies to both recent views.
#[test]
fn recent_limit_is_configurable() {
    let mut service = build(42).with_recent_limit(2);
    for raw in ["9000000001", "9000000002", "9000000003"] {
        service.track(raw).unwrap();
        service.report_complaint(raw, "Asha", "Spam", None, None).unwrap();
    }
    assert_eq!(service.recent_tracked().unwrap().len(), 2);
    let complaints = service.recent_complaints().unwrap();
    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0].number.as_str(), "9000000003");
}

/// Collaborator values override the tables field by field.
#[test]
fn enrichment_values_win_when_present() {
    let mut service = build(42).with_enrichment(Box::new(CannedEnrichment(Enrichment {
        carrier: Some("Reliance Jio Infocomm Ltd".into()),
        location: None,
        line_type: Some("mobile".into()),
    })));
    let report = service.track("8123456789").unwrap();
    assert!(report.enriched);
    assert_eq!(report.operator, "Reliance Jio Infocomm Ltd");
    // Circle was not supplied, so the table fills it.
    assert_eq!(report.circle, "Karnataka");
    assert_eq!(report.connection_type, "mobile");

    let stored = service.store.get_tracked(&num("8123456789")).unwrap().unwrap();
    assert_eq!(stored.operator, "Reliance Jio Infocomm Ltd");
}

/// An answer with nothing in it is not enrichment.
#[test]
fn empty_enrichment_answer_is_not_marked_enriched() {
    let mut service =
        build(42).with_enrichment(Box::new(CannedEnrichment(Enrichment::default())));
    let report = service.track("8123456789").unwrap();
    assert!(!report.enriched, "no field came from the collaborator");
    assert_eq!(report.operator, "Airtel");
    assert_eq!(report.circle, "Karnataka");
    assert_eq!(report.connection_type, NOT_AVAILABLE);
}

/// Blank strings from a collaborator count as missing.
#[test]
fn blank_enrichment_fields_fall_back_to_tables() {
    let mut service = build(42).with_enrichment(Box::new(CannedEnrichment(Enrichment {
        carrier: Some("  ".into()),
        location: Some(String::new()),
        line_type: None,
    })));
    let report = service.track("8123456789").unwrap();
    assert!(!report.enriched);
    assert_eq!(report.operator, "Airtel");
    assert_eq!(report.circle, "Karnataka");
}

/// A location-only answer still counts, and drives the language.
#[test]
fn location_only_enrichment_is_marked_enriched() {
    let mut service = build(42).with_enrichment(Box::new(CannedEnrichment(Enrichment {
        carrier: None,
        location: Some("Tamil Nadu".into()),
        line_type: None,
    })));
    let report = service.track("8123456789").unwrap();
    assert!(report.enriched);
    assert_eq!(report.operator, "Airtel");
    assert_eq!(report.circle, "Tamil Nadu");
    assert_eq!(report.language, "Tamil");
}

/// A failing collaborator leaves the offline result intact.
#[test]
fn enrichment_failure_falls_back_silently() {
    let mut service = build(42).with_enrichment(Box::new(TimingOut));
    let report = service.track("8123456789").unwrap();
    assert!(!report.enriched);
    assert_eq!(report.operator, "Airtel");
    assert_eq!(report.circle, "Karnataka");
    assert_eq!(report.connection_type, NOT_AVAILABLE);
}

/// Unlisted prefixes draw the operator from the injected source.
#[test]
fn unlisted_prefix_uses_injected_rng() {
    let mut service = build(42).with_rng(Box::new(FixedRoll(0.99)));
    assert_eq!(service.track("9512345678").unwrap().operator, "MTNL");

    let mut service = build(42).with_rng(Box::new(FixedRoll(0.0)));
    assert_eq!(service.track("9512345678").unwrap().operator, "Reliance Jio");
}

/// The fallback seed never leaks into the identity.
#[test]
fn identity_does_not_depend_on_rng_seed() {
    let a = build(1).track("9876543210").unwrap();
    let b = build(999).track("9876543210").unwrap();
    assert_eq!(a.identity, b.identity);
    assert_eq!(a.identity.ip_address, "227.136.**.197");
}

/// Locate needs no store write.
#[test]
fn locate_resolves_circle_without_touching_store() {
    let service = build(42);
    let location = service.locate("919876543210").unwrap();
    assert_eq!(location.number.as_str(), "9876543210");
    assert_eq!(location.circle, "Karnataka");
    assert_eq!(service.store.tracked_count().unwrap(), 0);
    assert!(service.locate("nope").is_err());
}

/// Reports serialize for --json output.
#[test]
fn report_serializes_to_json() {
    let mut service = build(42);
    let report = service.track("9876543210").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["number"], "9876543210");
    assert_eq!(json["identity"]["tracker_id"], "E388C1C5DF");
    assert_eq!(json["identity"]["history"]["month"], 73);
    assert_eq!(json["identity"]["hometown"], "Fazilka, Punjab, India");
    assert_eq!(json["language"], "Kannada");
}

/// The test config wires the disabled collaborator.
#[test]
fn build_from_test_config_has_enrichment_disabled() {
    let config = TrackerConfig::default_test();
    assert!(!config.enrichment_enabled());
    let mut service = TrackingService::build(&config, TrackerRng::seeded(3)).unwrap();
    let report = service.track("9876543210").unwrap();
    assert!(!report.enriched);
}

/// A database path that cannot be opened fails the build.
#[test]
fn build_with_unopenable_db_is_store_unavailable() {
    let mut config = TrackerConfig::default_test();
    config.db_path = std::env::temp_dir()
        .join(format!("mkc-no-such-dir-{}", std::process::id()))
        .join("lookup.db")
        .to_string_lossy()
        .to_string();
    let result = TrackingService::build(&config, TrackerRng::seeded(3));
    assert!(
        matches!(result.err(), Some(TrackError::StoreUnavailable(_))),
        "an unopenable database must surface as StoreUnavailable"
    );
}
