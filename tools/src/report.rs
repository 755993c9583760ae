//! Plain-text rendering of tracking results, listings and help.

use chrono::{DateTime, Utc};
use mkc_core::{
    records::{Complaint, TrackedRecord},
    service::{NumberLocation, TrackingReport},
};
use std::fmt::Write as _;
use url::Url;

const RULE: &str = "+--------------------------------------------------------------+";
const COMPLAINT_PREVIEW_CHARS: usize = 50;
const MAP_SEARCH: &str = "https://www.openstreetmap.org/search";
/// Owner names are never printed, whatever the store holds.
const OWNER_MASK: &str = "****** ******";

pub fn banner() -> String {
    format!(
        "{RULE}\n|{:^62}|\n|{:^62}|\n{RULE}\n",
        "MKC - Mobile Number Kali Tracker", "Indian Mobile Number Tracker"
    )
}

pub fn tracking_report(r: &TrackingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\n|{:^62}|\n{RULE}", "TRACKING RESULTS");
    let id = &r.identity;
    let rows: [(&str, String); 17] = [
        ("Number", format!("+91-{}", r.number)),
        ("Complaints", format!("{} reports", r.complaints_count)),
        ("Owner Name", format!("{OWNER_MASK} (enquire)")),
        ("SIM card", r.operator.clone()),
        ("Mobile State", r.circle.clone()),
        ("IMEI number", id.imei.clone()),
        ("MAC address", id.mac_address.clone()),
        ("Connection", r.connection_type.clone()),
        ("IP address", id.ip_address.clone()),
        ("Owner Address", r.owner_address.clone()),
        ("Hometown", id.hometown.clone()),
        ("Ref. City", id.reference_city.clone()),
        ("Personality", id.personality.join(", ")),
        ("Language", r.language.clone()),
        ("Country", "India".to_string()),
        ("Tracker Id", id.tracker_id.clone()),
        ("Data source", source_label(r).to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "| {label:<14} {value:<45} |");
    }
    let h = &id.history;
    let history = [
        ("History", format!("Traced by {} people in 24 hrs", h.today)),
        ("", format!("Traced by {} people last week", h.week)),
        ("", format!("Traced by {} people last month", h.month)),
    ];
    for (label, value) in history {
        let _ = writeln!(out, "| {label:<14} {value:<45} |");
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "| {:<14} {:<45} |", "Mobile Locs", id.mobile_locations.join(", "));
    let _ = writeln!(out, "| {:<14} {:<45} |", "Tower Locs", id.tower_locations.join(", "));
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn recent_tracked(rows: &[TrackedRecord], now: DateTime<Utc>) -> String {
    if rows.is_empty() {
        return "[INFO] No recently tracked numbers found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\n|{:^62}|\n{RULE}", "MOBILE TRACED RECENTLY");
    let _ = writeln!(
        out,
        "| {:<14} | {:<14} | {:<12} | {:<12} |",
        "Number", "Company", "Location", "Tracked"
    );
    let _ = writeln!(out, "{RULE}");
    for row in rows {
        let _ = writeln!(
            out,
            "| {:<14} | {:<14} | {:<12} | {:<12} |",
            format!("+91-{}", row.number),
            truncate(&row.operator, 14),
            truncate(&row.circle, 12),
            time_ago(now, row.tracked_at),
        );
    }
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn recent_complaints(rows: &[Complaint]) -> String {
    if rows.is_empty() {
        return "[INFO] No recent complaints found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\n|{:^62}|\n{RULE}", "RECENT MOBILE COMPLAINTS");
    for (i, c) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "| Complaint #{:<2} | +91-{} | {:<27} |",
            i + 1,
            c.number,
            c.reported_at.format("%Y-%m-%d %H:%M")
        );
        let _ = writeln!(out, "| Reporter:  {:<50} |", mask_name(&c.reporter_name));
        let _ = writeln!(out, "| Complaint: {:<50} |", preview(&c.complaint_text));
        let _ = writeln!(out, "{RULE}");
    }
    out
}

pub fn complaint_filed(c: &Complaint) -> String {
    format!(
        "[SUCCESS] Complaint reported successfully!\n[INFO] Number: +91-{}\n[INFO] Reporter: {}\n",
        c.number, c.reporter_name
    )
}

pub fn location(loc: &NumberLocation) -> Result<String, url::ParseError> {
    let map = map_link(&loc.circle)?;
    Ok(format!(
        "[INFO] +91-{} is registered in circle: {}\n[INFO] Map: {map}\n",
        loc.number, loc.circle
    ))
}

pub fn map_link(circle: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(MAP_SEARCH, &[("query", format!("{circle}, India"))])
}

pub fn help() -> String {
    "\
Usage:
  mkc [--db <path>] [--config <file>] [--seed <n>] [--json] <command> [args]

Commands:
  track <number>                    Track a mobile number
  recent                            Show recently tracked numbers
  complaints                        Show recent complaints
  report <number> <name> <text> [owner_name] [owner_address]
                                    Report a complaint, optionally with owner info
  map <number>                      Show the circle and a map link
  help                              Show this help menu

Examples:
  mkc track 9876543210
  mkc track +91-9876543210
  mkc report 9876543210 \"John Doe\" \"Spam calls\"

Environment:
  MKC_DB_PATH, NUMVERIFY_API_KEY, MKC_ENRICHMENT_TIMEOUT_MS, RUST_LOG

Note: operator, circle and identity fields are simulated. Educational use only.
"
    .to_string()
}

/// Keep first and last character, star the rest. Two chars or fewer pass through.
pub fn mask_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return name.to_string();
    }
    let mut masked = String::with_capacity(name.len());
    masked.push(chars[0]);
    masked.extend(std::iter::repeat('*').take(chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked
}

pub fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let (n, unit) = match secs {
        0..=59 => (secs, "second"),
        60..=3_599 => (secs / 60, "minute"),
        3_600..=86_399 => (secs / 3_600, "hour"),
        _ => (secs / 86_400, "day"),
    };
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > COMPLAINT_PREVIEW_CHARS {
        let head: String = text.chars().take(COMPLAINT_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn source_label(r: &TrackingReport) -> &'static str {
    if r.enriched {
        "validation API"
    } else {
        "offline tables"
    }
}
