//! mkc: command-line front end for the mobile number tracker.
//!
//! Usage:
//!   mkc track 9876543210
//!   mkc --db lookups.db recent
//!   mkc report 9876543210 "John Doe" "Spam calls" ["Owner Name"] ["Owner Address"]

mod report;

use anyhow::Result;
use chrono::Utc;
use mkc_core::{
    config::TrackerConfig, error::TrackError, rng::TrackerRng, service::TrackingService,
};
use std::env;

/// Flags that take a value, and boolean switches.
const VALUE_FLAGS: [&str; 3] = ["--db", "--config", "--seed"];
const SWITCHES: [&str; 1] = ["--json"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (flags, positional) = split_args(&args);

    let config_path = flag_value(&flags, "--config");
    let mut config = match config_path {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(db) = flag_value(&flags, "--db") {
        config.db_path = db.to_string();
    }
    let seed = flag_value(&flags, "--seed").and_then(|s| s.parse::<u64>().ok());
    let json = flags.iter().any(|(f, _)| f == "--json");

    let Some((command, rest)) = positional.split_first() else {
        print!("{}{}", report::banner(), report::help());
        return Ok(());
    };

    if !json {
        print!("{}", report::banner());
    }

    // help needs no store.
    if command == "help" {
        print!("{}", report::help());
        return Ok(());
    }

    let rng = match seed {
        Some(seed) => TrackerRng::seeded(seed),
        None => TrackerRng::from_entropy(),
    };
    let mut service = TrackingService::build(&config, rng)?;

    match run_command(&mut service, command, rest, json) {
        Ok(()) => Ok(()),
        Err(TrackError::InvalidNumberFormat { input }) => {
            println!("[ERROR] Invalid mobile number format: '{input}'");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_command(
    service: &mut TrackingService,
    command: &str,
    args: &[String],
    json: bool,
) -> Result<(), TrackError> {
    match command {
        "track" => {
            let Some(number) = args.first() else {
                println!("[ERROR] Please provide a mobile number to track!");
                return Ok(());
            };
            let result = service.track(number)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("[INFO] Tracking number: +91-{}", result.number);
                print!("{}", report::tracking_report(&result));
            }
        }
        "recent" => {
            let rows = service.recent_tracked()?;
            print!("{}", report::recent_tracked(&rows, Utc::now()));
        }
        "complaints" => {
            let rows = service.recent_complaints()?;
            print!("{}", report::recent_complaints(&rows));
        }
        "report" => {
            if args.len() < 3 {
                println!("[ERROR] Please provide number, name, and complaint text!");
                println!("Optionally, you can also provide owner name and address.");
                return Ok(());
            }
            let complaint = service.report_complaint(
                &args[0],
                &args[1],
                &args[2],
                args.get(3).map(String::as_str),
                args.get(4).map(String::as_str),
            )?;
            print!("{}", report::complaint_filed(&complaint));
        }
        "map" => {
            let Some(number) = args.first() else {
                println!("[ERROR] Please provide a mobile number!");
                return Ok(());
            };
            let location = service.locate(number)?;
            print!("{}", report::location(&location).map_err(anyhow::Error::from)?);
        }
        other => {
            log::warn!("Unknown command: {other}");
            println!("[ERROR] Unknown command: {other}");
            print!("{}", report::help());
        }
    }
    Ok(())
}

/// Separate `--flag value` pairs and switches from positional arguments.
fn split_args(args: &[String]) -> (Vec<(String, Option<String>)>, Vec<String>) {
    let mut flags = Vec::new();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            flags.push((arg.clone(), iter.next().cloned()));
        } else if SWITCHES.contains(&arg.as_str()) {
            flags.push((arg.clone(), None));
        } else {
            positional.push(arg.clone());
        }
    }
    (flags, positional)
}

fn flag_value<'a>(flags: &'a [(String, Option<String>)], name: &str) -> Option<&'a str> {
    flags
        .iter()
        .find(|(f, _)| f == name)
        .and_then(|(_, v)| v.as_deref())
}
