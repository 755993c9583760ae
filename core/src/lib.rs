//! mkc-core: offline Indian mobile number lookup.
//!
//! A number is validated, mapped to an operator and telecom circle through
//! static prefix tables (optionally enriched by an external API), given a
//! deterministic synthetic identity derived from its digest, and recorded
//! in a local SQLite store alongside user-submitted complaints.

pub mod config;
pub mod deriver;
pub mod digest;
pub mod enrichment;
pub mod error;
pub mod prefix_table;
pub mod records;
pub mod rng;
pub mod service;
pub mod store;
pub mod types;
