//! # CFA Analysis Engine
//!
//! Turns a batch of client reviews into an analytical summary:
//! - `analyzer`: the pure analysis engine (counts, average, themes, excerpts)
//! - `themes`: fixed theme keyword table
//! - `tier`: account tier resolution and analysis caps
//! - `ingest`: CSV upload parsing and validation
//! - `report`: presentation payload built from an analysis
//! - `plans`: per-theme implementation plans for paid reports

pub mod analyzer;
pub mod ingest;
pub mod plans;
pub mod report;
pub mod rounding;
pub mod themes;
pub mod tier;

pub use analyzer::{analyze, AnalysisResult, ThemeMention};
pub use tier::{AccountStatus, AccountUsage, SubscriptionPlan, TierPolicy};
