//! Report payload for dashboards and generated documents
//!
//! Presentation-side values derived from an [`AnalysisResult`]: theme
//! shares as a percentage of all mentions, trimmed excerpts with star
//! strings, and the account context the document is produced under.
//! Paid tiers get implementation plans for their top themes; trial reports
//! carry an upgrade prompt instead.

use cfa_common::config::TomlConfig;
use cfa_common::Review;
use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzer::AnalysisResult;
use crate::plans::ThemePlan;
use crate::tier::AccountStatus;

/// Suffix appended to truncated excerpts
const ELLIPSIS: &str = "...";

/// Rendering settings for a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub firm_name: String,
    /// Characters kept from each excerpt before `...` is added
    pub excerpt_chars: usize,
    pub excerpts_per_section: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from(&TomlConfig::default())
    }
}

impl From<&TomlConfig> for ReportSettings {
    fn from(config: &TomlConfig) -> Self {
        Self {
            firm_name: config.firm_name.clone(),
            excerpt_chars: config.report.excerpt_chars,
            excerpts_per_section: config.report.excerpts_per_section,
        }
    }
}

/// One theme's share of all mentions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeShare {
    pub name: String,
    pub mentions: usize,
    /// Percent of total mentions (0-100)
    pub percentage: f64,
}

/// Theme shares in histogram order
///
/// A zero total is treated as 1 so an empty histogram never divides by zero.
pub fn theme_shares(analysis: &AnalysisResult) -> Vec<ThemeShare> {
    let total = analysis.total_mentions().max(1) as f64;

    analysis
        .themes
        .iter()
        .map(|m| ThemeShare {
            name: m.theme.clone(),
            mentions: m.mentions,
            percentage: m.mentions as f64 / total * 100.0,
        })
        .collect()
}

/// A review quoted in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    pub date: String,
    pub rating: u8,
    pub stars: String,
    pub text: String,
}

impl Excerpt {
    pub fn from_review(review: &Review, max_chars: usize) -> Self {
        let rating = review.rating().value();
        Self {
            date: review.date().to_string(),
            rating,
            stars: "★".repeat(usize::from(rating)),
            text: truncate_chars(&collapse_whitespace(review.review_text()), max_chars),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `max_chars` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Serializable report payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub firm_name: String,
    pub generated_on: NaiveDate,
    /// Tier identifier ("trial", "onetime", "monthly", "annual")
    pub tier: String,
    /// Human-readable account status
    pub account_status: String,
    /// True when the tier caps analysis
    pub limited: bool,
    pub total_reviews: usize,
    pub available_reviews: usize,
    pub avg_rating: f64,
    pub themes: Vec<ThemeShare>,
    pub praise: Vec<Excerpt>,
    pub complaints: Vec<Excerpt>,
    /// Plans for the top themes, empty for trial reports
    pub plans: Vec<ThemePlan>,
    /// Trial reports show the upgrade prompt in place of plans
    pub upgrade_cta: bool,
    /// Trial with no free reports left
    pub upgrade_needed: bool,
}

impl Report {
    pub fn build(
        analysis: &AnalysisResult,
        status: &AccountStatus,
        settings: &ReportSettings,
        generated_on: NaiveDate,
    ) -> Self {
        let excerpts = |reviews: &[Review]| -> Vec<Excerpt> {
            reviews
                .iter()
                .take(settings.excerpts_per_section)
                .map(|r| Excerpt::from_review(r, settings.excerpt_chars))
                .collect()
        };

        let themes = theme_shares(analysis);
        let plans = themes
            .iter()
            .take(status.plan_themes())
            .map(|t| ThemePlan::new(&t.name, t.mentions, t.percentage))
            .collect();

        Self {
            firm_name: settings.firm_name.clone(),
            generated_on,
            tier: status.kind().to_string(),
            account_status: status.to_string(),
            limited: status.is_limited(),
            total_reviews: analysis.total_reviews,
            available_reviews: analysis.available_reviews(),
            avg_rating: analysis.avg_rating,
            themes,
            praise: excerpts(&analysis.top_praise),
            complaints: excerpts(&analysis.top_complaints),
            plans,
            upgrade_cta: !status.is_paid(),
            upgrade_needed: status.needs_upgrade(),
        }
    }
}
