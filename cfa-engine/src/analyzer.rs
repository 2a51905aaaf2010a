//! Review Analysis Engine
//!
//! Pure function from an ordered review feed plus an optional cap to an
//! [`AnalysisResult`]:
//! - Review count and average rating over the analyzed subset
//! - Theme mention histogram (top 8, ties in keyword-table order)
//! - Praise and complaint excerpts (first 10 of each, feed order)
//!
//! The feed must already be newest-first. The engine never re-sorts, never
//! fails on validated input, and holds no state between calls.

use cfa_common::{Rating, Review};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rounding::round_half_even;
use crate::themes::THEME_TABLE;

/// Themes kept in the histogram
pub const MAX_THEMES: usize = 8;

/// Reviews kept per excerpt list
pub const MAX_EXCERPTS: usize = 10;

/// Decimal places of `avg_rating`
pub const AVG_RATING_PLACES: u32 = 2;

/// Mention count for one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMention {
    pub theme: String,
    pub mentions: usize,
}

/// Derived analysis of a review feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Reviews actually analyzed (after the cap)
    pub total_reviews: usize,

    /// Mean rating of the analyzed reviews, 2 decimals; 0.0 when none
    pub avg_rating: f64,

    /// Themes with at least one mention, descending count
    pub themes: Vec<ThemeMention>,

    pub top_praise: Vec<Review>,

    pub top_complaints: Vec<Review>,

    /// Full input feed, including reviews beyond the cap
    pub all_reviews: Vec<Review>,
}

impl AnalysisResult {
    /// Mentions recorded for `theme` (0 if it did not make the histogram)
    pub fn mentions(&self, theme: &str) -> usize {
        self.themes
            .iter()
            .find(|m| m.theme == theme)
            .map_or(0, |m| m.mentions)
    }

    /// Sum of all theme mentions
    pub fn total_mentions(&self) -> usize {
        self.themes.iter().map(|m| m.mentions).sum()
    }

    /// Reviews available before capping
    pub fn available_reviews(&self) -> usize {
        self.all_reviews.len()
    }

    /// True when the cap excluded some reviews
    pub fn is_capped(&self) -> bool {
        self.total_reviews < self.all_reviews.len()
    }
}

/// Analyze a newest-first review feed.
///
/// With `cap = Some(n)` only the first `n` reviews (the most recent) are
/// analyzed; `None` analyzes everything. `all_reviews` always holds the
/// full feed so callers can show "analyzed" versus "available".
pub fn analyze(reviews: &[Review], cap: Option<usize>) -> AnalysisResult {
    let analyzed = match cap {
        Some(cap) => &reviews[..cap.min(reviews.len())],
        None => reviews,
    };

    if analyzed.is_empty() {
        debug!(available = reviews.len(), ?cap, "No reviews to analyze");
        return AnalysisResult {
            all_reviews: reviews.to_vec(),
            ..AnalysisResult::default()
        };
    }

    let total_reviews = analyzed.len();
    let rating_sum: u64 = analyzed
        .iter()
        .map(|r| u64::from(r.rating().value()))
        .sum();
    let avg_rating = round_half_even(rating_sum as f64 / total_reviews as f64, AVG_RATING_PLACES);

    let themes = rank_themes(count_themes(analyzed));
    let top_praise = first_matching(analyzed, Rating::is_praise);
    let top_complaints = first_matching(analyzed, Rating::is_complaint);

    debug!(
        total_reviews,
        available = reviews.len(),
        avg_rating,
        themes = themes.len(),
        praise = top_praise.len(),
        complaints = top_complaints.len(),
        "Analyzed review feed"
    );

    AnalysisResult {
        total_reviews,
        avg_rating,
        themes,
        top_praise,
        top_complaints,
        all_reviews: reviews.to_vec(),
    }
}

/// Per-theme review counts, indexed like `THEME_TABLE`
///
/// A review adds at most 1 to each theme however many triggers it hits.
fn count_themes(reviews: &[Review]) -> Vec<usize> {
    let mut counts = vec![0usize; THEME_TABLE.len()];

    for review in reviews {
        let lowered = review.review_text().to_lowercase();
        for (count, theme) in counts.iter_mut().zip(THEME_TABLE) {
            if theme.matches(&lowered) {
                *count += 1;
            }
        }
    }

    counts
}

/// Drop unmentioned themes and keep the top `MAX_THEMES` by count
fn rank_themes(counts: Vec<usize>) -> Vec<ThemeMention> {
    let mut ranked: Vec<ThemeMention> = THEME_TABLE
        .iter()
        .zip(counts)
        .filter(|(_, mentions)| *mentions > 0)
        .map(|(theme, mentions)| ThemeMention {
            theme: theme.name.to_string(),
            mentions,
        })
        .collect();

    // stable: equal counts stay in table order
    ranked.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    ranked.truncate(MAX_THEMES);
    ranked
}

fn first_matching(reviews: &[Review], keep: fn(Rating) -> bool) -> Vec<Review> {
    reviews
        .iter()
        .filter(|r| keep(r.rating()))
        .take(MAX_EXCERPTS)
        .cloned()
        .collect()
}
