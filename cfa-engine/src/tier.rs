//! Access-tier policy
//!
//! Decides which account tier a firm is on and how many of its most recent
//! reviews may be analyzed. The engine itself never applies a cap on its
//! own; callers ask the policy here and pass the result into
//! [`crate::analyze`].
//!
//! Tier priority: active subscription, then unused one-time reports, then
//! the free trial.

use cfa_common::config::TierConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of recent reviews analyzed for a trial account
pub const DEFAULT_TRIAL_ANALYSIS_CAP: usize = 50;

/// Top themes given an implementation plan on annual subscriptions
pub const ANNUAL_PLAN_THEMES: usize = 8;

/// Top themes given an implementation plan on other paid tiers
pub const STANDARD_PLAN_THEMES: usize = 3;

/// Paid subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly,
    Annual,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Annual => "annual",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "Monthly",
            SubscriptionPlan::Annual => "Annual",
        }
    }
}

/// Raw usage counters for an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUsage {
    /// Active subscription, if any
    pub subscription: Option<SubscriptionPlan>,
    pub one_time_reports_purchased: u32,
    pub one_time_reports_used: u32,
    pub trial_reports_used: u32,
    pub trial_limit: u32,
}

/// Resolved account tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountStatus {
    /// Unlimited reports, uncapped analysis
    Subscription { plan: SubscriptionPlan },
    /// Prepaid reports remaining, uncapped analysis
    OneTime { remaining: u32 },
    /// Free trial, capped analysis
    Trial { remaining: u32, limit: u32 },
}

impl AccountStatus {
    pub fn resolve(usage: &AccountUsage) -> Self {
        if let Some(plan) = usage.subscription {
            return AccountStatus::Subscription { plan };
        }

        let one_time_remaining = usage
            .one_time_reports_purchased
            .saturating_sub(usage.one_time_reports_used);
        if one_time_remaining > 0 {
            return AccountStatus::OneTime {
                remaining: one_time_remaining,
            };
        }

        AccountStatus::Trial {
            remaining: usage.trial_limit.saturating_sub(usage.trial_reports_used),
            limit: usage.trial_limit,
        }
    }

    pub fn can_generate_report(&self) -> bool {
        match self {
            AccountStatus::Subscription { .. } => true,
            AccountStatus::OneTime { remaining } => *remaining > 0,
            AccountStatus::Trial { remaining, .. } => *remaining > 0,
        }
    }

    /// Only trial accounts get a capped analysis
    pub fn is_limited(&self) -> bool {
        matches!(self, AccountStatus::Trial { .. })
    }

    /// Short tier identifier ("monthly", "annual", "onetime", "trial")
    pub fn kind(&self) -> &'static str {
        match self {
            AccountStatus::Subscription { plan } => plan.as_str(),
            AccountStatus::OneTime { .. } => "onetime",
            AccountStatus::Trial { .. } => "trial",
        }
    }

    /// Paid tiers get implementation plans; trials get an upgrade prompt
    pub fn is_paid(&self) -> bool {
        !self.is_limited()
    }

    /// Trial with every free report used up
    pub fn needs_upgrade(&self) -> bool {
        matches!(self, AccountStatus::Trial { remaining: 0, .. })
    }

    /// How many of the top themes get an implementation plan
    pub fn plan_themes(&self) -> usize {
        match self {
            AccountStatus::Subscription {
                plan: SubscriptionPlan::Annual,
            } => ANNUAL_PLAN_THEMES,
            AccountStatus::Subscription { .. } | AccountStatus::OneTime { .. } => {
                STANDARD_PLAN_THEMES
            }
            AccountStatus::Trial { .. } => 0,
        }
    }

    /// Reports left, `None` for unlimited
    pub fn remaining(&self) -> Option<u32> {
        match self {
            AccountStatus::Subscription { .. } => None,
            AccountStatus::OneTime { remaining } => Some(*remaining),
            AccountStatus::Trial { remaining, .. } => Some(*remaining),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Subscription { plan } => {
                write!(f, "Unlimited ({} Subscription)", plan.title())
            }
            AccountStatus::OneTime { remaining } => {
                write!(f, "One-Time Reports: {} remaining", remaining)
            }
            AccountStatus::Trial { remaining, limit } => {
                write!(f, "Free Trial: {}/{} remaining", remaining, limit)
            }
        }
    }
}

/// Maps an account tier to the analysis cap handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    pub trial_analysis_cap: usize,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            trial_analysis_cap: DEFAULT_TRIAL_ANALYSIS_CAP,
        }
    }
}

impl From<&TierConfig> for TierPolicy {
    fn from(config: &TierConfig) -> Self {
        Self {
            trial_analysis_cap: config.trial_analysis_cap,
        }
    }
}

impl TierPolicy {
    /// `Some(cap)` for limited tiers, `None` for unrestricted ones
    pub fn analysis_cap(&self, status: &AccountStatus) -> Option<usize> {
        status.is_limited().then_some(self.trial_analysis_cap)
    }
}
