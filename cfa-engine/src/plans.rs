//! Implementation plans for paid reports
//!
//! Each planned theme gets a context paragraph and five initiatives with a
//! timeline, an owner and a success metric. Themes are matched to a plan by
//! name: the first focus area whose keywords appear in the lowercased theme
//! name wins, and anything unmatched gets the general plan with the theme
//! name substituted in.

use serde::Serialize;

/// Replaced with the theme name in general-plan initiatives
const THEME_PLACEHOLDER: &str = "{theme}";

/// One row of a theme's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initiative {
    pub initiative: String,
    pub timeline: String,
    pub owner: String,
    pub metric: String,
}

struct Step {
    initiative: &'static str,
    timeline: &'static str,
    owner: &'static str,
    metric: &'static str,
}

const fn step(
    initiative: &'static str,
    timeline: &'static str,
    owner: &'static str,
    metric: &'static str,
) -> Step {
    Step {
        initiative,
        timeline,
        owner,
        metric,
    }
}

const COMMUNICATION_STEPS: [Step; 5] = [
    step(
        "Establish 24-hour response SLA for all client inquiries",
        "Next 2 Weeks",
        "Office Manager",
        "95% of inquiries responded to within 24 hours",
    ),
    step(
        "Implement weekly status update emails for active matters",
        "Week 3-4",
        "Case Managers",
        "100% of active clients receive weekly updates",
    ),
    step(
        "Create client communication preference profiles",
        "30 Days",
        "Client Services",
        "Communication preferences documented for 100% of new clients",
    ),
    step(
        "Deploy matter milestone notification system",
        "60 Days",
        "IT / Operations",
        "Automated milestone alerts for all matters",
    ),
    step(
        "Quarterly communication satisfaction surveys",
        "90 Days",
        "Client Experience",
        "4.5+ average rating on communication questions",
    ),
];

const RESPONSIVENESS_STEPS: [Step; 5] = [
    step(
        "Implement callback triage system for urgent matters",
        "Next 2 Weeks",
        "Reception / Intake",
        "Urgent calls returned within 4 hours",
    ),
    step(
        "Establish backup coverage protocol for attorney absences",
        "Week 3-4",
        "Managing Partner",
        "Zero gaps in client coverage",
    ),
    step(
        "Deploy response time tracking dashboard",
        "30 Days",
        "Operations",
        "Real-time visibility into response metrics",
    ),
    step(
        "Create email templates for common client questions",
        "45 Days",
        "Attorneys",
        "30% reduction in response preparation time",
    ),
    step(
        "Monthly response time performance reviews",
        "90 Days",
        "Partners",
        "Average response time under 12 hours",
    ),
];

const COST_VALUE_STEPS: [Step; 5] = [
    step(
        "Develop fee range estimates for common matters",
        "Next 2 Weeks",
        "Finance / Partners",
        "Fee estimates provided at initial consultation for all standard matters",
    ),
    step(
        "Create billing transparency summaries with plain English",
        "Week 3-4",
        "Billing Manager",
        "Narrative billing summaries for 100% of invoices",
    ),
    step(
        "Implement value-add touchpoints (educational content)",
        "30 Days",
        "Marketing",
        "Monthly legal insights newsletter sent to all active clients",
    ),
    step(
        "Offer payment plan options for qualifying matters",
        "60 Days",
        "Finance",
        "Payment plans available and clearly communicated",
    ),
    step(
        "Conduct value perception surveys at matter conclusion",
        "90 Days",
        "Client Experience",
        "4.0+ average rating on value-for-money questions",
    ),
];

const PROFESSIONALISM_STEPS: [Step; 5] = [
    step(
        "Establish firm-wide professional standards guide",
        "Next 2 Weeks",
        "Managing Partner",
        "Standards distributed and acknowledged by all staff",
    ),
    step(
        "Implement quarterly CLE and training sessions",
        "Week 3-4",
        "HR / Training",
        "100% attorney participation in quarterly CLE",
    ),
    step(
        "Create mentorship program for associate development",
        "30 Days",
        "Senior Partners",
        "All associates paired with mentors",
    ),
    step(
        "Conduct peer review of client-facing communications",
        "60 Days",
        "Practice Leaders",
        "Monthly peer review sessions held",
    ),
    step(
        "Annual professionalism and expertise client surveys",
        "90 Days",
        "Client Experience",
        "4.7+ average rating on professionalism metrics",
    ),
];

const OUTCOME_STEPS: [Step; 5] = [
    step(
        "Create 1-page \"What to Expect\" handouts for your 3 most common case types and review with partners",
        "Next 2 Weeks",
        "Attorneys",
        "Handouts used in 90% of new matter intakes",
    ),
    step(
        "Add outcome ranges (best / likely / conservative) to your standard intake conversation script",
        "Week 3-4",
        "Attorneys",
        "Outcome ranges documented in intake notes for 100% of new matters",
    ),
    step(
        "Introduce a \"mid-matter expectations check-in\" call template and schedule for longer cases",
        "30 Days",
        "Case Managers",
        "Check-in completed for all matters lasting over 90 days",
    ),
    step(
        "Build a simple outcome summary template for closed matters (result, key drivers, lessons)",
        "60 Days",
        "Attorneys",
        "Outcome summaries completed for 80%+ of closed matters",
    ),
    step(
        "Launch a short post-matter survey focused on expectations vs actual outcome",
        "90 Days",
        "Client Experience",
        "At least 40% survey response rate and baseline satisfaction score collected",
    ),
];

const GENERAL_STEPS: [Step; 5] = [
    step(
        "Conduct focused assessment of {theme} feedback",
        "Next 2 Weeks",
        "Practice Leader",
        "Assessment report completed with specific findings",
    ),
    step(
        "Develop targeted improvement plan for {theme}",
        "Week 3-4",
        "Operations",
        "Detailed improvement plan documented and approved",
    ),
    step(
        "Implement quick-win improvements for {theme}",
        "30 Days",
        "Team Leads",
        "At least 3 quick-win initiatives completed",
    ),
    step(
        "Roll out comprehensive {theme} enhancement program",
        "60 Days",
        "Department Head",
        "Program launched and communicated to all staff",
    ),
    step(
        "Measure and report {theme} satisfaction improvement",
        "90 Days",
        "Client Experience",
        "10%+ improvement in theme-related feedback scores",
    ),
];

/// Plan family a theme is matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFocus {
    Communication,
    Responsiveness,
    CostValue,
    Professionalism,
    Outcome,
    General,
}

impl PlanFocus {
    /// Match a theme name to its plan family, checked in declaration order
    pub fn for_theme(name: &str) -> Self {
        let lowered = name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lowered.contains(k));

        if has(&["communication"]) {
            PlanFocus::Communication
        } else if has(&["responsive", "response"]) {
            PlanFocus::Responsiveness
        } else if has(&["cost", "value", "billing", "fee"]) {
            PlanFocus::CostValue
        } else if has(&["professional", "expertise"]) {
            PlanFocus::Professionalism
        } else if has(&["outcome", "result"]) {
            PlanFocus::Outcome
        } else {
            PlanFocus::General
        }
    }

    fn steps(&self) -> &'static [Step] {
        match self {
            PlanFocus::Communication => &COMMUNICATION_STEPS,
            PlanFocus::Responsiveness => &RESPONSIVENESS_STEPS,
            PlanFocus::CostValue => &COST_VALUE_STEPS,
            PlanFocus::Professionalism => &PROFESSIONALISM_STEPS,
            PlanFocus::Outcome => &OUTCOME_STEPS,
            PlanFocus::General => &GENERAL_STEPS,
        }
    }
}

/// Context paragraph introducing a theme's plan
pub fn theme_context(name: &str, mentions: usize, percentage: f64) -> String {
    match PlanFocus::for_theme(name) {
        PlanFocus::Communication => format!(
            "Communication emerged in {} reviews ({:.1}% of feedback), indicating this is a \
             critical touchpoint in the client experience. Effective communication builds trust, \
             reduces anxiety, and ensures clients feel informed throughout their legal matter. \
             The initiatives below focus on establishing clear communication protocols and \
             proactive client updates.",
            mentions, percentage
        ),
        PlanFocus::Responsiveness => format!(
            "Responsiveness was mentioned {} times ({:.1}% of feedback), highlighting client \
             expectations for timely replies and acknowledgment. In legal services, response \
             time directly impacts client confidence and satisfaction. These initiatives \
             establish response standards and accountability measures to ensure consistent \
             follow-through.",
            mentions, percentage
        ),
        PlanFocus::CostValue => format!(
            "Cost and Value appeared in {} reviews ({:.1}% of feedback), reflecting the \
             importance of billing transparency and perceived value. Clients want to understand \
             what they're paying for and feel their investment is justified. These strategies \
             focus on clear fee communication and demonstrating value throughout the engagement.",
            mentions, percentage
        ),
        PlanFocus::Professionalism => format!(
            "Professionalism and Expertise was noted {} times ({:.1}% of feedback). Clients \
             expect not only legal knowledge but also professional demeanor and presentation. \
             These initiatives reinforce standards of professional conduct and continue to \
             build technical expertise across the firm.",
            mentions, percentage
        ),
        PlanFocus::Outcome => format!(
            "Outcomes and Results emerged in {} reviews ({:.1}% of feedback), underscoring that \
             clients ultimately judge their experience by the results achieved. While outcomes \
             can't always be controlled, these initiatives focus on setting realistic \
             expectations and communicating progress throughout the matter.",
            mentions, percentage
        ),
        PlanFocus::General => format!(
            "{} was identified in {} reviews ({:.1}% of feedback), indicating this is a \
             meaningful aspect of the client experience. The initiatives below provide a \
             structured approach to addressing this theme through targeted improvements and \
             measurable actions.",
            name, mentions, percentage
        ),
    }
}

/// The five initiatives planned for a theme
pub fn theme_initiatives(name: &str) -> Vec<Initiative> {
    PlanFocus::for_theme(name)
        .steps()
        .iter()
        .map(|s| Initiative {
            initiative: s.initiative.replace(THEME_PLACEHOLDER, name),
            timeline: s.timeline.to_string(),
            owner: s.owner.to_string(),
            metric: s.metric.to_string(),
        })
        .collect()
}

/// Strategic plan for one of the top themes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemePlan {
    pub theme: String,
    pub mentions: usize,
    pub percentage: f64,
    pub context: String,
    pub initiatives: Vec<Initiative>,
}

impl ThemePlan {
    pub fn new(theme: &str, mentions: usize, percentage: f64) -> Self {
        Self {
            theme: theme.to_string(),
            mentions,
            percentage,
            context: theme_context(theme, mentions, percentage),
            initiatives: theme_initiatives(theme),
        }
    }
}
