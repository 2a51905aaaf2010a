//! Theme keyword table
//!
//! Fixed mapping from feedback theme to lowercase trigger substrings. Table
//! order is significant: it breaks ties when themes are ranked by count.

/// A feedback theme and the substrings that trigger it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
}

impl Theme {
    /// True if any trigger occurs in `lowered`.
    ///
    /// `lowered` must already be lowercase. Matching is plain substring
    /// containment with no word boundaries, so "cost" matches "costume".
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|trigger| lowered.contains(trigger))
    }
}

/// All themes in tie-break order
pub const THEME_TABLE: &[Theme] = &[
    Theme {
        name: "Communication",
        triggers: &[
            "communication",
            "responsive",
            "returned calls",
            "kept me informed",
            "updates",
            "contact",
        ],
    },
    Theme {
        name: "Professionalism",
        triggers: &[
            "professional",
            "courteous",
            "respectful",
            "polite",
            "demeanor",
            "ethical",
        ],
    },
    Theme {
        name: "Legal Expertise",
        triggers: &[
            "knowledgeable",
            "experienced",
            "expert",
            "skilled",
            "competent",
            "expertise",
        ],
    },
    Theme {
        name: "Case Outcome",
        triggers: &[
            "won",
            "successful",
            "settlement",
            "verdict",
            "result",
            "outcome",
            "resolved",
        ],
    },
    Theme {
        name: "Cost/Value",
        triggers: &[
            "expensive",
            "affordable",
            "fees",
            "billing",
            "cost",
            "worth it",
            "value",
            "price",
        ],
    },
    Theme {
        name: "Responsiveness",
        triggers: &[
            "quick",
            "slow",
            "delayed",
            "waiting",
            "timely",
            "immediately",
            "promptly",
        ],
    },
    Theme {
        name: "Compassion",
        triggers: &[
            "caring",
            "understanding",
            "empathetic",
            "compassionate",
            "listened",
            "supportive",
        ],
    },
    Theme {
        name: "Staff Support",
        triggers: &[
            "staff",
            "assistant",
            "paralegal",
            "secretary",
            "team",
            "office",
        ],
    },
];

/// Look up a theme by exact name
pub fn find(name: &str) -> Option<&'static Theme> {
    THEME_TABLE.iter().find(|theme| theme.name == name)
}

/// Themes mentioned by `text`, in table order
pub fn detect(text: &str) -> Vec<&'static Theme> {
    let lowered = text.to_lowercase();
    THEME_TABLE
        .iter()
        .filter(|theme| theme.matches(&lowered))
        .collect()
}
