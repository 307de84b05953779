use serde::{Deserialize, Serialize};

/// Spending tier selected by the traveller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// Tier keywords in match priority order.
    const KEYWORDS: [(&'static str, BudgetTier); 3] = [
        ("budget", BudgetTier::Budget),
        ("moderate", BudgetTier::Moderate),
        ("luxury", BudgetTier::Luxury),
    ];

    /// Matches a free-text budget label by substring, case-insensitively.
    ///
    /// The first keyword contained in the label wins, checked in the order
    /// budget, moderate, luxury. Returns `None` when no keyword is present.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, tier)| *tier)
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetTier::Budget => write!(f, "budget"),
            BudgetTier::Moderate => write!(f, "moderate"),
            BudgetTier::Luxury => write!(f, "luxury"),
        }
    }
}

impl std::str::FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(BudgetTier::Budget),
            "moderate" => Ok(BudgetTier::Moderate),
            "luxury" => Ok(BudgetTier::Luxury),
            other => Err(format!(
                "unknown budget tier '{other}'; expected budget, moderate, or luxury"
            )),
        }
    }
}

/// Fixed spending categories of a [`BudgetBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    Hotels,
    Food,
    Tickets,
    Transport,
}

impl BudgetCategory {
    /// Display order of the breakdown.
    pub const ALL: [BudgetCategory; 4] = [
        BudgetCategory::Hotels,
        BudgetCategory::Food,
        BudgetCategory::Tickets,
        BudgetCategory::Transport,
    ];
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetCategory::Hotels => write!(f, "Hotels"),
            BudgetCategory::Food => write!(f, "Food"),
            BudgetCategory::Tickets => write!(f, "Tickets"),
            BudgetCategory::Transport => write!(f, "Transport"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub name: BudgetCategory,
    pub value: u64,
}

/// Derived spending estimate for one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub estimated_budget: u64,
    pub calculated_total: u64,
    pub category_breakdown: Vec<CategoryAmount>,
    pub budget_level: String,
    pub days: u32,
}

impl BudgetBreakdown {
    /// Rounded amount recorded for `category`, or 0 when absent.
    #[must_use]
    pub fn category(&self, category: BudgetCategory) -> u64 {
        self.category_breakdown
            .iter()
            .find(|entry| entry.name == category)
            .map_or(0, |entry| entry.value)
    }
}
