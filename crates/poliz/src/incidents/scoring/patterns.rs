use serde::{Deserialize, Serialize};

/// Severity category detected in free-text notes, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesCategory {
    None,
    MinorInjury,
    Crowd,
    Serious,
    Weapon,
}

impl NotesCategory {
    pub fn label(self) -> &'static str {
        match self {
            NotesCategory::None => "none",
            NotesCategory::MinorInjury => "minor injury",
            NotesCategory::Crowd => "crowd",
            NotesCategory::Serious => "life-threatening",
            NotesCategory::Weapon => "weapon",
        }
    }
}

/// One row of the keyword table: any keyword present puts the text in `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub category: NotesCategory,
    pub keywords: Vec<String>,
    pub points: u32,
}

impl PatternRule {
    fn first_hit(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
    }
}

/// Outcome of matching a text against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub category: NotesCategory,
    pub points: u32,
    pub keyword: Option<String>,
}

impl PatternMatch {
    fn none() -> Self {
        Self {
            category: NotesCategory::None,
            points: 0,
            keyword: None,
        }
    }
}

/// Keyword table consulted by the notes scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Case-insensitive substring match. When several categories hit, the most severe wins
    /// regardless of table order.
    pub fn classify(&self, text: &str) -> PatternMatch {
        let lowered = text.to_lowercase();
        if lowered.trim().is_empty() {
            return PatternMatch::none();
        }

        self.rules
            .iter()
            .filter(|rule| rule.category != NotesCategory::None)
            .filter_map(|rule| rule.first_hit(&lowered).map(|hit| (rule, hit)))
            .max_by_key(|(rule, _)| rule.category)
            .map(|(rule, hit)| PatternMatch {
                category: rule.category,
                points: rule.points,
                keyword: Some(hit.to_string()),
            })
            .unwrap_or_else(PatternMatch::none)
    }
}
