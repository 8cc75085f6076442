use serde::{Deserialize, Serialize};

/// Violation/issue severity. Ordered `Low < Medium < High < Critical` so a
/// `max()` over a collection gives the severity sort key described in the
/// persistence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// `critical=4 > high=3 > medium=2 > low=1`, matching the sort contract
    /// in the persistence interface.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Performance,
    BestPractice,
    Security,
    Maintainability,
    Deprecated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLanguage {
    Js,
    Ts,
    Both,
}

impl RuleLanguage {
    pub fn matches(&self, language: vantage_core::Language) -> bool {
        match self {
            RuleLanguage::Both => true,
            RuleLanguage::Js => language == vantage_core::Language::Js,
            RuleLanguage::Ts => language == vantage_core::Language::Ts,
        }
    }
}
