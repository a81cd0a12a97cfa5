//! Semantic domains used to scope numeric comparisons
//!
//! Two numeric claims are only compared when both sentences carry vocabulary
//! from the same domain. Domains are evaluated in [`SemanticDomain::PRIORITY`]
//! order and the first one that triggers decides the outcome.

use std::fmt;

/// A topical bucket that makes numbers comparable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticDomain {
    /// Money: budgets, costs, revenue
    Financial,
    /// Time: deadlines, durations, schedules
    Temporal,
    /// Targets and measured outcomes
    Performance,
}

impl SemanticDomain {
    /// Fixed evaluation order. Earlier domains win ties.
    pub const PRIORITY: [SemanticDomain; 3] = [
        SemanticDomain::Financial,
        SemanticDomain::Temporal,
        SemanticDomain::Performance,
    ];

    /// Lowercase name used in reasons and serialized output
    pub fn name(&self) -> &'static str {
        match self {
            SemanticDomain::Financial => "financial",
            SemanticDomain::Temporal => "temporal",
            SemanticDomain::Performance => "performance",
        }
    }

    /// Unit tokens (currency symbols, time units, percent markers)
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            SemanticDomain::Financial => &["$", "USD", "PKR", "€", "£"],
            SemanticDomain::Temporal => &["month", "day", "year", "week", "quarter"],
            SemanticDomain::Performance => &["%", "percent"],
        }
    }

    /// Seed keywords that get expanded with synonyms at startup
    pub fn seed_keywords(&self) -> &'static [&'static str] {
        match self {
            SemanticDomain::Financial => &[
                "budget", "cost", "price", "total", "expense", "fund", "payment", "revenue",
                "profit", "loss",
            ],
            SemanticDomain::Temporal => &[
                "deadline", "timeline", "duration", "schedule", "plan", "milestone",
            ],
            SemanticDomain::Performance => &[
                "KPI",
                "metric",
                "performance",
                "target",
                "goal",
                "achievement",
            ],
        }
    }

    /// Parse a domain from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "financial" => Some(SemanticDomain::Financial),
            "temporal" => Some(SemanticDomain::Temporal),
            "performance" => Some(SemanticDomain::Performance),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            SemanticDomain::PRIORITY,
            [
                SemanticDomain::Financial,
                SemanticDomain::Temporal,
                SemanticDomain::Performance
            ]
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for domain in SemanticDomain::PRIORITY {
            assert_eq!(SemanticDomain::parse(domain.name()), Some(domain));
        }
        assert_eq!(SemanticDomain::parse("FINANCIAL"), Some(SemanticDomain::Financial));
        assert_eq!(SemanticDomain::parse("legal"), None);
    }

    #[test]
    fn test_every_domain_has_vocabulary() {
        for domain in SemanticDomain::PRIORITY {
            assert!(!domain.units().is_empty());
            assert!(!domain.seed_keywords().is_empty());
        }
    }
}
