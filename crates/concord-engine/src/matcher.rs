//! Domain matching: which semantic domains does a sentence touch?

use crate::lexicon::DomainLexicon;
use concord_domain::SemanticDomain;

/// Decides domain context for sentences using a shared [`DomainLexicon`]
#[derive(Debug, Clone, Copy)]
pub struct DomainMatcher<'a> {
    lexicon: &'a DomainLexicon,
}

impl<'a> DomainMatcher<'a> {
    /// Create a matcher over `lexicon`
    pub fn new(lexicon: &'a DomainLexicon) -> Self {
        Self { lexicon }
    }

    /// Whether `text` mentions any unit, keyword or synonym of `domain`
    ///
    /// Matching is a case-insensitive substring test.
    pub fn has_context(&self, domain: SemanticDomain, text: &str) -> bool {
        self.has_context_lowercase(domain, &text.to_lowercase())
    }

    /// Same as [`has_context`](Self::has_context) for already lowercased text
    pub(crate) fn has_context_lowercase(&self, domain: SemanticDomain, lowered: &str) -> bool {
        self.lexicon
            .terms(domain)
            .match_terms()
            .iter()
            .any(|term| lowered.contains(term.as_str()))
    }

    /// Every domain `text` touches, in priority order
    pub fn domains_of(&self, text: &str) -> Vec<SemanticDomain> {
        let lowered = text.to_lowercase();
        SemanticDomain::PRIORITY
            .into_iter()
            .filter(|domain| self.has_context_lowercase(*domain, &lowered))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_lexicon::Thesaurus;

    #[test]
    fn test_units_and_keywords() {
        let lexicon = DomainLexicon::seeds_only();
        let matcher = DomainMatcher::new(&lexicon);

        assert!(matcher.has_context(SemanticDomain::Financial, "It costs $40."));
        assert!(matcher.has_context(SemanticDomain::Temporal, "Due next MONTH."));
        assert!(matcher.has_context(SemanticDomain::Performance, "Uptime hit 99%."));
        assert!(matcher.has_context(SemanticDomain::Performance, "Our kpi is churn."));
        assert!(!matcher.has_context(SemanticDomain::Financial, "The cat sat."));
    }

    #[test]
    fn test_synonyms_extend_context() {
        let lexicon = DomainLexicon::expand(&Thesaurus::builtin());
        let matcher = DomainMatcher::new(&lexicon);
        assert!(matcher.has_context(SemanticDomain::Financial, "Expenditure rose to 40."));

        let seeds = DomainLexicon::seeds_only();
        let seed_matcher = DomainMatcher::new(&seeds);
        assert!(!seed_matcher.has_context(SemanticDomain::Financial, "Expenditure rose to 40."));
    }

    #[test]
    fn test_domains_of_in_priority_order() {
        let lexicon = DomainLexicon::seeds_only();
        let matcher = DomainMatcher::new(&lexicon);
        let domains = matcher.domains_of("The budget grows 10% per quarter.");
        assert_eq!(
            domains,
            vec![
                SemanticDomain::Financial,
                SemanticDomain::Temporal,
                SemanticDomain::Performance
            ]
        );
        assert!(matcher.domains_of("Nothing relevant here.").is_empty());
    }
}
