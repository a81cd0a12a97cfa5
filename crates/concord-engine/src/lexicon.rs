//! Domain keyword expansion
//!
//! Built once at startup: every seed keyword of every domain is looked up
//! in a lexical database and the synonyms are folded into that domain's
//! term list. The resulting [`DomainLexicon`] is immutable and shared by
//! reference with the matcher and the numeric detector.

use concord_domain::traits::LexicalDatabase;
use concord_domain::SemanticDomain;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Expanded vocabulary of one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTerms {
    /// The domain these terms belong to
    pub domain: SemanticDomain,
    /// Unit tokens (currency symbols, time units, percent markers)
    pub units: Vec<String>,
    /// Seed keywords
    pub keywords: Vec<String>,
    /// Synonyms gathered from the lexical database
    pub synonyms: BTreeSet<String>,
    /// Lowercased union of units, keywords and synonyms
    match_terms: Vec<String>,
}

impl DomainTerms {
    fn new(domain: SemanticDomain, synonyms: BTreeSet<String>) -> Self {
        let units: Vec<String> = domain.units().iter().map(|u| u.to_string()).collect();
        let keywords: Vec<String> = domain.seed_keywords().iter().map(|k| k.to_string()).collect();

        let mut seen = BTreeSet::new();
        let match_terms = units
            .iter()
            .chain(keywords.iter())
            .chain(synonyms.iter())
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        Self {
            domain,
            units,
            keywords,
            synonyms,
            match_terms,
        }
    }

    /// Lowercased terms that signal this domain
    pub fn match_terms(&self) -> &[String] {
        &self.match_terms
    }
}

/// Immutable per-domain vocabulary, indexed in priority order
#[derive(Debug, Clone, PartialEq)]
pub struct DomainLexicon {
    domains: Vec<DomainTerms>,
}

impl DomainLexicon {
    /// Expand every domain's seed keywords through `database`
    ///
    /// Lookups that yield nothing leave the domain with its seed keywords
    /// only; expansion never fails.
    pub fn expand<L>(database: &L) -> Self
    where
        L: LexicalDatabase + ?Sized,
    {
        let domains: Vec<DomainTerms> = SemanticDomain::PRIORITY
            .iter()
            .map(|&domain| {
                let mut synonyms = BTreeSet::new();
                for keyword in domain.seed_keywords() {
                    synonyms.extend(database.synonyms_of(keyword));
                }
                if synonyms.is_empty() {
                    warn!(
                        "No synonyms found for the {} domain, using seed keywords only",
                        domain
                    );
                } else {
                    debug!("Expanded {} domain with {} synonyms", domain, synonyms.len());
                }
                DomainTerms::new(domain, synonyms)
            })
            .collect();

        let lexicon = Self { domains };
        info!(
            "Domain lexicon ready: {} match terms across {} domains",
            lexicon.term_count(),
            lexicon.domains.len()
        );
        lexicon
    }

    /// Lexicon without any synonyms (degraded mode)
    pub fn seeds_only() -> Self {
        Self {
            domains: SemanticDomain::PRIORITY
                .iter()
                .map(|&domain| DomainTerms::new(domain, BTreeSet::new()))
                .collect(),
        }
    }

    /// Terms of one domain
    pub fn terms(&self, domain: SemanticDomain) -> &DomainTerms {
        // `domains` is built from PRIORITY, so the position always exists
        let position = SemanticDomain::PRIORITY
            .iter()
            .position(|d| *d == domain)
            .unwrap_or_default();
        &self.domains[position]
    }

    /// All domains in priority order
    pub fn iter(&self) -> impl Iterator<Item = &DomainTerms> {
        self.domains.iter()
    }

    /// Total number of match terms
    pub fn term_count(&self) -> usize {
        self.domains.iter().map(|d| d.match_terms.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_lexicon::{NullLexicon, Thesaurus};

    #[test]
    fn test_seeds_only_contains_units_and_keywords() {
        let lexicon = DomainLexicon::seeds_only();
        let financial = lexicon.terms(SemanticDomain::Financial);
        assert!(financial.synonyms.is_empty());
        assert!(financial.match_terms().contains(&"$".to_string()));
        assert!(financial.match_terms().contains(&"budget".to_string()));
        assert!(financial.match_terms().contains(&"usd".to_string()));
    }

    #[test]
    fn test_expand_adds_synonyms() {
        let mut thesaurus = Thesaurus::new();
        thesaurus.insert("deadline", ["cutoff date"]);
        let lexicon = DomainLexicon::expand(&thesaurus);

        let temporal = lexicon.terms(SemanticDomain::Temporal);
        assert!(temporal.synonyms.contains("cutoff date"));
        assert!(temporal.match_terms().contains(&"cutoff date".to_string()));
        assert!(lexicon
            .terms(SemanticDomain::Financial)
            .synonyms
            .is_empty());
    }

    #[test]
    fn test_unavailable_database_falls_back_to_seeds() {
        assert_eq!(DomainLexicon::expand(&NullLexicon), DomainLexicon::seeds_only());
    }

    #[test]
    fn test_iteration_follows_priority() {
        let lexicon = DomainLexicon::expand(&Thesaurus::builtin());
        let order: Vec<SemanticDomain> = lexicon.iter().map(|t| t.domain).collect();
        assert_eq!(order, SemanticDomain::PRIORITY.to_vec());
    }

    #[test]
    fn test_match_terms_are_lowercase_and_unique() {
        let lexicon = DomainLexicon::expand(&Thesaurus::builtin());
        for terms in lexicon.iter() {
            let unique: BTreeSet<&String> = terms.match_terms().iter().collect();
            assert_eq!(unique.len(), terms.match_terms().len());
            assert!(terms.match_terms().iter().all(|t| *t == t.to_lowercase()));
        }
    }
}
