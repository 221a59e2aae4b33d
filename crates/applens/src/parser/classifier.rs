use super::rules::{self, KeywordRule};
use super::traits::*;

/// Ordered rule cascade.
/// 1. Structural rules in priority order (Android, iOS, mini-program)
/// 2. First rule that yields wins; later rules are skipped
/// 3. Keyword rule closes the list and always yields
pub struct RuleCascade {
    rules: Vec<Box<dyn LineRule>>,
}

/// A classification together with the rule that produced it.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub classification: Classification,
    pub rule: &'static str,
}

impl Verdict {
    /// True when no structural rule claimed the line.
    pub fn is_fallback(&self) -> bool {
        self.rule == KeywordRule::NAME
    }
}

impl RuleCascade {
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    /// Build a cascade from custom rules. The keyword fallback still runs
    /// after them, so totality holds for any rule list.
    pub fn with_rules(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, line: &str, prior: LogSource) -> Verdict {
        for rule in &self.rules {
            if let Some(mut classification) = rule.classify(line, prior) {
                // A rule that could not settle the level defers to keywords
                if classification.level == LogLevel::Unknown {
                    classification.level = KeywordRule::level_of(line);
                }
                return Verdict {
                    classification,
                    rule: rule.name(),
                };
            }
        }

        Verdict {
            classification: Classification::new(prior, KeywordRule::level_of(line)),
            rule: KeywordRule::NAME,
        }
    }
}

impl Default for RuleCascade {
    fn default() -> Self {
        Self::new()
    }
}
