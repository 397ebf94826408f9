//! Rule evaluation.
//!
//! A rule is a single-match, case-sensitive test over the whole subject. A
//! pattern that does not compile never blocks a submission: the rule passes
//! and the failure is logged.

use fileregex_models::{MatchMode, Rule};
use tracing::warn;

/// What a rule is applied to. Used to label logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Filename,
    Content,
}

impl RuleTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Content => "content",
        }
    }
}

fn passes(found: bool, mode: MatchMode) -> bool {
    match mode {
        MatchMode::MustMatch => found,
        MatchMode::MustNotMatch => !found,
    }
}

fn malformed(target: RuleTarget, pattern: &str, err: &regex::Error) {
    warn!(
        target = target.as_str(),
        pattern = %pattern,
        error = %err,
        "Ignoring rule with malformed regex"
    );
    metrics::counter!(
        "fileregex_malformed_regex_total",
        "target" => target.as_str()
    )
    .increment(1);
}

/// Whether `subject` satisfies the rule. Empty rules always pass.
pub fn validate_str(rule: &Rule, subject: &str, target: RuleTarget) -> bool {
    if rule.is_empty() {
        return true;
    }

    match regex::Regex::new(&rule.regex) {
        Ok(re) => passes(re.is_match(subject), rule.match_mode),
        Err(err) => {
            malformed(target, &rule.regex, &err);
            true
        }
    }
}

/// Byte-oriented variant used for file content, which need not be UTF-8.
pub fn validate_bytes(rule: &Rule, subject: &[u8], target: RuleTarget) -> bool {
    if rule.is_empty() {
        return true;
    }

    match regex::bytes::Regex::new(&rule.regex) {
        Ok(re) => passes(re.is_match(subject), rule.match_mode),
        Err(err) => {
            malformed(target, &rule.regex, &err);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_match_extension() {
        let rule = Rule::new(r"\.(c|cpp)$", MatchMode::MustMatch);
        assert!(validate_str(&rule, "main.cpp", RuleTarget::Filename));
        assert!(!validate_str(&rule, "main.py", RuleTarget::Filename));
    }

    #[test]
    fn test_must_not_match_content() {
        let rule = Rule::new("forbidden", MatchMode::MustNotMatch);
        assert!(!validate_bytes(&rule, b"forbidden word", RuleTarget::Content));
        assert!(validate_bytes(&rule, b"clean text", RuleTarget::Content));
    }

    #[test]
    fn test_empty_rule_passes() {
        let rule = Rule::new("", MatchMode::MustMatch);
        assert!(validate_str(&rule, "anything", RuleTarget::Filename));
        assert!(validate_bytes(&rule, b"", RuleTarget::Content));
    }

    #[test]
    fn test_malformed_regex_passes_in_both_modes() {
        for mode in [MatchMode::MustMatch, MatchMode::MustNotMatch] {
            let rule = Rule::new("([unclosed", mode);
            assert!(validate_str(&rule, "main.c", RuleTarget::Filename));
            assert!(validate_bytes(&rule, b"int main", RuleTarget::Content));
        }
    }

    #[test]
    fn test_case_sensitive() {
        let rule = Rule::new("Main", MatchMode::MustMatch);
        assert!(!validate_str(&rule, "main.c", RuleTarget::Filename));
    }

    #[test]
    fn test_binary_content_does_not_error() {
        let rule = Rule::new("ELF", MatchMode::MustNotMatch);
        assert!(!validate_bytes(&rule, &[0x7f, b'E', b'L', b'F', 0xff, 0xfe], RuleTarget::Content));
    }
}
