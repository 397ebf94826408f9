use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Instance config key holding the number of content rules.
pub const CONTENT_FIELDS_COUNT: &str = "content_fields_count";

/// Prefix shared by every indexed content rule key.
pub const CONTENT_PREFIX: &str = "content_";

pub const FILENAME_MATCHMODE: &str = "filename_matchmode";
pub const FILENAME_REGEX: &str = "filename_regex";
pub const FILENAME_FEEDBACK: &str = "filename_feedback";

/// Config key of one field of the content rule at `index`.
pub fn content_key(index: usize, field: &str) -> String {
    format!("{}{}_{}", CONTENT_PREFIX, index, field)
}

/// Whether a rule requires its pattern to be found or to be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    MustMatch,
    MustNotMatch,
}

impl MatchMode {
    /// Parse a stored or submitted value. `"0"` is must-not-match, anything
    /// else (including a missing value) is must-match.
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("0") => Self::MustNotMatch,
            _ => Self::MustMatch,
        }
    }

    pub fn as_config(&self) -> &'static str {
        match self {
            Self::MustMatch => "1",
            Self::MustNotMatch => "0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Rule {
    pub regex: String,
    pub match_mode: MatchMode,
    /// Shown to the learner when the rule fails; a default message is used when absent.
    pub feedback: Option<String>,
}

impl Rule {
    pub fn new(regex: impl Into<String>, match_mode: MatchMode) -> Self {
        Self {
            regex: regex.into(),
            match_mode,
            feedback: None,
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into()).filter(|f: &String| !f.is_empty());
        self
    }

    /// A rule without a pattern is never evaluated.
    pub fn is_empty(&self) -> bool {
        self.regex.is_empty()
    }
}

/// The validation rules of one plugin instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct RuleSet {
    pub filename: Rule,
    /// Content rules, evaluated in order.
    pub content: Vec<Rule>,
}

impl RuleSet {
    /// Build the rule set from an instance's stored config.
    ///
    /// Only the first `content_fields_count` indexed rules are read, and
    /// entries without a pattern are skipped.
    pub fn from_config(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| config.get(key).map(String::as_str);
        let feedback = |key: &str| get(key).filter(|f| !f.is_empty()).map(str::to_string);

        let filename = Rule {
            regex: get(FILENAME_REGEX).unwrap_or_default().to_string(),
            match_mode: MatchMode::from_config(get(FILENAME_MATCHMODE)),
            feedback: feedback(FILENAME_FEEDBACK),
        };

        let count = get(CONTENT_FIELDS_COUNT)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let content = (0..count)
            .map(|i| Rule {
                regex: get(&content_key(i, "regex")).unwrap_or_default().to_string(),
                match_mode: MatchMode::from_config(get(&content_key(i, "matchmode"))),
                feedback: feedback(&content_key(i, "feedback")),
            })
            .filter(|rule| !rule.is_empty())
            .collect();

        Self { filename, content }
    }

    /// Flatten into the config entries to persist.
    ///
    /// Content rules are numbered contiguously from 0, feedback keys are only
    /// emitted when set, and the count is always emitted.
    pub fn to_config_entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            (
                FILENAME_MATCHMODE.to_string(),
                self.filename.match_mode.as_config().to_string(),
            ),
            (FILENAME_REGEX.to_string(), self.filename.regex.clone()),
            (
                FILENAME_FEEDBACK.to_string(),
                self.filename.feedback.clone().unwrap_or_default(),
            ),
        ];

        let rules = self.content.iter().filter(|rule| !rule.is_empty());
        let mut count = 0;
        for (i, rule) in rules.enumerate() {
            entries.push((content_key(i, "matchmode"), rule.match_mode.as_config().to_string()));
            entries.push((content_key(i, "regex"), rule.regex.clone()));
            if let Some(feedback) = &rule.feedback {
                entries.push((content_key(i, "feedback"), feedback.clone()));
            }
            count = i + 1;
        }

        entries.push((CONTENT_FIELDS_COUNT.to_string(), count.to_string()));
        entries
    }

    pub fn has_content_rules(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Whether a config key belongs to an indexed content rule.
pub fn is_content_rule_key(key: &str) -> bool {
    key.strip_prefix(CONTENT_PREFIX)
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_match_mode_from_config() {
        assert_eq!(MatchMode::from_config(Some("1")), MatchMode::MustMatch);
        assert_eq!(MatchMode::from_config(Some("0")), MatchMode::MustNotMatch);
        assert_eq!(MatchMode::from_config(None), MatchMode::MustMatch);
        assert_eq!(MatchMode::from_config(Some("garbage")), MatchMode::MustMatch);
    }

    #[test]
    fn test_from_config_reads_counted_rules_only() {
        let config = config(&[
            ("filename_regex", r"\.(c|cpp)$"),
            ("filename_matchmode", "1"),
            ("filename_feedback", "File must end in .c or .cpp"),
            ("content_fields_count", "1"),
            ("content_0_regex", "int main"),
            ("content_0_matchmode", "1"),
            ("content_1_regex", "stale"),
            ("content_1_matchmode", "0"),
        ]);

        let rules = RuleSet::from_config(&config);
        assert_eq!(rules.filename.regex, r"\.(c|cpp)$");
        assert_eq!(
            rules.filename.feedback.as_deref(),
            Some("File must end in .c or .cpp")
        );
        assert_eq!(rules.content, vec![Rule::new("int main", MatchMode::MustMatch)]);
    }

    #[test]
    fn test_from_config_empty() {
        let rules = RuleSet::from_config(&BTreeMap::new());
        assert!(rules.filename.is_empty());
        assert!(!rules.has_content_rules());
    }

    #[test]
    fn test_to_config_entries_renumbers_and_counts() {
        let rules = RuleSet {
            filename: Rule::default(),
            content: vec![
                Rule::new("a", MatchMode::MustMatch).with_feedback("need a"),
                Rule::new("", MatchMode::MustMatch),
                Rule::new("c", MatchMode::MustNotMatch),
            ],
        };

        let entries: BTreeMap<_, _> = rules.to_config_entries().into_iter().collect();
        assert_eq!(entries["content_fields_count"], "2");
        assert_eq!(entries["content_0_regex"], "a");
        assert_eq!(entries["content_0_feedback"], "need a");
        assert_eq!(entries["content_1_regex"], "c");
        assert_eq!(entries["content_1_matchmode"], "0");
        assert!(!entries.contains_key("content_1_feedback"));
        assert!(!entries.contains_key("content_2_regex"));
    }

    #[test]
    fn test_is_content_rule_key() {
        assert!(is_content_rule_key("content_0_regex"));
        assert!(is_content_rule_key("content_12_feedback"));
        assert!(!is_content_rule_key("content_fields_count"));
        assert!(!is_content_rule_key("filename_regex"));
    }
}
