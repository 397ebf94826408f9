use std::collections::BTreeMap;

use fileregex_core::plugin::COMPONENT;
use fileregex_core::strings::StringLookup;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::rules::{MatchMode, Rule, RuleSet};

/// Flat, field-keyed settings input as posted by the settings form.
///
/// Keys carry the `assignsubmission_fileregex_` prefix. Filename fields are
/// `..._filename_regex`, `..._filename_matchmode` and `..._filename_feedback`;
/// content rules are `..._content[<i>][regex|matchmode|feedback]`. Keys of
/// other plugins are ignored. Scalar JSON values are accepted and stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct RawSettings {
    fields: BTreeMap<String, String>,
}

impl From<BTreeMap<String, serde_json::Value>> for RawSettings {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let fields = raw
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    serde_json::Value::Bool(b) => (if b { "1" } else { "0" }).to_string(),
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Default)]
struct RuleInput {
    regex: Option<String>,
    matchmode: Option<String>,
    feedback: Option<String>,
}

impl RuleInput {
    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "regex" => &mut self.regex,
            "matchmode" => &mut self.matchmode,
            "feedback" => &mut self.feedback,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn into_rule(self) -> Rule {
        Rule::new(
            self.regex.unwrap_or_default(),
            MatchMode::from_config(self.matchmode.as_deref()),
        )
        .with_feedback(self.feedback.unwrap_or_default())
    }
}

/// Split `content[3][regex]` into `(3, "regex")`.
fn parse_content_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix("content[")?;
    let (index, rest) = rest.split_once("][")?;
    let field = rest.strip_suffix(']')?;
    Some((index.parse().ok()?, field))
}

impl RawSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Reconstruct the rule set.
    ///
    /// Content rules are ordered by their submitted index; rules with an empty
    /// pattern are discarded and the survivors renumbered from 0.
    pub fn into_rule_set(self) -> RuleSet {
        let prefix = format!("{}_", COMPONENT);
        let mut filename = RuleInput::default();
        let mut content: BTreeMap<usize, RuleInput> = BTreeMap::new();

        for (key, value) in &self.fields {
            let Some(name) = key.strip_prefix(&prefix) else {
                continue;
            };

            if let Some(field) = name.strip_prefix("filename_") {
                filename.set(field, value);
            } else if let Some((index, field)) = parse_content_key(name) {
                content.entry(index).or_default().set(field, value);
            }
        }

        RuleSet {
            filename: filename.into_rule(),
            content: content
                .into_values()
                .map(RuleInput::into_rule)
                .filter(|rule| !rule.is_empty())
                .collect(),
        }
    }
}

/// Most content rows the form shows beyond the stored rules.
pub const MAX_CONTENT_FIELDS: usize = 100;

/// Query parameters of the settings form contribution.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct SettingsFormParams {
    /// Number of content rows currently displayed by the form
    pub content_fields_count: Option<usize>,
    /// Set when the "add more fields" button was pressed
    #[serde(default)]
    pub content_fields_add: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RuleFieldGroup {
    /// Form group name
    pub name: String,
    pub label: String,
    pub help: Option<String>,
    pub match_mode: MatchMode,
    pub regex: String,
    pub feedback: String,
    pub regex_placeholder: String,
    pub feedback_placeholder: String,
}

/// Conditions under which the plugin may be enabled on an assignment.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnableConstraints {
    pub requires_file_submissions: bool,
    pub required_max_files: u32,
    pub help: String,
}

/// Settings form contribution for one instance.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsForm {
    pub plugin_name: String,
    pub enable: EnableConstraints,
    /// Error banner shown when the plugin is ordered before the file submission plugin
    pub improperly_configured: Option<String>,
    pub match_mode_options: Vec<SelectOption>,
    pub filename: RuleFieldGroup,
    pub content: Vec<RuleFieldGroup>,
    /// Hidden field value echoed back by the form
    pub content_fields_count: usize,
    pub add_more_fields_label: String,
}

impl SettingsForm {
    /// Build the form from the stored rules.
    ///
    /// The number of content rows is the requested or stored count (at least
    /// one), plus two blank rows when more fields were asked for. It never
    /// exceeds [`MAX_CONTENT_FIELDS`] or the stored count, whichever is larger.
    pub fn build(
        rules: &RuleSet,
        params: &SettingsFormParams,
        correctly_ordered: bool,
        strings: &dyn StringLookup,
    ) -> Self {
        let s = |key: &str| strings.get_string(key, None);
        let field = |name: &str| format!("{}_{}", COMPONENT, name);

        let stored = rules.content.len();
        let extra = if params.content_fields_add { 2 } else { 0 };
        let count = params
            .content_fields_count
            .unwrap_or(stored)
            .max(1)
            .saturating_add(extra)
            .min(MAX_CONTENT_FIELDS.max(stored));

        let content = (0..count)
            .map(|i| {
                let rule = rules.content.get(i).cloned().unwrap_or_default();
                RuleFieldGroup {
                    name: field(&format!("content[{}]", i)),
                    label: if i == 0 { s("contentregex") } else { String::new() },
                    help: (i == 0).then(|| s("contentregex_help")),
                    match_mode: rule.match_mode,
                    regex: rule.regex,
                    feedback: rule.feedback.unwrap_or_default(),
                    regex_placeholder: r"def main\(\):".to_string(),
                    feedback_placeholder: s("functionmainnotfound"),
                }
            })
            .collect();

        Self {
            plugin_name: s("pluginname"),
            enable: EnableConstraints {
                requires_file_submissions: true,
                required_max_files: 1,
                help: s("enabled_help"),
            },
            improperly_configured: (!correctly_ordered).then(|| s("pluginimproperlyconfigured")),
            match_mode_options: vec![
                SelectOption {
                    value: MatchMode::MustMatch.as_config().to_string(),
                    label: s("mustmatch"),
                },
                SelectOption {
                    value: MatchMode::MustNotMatch.as_config().to_string(),
                    label: s("mustnotmatch"),
                },
            ],
            filename: RuleFieldGroup {
                name: field("filename"),
                label: s("filenameregex"),
                help: Some(s("filenameregex_help")),
                match_mode: rules.filename.match_mode,
                regex: rules.filename.regex.clone(),
                feedback: rules.filename.feedback.clone().unwrap_or_default(),
                regex_placeholder: r"\.(c|cpp)$".to_string(),
                feedback_placeholder: s("filemustendincorcpp"),
            },
            content,
            content_fields_count: count,
            add_more_fields_label: s("addmorefields"),
        }
    }
}
