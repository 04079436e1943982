//! Dataset Store.
//!
//! The immutable collection of navigation items and pre-computed demonstration cases. The store is
//! built once at startup and only ever read afterwards; there are no mutation operations.
//!
//! Profile, output and structured-order payloads are opaque to the engine and are kept as
//! [`serde_json::Value`]. Only the fields the engine branches on (ids, titles, sequences checked at
//! startup) are typed precisely.

use crate::constants::DATASET_YAML;
use crate::{ShowcaseError, ShowcaseResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// ADIME section keys in display order, paired with their headings.
pub const ADIME_SECTIONS: [(&str, &str); 5] = [
    ("assessment", "Assessment"),
    ("diagnosis", "Diagnosis"),
    ("intervention", "Intervention"),
    ("monitoring", "Monitoring"),
    ("evaluation", "Evaluation"),
];

/// A page section reachable from the navigation bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    /// Optional section blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Sources the pipeline consulted for a case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub guidelines: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub retrieved_points: Vec<String>,
}

/// A rule the care plan must not violate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyConstraint {
    pub rule: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// One pre-computed clinical scenario.
///
/// Missing fields deserialize to empty values so that the invariant checker, rather than the
/// parser, reports which case is incomplete.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemoCase {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub evidence: Evidence,
    /// ADIME-shaped care plan.
    #[serde(default)]
    pub output: Value,
    /// Raw value; must be a sequence of [`SafetyConstraint`] records.
    #[serde(default)]
    pub safety_constraints: Value,
    #[serde(default)]
    pub structured_order: Value,
}

impl DemoCase {
    /// One ADIME section of the care plan, if present.
    pub fn adime_section(&self, key: &str) -> Option<&Value> {
        self.output.get(key).filter(|v| !is_blank(v))
    }

    /// Diagnosis entries in priority order. The first entry is the primary focus.
    pub fn diagnoses(&self) -> &[Value] {
        self.output
            .get("diagnosis")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Safety constraints as typed records.
    ///
    /// Entries that do not have the expected shape are skipped; development builds reject such
    /// datasets at startup.
    pub fn safety_rules(&self) -> Vec<SafetyConstraint> {
        let Some(entries) = self.safety_constraints.as_array() else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match SafetyConstraint::deserialize(entry) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!("skipping malformed safety constraint in {}: {}", self.id, e);
                    None
                }
            })
            .collect()
    }
}

/// Returns true for values that carry no content: null, blank strings, empty maps and sequences.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[derive(Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    nav_items: Vec<NavItem>,
    #[serde(default)]
    cases: Vec<DemoCase>,
}

/// Immutable, in-memory dataset.
///
/// Construction guarantees at least one nav item and one case, so [`DatasetStore::first_case`] and
/// [`DatasetStore::first_nav_item`] are total.
#[derive(Clone, Debug)]
pub struct DatasetStore {
    nav_items: Vec<NavItem>,
    cases: Vec<DemoCase>,
}

impl DatasetStore {
    /// Builds a store from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::EmptyDataset`] if either list is empty.
    pub fn new(nav_items: Vec<NavItem>, cases: Vec<DemoCase>) -> ShowcaseResult<Self> {
        if nav_items.is_empty() {
            return Err(ShowcaseError::EmptyDataset("navigation items"));
        }
        if cases.is_empty() {
            return Err(ShowcaseError::EmptyDataset("demonstration cases"));
        }
        Ok(Self { nav_items, cases })
    }

    /// Parses a YAML dataset document with `nav_items` and `cases` keys.
    pub fn from_yaml(text: &str) -> ShowcaseResult<Self> {
        let doc: DatasetDocument =
            serde_yaml::from_str(text).map_err(ShowcaseError::DatasetParse)?;
        Self::new(doc.nav_items, doc.cases)
    }

    /// The dataset compiled into this binary.
    pub fn builtin() -> ShowcaseResult<Self> {
        Self::from_yaml(DATASET_YAML)
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn cases(&self) -> &[DemoCase] {
        &self.cases
    }

    /// Looks up a nav item; `None` means not found.
    pub fn nav_item(&self, id: &str) -> Option<&NavItem> {
        self.nav_items.iter().find(|item| item.id == id)
    }

    /// Looks up a case; `None` means not found.
    pub fn case(&self, id: &str) -> Option<&DemoCase> {
        self.cases.iter().find(|case| case.id == id)
    }

    pub fn first_nav_item(&self) -> &NavItem {
        &self.nav_items[0]
    }

    pub fn first_case(&self) -> &DemoCase {
        &self.cases[0]
    }

    pub fn nav_ids(&self) -> impl Iterator<Item = &str> {
        self.nav_items.iter().map(|item| item.id.as_str())
    }

    pub fn case_ids(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.id.as_str())
    }
}
