//! Case Viewer Controller: which case is selected and how it is projected.

use crate::dataset::{DatasetStore, DemoCase};
use crate::{ShowcaseError, ShowcaseResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Projection of the selected case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Care-plan summary.
    #[default]
    Primary,
    /// The structured order.
    Structured,
    /// The full record as data.
    Raw,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Primary, ViewMode::Structured, ViewMode::Raw];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Structured => "structured",
            Self::Raw => "raw",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "structured" => Ok(Self::Structured),
            "raw" => Ok(Self::Raw),
            other => Err(ShowcaseError::InvalidInput(format!(
                "unknown view mode '{other}' (expected primary, structured or raw)"
            ))),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves `id` to a case, falling back to the first case of the dataset.
///
/// The result is always a member of `store`.
pub fn resolve_case_or_first<'s>(store: &'s DatasetStore, id: &str) -> &'s DemoCase {
    match store.case(id) {
        Some(case) => case,
        None => {
            tracing::debug!("case '{}' not found; showing first case", id);
            store.first_case()
        }
    }
}

/// Selected case and view mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseViewer {
    selected_case_id: String,
    view_mode: ViewMode,
}

impl CaseViewer {
    /// Starts on the first case in the primary view.
    pub fn new(store: &DatasetStore) -> Self {
        Self {
            selected_case_id: store.first_case().id.clone(),
            view_mode: ViewMode::Primary,
        }
    }

    pub fn selected_case_id(&self) -> &str {
        &self.selected_case_id
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Selects case `id` and returns the viewer to [`ViewMode::Primary`].
    ///
    /// Unknown ids leave the state untouched. Returns `true` if the selection changed state.
    pub fn select_case(&mut self, store: &DatasetStore, id: &str) -> bool {
        if store.case(id).is_none() {
            tracing::debug!("ignoring unknown case '{}'", id);
            return false;
        }
        self.selected_case_id = id.to_string();
        self.view_mode = ViewMode::Primary;
        true
    }

    pub fn select_view(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Parses `mode` and selects it.
    pub fn select_view_str(&mut self, mode: &str) -> ShowcaseResult<()> {
        self.select_view(mode.parse()?);
        Ok(())
    }

    /// The case to display.
    pub fn current_case<'s>(&self, store: &'s DatasetStore) -> &'s DemoCase {
        resolve_case_or_first(store, &self.selected_case_id)
    }
}
