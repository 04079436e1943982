//! Event-driven UI session.
//!
//! A [`DemoSession`] owns the navigation and case-viewer controllers, one [`Tooltip`] per help
//! anchor, and the transient page state (failed images, the pending-link notice). Events are
//! handled one at a time, to completion, in arrival order through [`DemoSession::dispatch`].

use crate::dataset::DatasetStore;
use crate::navigation::{NavigationController, ScrollRecorder};
use crate::render::copy;
use crate::tooltip::{Placement, Tooltip};
use crate::viewer::{CaseViewer, ViewMode};
use crate::{ShowcaseError, ShowcaseResult};
use serde::{Deserialize, Serialize};
use showcase_types::NonEmptyText;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A discrete user input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    SelectSection {
        id: String,
    },
    SelectCase {
        id: String,
    },
    SelectView {
        mode: ViewMode,
    },
    PointerEnter {
        tooltip: String,
        /// Anchor top edge relative to the viewport top, if the anchor could be measured.
        #[serde(default)]
        anchor_top: Option<f64>,
    },
    PointerLeave {
        tooltip: String,
    },
    AssetLoadFailed {
        asset: String,
    },
    OutboundLinkRequested {
        target: NonEmptyText,
    },
    DismissNotice,
}

/// Parses a YAML (or JSON) sequence of events.
pub fn parse_event_script(text: &str) -> ShowcaseResult<Vec<UiEvent>> {
    serde_yaml::from_str(text).map_err(ShowcaseError::ScriptParse)
}

/// Serializable view of the session state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub active_section: String,
    pub selected_case_id: String,
    pub current_case_id: String,
    pub view_mode: ViewMode,
    pub visible_tooltips: Vec<VisibleTooltip>,
    pub failed_assets: Vec<String>,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisibleTooltip {
    pub id: String,
    pub placement: Placement,
}

/// Controller state for one page view.
#[derive(Clone, Debug)]
pub struct DemoSession {
    store: Arc<DatasetStore>,
    navigation: NavigationController,
    viewer: CaseViewer,
    scroller: ScrollRecorder,
    tooltips: Vec<Tooltip>,
    failed_assets: BTreeSet<String>,
    notice: Option<String>,
}

impl DemoSession {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        let navigation = NavigationController::new(&store);
        let viewer = CaseViewer::new(&store);
        let tooltips = copy::TOOLTIPS
            .iter()
            .map(|(id, label, detail)| Tooltip::new(*id, *label, *detail))
            .collect();

        Self {
            store,
            navigation,
            viewer,
            scroller: ScrollRecorder::new(),
            tooltips,
            failed_assets: BTreeSet::new(),
            notice: None,
        }
    }

    /// Marks sections as rendered so that navigation can scroll to them.
    pub fn mount_sections<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scroller.mount(ids);
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn viewer(&self) -> &CaseViewer {
        &self.viewer
    }

    pub fn scroller(&self) -> &ScrollRecorder {
        &self.scroller
    }

    pub fn tooltips(&self) -> &[Tooltip] {
        &self.tooltips
    }

    pub fn tooltip(&self, id: &str) -> Option<&Tooltip> {
        self.tooltips.iter().find(|t| t.id() == id)
    }

    pub fn asset_failed(&self, name: &str) -> bool {
        self.failed_assets.contains(name)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Handles one event to completion.
    pub fn dispatch(&mut self, event: &UiEvent) {
        tracing::debug!("dispatch {:?}", event);
        match event {
            UiEvent::SelectSection { id } => {
                self.navigation
                    .select_section(&self.store, id, &mut self.scroller);
            }
            UiEvent::SelectCase { id } => {
                self.viewer.select_case(&self.store, id);
            }
            UiEvent::SelectView { mode } => self.viewer.select_view(*mode),
            UiEvent::PointerEnter {
                tooltip,
                anchor_top,
            } => match self.tooltip_mut(tooltip) {
                Some(t) => t.pointer_enter(*anchor_top),
                None => tracing::debug!("pointer entered unknown tooltip '{}'", tooltip),
            },
            UiEvent::PointerLeave { tooltip } => {
                if let Some(t) = self.tooltip_mut(tooltip) {
                    t.pointer_leave();
                }
            }
            UiEvent::AssetLoadFailed { asset } => {
                tracing::warn!("asset '{}' failed to load; showing placeholder", asset);
                self.failed_assets.insert(asset.clone());
            }
            UiEvent::OutboundLinkRequested { target } => {
                self.notice = Some(copy::link_pending_notice(target));
            }
            UiEvent::DismissNotice => self.notice = None,
        }
    }

    /// Dispatches every event in order.
    pub fn replay<'e, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'e UiEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_section: self.navigation.active_section().to_string(),
            selected_case_id: self.viewer.selected_case_id().to_string(),
            current_case_id: self.viewer.current_case(&self.store).id.clone(),
            view_mode: self.viewer.view_mode(),
            visible_tooltips: self
                .tooltips
                .iter()
                .filter(|t| t.is_visible())
                .map(|t| VisibleTooltip {
                    id: t.id().to_string(),
                    placement: t.placement(),
                })
                .collect(),
            failed_assets: self.failed_assets.iter().cloned().collect(),
            notice: self.notice.clone(),
        }
    }

    fn tooltip_mut(&mut self, id: &str) -> Option<&mut Tooltip> {
        self.tooltips.iter_mut().find(|t| t.id() == id)
    }
}
