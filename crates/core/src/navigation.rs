//! Navigation Controller: tracks the active page section.

use crate::dataset::DatasetStore;

/// Receives best-effort requests to bring a section into view.
pub trait SectionScroller {
    /// Scrolls `section_id` into view. Returns `false` if that section is not mounted yet.
    fn scroll_into_view(&mut self, section_id: &str) -> bool;
}

/// Active-section state with a single update entry point, [`NavigationController::select_section`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationController {
    active_section: String,
}

impl NavigationController {
    /// Starts on the first navigation item.
    pub fn new(store: &DatasetStore) -> Self {
        Self {
            active_section: store.first_nav_item().id.clone(),
        }
    }

    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    /// Activates `id` and asks `scroller` to bring it into view.
    ///
    /// Unknown ids are ignored. A section that is not mounted yet is tolerated: the active
    /// section still changes.
    ///
    /// Returns `true` if the active section was updated.
    pub fn select_section(
        &mut self,
        store: &DatasetStore,
        id: &str,
        scroller: &mut dyn SectionScroller,
    ) -> bool {
        if store.nav_item(id).is_none() {
            tracing::debug!("ignoring unknown section '{}'", id);
            return false;
        }

        self.active_section = id.to_string();
        if !scroller.scroll_into_view(id) {
            tracing::debug!("section '{}' not mounted; scroll skipped", id);
        }
        true
    }
}

/// Records scroll requests against the set of sections the renderer has mounted.
#[derive(Clone, Debug, Default)]
pub struct ScrollRecorder {
    mounted: Vec<String>,
    last_scrolled: Option<String>,
}

impl ScrollRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the given sections as present in the rendered page.
    pub fn mount<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if !self.mounted.contains(&id) {
                self.mounted.push(id);
            }
        }
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.iter().any(|m| m == id)
    }

    /// The most recent section actually scrolled into view.
    pub fn last_scrolled(&self) -> Option<&str> {
        self.last_scrolled.as_deref()
    }
}

impl SectionScroller for ScrollRecorder {
    fn scroll_into_view(&mut self, section_id: &str) -> bool {
        if !self.is_mounted(section_id) {
            return false;
        }
        self.last_scrolled = Some(section_id.to_string());
        true
    }
}
