//! # Showcase Core
//!
//! Interactive demonstration engine for the clinical nutrition showcase page.
//!
//! This crate contains the dataset and the client-side behaviours that present it:
//! - the immutable Dataset Store, compiled into the binary
//! - startup invariant checks (development builds only)
//! - navigation and case-viewer controllers, driven by discrete UI events
//! - tooltip placement
//! - the asset boundary and the HTML renderer
//!
//! **No server or CLI concerns**: HTTP handling lives in the `showcase-run` binary and the command
//! line in `showcase-cli`.

pub mod assets;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod integrity;
pub mod navigation;
pub mod render;
pub mod session;
pub mod tooltip;
pub mod viewer;

pub use assets::{AssetCatalog, DirAssets, MemoryAssets};
pub use config::{BuildMode, ShowcaseConfig};
pub use dataset::{DatasetStore, DemoCase, Evidence, NavItem, SafetyConstraint};
pub use error::{ShowcaseError, ShowcaseResult};
pub use integrity::{CheckOutcome, IntegrityError};
pub use navigation::{NavigationController, ScrollRecorder, SectionScroller};
pub use render::{project_case, render_page, session_for_query, PageQuery};
pub use session::{DemoSession, SessionSnapshot, UiEvent};
pub use tooltip::{Placement, Tooltip};
pub use viewer::{resolve_case_or_first, CaseViewer, ViewMode};

use std::sync::Arc;

/// A started showcase: configuration plus a dataset that passed (or skipped) its startup checks.
#[derive(Clone, Debug)]
pub struct Showcase {
    cfg: ShowcaseConfig,
    store: Arc<DatasetStore>,
    checks: CheckOutcome,
}

impl Showcase {
    /// Loads the compiled-in dataset and runs the startup checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be parsed or, in development builds, violates an
    /// invariant. Either way the build artifact is broken and startup must stop.
    pub fn start(cfg: ShowcaseConfig) -> ShowcaseResult<Self> {
        Self::start_with(cfg, DatasetStore::builtin()?)
    }

    /// Like [`Showcase::start`] with an explicit dataset.
    pub fn start_with(cfg: ShowcaseConfig, store: DatasetStore) -> ShowcaseResult<Self> {
        let checks = integrity::run_startup_checks(&cfg, &store, &render::copy::required_labels())?;
        tracing::info!(
            "showcase started in {} mode (invariant checks {:?})",
            cfg.mode(),
            checks
        );
        Ok(Self {
            cfg,
            store: Arc::new(store),
            checks,
        })
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.cfg
    }

    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    pub fn checks(&self) -> CheckOutcome {
        self.checks
    }

    /// The configured asset directory.
    pub fn assets(&self) -> DirAssets {
        DirAssets::new(self.cfg.asset_dir())
    }

    /// A fresh session with every section mounted.
    pub fn new_session(&self) -> DemoSession {
        let mut session = DemoSession::new(self.store.clone());
        session.mount_sections(render::mounted_section_ids(&self.store));
        session
    }

    /// Renders the page for a request's query.
    pub fn render(&self, query: &PageQuery) -> ShowcaseResult<String> {
        let session = session_for_query(self.store.clone(), query)?;
        Ok(render_page(&session, &self.assets()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::{case, nav};
    use std::path::PathBuf;

    fn cfg(mode: BuildMode) -> ShowcaseConfig {
        ShowcaseConfig::new(mode, PathBuf::from("no-such-asset-dir"))
    }

    #[test]
    fn starts_with_builtin_dataset_in_development() {
        let showcase = Showcase::start(cfg(BuildMode::Development)).expect("starts");
        assert_eq!(showcase.checks(), CheckOutcome::Passed);
        assert_eq!(showcase.store().cases().len(), 3);
    }

    #[test]
    fn duplicate_case_halts_development_startup() {
        let store = DatasetStore::new(
            vec![nav("overview", "Overview")],
            vec![case("case-1"), case("case-1")],
        )
        .unwrap();
        let err = Showcase::start_with(cfg(BuildMode::Development), store)
            .expect_err("should halt");
        assert!(err.to_string().contains("duplicate case id 'case-1'"));
    }

    #[test]
    fn production_startup_skips_checks() {
        let store = DatasetStore::new(
            vec![nav("overview", "Overview")],
            vec![case("case-1"), case("case-1")],
        )
        .unwrap();
        let showcase =
            Showcase::start_with(cfg(BuildMode::Production), store).expect("proceeds");
        assert_eq!(showcase.checks(), CheckOutcome::Skipped);
    }

    #[test]
    fn new_session_mounts_every_section() {
        let showcase = Showcase::start(cfg(BuildMode::Development)).unwrap();
        let session = showcase.new_session();
        for id in showcase.store().nav_ids() {
            assert!(session.scroller().is_mounted(id));
        }
    }

    #[test]
    fn render_without_assets_uses_placeholders() {
        let showcase = Showcase::start(cfg(BuildMode::Development)).unwrap();
        let page = showcase.render(&PageQuery::default()).unwrap();
        assert!(page.contains("no-such-asset-dir/"));
    }
}
