//! Startup invariant checks over the compiled-in dataset.
//!
//! A violation here means the build artifact is corrupt. It is reported to the developer and halts
//! startup; it is never surfaced to end users. Production builds skip the checks entirely.
//!
//! Checks run in a fixed order and the first violation is returned:
//! 1. navigation ids are pairwise unique
//! 2. case ids are pairwise unique
//! 3. every case has a title, profile, care plan and structured order, and its safety
//!    constraints are a sequence of `{ rule, examples, note }` records
//! 4. presentation labels are non-empty

use crate::config::ShowcaseConfig;
use crate::dataset::{is_blank, DatasetStore, SafetyConstraint};
use crate::ShowcaseResult;
use serde::Deserialize;
use showcase_types::NonEmptyText;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("duplicate navigation item id '{id}'")]
    DuplicateNavId { id: String },
    #[error("duplicate case id '{id}'")]
    DuplicateCaseId { id: String },
    #[error("case '{case_id}' is missing required field '{field}'")]
    MissingField { case_id: String, field: &'static str },
    #[error("case '{case_id}' field '{field}' must be a sequence")]
    NotASequence { case_id: String, field: &'static str },
    #[error("case '{case_id}' safety constraint #{index} is malformed: {reason}")]
    MalformedSafetyConstraint {
        case_id: String,
        index: usize,
        reason: String,
    },
    #[error("presentation label '{label}' is empty")]
    EmptyLabel { label: String },
}

/// What happened to the startup checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Skipped,
}

/// Runs every check against `store` and the presentation `labels` (`(name, text)` pairs).
pub fn check_dataset<N: AsRef<str>>(
    store: &DatasetStore,
    labels: &[(N, &str)],
) -> Result<(), IntegrityError> {
    check_unique_nav_ids(store)?;
    check_unique_case_ids(store)?;
    check_case_fields(store)?;
    check_labels(store, labels)?;
    Ok(())
}

/// Runs [`check_dataset`] unless the configuration is a production build.
///
/// # Errors
///
/// Returns `ShowcaseError::Integrity` naming the offending record and rule.
pub fn run_startup_checks<N: AsRef<str>>(
    cfg: &ShowcaseConfig,
    store: &DatasetStore,
    labels: &[(N, &str)],
) -> ShowcaseResult<CheckOutcome> {
    if cfg.is_production() {
        tracing::debug!("production build: skipping dataset invariant checks");
        return Ok(CheckOutcome::Skipped);
    }

    if let Err(e) = check_dataset(store, labels) {
        tracing::error!("dataset invariant violated: {}", e);
        return Err(e.into());
    }

    tracing::info!(
        "dataset invariants hold ({} sections, {} cases)",
        store.nav_items().len(),
        store.cases().len()
    );
    Ok(CheckOutcome::Passed)
}

fn check_unique_nav_ids(store: &DatasetStore) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    for id in store.nav_ids() {
        if !seen.insert(id) {
            return Err(IntegrityError::DuplicateNavId { id: id.to_string() });
        }
    }
    Ok(())
}

fn check_unique_case_ids(store: &DatasetStore) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    for id in store.case_ids() {
        if !seen.insert(id) {
            return Err(IntegrityError::DuplicateCaseId { id: id.to_string() });
        }
    }
    Ok(())
}

fn check_case_fields(store: &DatasetStore) -> Result<(), IntegrityError> {
    for case in store.cases() {
        let missing = |field| IntegrityError::MissingField {
            case_id: case.id.clone(),
            field,
        };

        if case.title.trim().is_empty() {
            return Err(missing("title"));
        }
        if is_blank(&case.profile) {
            return Err(missing("profile"));
        }
        if is_blank(&case.output) {
            return Err(missing("output"));
        }
        if is_blank(&case.structured_order) {
            return Err(missing("structured_order"));
        }

        let Some(entries) = case.safety_constraints.as_array() else {
            return Err(IntegrityError::NotASequence {
                case_id: case.id.clone(),
                field: "safety_constraints",
            });
        };
        for (index, entry) in entries.iter().enumerate() {
            SafetyConstraint::deserialize(entry).map_err(|e| {
                IntegrityError::MalformedSafetyConstraint {
                    case_id: case.id.clone(),
                    index,
                    reason: e.to_string(),
                }
            })?;
        }
    }
    Ok(())
}

fn check_labels<N: AsRef<str>>(
    store: &DatasetStore,
    labels: &[(N, &str)],
) -> Result<(), IntegrityError> {
    for (name, text) in labels {
        NonEmptyText::new(text).map_err(|_| IntegrityError::EmptyLabel {
            label: name.as_ref().to_string(),
        })?;
    }
    for item in store.nav_items() {
        NonEmptyText::new(&item.label).map_err(|_| IntegrityError::EmptyLabel {
            label: format!("nav:{}", item.id),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildMode;
    use crate::dataset::tests::{case, nav, sample_store};
    use crate::ShowcaseError;
    use serde_json::json;
    use std::path::PathBuf;

    const LABELS: &[(&str, &str)] = &[("hero.title", "Nutrition showcase")];

    fn dev() -> ShowcaseConfig {
        ShowcaseConfig::new(BuildMode::Development, PathBuf::from("assets"))
    }

    fn prod() -> ShowcaseConfig {
        ShowcaseConfig::new(BuildMode::Production, PathBuf::from("assets"))
    }

    #[test]
    fn builtin_dataset_and_copy_pass() {
        let store = DatasetStore::builtin().expect("builtin");
        let labels = crate::render::copy::required_labels();
        assert_eq!(check_dataset(&store, &labels), Ok(()));
    }

    #[test]
    fn sample_store_passes() {
        assert_eq!(check_dataset(&sample_store(), LABELS), Ok(()));
    }

    #[test]
    fn duplicate_nav_id_is_reported() {
        let store = DatasetStore::new(
            vec![nav("overview", "A"), nav("overview", "B")],
            vec![case("case-1")],
        )
        .unwrap();
        assert_eq!(
            check_dataset(&store, LABELS),
            Err(IntegrityError::DuplicateNavId {
                id: "overview".into()
            })
        );
    }

    #[test]
    fn duplicate_case_id_fails_startup_in_development() {
        let store = DatasetStore::new(
            vec![nav("overview", "Overview")],
            vec![case("case-1"), case("case-1")],
        )
        .unwrap();

        let err = run_startup_checks(&dev(), &store, LABELS).expect_err("should halt");
        match err {
            ShowcaseError::Integrity(IntegrityError::DuplicateCaseId { id }) => {
                assert_eq!(id, "case-1");
            }
            other => panic!("expected DuplicateCaseId, got {other:?}"),
        }
        assert!(err_message(&dev(), &store).contains("case-1"));
    }

    fn err_message(cfg: &ShowcaseConfig, store: &DatasetStore) -> String {
        run_startup_checks(cfg, store, LABELS)
            .expect_err("should fail")
            .to_string()
    }

    #[test]
    fn production_skips_checks() {
        let store = DatasetStore::new(
            vec![nav("overview", "Overview")],
            vec![case("case-1"), case("case-1")],
        )
        .unwrap();
        assert_eq!(
            run_startup_checks(&prod(), &store, LABELS).unwrap(),
            CheckOutcome::Skipped
        );
    }

    #[test]
    fn valid_store_passes_in_development() {
        assert_eq!(
            run_startup_checks(&dev(), &sample_store(), LABELS).unwrap(),
            CheckOutcome::Passed
        );
    }

    #[test]
    fn nav_ids_are_checked_before_case_ids() {
        let store = DatasetStore::new(
            vec![nav("a", "A"), nav("a", "A")],
            vec![case("case-1"), case("case-1")],
        )
        .unwrap();
        assert!(matches!(
            check_dataset(&store, LABELS),
            Err(IntegrityError::DuplicateNavId { .. })
        ));
    }

    #[test]
    fn blank_required_fields_are_named() {
        for (field, blank) in [
            ("title", {
                let mut c = case("case-2");
                c.title = "  ".into();
                c
            }),
            ("profile", {
                let mut c = case("case-2");
                c.profile = json!({});
                c
            }),
            ("output", {
                let mut c = case("case-2");
                c.output = json!(null);
                c
            }),
            ("structured_order", {
                let mut c = case("case-2");
                c.structured_order = json!({});
                c
            }),
        ] {
            let store =
                DatasetStore::new(vec![nav("o", "O")], vec![case("case-1"), blank]).unwrap();
            assert_eq!(
                check_dataset(&store, LABELS),
                Err(IntegrityError::MissingField {
                    case_id: "case-2".into(),
                    field
                })
            );
        }
    }

    #[test]
    fn safety_constraints_must_be_a_sequence() {
        for bad in [json!(null), json!({ "rule": "x" }), json!("none")] {
            let mut c = case("case-1");
            c.safety_constraints = bad;
            let store = DatasetStore::new(vec![nav("o", "O")], vec![c]).unwrap();
            assert_eq!(
                check_dataset(&store, LABELS),
                Err(IntegrityError::NotASequence {
                    case_id: "case-1".into(),
                    field: "safety_constraints"
                })
            );
        }
    }

    #[test]
    fn empty_safety_constraints_are_valid() {
        let mut c = case("case-1");
        c.safety_constraints = json!([]);
        let store = DatasetStore::new(vec![nav("o", "O")], vec![c]).unwrap();
        assert_eq!(check_dataset(&store, LABELS), Ok(()));
    }

    #[test]
    fn malformed_safety_constraint_names_index() {
        let mut c = case("case-1");
        c.safety_constraints = json!([{ "rule": "ok" }, { "note": "no rule" }]);
        let store = DatasetStore::new(vec![nav("o", "O")], vec![c]).unwrap();
        assert!(matches!(
            check_dataset(&store, LABELS),
            Err(IntegrityError::MalformedSafetyConstraint { case_id, index: 1, .. }) if case_id == "case-1"
        ));
    }

    #[test]
    fn empty_labels_are_reported() {
        let labels: &[(&str, &str)] = &[("hero.title", "ok"), ("cta.paper", " ")];
        assert_eq!(
            check_dataset(&sample_store(), labels),
            Err(IntegrityError::EmptyLabel {
                label: "cta.paper".into()
            })
        );

        let store = DatasetStore::new(vec![nav("team", "")], vec![case("case-1")]).unwrap();
        assert_eq!(
            check_dataset(&store, LABELS),
            Err(IntegrityError::EmptyLabel {
                label: "nav:team".into()
            })
        );
    }

    #[test]
    fn empty_tooltip_detail_is_named_separately_from_its_label() {
        let labels = vec![
            ("tooltip.adime.label".to_string(), "ADIME"),
            ("tooltip.adime.detail".to_string(), ""),
        ];
        let err = check_dataset(&sample_store(), &labels).expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "presentation label 'tooltip.adime.detail' is empty"
        );
    }
}
