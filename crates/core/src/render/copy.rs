//! Presentation copy: fixed labels, help tooltips and image slots used by the page.

use crate::viewer::ViewMode;
use showcase_types::NonEmptyText;

pub const SITE_TITLE: &str = "NutriPlan";
pub const HERO_TAGLINE: &str =
    "Guideline-grounded clinical nutrition care plans, reviewed for safety before they reach a dietitian.";
pub const CASE_PICKER_LABEL: &str = "Choose a case";
pub const VIEW_PICKER_LABEL: &str = "View";
pub const PROFILE_HEADING: &str = "Patient profile";
pub const PLAN_HEADING: &str = "Care plan (ADIME)";
pub const EVIDENCE_HEADING: &str = "Evidence consulted";
pub const SAFETY_HEADING: &str = "Safety constraints";
pub const NO_SAFETY_CONSTRAINTS: &str = "No case-specific constraints were raised for this plan.";
pub const RECORD_UNAVAILABLE: &str = "This record could not be displayed.";
pub const PRIMARY_FOCUS_BADGE: &str = "Primary focus";
pub const PAPER_LINK_LABEL: &str = "Read the paper";
pub const VIDEO_LINK_LABEL: &str = "Watch the video";
pub const DISMISS_LABEL: &str = "Dismiss";
pub const FOOTER_NOTE: &str =
    "All cases are pre-computed research artifacts. Nothing on this page is medical advice.";

pub const EVIDENCE_GUIDELINES_LABEL: &str = "Guidelines";
pub const EVIDENCE_TOOLS_LABEL: &str = "Tools";
pub const EVIDENCE_POINTS_LABEL: &str = "Retrieved points";

/// Help anchors: `(id, anchor text, popover text)`.
pub const TOOLTIPS: [(&str, &str, &str); 4] = [
    (
        "adime",
        "ADIME",
        "Assessment, Diagnosis, Intervention, Monitoring and Evaluation: the standard structure of a nutrition care plan.",
    ),
    (
        "must",
        "MUST",
        "Malnutrition Universal Screening Tool, a five-step screen combining BMI, weight loss and acute disease effect.",
    ),
    (
        "nutrition-order",
        "NutritionOrder",
        "A structured diet order shaped like the FHIR NutritionOrder resource, ready for downstream systems.",
    ),
    (
        "retrieval",
        "guideline retrieval",
        "Passages from published clinical guidelines retrieved for the patient's conditions and cited in the plan.",
    ),
];

/// Image slots: `(section id, file name, alt text)`.
pub const IMAGES: [(&str, &str, &str); 4] = [
    (
        "overview",
        "pipeline-overview.png",
        "Pipeline overview from patient profile to reviewed care plan",
    ),
    (
        "methodology",
        "methodology-agents.png",
        "Agents and the order in which they run",
    ),
    (
        "results",
        "results-ratings.png",
        "Reviewer ratings for completeness, adherence and safety",
    ),
    ("team", "team.jpg", "The project team"),
];

/// Team roles shown in the team section.
pub const TEAM_ROLES: [(&str, &str); 4] = [
    ("Clinical dietetics", "Case authoring and plan review"),
    ("Health informatics", "Structured order mapping"),
    ("Machine learning", "Pipeline design and evaluation"),
    ("Patient safety", "Constraint review and sign-off"),
];

pub fn view_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Primary => "Care plan",
        ViewMode::Structured => "Structured order",
        ViewMode::Raw => "Raw record",
    }
}

/// Inline acknowledgement for link placeholders that have no destination yet.
pub fn link_pending_notice(target: &NonEmptyText) -> String {
    format!("The {target} link is not available yet. It will be added once the material is published.")
}

/// Every fixed label the page depends on, named for integrity reporting.
pub fn required_labels() -> Vec<(String, &'static str)> {
    let fixed = [
        ("site.title", SITE_TITLE),
        ("hero.tagline", HERO_TAGLINE),
        ("cases.picker", CASE_PICKER_LABEL),
        ("cases.view_picker", VIEW_PICKER_LABEL),
        ("cases.profile", PROFILE_HEADING),
        ("cases.plan", PLAN_HEADING),
        ("cases.evidence", EVIDENCE_HEADING),
        ("cases.safety", SAFETY_HEADING),
        ("cases.primary_focus", PRIMARY_FOCUS_BADGE),
        ("cases.record_unavailable", RECORD_UNAVAILABLE),
        ("cta.paper", PAPER_LINK_LABEL),
        ("cta.video", VIDEO_LINK_LABEL),
        ("notice.dismiss", DISMISS_LABEL),
        ("view.primary", view_label(ViewMode::Primary)),
        ("view.structured", view_label(ViewMode::Structured)),
        ("view.raw", view_label(ViewMode::Raw)),
    ];
    let mut labels: Vec<(String, &'static str)> = fixed
        .into_iter()
        .map(|(name, text)| (name.to_string(), text))
        .collect();
    for (id, label, detail) in TOOLTIPS {
        labels.push((format!("tooltip.{id}.label"), label));
        labels.push((format!("tooltip.{id}.detail"), detail));
    }
    for (_, file, alt) in IMAGES {
        labels.push((format!("image.{file}.alt"), alt));
    }
    labels
}
