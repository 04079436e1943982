//! Constants used throughout the showcase core crate.

/// The demonstration dataset, compiled into the binary.
pub const DATASET_YAML: &str = include_str!("../data/dataset.yaml");

/// Default directory served as the static asset collaborator.
pub const DEFAULT_ASSET_DIR: &str = "assets";

/// URL prefix under which assets are requested by the rendered page.
pub const ASSET_URL_PREFIX: &str = "/assets";

/// Anchors closer than this to the top of the viewport (in CSS pixels) show their tooltip below.
pub const TOOLTIP_FLIP_THRESHOLD_PX: f64 = 160.0;

/// Environment variable selecting the build mode (`production` or `development`).
pub const MODE_ENV_VAR: &str = "SHOWCASE_MODE";

/// Environment variable overriding the asset directory.
pub const ASSET_DIR_ENV_VAR: &str = "SHOWCASE_ASSET_DIR";
