//! Model constants and default locations.

// ---------------------------------------------------------------------------
// Viral growth model
// ---------------------------------------------------------------------------

/// Length of one creator generation. Growth compounds once per cycle.
pub const GENERATION_CYCLE_HOURS: f64 = 24.0;

/// Reproduction rates within this distance of 1.0 use the linear
/// `cycles + 1` branch of the geometric sum instead of the closed form.
pub const UNIT_GROWTH_EPSILON: f64 = 1e-9;

/// Default +/- perturbation applied to R0 for the low and high scenarios.
pub const DEFAULT_SENSITIVITY: f64 = 0.2;

// ---------------------------------------------------------------------------
// Launch budget
// ---------------------------------------------------------------------------

/// Contingency multiplier on the total budget in the low scenario.
pub const BUDGET_MULTIPLIER_LOW: f64 = 1.0;
/// Contingency multiplier on the total budget in the base scenario.
pub const BUDGET_MULTIPLIER_BASE: f64 = 1.2;
/// Contingency multiplier on the total budget in the high scenario.
pub const BUDGET_MULTIPLIER_HIGH: f64 = 1.5;

/// Decimal places kept for monetary report values.
pub const MONEY_DECIMALS: u32 = 2;

// ---------------------------------------------------------------------------
// Strategy metrics
// ---------------------------------------------------------------------------

/// Top of the 0..=5 scale used by buyer-utility and canvas scores.
pub const SCORE_SCALE_MAX: f64 = 5.0;

/// Canvas scores at or above this count toward the focus score.
pub const HIGH_SCORE_THRESHOLD: f64 = 4.0;

/// Buyer-utility scores at or below this are gaps unless overridden.
pub const DEFAULT_UTILITY_GAP_THRESHOLD: i64 = 2;

/// Number of gaps listed in a buyer-utility report.
pub const MAX_REPORTED_UTILITY_GAPS: usize = 10;

/// Longest tagline (in words) the canvas will pick.
pub const MAX_TAGLINE_WORDS: usize = 8;

/// Canvas profile treated as our own offering unless overridden.
pub const DEFAULT_FOCAL_PROFILE: &str = "pyjam";

/// Value innovation index weight on buyer utility gain.
pub const DEFAULT_WEIGHT_UTILITY_GAIN: f64 = 0.4;
/// Value innovation index weight on cost reduction.
pub const DEFAULT_WEIGHT_COST_REDUCTION: f64 = 0.2;
/// Value innovation index weight on differentiation.
pub const DEFAULT_WEIGHT_DIFFERENTIATION: f64 = 0.4;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Directory reports are written to when no settings override it.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Name of the artifact manifest inside the reports directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// `chrono` format of report dates and dated file names.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Base name of the optional settings file (`ocean.toml`, `ocean.json`, ...).
pub const SETTINGS_FILE_STEM: &str = "ocean";

/// Prefix of environment variables that override settings (`OCEAN_REPORTS_DIR`).
pub const SETTINGS_ENV_PREFIX: &str = "OCEAN";
