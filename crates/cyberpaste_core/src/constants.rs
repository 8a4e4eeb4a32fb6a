//! Shared constants used across Cyberpaste crates.

/// Default API port for Cyberpaste.
pub const DEFAULT_PORT: u16 = 8642;

/// Default maximum total paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Length of generated paste identifiers.
pub const ID_LENGTH: usize = 10;

/// Default interval between background expiry sweeps, in seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Expiration presets offered by the editor UI. TTL of 0 means "never".
/// Any non-negative TTL is accepted by the API; these are advisory.
pub const EXPIRATION_PRESETS: &[(u64, &str)] = &[
    (3_600, "1 Hour"),
    (86_400, "24 Hours"),
    (604_800, "1 Week"),
    (2_592_000, "1 Month"),
    (0, "Never"),
];

/// Language tags offered by the editor UI. Tabs carry free-form tags; this
/// list only drives presentation.
pub const LANGUAGES: &[&str] = &[
    "plaintext",
    "html",
    "css",
    "javascript",
    "typescript",
    "python",
    "java",
    "c",
    "cpp",
    "go",
    "rust",
    "php",
    "ruby",
    "kotlin",
    "sql",
    "markdown",
    "json",
    "yaml",
    "bash",
];

/// Display name used for unnamed tabs in raw export.
pub const RAW_TAB_FALLBACK_NAME: &str = "Pasty";
