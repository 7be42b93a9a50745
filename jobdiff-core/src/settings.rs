//! Clap-free settings for the report pipeline.

use camino::Utf8PathBuf;
use jobdiff_render::DEFAULT_TITLE;
use jobdiff_types::BodyStyle;
pub use jobdiff_types::summary::CompareMode;

/// Subdirectory of the config root holding the baseline job documents.
pub const BASE_DIR: &str = "base";
/// Subdirectory of the config root holding the candidate job documents.
pub const DIFF_DIR: &str = "diff";

#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Directory containing `base/` and/or `diff/`.
    pub config_root: Utf8PathBuf,
    pub html_out: Utf8PathBuf,
    pub summary_out: Option<Utf8PathBuf>,

    // Comparison
    pub mode: CompareMode,
    pub ignore_whitespace: bool,
    pub style: BodyStyle,

    // Loading
    /// File-name globs applied by [`FsJobSource::from_settings`](crate::adapters::FsJobSource::from_settings).
    pub include: Vec<String>,

    // Rendering
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            config_root: Utf8PathBuf::from("."),
            html_out: Utf8PathBuf::from("config_visualizer.html"),
            summary_out: None,
            mode: CompareMode::default(),
            ignore_whitespace: false,
            style: BodyStyle::default(),
            include: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
