use std::path::PathBuf;

/// Dataset read when no path is given on the command line.
pub const DEFAULT_DATASET: &str = "data/1825.csv";

/// Startup settings for the viewer window.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub dataset_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            title: "BSKK Budget Visualization App".to_string(),
            window_size: [1600.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

impl ViewerConfig {
    /// Build from process arguments (program name already skipped). A single
    /// positional argument replaces the dataset path.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.next() {
            config.dataset_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_dataset() {
        let config = ViewerConfig::from_args(std::iter::empty());
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET));
    }

    #[test]
    fn positional_argument_overrides_path() {
        let config = ViewerConfig::from_args(["budget.parquet".to_string()].into_iter());
        assert_eq!(config.dataset_path, PathBuf::from("budget.parquet"));
        assert_eq!(config.title, ViewerConfig::default().title);
    }
}
