use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConvertError, Result};
use crate::uigf::{check_target_version, ExportApp};

pub const DEFAULT_EXPORT_APP: &str = "PMOE-Local-Converter";
pub const DEFAULT_EXPORT_APP_VERSION: &str = "1.0.0";
pub const OVERRIDE_FILE_NAME: &str = "rank-override.json";
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const FETCH_WORKERS: usize = 6;

/// Where the conversion reads its history from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Paimon.moe local export; goes through both stages
    Paimon(PathBuf),
    /// Existing UIGF v3 file; stage 2 only
    FromV3(PathBuf),
}

impl InputMode {
    /// Exactly one of the two inputs must be given
    pub fn from_flags(paimon: Option<PathBuf>, from_v3: Option<PathBuf>) -> Result<Self> {
        match (paimon, from_v3) {
            (Some(path), None) => Ok(InputMode::Paimon(path)),
            (None, Some(path)) => Ok(InputMode::FromV3(path)),
            (Some(_), Some(_)) => Err(ConvertError::Config(
                "--paimon and --from-v3 cannot be used together".to_string(),
            )),
            (None, None) => Err(ConvertError::Config(
                "one of --paimon or --from-v3 is required".to_string(),
            )),
        }
    }
}

/// Default location of the override table: the platform config directory,
/// or the working directory when there is none
pub fn default_override_path() -> PathBuf {
    match ProjectDirs::from("", "", "pm2uigf") {
        Some(dirs) => dirs.config_dir().join(OVERRIDE_FILE_NAME),
        None => PathBuf::from(OVERRIDE_FILE_NAME),
    }
}

/// Fully resolved options for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub input: InputMode,
    pub output: PathBuf,
    pub v3_out: Option<PathBuf>,
    pub missing_rank_out: Option<PathBuf>,
    pub app: ExportApp,
    pub target_version: String,
    pub overrides_path: PathBuf,
    pub http_timeout: Duration,
    pub fetch_workers: usize,
}

impl ConvertSettings {
    pub fn new(input: InputMode, output: PathBuf) -> Self {
        Self {
            input,
            output,
            v3_out: None,
            missing_rank_out: None,
            app: ExportApp {
                name: DEFAULT_EXPORT_APP.to_string(),
                version: DEFAULT_EXPORT_APP_VERSION.to_string(),
            },
            target_version: crate::uigf::DEFAULT_TARGET_VERSION.to_string(),
            overrides_path: default_override_path(),
            http_timeout: HTTP_TIMEOUT,
            fetch_workers: FETCH_WORKERS,
        }
    }

    /// Checks that must pass before any file or network work
    pub fn check(&self) -> Result<()> {
        check_target_version(&self.target_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mode_requires_exactly_one() {
        let a = Some(PathBuf::from("a.json"));
        let b = Some(PathBuf::from("b.json"));

        assert_eq!(
            InputMode::from_flags(a.clone(), None).unwrap(),
            InputMode::Paimon(PathBuf::from("a.json"))
        );
        assert_eq!(
            InputMode::from_flags(None, b.clone()).unwrap(),
            InputMode::FromV3(PathBuf::from("b.json"))
        );

        let both = InputMode::from_flags(a, b).unwrap_err();
        assert!(both.to_string().contains("--from-v3"));
        let neither = InputMode::from_flags(None, None).unwrap_err();
        assert!(neither.to_string().contains("--paimon"));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ConvertSettings::new(InputMode::Paimon("in.json".into()), "out.json".into());
        assert_eq!(settings.app.name, "PMOE-Local-Converter");
        assert_eq!(settings.target_version, "v4.1");
        assert_eq!(settings.fetch_workers, 6);
        assert!(settings.overrides_path.ends_with(OVERRIDE_FILE_NAME));
        assert!(settings.check().is_ok());
    }
}
