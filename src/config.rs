use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::solar::{Calibration, CalibrationError, DEFAULT_HORIZON_YEARS};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 표시 언어 코드. None이면 시스템 로케일을 따른다.
    pub language: Option<String>,
    /// 회수 분석 기간 [년]
    pub horizon_years: u32,
    pub calibration: Calibration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            horizon_years: DEFAULT_HORIZON_YEARS,
            calibration: Calibration::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 보정 상수 범위 오류
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.calibration.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
