use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "salarywise=info";

#[derive(Debug, Clone)]
pub(crate) struct AdviceConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) timeout: Duration,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_filter: String,
    pub(crate) advice: AdviceConfig,
}

impl Config {
    /// Resolve settings from the environment and create the data directory.
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match non_empty("SALARYWISE_DATA_DIR") {
            Some(dir) => PathBuf::from(crate::run::shellexpand(&dir)),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let timeout_secs = match non_empty("SALARYWISE_TIP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid SALARYWISE_TIP_TIMEOUT_SECS: {raw}"))?,
            None => DEFAULT_TIP_TIMEOUT_SECS,
        };

        Ok(Self {
            data_dir,
            log_filter: non_empty("SALARYWISE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
            advice: AdviceConfig {
                api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
                model: non_empty("SALARYWISE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("salarywise.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("salarywise.log")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "salarywise", "SalaryWise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
