pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hitter/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_LOG_PATH: &str = "failed.log";

/// Config files picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["hitter.toml", "hitter.json"];
