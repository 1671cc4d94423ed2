//! Configuration loading.
//!
//! Sources are layered: built-in defaults, then an optional YAML file, then
//! environment variables (`BIND_ADDR`, `SITE_DOMAIN`, `DEBUG`, ...).

use std::path::Path;

use config::{Environment, File, FileFormat, Source};

use super::{Config, ConfigError};

impl Config {
    /// Load the config from the command line argument, resolving a relative
    /// path against the current directory.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = match config_file {
            Some(path) if path.is_relative() => Some(
                std::env::current_dir()
                    .map_err(ConfigError::CwdFailure)?
                    .join(path),
            ),
            Some(path) => Some(path.to_path_buf()),
            None => None,
        };

        let file = config_file
            .as_deref()
            .map(|path| File::from(path).format(FileFormat::Yaml));

        Self::load_from(file, Environment::default())
    }

    /// Layer the given file and environment sources over the defaults.
    pub(crate) fn load_from<F>(file: Option<F>, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let defaults = config::Config::try_from(&Config::default())?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder = builder.add_source(env.try_parsing(true));

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.apply_derived();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.resolve_max_concurrency == 0 {
            return Err(ConfigError::Validation(
                "resolve_max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.resolve_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "resolve_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.site_domain.is_empty() {
            return Err(ConfigError::Validation(
                "site_domain must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
