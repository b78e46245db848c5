use crate::args::DisplayArgs;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use fancyclock_runtime::{Config, ControllerOptions, DisplayConfig};
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    config_path: PathBuf,
    config: Config,
    locale: Option<String>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn load(config_path: PathBuf, locale: Option<String>, format: OutputFormat) -> Result<Self> {
        let config = Config::load_from(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?;
        Ok(Self::new(config_path, config, locale, format))
    }

    pub fn new(
        config_path: PathBuf,
        config: Config,
        locale: Option<String>,
        format: OutputFormat,
    ) -> Self {
        Self {
            config_path,
            config,
            locale,
            format,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Display settings after applying command-line overrides to the config.
    pub fn display_config(&self, args: &DisplayArgs) -> DisplayConfig {
        let mut display = self.config.display.clone();

        if let Some(style) = args.time_style {
            display.time_style = style.into();
        }
        if let Some(style) = args.date_style {
            display.date_style = style.into();
        }
        if let Some(pattern) = &args.pattern {
            display.pattern = Some(pattern.clone());
        }
        if args.no_date {
            display.show_date = false;
        }
        if let Some(interval_ms) = args.interval_ms {
            display.interval_ms = interval_ms;
        }
        if let Some(locale) = &self.locale {
            display.locale = Some(locale.clone());
        }

        display
    }

    pub fn controller_options(&self, args: &DisplayArgs) -> Result<ControllerOptions> {
        self.display_config(args)
            .to_options()
            .context("invalid display settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StyleArg;
    use fancyclock_types::FormatStyle;
    use std::time::Duration;

    fn context_with(config: Config, locale: Option<&str>) -> ExecutionContext {
        ExecutionContext::new(
            PathBuf::from("/tmp/config.toml"),
            config,
            locale.map(str::to_string),
            OutputFormat::Plain,
        )
    }

    #[test]
    fn test_config_values_used_when_flags_absent() {
        let mut config = Config::default();
        config.display.time_style = FormatStyle::Short;
        config.display.locale = Some("de_DE".to_string());

        let ctx = context_with(config, None);
        let options = ctx.controller_options(&DisplayArgs::default()).unwrap();
        assert_eq!(options.time_style, FormatStyle::Short);
        assert_eq!(options.locale.name(), "de_DE");
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.display.time_style = FormatStyle::Short;
        config.display.locale = Some("de_DE".to_string());

        let ctx = context_with(config, Some("fr_FR"));
        let args = DisplayArgs {
            time_style: Some(StyleArg::Long),
            no_date: true,
            interval_ms: Some(500),
            ..DisplayArgs::default()
        };
        let options = ctx.controller_options(&args).unwrap();
        assert_eq!(options.time_style, FormatStyle::Long);
        assert!(!options.show_date);
        assert_eq!(options.interval, Duration::from_millis(500));
        assert_eq!(options.locale.name(), "fr_FR");
    }

    #[test]
    fn test_invalid_locale_reported() {
        let ctx = context_with(Config::default(), Some("xx_YY"));
        let err = ctx.controller_options(&DisplayArgs::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown locale: xx_YY"));
    }
}
