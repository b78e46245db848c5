use crate::args::ConfigCommand;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use fancyclock_runtime::Config;

pub fn handle(ctx: &ExecutionContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            println!("{}", ctx.config_path().display());
            Ok(())
        }
        ConfigCommand::Show => {
            let text = match ctx.format {
                OutputFormat::Json => serde_json::to_string_pretty(ctx.config())?,
                OutputFormat::Plain => toml::to_string_pretty(ctx.config())?,
            };
            println!("{}", text.trim_end());
            Ok(())
        }
        ConfigCommand::Init { force } => {
            let path = ctx.config_path();
            if path.exists() && !force {
                bail!(
                    "config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
