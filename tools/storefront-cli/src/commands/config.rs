//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Storage section
    ctx.output.info("[storage]");
    ctx.output.kv(
        "path",
        &ctx.resolve_path(&ctx.config.storage.path).display().to_string(),
    );
    ctx.output.kv("key", &ctx.config.storage.key);

    // Catalog section
    ctx.output.info("[catalog]");
    ctx.output.kv("source", &ctx.catalog_location());
    ctx.output.kv("timeout_ms", &ctx.config.catalog.timeout_ms.to_string());
    ctx.output.kv("max_retries", &ctx.config.catalog.max_retries.to_string());

    // Log section
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());
    if ctx.output.is_verbose() {
        ctx.output.debug(&ctx.config.render(std::path::Path::new(CONFIG_NAMES[0]))?);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
