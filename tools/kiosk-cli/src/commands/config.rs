//! Configuration management commands.

use anyhow::{bail, Context as _, Result};
use kiosk_storefront::StorefrontConfig;
use serde_json::Value;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force, as_json } => init_config(force, as_json, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    println!();
    print!("{}", ctx.config.render(false)?);
    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let tree = serde_json::to_value(&ctx.config)?;
    let value = lookup(&tree, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref path) = ctx.config_path else {
        bail!("No config file found. Run `kiosk config init` to create one.");
    };

    let config = with_value(&ctx.config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(force: bool, as_json: bool, ctx: &Context) -> Result<()> {
    let name = if as_json { CONFIG_NAMES[2] } else { CONFIG_NAMES[0] };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    StorefrontConfig::default().save(&config_path)?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");
    ctx.config.validate()?;
    ctx.output.success("Configuration is valid");
    Ok(())
}

fn lookup<'a>(tree: &'a Value, key: &str) -> Result<&'a Value> {
    let pointer = format!("/{}", key.replace('.', "/"));
    tree.pointer(&pointer)
        .with_context(|| format!("Unknown config key: {}", key))
}

/// Copy of `config` with `key` set to `raw`.
///
/// `raw` is read as JSON when it parses (numbers, booleans, arrays) and as
/// a plain string otherwise. The result must still validate.
fn with_value(config: &StorefrontConfig, key: &str, raw: &str) -> Result<StorefrontConfig> {
    let mut tree = serde_json::to_value(config)?;
    let pointer = format!("/{}", key.replace('.', "/"));
    let slot = tree
        .pointer_mut(&pointer)
        .with_context(|| format!("Unknown config key: {}", key))?;
    if slot.is_object() {
        bail!("{} is a section, set one of its keys instead", key);
    }

    *slot = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    let updated: StorefrontConfig = serde_json::from_value(tree)
        .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
    updated.validate()?;
    Ok(updated)
}
