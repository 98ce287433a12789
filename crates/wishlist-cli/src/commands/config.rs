use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Table};
use serde_json::json;
use wishlist_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, paths: &PathManager, config: Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(paths, &config, output),
        ConfigCommands::SetUrl { url } => set_url(paths, config, url, output),
    }
}

fn show_config(paths: &PathManager, config: &Config, output: &Output) -> Result<()> {
    let config_file = paths.config_file();

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "session_file": paths.session_file().display().to_string(),
            "api_base_url": config.api_base_url(),
            "discover_default_query": config.discover.default_query,
            "log_level": config.logging.level,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No configuration file at {}; showing defaults", config_file.display()));
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec!["Config file".to_string(), config_file.display().to_string()]);
    table.add_row(vec!["Session file".to_string(), paths.session_file().display().to_string()]);
    table.add_row(vec!["API base URL".to_string(), config.api_base_url()]);
    table.add_row(vec!["Discover query".to_string(), config.discover.default_query.clone()]);
    table.add_row(vec!["Log level".to_string(), config.logging.level.clone()]);
    if let Some(file) = &config.logging.file {
        table.add_row(vec!["Log file".to_string(), file.display().to_string()]);
    }
    println!("{}", table);
    Ok(())
}

fn set_url(paths: &PathManager, mut config: Config, url: String, output: &Output) -> Result<()> {
    config.api.base_url = url.trim().to_string();
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("API base URL set to {}", config.api_base_url()));
    Ok(())
}
