use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Use `value` when given, otherwise ask for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt_string(prompt, None),
    }
}

/// Masked password entry
pub fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", prompt))
        .map_err(|e| eyre!("Failed to read password: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}
