use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Read a secret without echoing it, rejecting empty input
pub fn prompt_secret(prompt: &str) -> Result<String> {
    let value = rpassword::prompt_password(format!("{}: ", prompt))
        .map_err(|e| eyre!("Failed to read input: {}", e))?;

    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(eyre!("{} cannot be empty", prompt));
    }
    Ok(value)
}

/// Use the flag value when given, otherwise prompt for it
pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None => prompt_secret(prompt),
    }
}
