//! User input utilities for interactive command-line prompts.
//!
//! Prompts are written to stderr through `console::Term` so stdout carries
//! only command output.

use anyhow::{Context, Result};
use console::Term;

/// Prompts the user for a string input, trimmed.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
pub fn prompt_string(prompt: &str) -> Result<String> {
    let term = Term::stderr();
    write_prompt(&term, &format!("{prompt}: "))?;
    let line = term.read_line().context("Failed to read user input")?;
    Ok(line.trim().to_string())
}

/// Prompts for a password without echoing it. Empty answers are rejected.
pub fn prompt_password(prompt: &str) -> Result<String> {
    let term = Term::stderr();
    write_prompt(&term, &format!("{prompt}: "))?;
    let password = term
        .read_secure_line()
        .context("Failed to read password")?;
    validate_password(password)
}

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive). Empty input is 'no'.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    let answer = prompt_string(&format!("{prompt} [y/N]"))?;
    Ok(is_yes(&answer))
}

fn write_prompt(term: &Term, prompt: &str) -> Result<()> {
    term.write_str(prompt).context("Failed to write prompt")?;
    term.flush().context("Failed to write prompt")
}

fn validate_password(password: String) -> Result<String> {
    if password.is_empty() {
        anyhow::bail!("A password is required");
    }
    Ok(password)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(validate_password(String::new()).is_err());
        assert_eq!(validate_password(" pw ".to_string()).unwrap(), " pw ");
    }
}
