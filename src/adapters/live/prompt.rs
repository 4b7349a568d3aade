//! Terminal prompt for the interactive login flow.

use std::io::{self, BufRead, Write};

use crate::ports::{CredentialPrompt, Credentials};

/// Reads credentials from stdin, prompting on stderr so stdout stays clean.
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn credentials(&self) -> Result<Credentials, Box<dyn std::error::Error + Send + Sync>> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let login = ask(&mut input, "Bugzilla username")?;
        let password = ask(&mut input, "Bugzilla password")?;
        Ok(Credentials { login, password })
    }
}

fn ask(
    input: &mut impl BufRead,
    label: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;
    read_value(input, label)
}

fn read_value(
    input: &mut impl BufRead,
    label: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(format!("{label}: no input available").into());
    }
    let value = line.trim().to_string();
    if value.is_empty() {
        return Err(format!("{label} cannot be empty").into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_trimmed_value() {
        let mut input = io::Cursor::new("  packager@example.com \n");
        assert_eq!(read_value(&mut input, "login").unwrap(), "packager@example.com");
    }

    #[test]
    fn empty_value_is_rejected() {
        let mut input = io::Cursor::new("\n");
        let err = read_value(&mut input, "Bugzilla password").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn closed_input_is_rejected() {
        let mut input = io::Cursor::new("");
        assert!(read_value(&mut input, "login").unwrap_err().to_string().contains("no input"));
    }
}
