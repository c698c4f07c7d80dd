//! Interactive terminal input.

use std::io::{self, BufRead, Write};

use crate::credentials::SecureString;

/// Source of interactively entered secrets.
///
/// Handlers take this as a trait object so tests can inject canned
/// input instead of reading the terminal.
pub trait PasswordPrompt {
    /// Read a secret with echo disabled.
    fn read_password(&self, prompt: &str) -> io::Result<SecureString>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, prompt: &str) -> io::Result<SecureString> {
        rpassword::prompt_password(prompt).map(SecureString::new)
    }
}

/// Asks `question` until the user answers y or n, in either case.
/// Returns true for y.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut answers = stdin.lock();
    confirm_with(question, &mut answers)
}

fn confirm_with(question: &str, answers: &mut dyn BufRead) -> io::Result<bool> {
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "{question} [y/n]: ")?;
        stdout.flush()?;

        let mut answer = String::new();
        if answers.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while awaiting confirmation",
            ));
        }

        match answer.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            other => println!("'{other}' is an invalid option."),
        }
    }
}
