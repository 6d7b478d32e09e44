use std::error::Error as StdError;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// None of the platform clipboard commands could be started.
    Unavailable,
    /// A clipboard command started but did not exit successfully.
    CommandFailed(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable => write!(
                f,
                "No clipboard command found (install wl-copy, xclip, or xsel)"
            ),
            ClipboardError::CommandFailed(cmd) => write!(f, "Clipboard command `{cmd}` failed"),
        }
    }
}

impl StdError for ClipboardError {}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into the first clipboard command that accepts it.
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("cmd", &["/C", "clip"])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_failure = ClipboardError::Unavailable;
        for (cmd, args) in CANDIDATES {
            match run_with_stdin(cmd, args, text) {
                Ok(()) => return Ok(()),
                Err(err @ ClipboardError::CommandFailed(_)) => last_failure = err,
                Err(ClipboardError::Unavailable) => {}
            }
        }
        Err(last_failure)
    }
}

fn run_with_stdin(cmd: &str, args: &[&str], input: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| ClipboardError::Unavailable)?;

    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    match child.wait() {
        Ok(status) if status.success() => Ok(()),
        _ => Err(ClipboardError::CommandFailed(cmd.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_is_unavailable() {
        assert_eq!(
            run_with_stdin("gemchat-no-such-clipboard-tool", &[], "x"),
            Err(ClipboardError::Unavailable)
        );
    }

    #[test]
    fn error_messages_name_the_command() {
        let err = ClipboardError::CommandFailed("xclip".into());
        assert_eq!(err.to_string(), "Clipboard command `xclip` failed");
    }
}
