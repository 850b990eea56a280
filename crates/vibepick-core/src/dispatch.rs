#![forbid(unsafe_code)]

//! Winner dispatch: turn a winning name into a process replacement.
//!
//! The winner string is split shell-style, validated against PATH and then
//! exec'd in place of the current process. On Unix a successful dispatch
//! never returns; every failure maps to a conventional shell exit code
//! (127 command not found, 126 permission denied, 1 anything else).
//!
//! Restoring the terminal before the exec attempt is the presentation
//! layer's job; by the time this module runs, the screen must already be
//! back to normal.

use std::io;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

use crate::participant::SPECIAL_PARTICIPANTS;

/// Editor launchers that expect a directory argument; they get an
/// implicit trailing `.` so they open the current project.
const IMPLICIT_DOT_COMMANDS: [&str; 2] = ["code", "cursor"];

/// Dispatch failures, each tied to a process exit code.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("failed to exec '{0}': {1}")]
    ExecutionFailed(String, String),
}

impl DispatchError {
    /// Conventional shell exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound(_) => 127,
            Self::PermissionDenied(_) => 126,
            Self::ExecutionFailed(..) => 1,
        }
    }
}

/// Ways a dispatch can finish without replacing the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The winner tokenized to nothing; treat as a clean exit.
    Nothing,
    /// The winner is a display-only special name; nothing was run.
    Refused,
    /// Non-Unix only: the command ran to completion with this exit code.
    Completed(i32),
}

/// Split a winner string into an argument vector.
///
/// `code` and `cursor` pick up an implicit `.` argument before splitting.
/// An unparseable line (unbalanced quote) yields an empty vector.
pub fn build_argv(winner: &str) -> Vec<String> {
    let line = if IMPLICIT_DOT_COMMANDS.contains(&winner) {
        format!("{winner} .")
    } else {
        winner.to_string()
    };
    shlex::split(&line).unwrap_or_default()
}

/// Resolve and execute `winner`, replacing the current process image.
///
/// Callers must have restored the terminal first, and should not pass
/// special participants; if one slips through it is refused rather than
/// run. On Unix, `Ok` is only ever [`Dispatched::Nothing`] or
/// [`Dispatched::Refused`] — a successful exec does not return.
pub fn dispatch(winner: &str) -> Result<Dispatched, DispatchError> {
    if SPECIAL_PARTICIPANTS.contains(&winner) {
        warn!(winner, "refusing to dispatch a special participant");
        return Ok(Dispatched::Refused);
    }

    let argv = build_argv(winner);
    let Some((cmd, args)) = argv.split_first() else {
        return Ok(Dispatched::Nothing);
    };

    if which::which(cmd).is_err() {
        return Err(DispatchError::CommandNotFound(cmd.clone()));
    }

    debug!(cmd = %cmd, ?args, "replacing process image");
    exec(cmd, args)
}

#[cfg(unix)]
fn exec(cmd: &str, args: &[String]) -> Result<Dispatched, DispatchError> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    let err = Command::new(cmd).args(args).exec();
    Err(map_os_error(cmd, &err))
}

#[cfg(not(unix))]
fn exec(cmd: &str, args: &[String]) -> Result<Dispatched, DispatchError> {
    // No execvp outside Unix: run the child to completion and report its
    // exit code so the caller can mirror it.
    let status = Command::new(cmd)
        .args(args)
        .status()
        .map_err(|err| map_os_error(cmd, &err))?;
    Ok(Dispatched::Completed(status.code().unwrap_or(1)))
}

fn map_os_error(cmd: &str, err: &io::Error) -> DispatchError {
    match err.kind() {
        // The file vanished between the PATH check and the exec.
        io::ErrorKind::NotFound => DispatchError::CommandNotFound(cmd.to_string()),
        io::ErrorKind::PermissionDenied => DispatchError::PermissionDenied(cmd.to_string()),
        _ => DispatchError::ExecutionFailed(cmd.to_string(), err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_launchers_get_an_implicit_dot() {
        assert_eq!(build_argv("code"), ["code", "."]);
        assert_eq!(build_argv("cursor"), ["cursor", "."]);
        assert_eq!(build_argv("claude"), ["claude"]);
    }

    #[test]
    fn arguments_split_shell_style() {
        assert_eq!(
            build_argv("claude --model 'sonnet latest'"),
            ["claude", "--model", "sonnet latest"]
        );
        assert!(build_argv("").is_empty());
        assert!(build_argv("   ").is_empty());
        // An unterminated quote cannot be tokenized.
        assert!(build_argv("claude 'oops").is_empty());
    }

    #[test]
    fn empty_winner_is_a_clean_no_op() {
        assert_eq!(dispatch("").unwrap(), Dispatched::Nothing);
    }

    #[test]
    fn special_names_are_refused() {
        assert_eq!(dispatch("lucky").unwrap(), Dispatched::Refused);
        assert_eq!(dispatch("handy").unwrap(), Dispatched::Refused);
    }

    #[test]
    fn unknown_command_maps_to_127() {
        let err = dispatch("vibepick-no-such-cmd-xyz").unwrap_err();
        assert!(matches!(err, DispatchError::CommandNotFound(_)));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn exit_codes_follow_shell_convention() {
        assert_eq!(
            DispatchError::CommandNotFound("x".into()).exit_code(),
            127
        );
        assert_eq!(
            DispatchError::PermissionDenied("x".into()).exit_code(),
            126
        );
        assert_eq!(
            DispatchError::ExecutionFailed("x".into(), "boom".into()).exit_code(),
            1
        );
    }

    #[test]
    fn os_error_mapping() {
        let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            map_os_error("x", &not_found),
            DispatchError::CommandNotFound(_)
        ));
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            map_os_error("x", &denied),
            DispatchError::PermissionDenied(_)
        ));
        let other = io::Error::other("weird");
        assert!(matches!(
            map_os_error("x", &other),
            DispatchError::ExecutionFailed(..)
        ));
    }
}
