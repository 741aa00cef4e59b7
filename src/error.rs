use std::io;

use nix::errno::Errno;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("{0}: missing argument")]
    MissingArgument(&'static str),

    #[error("too many arguments: limit is {limit}, got {found}")]
    TooManyArguments { limit: usize, found: usize },

    #[error("{0}: argument contains a NUL byte")]
    InvalidArgument(String),

    #[error("cd: {dir}: {}", .source.desc())]
    ChangeDirectory { dir: String, source: Errno },

    #[error("{command}: {}", .source.desc())]
    Exec { command: String, source: Errno },

    #[error("fork: {}", .0.desc())]
    Fork(Errno),

    #[error("wait: {}", .0.desc())]
    Wait(Errno),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Errors after which the interpreter cannot make progress.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Fork(_) | ShellError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ShellError::CommandNotFound("doesnotexist123".into()).to_string(),
            "doesnotexist123: command not found"
        );
        assert_eq!(ShellError::MissingArgument("cd").to_string(), "cd: missing argument");
        let err = ShellError::ChangeDirectory { dir: "/nope".into(), source: Errno::ENOENT };
        assert_eq!(err.to_string(), "cd: /nope: No such file or directory");
    }

    #[test]
    fn test_only_fork_and_io_are_fatal() {
        assert!(ShellError::Fork(Errno::EAGAIN).is_fatal());
        assert!(ShellError::Io(io::Error::other("closed")).is_fatal());
        assert!(!ShellError::Wait(Errno::ECHILD).is_fatal());
        assert!(!ShellError::CommandNotFound("x".into()).is_fatal());
        assert!(!ShellError::MissingArgument("cd").is_fatal());
    }
}
