use nix::unistd::chdir;

use crate::error::ShellError;
use crate::executor::{ExecOutcome, ExecStatus};

/// Commands run inside the interpreter process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    ChangeDirectory,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::ChangeDirectory),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::ChangeDirectory => "cd",
        }
    }

    /// `args` excludes the command name.
    pub fn run(self, args: &[String]) -> ExecStatus {
        match self {
            Builtin::Exit => Ok(ExecOutcome::Exit),
            Builtin::ChangeDirectory => {
                let Some(target) = args.first() else {
                    return Err(ShellError::MissingArgument(self.name()));
                };
                chdir(target.as_str()).map_err(|source| ShellError::ChangeDirectory {
                    dir: target.clone(),
                    source,
                })?;
                tracing::debug!(dir = %target, "changed directory");
                Ok(ExecOutcome::Continue)
            }
        }
    }
}
