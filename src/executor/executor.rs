use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;

use crate::error::ShellError;
use crate::tokenizer::ArgumentVector;

pub type ExecStatus = Result<ExecOutcome, ShellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// A built-in finished; keep prompting.
    Continue,
    /// The `exit` built-in ran.
    Exit,
    /// An external command was run to completion.
    Child(ChildOutcome),
}

/// How a waited-for child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Exited(i32),
    Signaled(Signal),
}

impl ChildOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ChildOutcome::Exited(0))
    }

    pub(crate) fn from_wait_status(status: WaitStatus) -> Option<ChildOutcome> {
        match status {
            WaitStatus::Exited(_, code) => Some(ChildOutcome::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(ChildOutcome::Signaled(signal)),
            _ => None,
        }
    }
}

pub trait Executor {
    fn exec(&mut self, argv: &ArgumentVector) -> ExecStatus;
}
