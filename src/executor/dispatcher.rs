use std::ffi::CString;
use std::io::{self, Write};

use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{execv, fork, ForkResult, Pid};

use super::builtins::Builtin;
use super::executor::{ChildOutcome, ExecOutcome, ExecStatus, Executor};
use super::path_resolver::{PathResolver, ResolvedCommand};
use crate::error::ShellError;
use crate::search_path::SearchPathTable;
use crate::tokenizer::ArgumentVector;

const STATUS_NOT_FOUND: i32 = 127;
const STATUS_EXEC_FAILED: i32 = 126;

/// Runs built-ins in process and everything else in a forked child.
pub struct Dispatcher<'t> {
    table: &'t SearchPathTable,
    resolver: PathResolver,
}

impl<'t> Dispatcher<'t> {
    pub fn new(table: &'t SearchPathTable, resolver: PathResolver) -> Self {
        Dispatcher { table, resolver }
    }

    fn spawn(&self, argv: &ArgumentVector) -> ExecStatus {
        let c_args = argv.to_cstrings()?;

        // Anything still buffered would otherwise be written twice.
        if let Err(e) = io::stdout().flush() {
            tracing::warn!(error = %e, "failed to flush stdout before fork");
        }

        // SAFETY: the child only resolves the command and then either
        // replaces its image or calls _exit; it never returns to the caller.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => self.run_child(argv, &c_args),
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(pid = child.as_raw(), "spawned child");
                let outcome = wait_for(child)?;
                if outcome.success() {
                    tracing::debug!(pid = child.as_raw(), "child exited successfully");
                } else {
                    tracing::debug!(pid = child.as_raw(), ?outcome, "child failed");
                }
                Ok(ExecOutcome::Child(outcome))
            }
            Err(e) => Err(ShellError::Fork(e)),
        }
    }

    fn run_child(&self, argv: &ArgumentVector, c_args: &[CString]) -> ! {
        let command = argv.command().unwrap_or_default();

        let (err, status) = match self.resolver.resolve(command, self.table) {
            ResolvedCommand::NotFound => {
                (ShellError::CommandNotFound(command.to_string()), STATUS_NOT_FOUND)
            }
            ResolvedCommand::Found(path) => {
                let source = match CString::new(path.as_bytes()) {
                    Ok(path) => match execv(&path, c_args) {
                        Ok(never) => match never {},
                        Err(e) => e,
                    },
                    Err(_) => Errno::EINVAL,
                };
                (ShellError::Exec { command: command.to_string(), source }, STATUS_EXEC_FAILED)
            }
        };

        child_report(&err);
        // SAFETY: terminates the child without running the parent's exit handlers.
        unsafe { libc::_exit(status) }
    }
}

impl Executor for Dispatcher<'_> {
    fn exec(&mut self, argv: &ArgumentVector) -> ExecStatus {
        let Some(command) = argv.command() else {
            return Ok(ExecOutcome::Continue);
        };
        tracing::debug!(command, args = ?argv.args(), "dispatch");

        match Builtin::from_name(command) {
            Some(builtin) => builtin.run(argv.args()),
            None => self.spawn(argv),
        }
    }
}

fn wait_for(child: Pid) -> Result<ChildOutcome, ShellError> {
    loop {
        match waitpid(child, None) {
            Ok(status) => {
                if let Some(outcome) = ChildOutcome::from_wait_status(status) {
                    return Ok(outcome);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::Wait(e)),
        }
    }
}

/// Writes straight to fd 2; the std stderr lock may be held by a thread
/// that no longer exists in the child.
fn child_report(err: &ShellError) {
    let line = format!("{}\n", err);
    let bytes = line.as_bytes();
    // SAFETY: `bytes` is valid for `bytes.len()` bytes.
    unsafe {
        libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}
