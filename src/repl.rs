use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{ExecOutcome, Executor};
use crate::prompt::ShellPrompt;
use crate::tokenizer::{tokenize, TokenLimit};

/// The read-parse-dispatch loop.
pub struct Repl<R, O, E, X> {
    input: R,
    out: O,
    err: E,
    executor: X,
    prompt: ShellPrompt,
    token_limit: TokenLimit,
    exit_message: String,
}

impl<R: BufRead, O: Write, E: Write, X: Executor> Repl<R, O, E, X> {
    pub fn new(config: &Config, executor: X, input: R, out: O, err: E) -> Self {
        Repl {
            input,
            out,
            err,
            executor,
            prompt: ShellPrompt::new(config.prompt_suffix.clone()),
            token_limit: config.token_limit,
            exit_message: config.exit_message.clone(),
        }
    }

    /// Runs until `exit` or end of input. Only fatal errors are returned.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.prompt.show_prompt(&mut self.out)?;
            let Some(line) = self.prompt.read_line(&mut self.input)? else {
                writeln!(self.out)?;
                return Ok(());
            };

            if let Some(ExecOutcome::Exit) = self.process_line(&line)? {
                writeln!(self.out, "{}", self.exit_message)?;
                return Ok(());
            }
        }
    }

    /// Tokenizes and dispatches one line. Blank lines and reported errors
    /// yield `None`.
    pub fn process_line(&mut self, line: &str) -> Result<Option<ExecOutcome>, ShellError> {
        let argv = match tokenize(line, self.token_limit) {
            Ok(argv) => argv,
            Err(e) => {
                writeln!(self.err, "{}", e)?;
                return Ok(None);
            }
        };
        if argv.is_empty() {
            return Ok(None);
        }

        match self.executor.exec(&argv) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                writeln!(self.err, "{}", e)?;
                Ok(None)
            }
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn into_parts(self) -> (O, E, X) {
        (self.out, self.err, self.executor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::MockExecutor;
    use crate::executor::ChildOutcome;
    use nix::errno::Errno;
    use crate::tokenizer::Overflow;
    use std::io::Cursor;

    fn run_script(config: &Config, script: &str) -> (String, String, MockExecutor) {
        let input = Cursor::new(script.to_string());
        let mut repl = Repl::new(config, MockExecutor::new(), input, Vec::new(), Vec::new());
        repl.run().unwrap();
        let (out, err, exec) = repl.into_parts();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap(), exec)
    }

    #[test]
    fn test_empty_lines_only_reprompt() {
        let config = Config::default();
        let (out, err, exec) = run_script(&config, "\n   \n");
        assert!(exec.dispatched.is_empty());
        assert_eq!(exec.spawned, 0);
        assert_eq!(out.matches("$ ").count(), 3);
        assert!(err.is_empty());
    }

    #[test]
    fn test_exit_stops_loop_without_spawning() {
        let config = Config::default();
        let (out, _, exec) = run_script(&config, "exit\nls\n");
        assert_eq!(exec.dispatched, vec![vec!["exit".to_string()]]);
        assert_eq!(exec.spawned, 0);
        assert!(out.ends_with("exit\n"));
    }

    #[test]
    fn test_eof_ends_with_newline() {
        let config = Config::default();
        let (out, _, exec) = run_script(&config, "ls -l\n");
        assert_eq!(exec.spawned, 1);
        assert_eq!(exec.dispatched, vec![vec!["ls".to_string(), "-l".to_string()]]);
        assert!(out.ends_with("$ \n"));
    }

    #[test]
    fn test_builtin_errors_go_to_err_stream() {
        let config = Config::default();
        let (out, err, exec) = run_script(&config, "cd\ncd /definitely/not/here\nexit\n");
        assert_eq!(exec.dispatched.len(), 3);
        assert!(err.contains("cd: missing argument\n"));
        assert!(err.contains("cd: /definitely/not/here: No such file or directory\n"));
        assert!(!out.contains("missing argument"));
    }

    #[test]
    fn test_child_outcome_is_surfaced() {
        let config = Config::default();
        let mut exec = MockExecutor::new();
        exec.status = 7;
        let mut repl = Repl::new(&config, exec, Cursor::new(String::new()), Vec::new(), Vec::new());
        assert_eq!(
            repl.process_line("false").unwrap(),
            Some(ExecOutcome::Child(ChildOutcome::Exited(7)))
        );
        assert_eq!(repl.process_line("").unwrap(), None);
        assert_eq!(repl.executor().spawned, 1);
    }

    #[test]
    fn test_too_many_arguments_reported() {
        let mut config = Config::default();
        config.token_limit = TokenLimit { max: 2, overflow: Overflow::Error };
        let (_, err, exec) = run_script(&config, "echo a b\n");
        assert!(exec.dispatched.is_empty());
        assert_eq!(err, "too many arguments: limit is 2, got 3\n");
    }

    #[test]
    fn test_custom_prompt_and_exit_message() {
        let mut config = Config::default();
        config.prompt_suffix = "% ".to_string();
        config.exit_message = "bye".to_string();
        let (out, _, _) = run_script(&config, "exit\n");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(out, format!("{}% bye\n", cwd.display()));
    }

    #[test]
    fn test_crlf_input_is_tokenized_once() {
        let config = Config::default();
        let (_, err, exec) = run_script(&config, "ls -l\r\n\r\n");
        assert_eq!(exec.dispatched, vec![vec!["ls".to_string(), "-l".to_string()]]);
        assert!(err.is_empty());
    }

    #[test]
    fn test_fork_failure_ends_loop() {
        let config = Config::default();
        let mut exec = MockExecutor::new();
        exec.fork_error = Some(Errno::EAGAIN);
        let input = Cursor::new("ls
ls
".to_string());
        let mut repl = Repl::new(&config, exec, input, Vec::new(), Vec::new());

        assert!(matches!(repl.run(), Err(ShellError::Fork(Errno::EAGAIN))));
        let (out, err, exec) = repl.into_parts();
        assert_eq!(exec.dispatched, vec![vec!["ls".to_string()]]);
        assert_eq!(exec.spawned, 0);
        assert!(err.is_empty());
        // Only the first prompt was shown.
        assert_eq!(String::from_utf8(out).unwrap().matches("$ ").count(), 1);
    }
}
