use std::io::{self, BufRead, Write};

use nix::unistd::getcwd;

pub const DEFAULT_SUFFIX: &str = "$ ";

pub struct ShellPrompt {
    suffix: String,
}

impl ShellPrompt {
    pub fn new(suffix: impl Into<String>) -> Self {
        ShellPrompt { suffix: suffix.into() }
    }

    /// Current working directory followed by the suffix, e.g. `/home/gavin$ `.
    pub fn render(&self) -> String {
        let cwd = match getcwd() {
            Ok(dir) => dir.display().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot determine working directory");
                String::new()
            }
        };
        format!("{}{}", cwd, self.suffix)
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    /// Returns `None` at end of input. The line terminator is kept; `tokenize`
    /// strips it. Invalid UTF-8 is replaced rather than rejected.
    pub fn read_line<R: BufRead>(&self, input: &mut R) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let bytes_read = input.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

impl Default for ShellPrompt {
    fn default() -> Self {
        ShellPrompt::new(DEFAULT_SUFFIX)
    }
}
