use std::borrow::Cow;
use std::fs;

use nix::unistd::{access, AccessFlags};

use crate::search_path::SearchPathTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand<'a> {
    Found(Cow<'a, str>),
    NotFound,
}

impl<'a> ResolvedCommand<'a> {
    pub fn path(&self) -> Option<&str> {
        match self {
            ResolvedCommand::Found(p) => Some(&**p),
            ResolvedCommand::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver {
    /// Also require absolute commands to be executable files.
    pub verify_absolute: bool,
}

impl PathResolver {
    pub fn new(verify_absolute: bool) -> Self {
        PathResolver { verify_absolute }
    }

    pub fn resolve<'a>(&self, command: &'a str, table: &SearchPathTable) -> ResolvedCommand<'a> {
        if command.starts_with('/') {
            if self.verify_absolute && !is_executable(command) {
                return ResolvedCommand::NotFound;
            }
            return ResolvedCommand::Found(Cow::Borrowed(command));
        }

        for dir in table.iter() {
            let candidate = format!("{}/{}", dir.trim_end_matches('/'), command);
            if is_executable(&candidate) {
                return ResolvedCommand::Found(Cow::Owned(candidate));
            }
        }

        ResolvedCommand::NotFound
    }
}

fn is_executable(path: &str) -> bool {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && access(path, AccessFlags::X_OK).is_ok()
}
