use std::env;

/// Directories searched for commands, in precedence order.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPathTable {
    dirs: Vec<String>,
}

impl SearchPathTable {
    pub fn parse(value: &str) -> Self {
        SearchPathTable {
            dirs: value.split(':').filter(|d| !d.is_empty()).map(str::to_string).collect(),
        }
    }

    /// Reads `var` from the process environment. An unset (or non UTF-8)
    /// variable gives an empty table.
    pub fn from_env(var: &str) -> Self {
        match env::var(var) {
            Ok(value) => Self::parse(&value),
            Err(e) => {
                tracing::debug!(var, error = %e, "search path unavailable, using empty table");
                Self::default()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(|d| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
