mod executor;
mod builtins;
mod dispatcher;
mod path_resolver;

pub use executor::{Executor, ExecStatus, ExecOutcome, ChildOutcome};
pub use builtins::Builtin;
pub use dispatcher::Dispatcher;
pub use path_resolver::{PathResolver, ResolvedCommand};
