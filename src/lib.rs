pub mod config;
pub mod error;
pub mod executor;
pub mod prompt;
pub mod repl;
pub mod search_path;
pub mod tokenizer;
