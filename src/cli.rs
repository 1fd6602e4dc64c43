mod args;

pub use args::{Cli, Command, GenerateArgs, ListArgs, ListFormat};
