pub mod cmd;
pub mod config;
pub mod error;
pub mod parser;
pub mod token;
pub mod types;

#[cfg(test)]
mod util;

pub use error::{Error, ErrorCategory, ErrorKind};
pub use parser::{parse, parse_with_config};
pub use types::{TypeContext, TypeFactory, TypeId};
