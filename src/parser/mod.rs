mod ids;
mod parser;

pub use parser::{parse, parse_with_config};


#[cfg(test)]
mod parser_test;
