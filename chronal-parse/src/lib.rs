use lalrpop_util::lalrpop_mod;

lalrpop_mod!(pub grammar); // synthesized by LALRPOP

pub mod lexer;
pub mod parser;

#[cfg(test)]
mod test;

pub use lexer::Lexer;
pub use parser::{Input, Named, Statement, SyntaxError, parse_input, parse_program, parse_listing, parse_statement};
