/*!
# Rust Language Module

This Rust module provides lexical analysis and table-driven parsing
of the integer language.

*/

pub type LineNumber = usize;
pub type Column = usize;

#[macro_use]
mod error;
mod grammar;
mod lex;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use grammar::{Action, Grammar, NonTerminal, Rule, Symbol};
pub use lex::{lex, Lexer};
pub use parse::{parse, Context, Visitor};
pub use token::{Terminal, Token, TokenKind, Word};

#[cfg(test)]
mod tests;
