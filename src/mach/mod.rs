/*!
## Rust Machine Module

This Rust module is a code generator and stack machine for the
integer language.

*/

pub type Address = usize;

mod codegen;
mod io;
mod link;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod symbol;

pub use codegen::{compile, compile_tokens, Generator};
pub use io::{Input, Output, Printer, Script, Silent, Trace};
pub use link::{Label, Link};
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use symbol::SymbolTable;

#[cfg(test)]
mod tests;
