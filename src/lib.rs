//! # intlang
//!
//! A small imperative language over 32-bit integers.
//!
//! Source text goes through a finite automaton lexer, a table-driven
//! LL(1) parser whose semantic actions generate stack machine code,
//! and a virtual machine that runs the code against a symbol table.
//!
//! ```
//! use intlang::mach::{Runtime, Script};
//!
//! let mut runtime = Runtime::default();
//! runtime.enter("int a = 2; while (a < 5) { a = a + 1; } print(a * 2);").unwrap();
//! let mut output: Vec<i32> = vec![];
//! runtime.run(&mut Script::default(), &mut output).unwrap();
//! assert_eq!(output, vec![10]);
//! ```
//!
//! The command line tool runs a source file with `intlang FILE`.

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod _Language;

pub mod lang;
pub mod mach;
