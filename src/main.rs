//! # intlang
//!
//! Compile and run a program from a source file.

mod term;

fn main() {
    term::main()
}
