use super::{Address, Opcode};
use crate::error;
use crate::lang::{Error, Token};
use std::collections::VecDeque;

type Result<T> = std::result::Result<T, Error>;

/// Source of integers for `read`.
pub trait Input {
    fn read_integer(&mut self) -> Result<i32>;
}

/// Sink for integers written by `print`.
pub trait Output {
    fn write_integer(&mut self, value: i32) -> Result<()>;
}

/// ## Diagnostic hooks
///
/// Each stage reports its progress to a trace sink it was handed.
/// All hooks default to doing nothing.

pub trait Trace {
    fn token(&mut self, _token: &Token) {}
    fn emit(&mut self, _addr: Address, _op: &Opcode) {}
    fn step(&mut self, _pc: Address, _op: &Opcode, _stack: &[i32]) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Trace for Silent {}

/// Input queued up front. Reading past the end is malformed input.
#[derive(Debug, Default, Clone)]
pub struct Script {
    values: VecDeque<i32>,
}

impl Script {
    pub fn new<I: IntoIterator<Item = i32>>(values: I) -> Script {
        Script {
            values: values.into_iter().collect(),
        }
    }

    /// Whitespace separated integers.
    pub fn parse(s: &str) -> Result<Script> {
        let mut values = VecDeque::new();
        for word in s.split_whitespace() {
            match word.parse::<i32>() {
                Ok(n) => values.push_back(n),
                Err(_) => return Err(error!(MalformedInput; format!("'{}'", word))),
            }
        }
        Ok(Script { values })
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Input for Script {
    fn read_integer(&mut self) -> Result<i32> {
        match self.values.pop_front() {
            Some(n) => Ok(n),
            None => Err(error!(MalformedInput; "end of input")),
        }
    }
}

impl Output for Vec<i32> {
    fn write_integer(&mut self, value: i32) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Writes one integer per line.
pub struct Printer<W: std::io::Write> {
    writer: W,
}

impl<W: std::io::Write> Printer<W> {
    pub fn new(writer: W) -> Printer<W> {
        Printer { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> Output for Printer<W> {
    fn write_integer(&mut self, value: i32) -> Result<()> {
        match writeln!(self.writer, "{}", value) {
            Ok(()) => Ok(()),
            Err(e) => Err(error!(OutputFailed; e.to_string())),
        }
    }
}
