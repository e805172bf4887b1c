use super::{Address, Opcode, Program, Stack};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// A branch instruction waiting for its target.
/// Resolving consumes it, so each label is resolved at most once.
#[must_use]
#[derive(Debug, PartialEq)]
pub struct Label(Address);

impl Label {
    pub fn addr(&self) -> Address {
        self.0
    }
}

/// ## Backpatching of forward jumps
///
/// Pending labels nest the same way the `if` and `while` statements
/// that create them do.

#[derive(Debug)]
pub struct Link {
    labels: Stack<Address>,
    loops: Stack<Address>,
    unresolved: usize,
}

impl Default for Link {
    fn default() -> Link {
        Link {
            labels: Stack::new("LABEL STACK FULL"),
            loops: Stack::new("LOOP STACK FULL"),
            unresolved: 0,
        }
    }
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.loops.clear();
        self.unresolved = 0;
    }

    /// Remember the branch at `addr` until its target is known.
    pub fn push_label(&mut self, addr: Address) -> Result<()> {
        self.labels.push(addr)?;
        self.unresolved += 1;
        Ok(())
    }

    pub fn pop_label(&mut self) -> Result<Label> {
        match self.labels.pop() {
            Ok(addr) => Ok(Label(addr)),
            Err(_) => Err(error!(LabelUnderflow)),
        }
    }

    pub fn push_loop(&mut self, addr: Address) -> Result<()> {
        self.loops.push(addr)
    }

    pub fn pop_loop(&mut self) -> Result<Address> {
        match self.loops.pop() {
            Ok(addr) => Ok(addr),
            Err(_) => Err(error!(LabelUnderflow; "no loop start")),
        }
    }

    pub fn resolve(&mut self, label: Label, target: Address, program: &mut Program) -> Result<()> {
        let new_op = match program.op(label.0) {
            Some(Opcode::IfNot(None)) => Opcode::IfNot(Some(target)),
            Some(Opcode::Jump(None)) => Opcode::Jump(Some(target)),
            _ => {
                return Err(error!(InvalidJump;
                    format!("no pending branch at {}", label.0)))
            }
        };
        if let Some(op) = program.op_mut(label.0) {
            *op = new_op;
        }
        self.unresolved -= 1;
        Ok(())
    }

    /// Every label resolved and every branch of `program` in range.
    pub fn finish(&self, program: &Program) -> Result<()> {
        if !self.labels.is_empty() || !self.loops.is_empty() || self.unresolved != 0 {
            return Err(error!(LabelUnderflow; "unresolved label"));
        }
        for (addr, op) in program.ops().iter().enumerate() {
            match op.target() {
                Some(Some(target)) if target <= program.len() => {}
                Some(_) => {
                    return Err(error!(InvalidJump;
                        format!("{} at {}", op, addr)))
                }
                None => {}
            }
        }
        Ok(())
    }
}
