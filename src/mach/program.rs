use super::{Address, Opcode};
use crate::lang::{Column, LineNumber};

/// ## Resolved instruction list
///
/// An instruction's index is its address. Each instruction remembers
/// the source position it was generated from so runtime errors can
/// point back into the source.

#[derive(Debug, Default, Clone)]
pub struct Program {
    ops: Vec<Opcode>,
    positions: Vec<(LineNumber, Column)>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }
    pub fn push(&mut self, op: Opcode, line: LineNumber, column: Column) -> Address {
        self.ops.push(op);
        self.positions.push((line, column));
        self.ops.len() - 1
    }
    pub fn len(&self) -> usize {
        self.ops.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
    pub fn op(&self, addr: Address) -> Option<&Opcode> {
        self.ops.get(addr)
    }
    pub fn op_mut(&mut self, addr: Address) -> Option<&mut Opcode> {
        self.ops.get_mut(addr)
    }
    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }
    pub fn position(&self, addr: Address) -> Option<(LineNumber, Column)> {
        self.positions.get(addr).copied()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, op) in self.ops.iter().enumerate() {
            writeln!(f, "{}: {}", addr, op)?;
        }
        Ok(())
    }
}
