use super::{
    compile, Address, Input, Opcode, Operation, Output, Program, Silent, Stack, SymbolTable, Trace,
};
use crate::error;
use crate::lang::{Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

/// ## Stack machine
///
/// One compile and execute session. `enter` compiles a program into a
/// fresh symbol table, then `execute` runs it a slice at a time so the
/// host can service interrupts between slices.

pub struct Runtime {
    symbols: SymbolTable,
    program: Program,
    stack: Stack<i32>,
    pc: Address,
    trace: Box<dyn Trace>,
    interrupted: bool,
}

/// ## Events for the user interface

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Running,
    Stopped,
    Errors(Error),
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Program::new(), SymbolTable::new())
    }
}

impl Runtime {
    pub fn new(program: Program, symbols: SymbolTable) -> Runtime {
        Runtime {
            symbols,
            program,
            stack: Stack::new("OPERAND STACK OVERFLOW"),
            pc: 0,
            trace: Box::new(Silent),
            interrupted: false,
        }
    }

    pub fn set_trace(&mut self, trace: Box<dyn Trace>) {
        self.trace = trace;
    }

    /// Compile `source` as a new session. On failure nothing is left
    /// to execute.
    pub fn enter(&mut self, source: &str) -> Result<()> {
        self.symbols.clear();
        self.stack.clear();
        self.pc = 0;
        self.interrupted = false;
        match compile(source, &mut self.symbols, &mut *self.trace) {
            Ok(program) => {
                self.program = program;
                Ok(())
            }
            Err(e) => {
                self.program = Program::new();
                Err(e)
            }
        }
    }

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn stack(&self) -> &[i32] {
        self.stack.as_slice()
    }

    pub fn is_stopped(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Run until the program ends or fails.
    pub fn run(&mut self, input: &mut dyn Input, output: &mut dyn Output) -> Result<()> {
        loop {
            match self.execute(5000, input, output) {
                Event::Running => {}
                Event::Stopped => return Ok(()),
                Event::Errors(e) => return Err(e),
            }
        }
    }

    /// Execute at most `cycles` instructions.
    pub fn execute(
        &mut self,
        cycles: usize,
        input: &mut dyn Input,
        output: &mut dyn Output,
    ) -> Event {
        for _ in 0..cycles {
            if self.is_stopped() {
                return Event::Stopped;
            }
            let pc = self.pc;
            if let Err(e) = self.step(input, output) {
                self.pc = self.program.len();
                let e = match self.program.position(pc) {
                    Some((line, column)) => e.at_pc(pc).in_position(line, column),
                    None => e.at_pc(pc),
                };
                return Event::Errors(e);
            }
        }
        if self.is_stopped() {
            Event::Stopped
        } else {
            Event::Running
        }
    }

    fn jump_target(&self, target: Option<Address>) -> Result<Address> {
        match target {
            Some(addr) if addr <= self.program.len() => Ok(addr),
            Some(addr) => Err(error!(InvalidJump; addr.to_string())),
            None => Err(error!(InvalidJump; "unresolved")),
        }
    }

    fn step(&mut self, input: &mut dyn Input, output: &mut dyn Output) -> Result<()> {
        if self.interrupted {
            self.interrupted = false;
            return Err(error!(Interrupted));
        }
        let op = match self.program.op(self.pc) {
            Some(op) => op.clone(),
            None => return Err(error!(InvalidJump; self.pc.to_string())),
        };
        self.trace.step(self.pc, &op, self.stack.as_slice());
        self.pc += 1;
        match op {
            Opcode::Literal(n) => self.stack.push(n)?,
            Opcode::Push(name) => {
                let value = self.symbols.fetch(&name).map_err(operand)?;
                self.stack.push(value)?;
            }
            Opcode::Pop(name) => {
                let value = self.stack.pop()?;
                self.symbols.store(&name, value).map_err(operand)?;
            }
            Opcode::PushArr(name) => {
                let index = self.stack.pop()?;
                let value = self.symbols.fetch_array(&name, index).map_err(operand)?;
                self.stack.push(value)?;
            }
            Opcode::PopArr(name) => {
                let (index, value) = self.stack.pop_2()?;
                self.symbols
                    .store_array(&name, index, value)
                    .map_err(operand)?;
            }
            Opcode::DimArr(name) => {
                let size = self.stack.pop()?;
                self.symbols.declare_array(&name, size).map_err(|e| {
                    if e.code() == ErrorCode::Redeclaration {
                        error!(Reallocation; format!("'{}'", name))
                    } else {
                        e
                    }
                })?;
            }
            Opcode::InitArr(name, count) => {
                let values = self.stack.pop_n(count)?;
                let arr = self.symbols.array_mut(&name).map_err(operand)?;
                if count > arr.len() {
                    return Err(error!(InitializerOverflow;
                        format!("{} values for {}[{}]", count, name, arr.len())));
                }
                arr[..count].copy_from_slice(&values);
            }
            Opcode::IfNot(target) => {
                if self.stack.pop()? == 0 {
                    self.pc = self.jump_target(target)?;
                }
            }
            Opcode::Jump(target) => self.pc = self.jump_target(target)?,
            Opcode::Read(name) => {
                self.symbols.fetch(&name).map_err(operand)?;
                let value = input.read_integer()?;
                self.symbols.store(&name, value).map_err(operand)?;
            }
            Opcode::ReadArr(name) => {
                let index = self.stack.pop()?;
                self.symbols.fetch_array(&name, index).map_err(operand)?;
                let value = input.read_integer()?;
                self.symbols
                    .store_array(&name, index, value)
                    .map_err(operand)?;
            }
            Opcode::Print => {
                let value = self.stack.pop()?;
                output.write_integer(value)?;
            }
            Opcode::Neg => {
                let value = self.stack.pop()?;
                self.stack.push(Operation::negate(value)?)?;
            }
            Opcode::Not => {
                let value = self.stack.pop()?;
                self.stack.push(Operation::not(value))?;
            }
            Opcode::Mul
            | Opcode::Div
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Gt
            | Opcode::Lt
            | Opcode::Eq
            | Opcode::And
            | Opcode::Or => {
                let (lhs, rhs) = self.stack.pop_2()?;
                let value = match op {
                    Opcode::Mul => Operation::multiply(lhs, rhs)?,
                    Opcode::Div => Operation::divide(lhs, rhs)?,
                    Opcode::Add => Operation::sum(lhs, rhs)?,
                    Opcode::Sub => Operation::subtract(lhs, rhs)?,
                    Opcode::Gt => Operation::greater(lhs, rhs),
                    Opcode::Lt => Operation::less(lhs, rhs),
                    Opcode::Eq => Operation::equal(lhs, rhs),
                    Opcode::And => Operation::and(lhs, rhs),
                    _ => Operation::or(lhs, rhs),
                };
                self.stack.push(value)?;
            }
        }
        Ok(())
    }
}

/// Name lookups that fail while running mean the program and the
/// symbol table disagree.
fn operand(e: Error) -> Error {
    match e.code() {
        ErrorCode::UndeclaredIdentifier | ErrorCode::NotAScalar | ErrorCode::NotAnArray => {
            error!(InvalidOperand; format!("{}: {}", e.code(), e.detail()))
        }
        _ => e,
    }
}
