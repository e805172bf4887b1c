use super::{Address, Link, Opcode, Program, Stack, SymbolTable, Trace};
use crate::error;
use crate::lang::{parse, Action, Column, Context, Error, LineNumber, Lexer, Token, Visitor};
use std::collections::HashSet;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Lex, parse and generate code for a whole program.
/// Scalars are declared into `symbols` as they are compiled.
pub fn compile(source: &str, symbols: &mut SymbolTable, trace: &mut dyn Trace) -> Result<Program> {
    let tokens = Lexer::new(source, &mut *trace).tokenize()?;
    compile_tokens(&tokens, symbols, trace)
}

pub fn compile_tokens(
    tokens: &[Token],
    symbols: &mut SymbolTable,
    trace: &mut dyn Trace,
) -> Result<Program> {
    let mut generator = Generator::new(symbols, trace);
    parse(tokens, &mut generator)?;
    generator.finish()
}

type Name = (Rc<str>, LineNumber, Column);

/// The array most recently allocated, waiting for its initializers.
#[derive(Debug)]
struct ArrayHandle {
    name: Rc<str>,
    initializers: Option<usize>,
}

/// ## Code generator
///
/// Receives semantic actions from the parser and emits instructions
/// in postfix order. Declarations and uses are checked here so a bad
/// name never reaches the machine.

pub struct Generator<'a> {
    symbols: &'a mut SymbolTable,
    trace: &'a mut dyn Trace,
    arrays: HashSet<Rc<str>>,
    program: Program,
    link: Link,
    names: Stack<Name>,
    compares: Stack<Opcode>,
    array: Option<ArrayHandle>,
    position: (LineNumber, Column),
}

impl<'a> Generator<'a> {
    pub fn new(symbols: &'a mut SymbolTable, trace: &'a mut dyn Trace) -> Generator<'a> {
        Generator {
            symbols,
            trace,
            arrays: HashSet::new(),
            program: Program::new(),
            link: Link::new(),
            names: Stack::new("TOO MANY NAMES"),
            compares: Stack::new("TOO MANY COMPARISONS"),
            array: None,
            position: (1, 1),
        }
    }

    pub fn finish(self) -> Result<Program> {
        if !self.names.is_empty() || !self.compares.is_empty() || self.array.is_some() {
            return Err(error!(IncompleteStatement));
        }
        self.link.finish(&self.program)?;
        Ok(self.program)
    }

    fn emit(&mut self, op: Opcode) -> Address {
        let (line, column) = self.position;
        let addr = self.program.push(op, line, column);
        if let Some(op) = self.program.op(addr) {
            self.trace.emit(addr, op);
        }
        addr
    }

    fn is_scalar(&self, name: &str) -> bool {
        self.symbols.is_scalar(name) && !self.arrays.contains(name)
    }

    fn is_array(&self, name: &str) -> bool {
        self.arrays.contains(name) || self.symbols.is_array(name)
    }

    fn ident(context: &Context) -> Result<Name> {
        match context.ident {
            Some(t) => Ok((Rc::from(t.lexeme.as_str()), t.line, t.column)),
            None => Err(error!(UnexpectedToken; "expected IDENTIFIER")),
        }
    }

    fn declare(&mut self, context: &Context) -> Result<()> {
        let (name, line, column) = Generator::ident(context)?;
        if self.symbols.exists(&name) || self.arrays.contains(&name) {
            return Err(error!(Redeclaration, line, column; format!("'{}'", name)));
        }
        self.names.push((name, line, column))
    }

    fn use_name(&mut self, context: &Context) -> Result<()> {
        let (name, line, column) = Generator::ident(context)?;
        if !self.is_scalar(&name) && !self.is_array(&name) {
            return Err(error!(UndeclaredIdentifier, line, column; format!("'{}'", name)));
        }
        self.names.push((name, line, column))
    }

    fn pop_scalar(&mut self) -> Result<Rc<str>> {
        let (name, line, column) = self.names.pop()?;
        if !self.is_scalar(&name) {
            return Err(error!(NotAScalar, line, column; format!("'{}'", name)));
        }
        Ok(name)
    }

    fn pop_array(&mut self) -> Result<Rc<str>> {
        let (name, line, column) = self.names.pop()?;
        if !self.is_array(&name) {
            return Err(error!(NotAnArray, line, column; format!("'{}'", name)));
        }
        Ok(name)
    }

    fn literal(context: &Context) -> Result<i32> {
        let token = match context.number {
            Some(t) => t,
            None => return Err(error!(UnexpectedToken; "expected NUMBER")),
        };
        match token.lexeme.parse::<i32>() {
            Ok(n) => Ok(n),
            Err(_) => Err(error!(LiteralOutOfRange, token.line, token.column;
                token.lexeme.clone())),
        }
    }

    fn array_handle(&mut self) -> Result<&mut ArrayHandle> {
        match self.array.as_mut() {
            Some(handle) => Ok(handle),
            None => Err(error!(ArrayCoupling)),
        }
    }

    fn begin_branch(&mut self) -> Result<()> {
        let addr = self.emit(Opcode::IfNot(None));
        self.link.push_label(addr)
    }

    fn resolve_here(&mut self) -> Result<()> {
        let label = self.link.pop_label()?;
        let target = self.program.len();
        self.link.resolve(label, target, &mut self.program)
    }
}

impl<'a> Visitor for Generator<'a> {
    fn visit_action(&mut self, action: Action, context: &Context) -> Result<()> {
        if let Some(t) = context.last {
            self.position = (t.line, t.column);
        }
        match action {
            Action::Declare => self.declare(context)?,
            Action::DeclareScalar => {
                let (name, ..) = self.names.pop()?;
                self.symbols.declare_scalar(&name, 0)?;
            }
            Action::DeclareInit => {
                let (name, ..) = self.names.pop()?;
                self.symbols.declare_scalar(&name, 0)?;
                self.emit(Opcode::Pop(name));
            }
            Action::Allocate => {
                let (name, ..) = self.names.pop()?;
                self.arrays.insert(name.clone());
                self.emit(Opcode::DimArr(name.clone()));
                self.array = Some(ArrayHandle {
                    name,
                    initializers: None,
                });
            }
            Action::BeginInit => self.array_handle()?.initializers = Some(0),
            Action::InitItem => match &mut self.array_handle()?.initializers {
                Some(count) => *count += 1,
                None => return Err(error!(ArrayCoupling; "initializer outside list")),
            },
            Action::FinishArray => match self.array.take() {
                Some(ArrayHandle {
                    name,
                    initializers: Some(count),
                }) => {
                    self.emit(Opcode::InitArr(name, count));
                }
                Some(_) => {}
                None => return Err(error!(ArrayCoupling)),
            },
            Action::Use => self.use_name(context)?,
            Action::PushVar => {
                let name = self.pop_scalar()?;
                self.emit(Opcode::Push(name));
            }
            Action::PushLiteral => {
                let n = Generator::literal(context)?;
                self.emit(Opcode::Literal(n));
            }
            Action::LoadElement => {
                let name = self.pop_array()?;
                self.emit(Opcode::PushArr(name));
            }
            Action::Assign => {
                let name = self.pop_scalar()?;
                self.emit(Opcode::Pop(name));
            }
            Action::StoreElement => {
                let name = self.pop_array()?;
                self.emit(Opcode::PopArr(name));
            }
            Action::ReadScalar => {
                let name = self.pop_scalar()?;
                self.emit(Opcode::Read(name));
            }
            Action::ReadElement => {
                let name = self.pop_array()?;
                self.emit(Opcode::ReadArr(name));
            }
            Action::Print => {
                self.emit(Opcode::Print);
            }
            Action::Branch => self.begin_branch()?,
            Action::Else => {
                let label = self.link.pop_label()?;
                let addr = self.emit(Opcode::Jump(None));
                self.link.push_label(addr)?;
                let target = self.program.len();
                self.link.resolve(label, target, &mut self.program)?;
            }
            Action::EndIf => self.resolve_here()?,
            Action::While => {
                let start = self.program.len();
                self.link.push_loop(start)?;
            }
            Action::EndWhile => {
                let label = self.link.pop_label()?;
                let start = self.link.pop_loop()?;
                self.emit(Opcode::Jump(Some(start)));
                let target = self.program.len();
                self.link.resolve(label, target, &mut self.program)?;
            }
            Action::Add => {
                self.emit(Opcode::Add);
            }
            Action::Sub => {
                self.emit(Opcode::Sub);
            }
            Action::Mul => {
                self.emit(Opcode::Mul);
            }
            Action::Div => {
                self.emit(Opcode::Div);
            }
            Action::Neg => {
                self.emit(Opcode::Neg);
            }
            Action::CompareGt => self.compares.push(Opcode::Gt)?,
            Action::CompareLt => self.compares.push(Opcode::Lt)?,
            Action::CompareEq => self.compares.push(Opcode::Eq)?,
            Action::GenCompare => match self.compares.pop() {
                Ok(op) => {
                    self.emit(op);
                }
                Err(_) => return Err(error!(MissingComparison)),
            },
            Action::And => {
                self.emit(Opcode::And);
            }
            Action::Or => {
                self.emit(Opcode::Or);
            }
            Action::Not => {
                self.emit(Opcode::Not);
            }
        }
        Ok(())
    }
}
