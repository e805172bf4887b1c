use super::Address;
use std::rc::Rc;

/// ## Virtual machine instruction set
///
/// The machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `x = 3 * y;` compiles to
/// `[Literal(3), Push(y), Mul, Pop(x)]`
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Clone, PartialEq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push an integer literal.
    Literal(i32),
    /// Push the value of a named scalar.
    Push(Rc<str>),
    /// Pop the stack into a named scalar.
    Pop(Rc<str>),
    /// Pop an index, push the array element.
    PushArr(Rc<str>),
    /// Pop a value then an index, store the value in the array.
    PopArr(Rc<str>),
    /// Pop a size and allocate a zeroed array.
    DimArr(Rc<str>),
    /// Pop `count` values into the first elements of the array.
    InitArr(Rc<str>, usize),

    // *** Branch control
    /// Pop stack and branch to Address if zero.
    /// None only while the target is pending.
    IfNot(Option<Address>),
    /// Unconditional branch to Address.
    Jump(Option<Address>),

    // *** Input and output
    /// Read one integer into a named scalar.
    Read(Rc<str>),
    /// Pop an index and read one integer into that array element.
    ReadArr(Rc<str>),
    /// Pop stack and write it to the output.
    Print,

    // *** Expression operations
    Neg,
    Mul,
    Div,
    Add,
    Sub,
    Gt,
    Lt,
    Eq,
    Not,
    And,
    Or,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Literal(_) | Push(_) => "",
            Pop(_) => "=",
            PushArr(_) => "array_get",
            PopArr(_) => "array_set",
            DimArr(_) => "alloc_array",
            InitArr(..) => "init_array",
            IfNot(_) => "jf",
            Jump(_) => "j",
            Read(_) => "r",
            ReadArr(_) => "array_read",
            Print => "w",
            Neg => "~",
            Mul => "*",
            Div => "/",
            Add => "+",
            Sub => "-",
            Gt => ">",
            Lt => "<",
            Eq => "==",
            Not => "!",
            And => "&",
            Or => "|",
        }
    }

    pub fn operand(&self) -> Option<String> {
        use Opcode::*;
        match self {
            Literal(n) => Some(n.to_string()),
            Push(s) | Pop(s) | PushArr(s) | PopArr(s) | DimArr(s) | Read(s) | ReadArr(s) => {
                Some(s.to_string())
            }
            InitArr(s, count) => Some(format!("{} {}", count, s)),
            IfNot(a) | Jump(a) => Some(a.map(|a| a.to_string()).unwrap_or_default()),
            _ => None,
        }
    }

    /// Jump target, if this is a branch instruction.
    pub fn target(&self) -> Option<Option<Address>> {
        match self {
            Opcode::IfNot(a) | Opcode::Jump(a) => Some(*a),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.mnemonic(), self.operand()) {
            ("", Some(operand)) => write!(f, "{}", operand),
            (mnemonic, Some(operand)) if !operand.is_empty() => {
                write!(f, "{} {}", mnemonic, operand)
            }
            (mnemonic, _) => write!(f, "{}", mnemonic),
        }
    }
}
