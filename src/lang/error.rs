use super::{Column, LineNumber};
use crate::mach::Address;

/// ## Structured compile and runtime errors
///
/// Every stage stops at its first error and hands one of these back.

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line: Option<LineNumber>,
    column: Option<Column>,
    pc: Option<Address>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr, $col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_position($line, $col)
    };
    ($err:ident, $line:expr, $col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_position($line, $col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line: None,
            column: None,
            pc: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn line(&self) -> Option<LineNumber> {
        self.line
    }

    pub fn column(&self) -> Option<Column> {
        self.column
    }

    pub fn pc(&self) -> Option<Address> {
        self.pc
    }

    pub fn detail(&self) -> &str {
        &self.message
    }

    /// Attach a source position. An existing position is kept so the
    /// innermost location wins.
    pub fn in_position(self, line: LineNumber, column: Column) -> Error {
        if self.line.is_some() {
            return self;
        }
        Error {
            line: Some(line),
            column: Some(column),
            ..self
        }
    }

    pub fn at_pc(self, pc: Address) -> Error {
        if self.pc.is_some() {
            return self;
        }
        Error {
            pc: Some(pc),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
    Runtime,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorKind::*;
        match self {
            Lexical => write!(f, "Lexical"),
            Syntax => write!(f, "Syntax"),
            Semantic => write!(f, "Semantic"),
            Runtime => write!(f, "Runtime"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCharacter,

    UnexpectedToken,
    NoRule,
    TrailingInput,

    UndeclaredIdentifier,
    Redeclaration,
    NotAScalar,
    NotAnArray,
    ArrayCoupling,
    LabelUnderflow,
    MissingComparison,
    LiteralOutOfRange,
    IncompleteStatement,

    StackUnderflow,
    StackOverflow,
    DivisionByZero,
    Overflow,
    SubscriptOutOfRange,
    InvalidArraySize,
    Reallocation,
    InitializerOverflow,
    InvalidOperand,
    InvalidJump,
    MalformedInput,
    OutputFailed,
    Interrupted,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            InvalidCharacter => ErrorKind::Lexical,
            UnexpectedToken | NoRule | TrailingInput => ErrorKind::Syntax,
            UndeclaredIdentifier | Redeclaration | NotAScalar | NotAnArray | ArrayCoupling
            | LabelUnderflow | MissingComparison | LiteralOutOfRange | IncompleteStatement => {
                ErrorKind::Semantic
            }
            StackUnderflow | StackOverflow | DivisionByZero | Overflow | SubscriptOutOfRange
            | InvalidArraySize | Reallocation | InitializerOverflow | InvalidOperand | InvalidJump
            | MalformedInput | OutputFailed | Interrupted => {
                ErrorKind::Runtime
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            InvalidCharacter => "invalid character",
            UnexpectedToken => "unexpected token",
            NoRule => "no rule applies",
            TrailingInput => "unexpected trailing token",
            UndeclaredIdentifier => "undeclared identifier",
            Redeclaration => "redeclared identifier",
            NotAScalar => "not a scalar variable",
            NotAnArray => "not an array",
            ArrayCoupling => "array initializer without allocation",
            LabelUnderflow => "label stack underflow",
            MissingComparison => "missing comparison operator",
            LiteralOutOfRange => "integer literal out of range",
            IncompleteStatement => "incomplete statement",
            StackUnderflow => "stack underflow",
            StackOverflow => "stack overflow",
            DivisionByZero => "division by zero",
            Overflow => "integer overflow",
            SubscriptOutOfRange => "array index out of bounds",
            InvalidArraySize => "invalid array size",
            Reallocation => "array already allocated",
            InitializerOverflow => "too many initializers",
            InvalidOperand => "invalid operand",
            InvalidJump => "invalid jump target",
            MalformedInput => "malformed input",
            OutputFailed => "output failed",
            Interrupted => "interrupted",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} error", self.kind())?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " at line {}, position {}", line, column)?;
        }
        write!(f, ": {}", self.code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(pc) = self.pc {
            write!(f, " (pc {})", pc)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
