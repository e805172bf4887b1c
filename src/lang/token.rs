use super::{Column, LineNumber};
use std::collections::HashMap;

thread_local!(
    static LEXEME_TO_TERMINAL: HashMap<&'static str, Terminal> = Terminal::LITERALS
        .iter()
        .filter_map(|t| t.lexeme().map(|s| (s, *t)))
        .collect();
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Symbol,
    End,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            Keyword => write!(f, "KEYWORD"),
            Identifier => write!(f, "IDENTIFIER"),
            Number => write!(f, "NUMBER"),
            Symbol => write!(f, "SYMBOL"),
            End => write!(f, "END"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: LineNumber,
    pub column: Column,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, line: LineNumber, column: Column) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    /// The lookahead class the LL(1) table is indexed by. Keywords and
    /// symbols use their literal value, everything else its kind.
    pub fn terminal(&self) -> Option<Terminal> {
        match self.kind {
            TokenKind::Identifier => Some(Terminal::Ident),
            TokenKind::Number => Some(Terminal::Number),
            TokenKind::End => Some(Terminal::End),
            TokenKind::Keyword | TokenKind::Symbol => {
                LEXEME_TO_TERMINAL.with(|ltt| ltt.get(self.lexeme.as_str()).copied())
            }
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} '{}'",
            self.line, self.column, self.kind, self.lexeme
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Word {
    Int,
    If,
    Else,
    While,
    Read,
    Print,
}

impl Word {
    pub fn from_lexeme(s: &str) -> Option<Word> {
        use Word::*;
        match s {
            "int" => Some(Int),
            "if" => Some(If),
            "else" => Some(Else),
            "while" => Some(While),
            "read" => Some(Read),
            "print" => Some(Print),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            Int => "int",
            If => "if",
            Else => "else",
            While => "while",
            Read => "read",
            Print => "print",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    Word(Word),
    Plus,
    Minus,
    Star,
    Slash,
    Tilde,
    Greater,
    Less,
    EqualEqual,
    Amp,
    Pipe,
    Bang,
    Equal,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Ident,
    Number,
    End,
}

impl Terminal {
    pub const LITERALS: [Terminal; 26] = [
        Terminal::Word(Word::Int),
        Terminal::Word(Word::If),
        Terminal::Word(Word::Else),
        Terminal::Word(Word::While),
        Terminal::Word(Word::Read),
        Terminal::Word(Word::Print),
        Terminal::Plus,
        Terminal::Minus,
        Terminal::Star,
        Terminal::Slash,
        Terminal::Tilde,
        Terminal::Greater,
        Terminal::Less,
        Terminal::EqualEqual,
        Terminal::Amp,
        Terminal::Pipe,
        Terminal::Bang,
        Terminal::Equal,
        Terminal::LParen,
        Terminal::RParen,
        Terminal::LBrace,
        Terminal::RBrace,
        Terminal::LBracket,
        Terminal::RBracket,
        Terminal::Semicolon,
        Terminal::Comma,
    ];

    /// Source text of a keyword or symbol terminal.
    pub fn lexeme(&self) -> Option<&'static str> {
        use Terminal::*;
        let s = match self {
            Word(w) => w.as_str(),
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Tilde => "~",
            Greater => ">",
            Less => "<",
            EqualEqual => "==",
            Amp => "&",
            Pipe => "|",
            Bang => "!",
            Equal => "=",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Semicolon => ";",
            Comma => ",",
            Ident | Number | End => return None,
        };
        Some(s)
    }
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.lexeme() {
            Some(s) => write!(f, "'{}'", s),
            None => match self {
                Terminal::Ident => write!(f, "IDENTIFIER"),
                Terminal::Number => write!(f, "NUMBER"),
                _ => write!(f, "END"),
            },
        }
    }
}
