use super::token::{Token, TokenKind, Word};
use super::{Column, Error, LineNumber};
use crate::mach::{Silent, Trace};

type Result<T> = std::result::Result<T, Error>;

pub fn lex(s: &str) -> Result<Vec<Token>> {
    Lexer::new(s, &mut Silent).tokenize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Ident,
    Number,
    EqPending,
    SlashPending,
    Comment,
    Emit,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Letter,
    Digit,
    Equal,
    Slash,
    /// One category per single-character punctuator.
    Punct(char),
    Whitespace,
    Newline,
    EndOfInput,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Accumulate,
    EmitWord,
    EmitNumber,
    EmitSymbol,
    EmitDoubleEqual,
    EmitDivision,
    EnterComment,
    Discard,
    ExitComment,
    SkipWhitespace,
    CountNewline,
    Finish,
    Fail,
}

impl Action {
    fn consumes(self) -> bool {
        use Action::*;
        match self {
            Accumulate | EmitDoubleEqual | EnterComment | Discard | SkipWhitespace
            | CountNewline => true,
            EmitWord | EmitNumber | EmitSymbol | EmitDivision | ExitComment | Finish | Fail => {
                false
            }
        }
    }
}

fn category(ch: Option<char>) -> Category {
    use Category::*;
    match ch {
        None => EndOfInput,
        Some(c) if c.is_ascii_alphabetic() || c == '_' => Letter,
        Some(c) if c.is_ascii_digit() => Digit,
        Some('=') => Equal,
        Some('/') => Slash,
        Some(c @ '+') | Some(c @ '-') | Some(c @ '*') | Some(c @ '>') | Some(c @ '<')
        | Some(c @ '|') | Some(c @ '&') | Some(c @ '!') | Some(c @ '~') | Some(c @ '(')
        | Some(c @ ')') | Some(c @ '{') | Some(c @ '}') | Some(c @ '[') | Some(c @ ']')
        | Some(c @ ';') | Some(c @ ',') => Punct(c),
        Some(' ') | Some('\t') | Some('\r') => Whitespace,
        Some('\n') => Newline,
        Some(_) => Other,
    }
}

fn transition(state: State, category: Category) -> (State, Action) {
    use Action::*;
    use Category::*;
    match (state, category) {
        (State::Start, Letter) => (State::Ident, Accumulate),
        (State::Start, Digit) => (State::Number, Accumulate),
        (State::Start, Equal) => (State::EqPending, Accumulate),
        (State::Start, Slash) => (State::SlashPending, Accumulate),
        (State::Start, Punct(_)) => (State::Emit, Accumulate),
        (State::Start, Whitespace) => (State::Start, SkipWhitespace),
        (State::Start, Newline) => (State::Start, CountNewline),
        (State::Start, EndOfInput) => (State::Start, Finish),
        (State::Start, Other) => (State::Error, Fail),

        (State::Ident, Letter) | (State::Ident, Digit) => (State::Ident, Accumulate),
        (State::Ident, _) => (State::Start, EmitWord),

        (State::Number, Digit) => (State::Number, Accumulate),
        (State::Number, _) => (State::Start, EmitNumber),

        (State::EqPending, Equal) => (State::Start, EmitDoubleEqual),
        (State::EqPending, _) => (State::Start, EmitSymbol),

        (State::SlashPending, Slash) => (State::Comment, EnterComment),
        (State::SlashPending, _) => (State::Start, EmitDivision),

        (State::Comment, Newline) | (State::Comment, EndOfInput) => (State::Start, ExitComment),
        (State::Comment, _) => (State::Comment, Discard),

        (State::Emit, _) => (State::Start, EmitSymbol),

        (State::Error, _) => (State::Error, Fail),
    }
}

/// ## Finite automaton lexer
///
/// Each step classifies the next character, looks up the
/// `(state, category)` transition and performs its action. Emitting
/// actions do not consume the character that ended the token.

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    trace: &'a mut dyn Trace,
    tokens: Vec<Token>,
    lexeme: String,
    line: LineNumber,
    column: Column,
    start: (LineNumber, Column),
}

impl<'a> Lexer<'a> {
    pub fn new(s: &'a str, trace: &'a mut dyn Trace) -> Lexer<'a> {
        Lexer {
            chars: s.chars().peekable(),
            trace,
            tokens: vec![],
            lexeme: String::new(),
            line: 1,
            column: 1,
            start: (1, 1),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut state = State::Start;
        loop {
            let ch = self.chars.peek().copied();
            let (next, action) = transition(state, category(ch));
            if state == State::Start && action == Action::Accumulate {
                self.start = (self.line, self.column);
            }
            match action {
                Action::Accumulate | Action::EmitDoubleEqual => {
                    if let Some(c) = ch {
                        self.lexeme.push(c);
                    }
                }
                Action::EnterComment => self.lexeme.clear(),
                _ => {}
            }
            match action {
                Action::EmitWord => {
                    let kind = match Word::from_lexeme(&self.lexeme) {
                        Some(_) => TokenKind::Keyword,
                        None => TokenKind::Identifier,
                    };
                    self.emit(kind);
                }
                Action::EmitNumber => self.emit(TokenKind::Number),
                Action::EmitSymbol | Action::EmitDoubleEqual | Action::EmitDivision => {
                    self.emit(TokenKind::Symbol)
                }
                Action::Finish => {
                    self.start = (self.line, self.column);
                    self.emit(TokenKind::End);
                    return Ok(self.tokens);
                }
                Action::Fail => {
                    let shown = ch.map(|c| c.escape_debug().to_string()).unwrap_or_default();
                    return Err(error!(InvalidCharacter, self.line, self.column;
                        format!("'{}'", shown)));
                }
                _ => {}
            }
            if action.consumes() {
                self.chars.next();
                if action == Action::CountNewline {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
            state = next;
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let (line, column) = self.start;
        let token = Token {
            kind,
            lexeme: std::mem::take(&mut self.lexeme),
            line,
            column,
        };
        self.trace.token(&token);
        self.tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn kinds_and_lexemes(s: &str) -> Vec<(TokenKind, String)> {
        lex(s)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    #[test]
    fn test_declaration() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_lexemes("int a1_ = 42;"),
            vec![
                (Keyword, "int".to_string()),
                (Identifier, "a1_".to_string()),
                (Symbol, "=".to_string()),
                (Number, "42".to_string()),
                (Symbol, ";".to_string()),
                (End, "".to_string()),
            ]
        );
    }

    #[test]
    fn test_double_equal() {
        let t = lex("a==b=c").unwrap();
        let lexemes: Vec<&str> = t.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["a", "==", "b", "=", "c", ""]);
        assert_eq!(t[1].column, 2);
        assert_eq!(t[3].column, 5);
    }

    #[test]
    fn test_equal_at_end_of_input() {
        let t = lex("=").unwrap();
        assert_eq!(t[0].lexeme, "=");
        assert_eq!(t[1].kind, TokenKind::End);
    }

    #[test]
    fn test_comment_and_division() {
        let t = lex("a / b // print(a);\nc").unwrap();
        let lexemes: Vec<&str> = t.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["a", "/", "b", "c", ""]);
        assert_eq!((t[3].line, t[3].column), (2, 1));
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let t = lex("x// trailing").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t[1].kind, TokenKind::End);
        assert_eq!((t[1].line, t[1].column), (1, 13));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_lexemes("integer iff print"),
            vec![
                (Identifier, "integer".to_string()),
                (Identifier, "iff".to_string()),
                (Keyword, "print".to_string()),
                (End, "".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_then_identifier() {
        use TokenKind::*;
        assert_eq!(
            kinds_and_lexemes("12ab ~3"),
            vec![
                (Number, "12".to_string()),
                (Identifier, "ab".to_string()),
                (Symbol, "~".to_string()),
                (Number, "3".to_string()),
                (End, "".to_string()),
            ]
        );
    }

    #[test]
    fn test_positions() {
        let t = lex("int a;\n  a = 1;").unwrap();
        assert_eq!((t[0].line, t[0].column), (1, 1));
        assert_eq!((t[1].line, t[1].column), (1, 5));
        assert_eq!((t[3].line, t[3].column), (2, 3));
        assert_eq!((t[5].line, t[5].column), (2, 7));
        let end = t.last().unwrap();
        assert_eq!((end.line, end.column), (2, 9));
    }

    #[test]
    fn test_invalid_character() {
        let e = lex("int a;\na = 1 $ 2;").unwrap_err();
        assert_eq!(e.code(), ErrorCode::InvalidCharacter);
        assert_eq!(e.line(), Some(2));
        assert_eq!(e.column(), Some(7));
        assert_eq!(
            e.to_string(),
            "Lexical error at line 2, position 7: invalid character: '$'"
        );
    }

    #[test]
    fn test_layout_does_not_change_tokens() {
        let dense = kinds_and_lexemes("while(a<3){a=a+1;}print(a);");
        let spaced = kinds_and_lexemes(
            "while ( a < 3 ) {\n\t a = a + 1; // step\n}\r\n\n print ( a ) ;   // done",
        );
        assert_eq!(dense, spaced);
    }
}
