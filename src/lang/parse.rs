use super::grammar::{Action, Grammar, Symbol};
use super::token::{Terminal, Token, TokenKind};
use super::Error;

type Result<T> = std::result::Result<T, Error>;

thread_local!(
    static GRAMMAR: Grammar = Grammar::new();
);

/// Tokens most recently matched by the driver, handed to the
/// visitor along with each action.
#[derive(Debug, Default, Clone, Copy)]
pub struct Context<'t> {
    pub ident: Option<&'t Token>,
    pub number: Option<&'t Token>,
    pub last: Option<&'t Token>,
}

/// Receives semantic actions in the order the parse reaches them.
pub trait Visitor {
    fn visit_action(&mut self, action: Action, context: &Context) -> Result<()>;
}

/// ## Table-driven LL(1) parse
///
/// The stack starts as `END Program`. Terminals on top must match
/// the lookahead, nonterminals are replaced by the right side of the
/// rule the table selects, and actions go to the visitor.

pub fn parse<V: Visitor>(tokens: &[Token], visitor: &mut V) -> Result<()> {
    GRAMMAR.with(|grammar| Parser::new(grammar, tokens).run(visitor))
}

struct Parser<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [Token],
    end: Token,
    index: usize,
    context: Context<'t>,
}

impl<'g, 't> Parser<'g, 't> {
    fn new(grammar: &'g Grammar, tokens: &'t [Token]) -> Parser<'g, 't> {
        let (line, column) = match tokens.last() {
            Some(t) => (t.line, t.column + t.lexeme.chars().count()),
            None => (1, 1),
        };
        Parser {
            grammar,
            tokens,
            end: Token::new(TokenKind::End, "", line, column),
            index: 0,
            context: Context::default(),
        }
    }

    fn lookahead(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.end)
    }

    fn lookahead_terminal(&self) -> Result<Terminal> {
        let token = self.lookahead();
        match token.terminal() {
            Some(t) => Ok(t),
            None => Err(error!(UnexpectedToken, token.line, token.column;
                format!("'{}'", token.lexeme))),
        }
    }

    fn run<V: Visitor>(mut self, visitor: &mut V) -> Result<()> {
        let mut stack = vec![
            Symbol::Terminal(Terminal::End),
            Symbol::NonTerminal(self.grammar.start()),
        ];
        while let Some(top) = stack.pop() {
            match top {
                Symbol::Action(action) => self.act(action, visitor)?,
                Symbol::Terminal(expected) => self.expect(expected)?,
                Symbol::NonTerminal(nt) => {
                    let found = self.lookahead_terminal()?;
                    match self.grammar.lookup(nt, found) {
                        Some(rule) => stack.extend(rule.rhs.iter().rev().copied()),
                        None => {
                            let token = self.lookahead();
                            let expected: Vec<String> = self
                                .grammar
                                .expected(nt)
                                .iter()
                                .map(|t| t.to_string())
                                .collect();
                            return Err(error!(NoRule, token.line, token.column;
                                format!("found {}, expected one of {}", found, expected.join(" "))));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn act<V: Visitor>(&self, action: Action, visitor: &mut V) -> Result<()> {
        match visitor.visit_action(action, &self.context) {
            Ok(()) => Ok(()),
            Err(e) => match self.context.last {
                Some(t) => Err(e.in_position(t.line, t.column)),
                None => Err(e),
            },
        }
    }

    fn expect(&mut self, expected: Terminal) -> Result<()> {
        let found = self.lookahead_terminal()?;
        if found != expected {
            let token = self.lookahead();
            if expected == Terminal::End {
                return Err(error!(TrailingInput, token.line, token.column;
                    format!("{}", found)));
            }
            return Err(error!(UnexpectedToken, token.line, token.column;
                format!("expected {}, found {}", expected, found)));
        }
        if found == Terminal::End {
            return Ok(());
        }
        let tokens = self.tokens;
        let token = &tokens[self.index];
        match found {
            Terminal::Ident => self.context.ident = Some(token),
            Terminal::Number => self.context.number = Some(token),
            _ => {}
        }
        self.context.last = Some(token);
        self.index += 1;
        Ok(())
    }
}
