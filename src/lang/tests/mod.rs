use super::*;

mod parse_test;

/// Records every action with the identifier and number it saw.
#[derive(Default)]
struct Recorder {
    actions: Vec<Action>,
    idents: Vec<String>,
    numbers: Vec<String>,
    fail_on: Option<Action>,
}

impl Visitor for Recorder {
    fn visit_action(&mut self, action: Action, context: &Context) -> Result<(), Error> {
        if self.fail_on == Some(action) {
            return Err(error!(MissingComparison));
        }
        match action {
            Action::Use | Action::Declare => {
                if let Some(t) = context.ident {
                    self.idents.push(t.lexeme.clone());
                }
            }
            Action::PushLiteral => {
                if let Some(t) = context.number {
                    self.numbers.push(t.lexeme.clone());
                }
            }
            _ => {}
        }
        self.actions.push(action);
        Ok(())
    }
}

fn record(s: &str) -> Result<Recorder, Error> {
    let tokens = lex(s)?;
    let mut recorder = Recorder::default();
    parse(&tokens, &mut recorder)?;
    Ok(recorder)
}

fn parse_error(s: &str) -> String {
    match record(s) {
        Ok(_) => String::new(),
        Err(e) => e.to_string(),
    }
}
