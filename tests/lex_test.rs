use intlang::lang::{lex, Terminal, TokenKind, Word};

fn dump(s: &str) -> Vec<String> {
    lex(s).unwrap().iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_token_dump() {
    assert_eq!(
        dump("int x;\nx = x==1;"),
        vec![
            "1:1 KEYWORD 'int'",
            "1:5 IDENTIFIER 'x'",
            "1:6 SYMBOL ';'",
            "2:1 IDENTIFIER 'x'",
            "2:3 SYMBOL '='",
            "2:5 IDENTIFIER 'x'",
            "2:6 SYMBOL '=='",
            "2:8 NUMBER '1'",
            "2:9 SYMBOL ';'",
            "2:10 END ''",
        ]
    );
}

#[test]
fn test_exactly_one_end() {
    for s in &["", "   ", "// c", "a", "print(1);\n"] {
        let tokens = lex(s).unwrap();
        let ends = tokens.iter().filter(|t| t.kind == TokenKind::End).count();
        assert_eq!(ends, 1, "{:?}", s);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
    }
}

#[test]
fn test_terminals() {
    let tokens = lex("while (a) { read(b); }").unwrap();
    let terminals: Vec<Terminal> = tokens.iter().filter_map(|t| t.terminal()).collect();
    assert_eq!(
        terminals,
        vec![
            Terminal::Word(Word::While),
            Terminal::LParen,
            Terminal::Ident,
            Terminal::RParen,
            Terminal::LBrace,
            Terminal::Word(Word::Read),
            Terminal::LParen,
            Terminal::Ident,
            Terminal::RParen,
            Terminal::Semicolon,
            Terminal::RBrace,
            Terminal::End,
        ]
    );
}

#[test]
fn test_every_punctuator() {
    let tokens = lex("+-*/~><==&|!=(){}[];,").unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(
        lexemes,
        vec![
            "+", "-", "*", "/", "~", ">", "<", "==", "&", "|", "!", "=", "(", ")", "{", "}", "[",
            "]", ";", ",", ""
        ]
    );
}
