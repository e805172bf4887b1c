use super::*;

#[test]
fn test_expression_is_postfix() {
    let r = record("print(1+2);").unwrap();
    assert_eq!(
        r.actions,
        vec![
            Action::PushLiteral,
            Action::PushLiteral,
            Action::Add,
            Action::Print
        ]
    );
    assert_eq!(r.numbers, vec!["1", "2"]);
}

#[test]
fn test_declaration_and_assignment() {
    use Action::*;
    let r = record("int a = 4; a = a * 2;").unwrap();
    assert_eq!(
        r.actions,
        vec![Declare, PushLiteral, DeclareInit, Use, Use, PushVar, PushLiteral, Mul, Assign]
    );
    assert_eq!(r.idents, vec!["a", "a", "a"]);
    assert_eq!(r.numbers, vec!["4", "2"]);
}

#[test]
fn test_control_flow_actions() {
    use Action::*;
    let r = record("if (1) { } else { }").unwrap();
    assert_eq!(r.actions, vec![PushLiteral, Branch, Else, EndIf]);
    let r = record("if (1) { }").unwrap();
    assert_eq!(r.actions, vec![PushLiteral, Branch, EndIf]);
    let r = record("while (0) { }").unwrap();
    assert_eq!(r.actions, vec![While, PushLiteral, Branch, EndWhile]);
}

#[test]
fn test_array_actions() {
    use Action::*;
    let r = record("int b[2] = {5, 6}; read(b[1]);").unwrap();
    assert_eq!(
        r.actions,
        vec![
            Declare,
            PushLiteral,
            Allocate,
            BeginInit,
            PushLiteral,
            InitItem,
            PushLiteral,
            InitItem,
            FinishArray,
            Use,
            PushLiteral,
            ReadElement
        ]
    );
    let r = record("int n = 3; int c[n];").unwrap();
    assert_eq!(
        &r.actions[3..],
        &[Declare, Use, PushVar, Allocate, FinishArray]
    );
}

#[test]
fn test_double_equal_comparison() {
    use Action::*;
    let r = record("print(1 == 1);").unwrap();
    assert_eq!(
        r.actions,
        vec![PushLiteral, CompareEq, PushLiteral, GenCompare, Print]
    );
}

#[test]
fn test_not_wraps_comparison() {
    use Action::*;
    let r = record("print(!1 > 2 & 3);").unwrap();
    assert_eq!(
        r.actions,
        vec![
            PushLiteral,
            CompareGt,
            PushLiteral,
            GenCompare,
            Not,
            PushLiteral,
            And,
            Print
        ]
    );
}

#[test]
fn test_empty_program() {
    assert!(record("").unwrap().actions.is_empty());
    assert!(record("// nothing here\n").unwrap().actions.is_empty());
}

#[test]
fn test_unexpected_token() {
    assert_eq!(
        parse_error("int 5;"),
        "Syntax error at line 1, position 5: unexpected token: expected IDENTIFIER, found NUMBER"
    );
}

#[test]
fn test_no_rule() {
    assert_eq!(
        parse_error("print(1;"),
        "Syntax error at line 1, position 8: no rule applies: \
         found ';', expected one of '>' '<' '==' '&' '|' ')'"
    );
}

#[test]
fn test_comparisons_do_not_chain() {
    assert_eq!(
        parse_error("print(1 < 2 < 3);"),
        "Syntax error at line 1, position 13: no rule applies: \
         found '<', expected one of '&' '|' ')'"
    );
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        parse_error("print(1); }"),
        "Syntax error at line 1, position 11: unexpected trailing token: '}'"
    );
}

#[test]
fn test_missing_end_token() {
    let mut tokens = lex("print(7);").unwrap();
    tokens.pop();
    let mut r = Recorder::default();
    parse(&tokens, &mut r).unwrap();
    assert_eq!(r.actions, vec![Action::PushLiteral, Action::Print]);
}

#[test]
fn test_visitor_error_gets_position() {
    let tokens = lex("print(1+2);").unwrap();
    let mut r = Recorder {
        fail_on: Some(Action::Add),
        ..Recorder::default()
    };
    let e = parse(&tokens, &mut r).unwrap_err();
    assert_eq!(e.code(), ErrorCode::MissingComparison);
    assert_eq!((e.line(), e.column()), (Some(1), Some(9)));
}
