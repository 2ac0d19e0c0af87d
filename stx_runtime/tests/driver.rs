mod common;

use common::*;
use stx_runtime::{
    GrammarRule, Parsed, ParseError, ParseStatus, Parser, ParserOptions, ParserTables,
    SymbolCatalog, TabularTables, TokenDef, Tokens, ACCEPT,
};

fn feed(
    parser: &mut Parser<'_, i64>,
    actions: &mut Summer,
    tokens: &[(i32, i64)],
) -> Vec<Result<Parsed, ParseError>> {
    tokens
        .iter()
        .map(|&(token, value)| parser.parse(actions, token, value))
        .collect()
}

fn sum_two_numbers(tables: &ParserTables) {
    let mut parser = Parser::<i64>::new(tables, ParserOptions::default().verbose(true));
    let mut summer = Summer::default();

    let results = feed(
        &mut parser,
        &mut summer,
        &[(NUM, 2), (PLUS, 0), (NUM, 3), (END, 0)],
    );
    assert_eq!(
        results,
        vec![
            Ok(Parsed::Shifted),
            Ok(Parsed::Shifted),
            Ok(Parsed::Shifted),
            Ok(Parsed::Accepted),
        ]
    );
    // E -> num twice, then E -> E '+' E.
    assert_eq!(summer.reduced, vec![2, 2, 1]);
    assert_eq!(parser.result(), Some(&5));
    assert_eq!(parser.stack().top(), 1);
    assert_eq!(parser.error_count(), 0);
}

#[test]
fn tabular_sums_two_numbers() {
    sum_two_numbers(&expr_tabular());
}

#[test]
fn packed_sums_two_numbers() {
    sum_two_numbers(&expr_packed());
}

#[test]
fn reductions_keep_the_stack_balanced() {
    let tables = expr_tabular();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();

    parser.parse(&mut summer, NUM, 1).unwrap();
    parser.parse(&mut summer, PLUS, 0).unwrap();
    parser.parse(&mut summer, NUM, 2).unwrap();
    assert_eq!(parser.stack().states(), &[0, 2, 3, 1]);

    // On '+': E -> num pops 1 and pushes 1, E -> E '+' E pops 3 and pushes 1, then '+' shifts.
    assert_eq!(parser.parse(&mut summer, PLUS, 0), Ok(Parsed::Shifted));
    assert_eq!(parser.stack().states(), &[0, 2, 3]);
    assert_eq!(parser.stack().values(), &[0, 3, 0]);
}

#[test]
fn run_pulls_tokens_until_accepted() {
    let tables = expr_packed();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();
    let mut tokens = Tokens::new(vec![(NUM, 1), (PLUS, 0), (NUM, 2), (PLUS, 0), (NUM, 4)]);

    assert_eq!(parser.run(&mut summer, &mut tokens), Ok(()));
    assert_eq!(parser.into_result(), Some(7));
}

#[test]
fn syntax_error_without_recovery_leaves_the_stack_alone() {
    let tables = expr_packed();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();
    assert!(!parser.recovery_enabled());

    assert_eq!(parser.parse(&mut summer, NUM, 1), Ok(Parsed::Shifted));
    let err = parser.parse(&mut summer, NUM, 2).unwrap_err();
    assert_eq!(
        err,
        ParseError::Syntax {
            state: 1,
            token: NUM,
            message: "Syntax error on state 1 with token num".to_string(),
        }
    );
    assert_eq!(err.status(), ParseStatus::ParsingError);
    assert!(!err.is_fatal());
    assert_eq!(summer.reports.len(), 1);
    assert_eq!(parser.stack().states(), &[0, 1]);

    // The caller may carry on with a different token.
    assert_eq!(parser.parse(&mut summer, PLUS, 0), Ok(Parsed::Shifted));
    assert_eq!(parser.parse(&mut summer, NUM, 2), Ok(Parsed::Shifted));
    assert_eq!(parser.parse(&mut summer, END, 0), Ok(Parsed::Accepted));
    assert_eq!(parser.result(), Some(&3));
}

#[test]
fn failed_action_is_an_internal_error() {
    let tables = expr_tabular();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer {
        fail_rule: Some(2),
        ..Summer::default()
    };

    parser.parse(&mut summer, NUM, 1).unwrap();
    let result = parser.parse(&mut summer, PLUS, 0);
    assert_eq!(result, Err(ParseError::ActionFailed { rule: 2 }));
    assert_eq!(ParseStatus::of(&result), ParseStatus::InternalError);
    assert!(result.unwrap_err().is_fatal());
    // The hook runs before anything is popped.
    assert_eq!(parser.stack().states(), &[0, 1]);
}

#[test]
fn action_can_raise_a_syntax_error() {
    let tables = expr_packed();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer {
        syntax_error_rule: Some(2),
        ..Summer::default()
    };

    parser.parse(&mut summer, NUM, 1).unwrap();
    match parser.parse(&mut summer, PLUS, 0) {
        Err(ParseError::Syntax { state, token, .. }) => {
            assert_eq!(state, 1);
            assert_eq!(token, PLUS);
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(parser.stack().states(), &[0, 1]);
}

#[test]
fn shift_past_stack_depth_overflows() {
    let tables = expr_tabular().with_stack_depth(3);
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();

    assert_eq!(parser.parse(&mut summer, NUM, 1), Ok(Parsed::Shifted));
    assert_eq!(parser.parse(&mut summer, PLUS, 0), Ok(Parsed::Shifted));
    assert_eq!(parser.stack().top(), 2);

    let result = parser.parse(&mut summer, NUM, 2);
    assert_eq!(result, Err(ParseError::StackOverflow { depth: 3 }));
    assert_eq!(ParseStatus::of(&result), ParseStatus::InternalError);
    assert_eq!(parser.stack().states(), &[0, 2, 3]);
}

/// `S -> num E`, `E -> ` (empty), so the empty rule's goto is the push that can overflow.
fn empty_rule_tables(stack_depth: usize) -> ParserTables {
    let catalog = SymbolCatalog::new(vec![
        TokenDef::new(END, "$end", "end of input"),
        TokenDef::new(NUM, "num", "number"),
    ]);
    let rules = vec![
        GrammarRule::new(0, 1),
        GrammarRule::new(0, 2),
        GrammarRule::new(1, 0),
    ];
    // columns: $end num | S E
    let rows = vec![
        vec![0, 1, 3, 0],
        vec![-2, 0, 0, 2],
        vec![-1, 0, 0, 0],
        vec![ACCEPT, 0, 0, 0],
    ];
    let tabular = TabularTables::new(2, 2, rows, Vec::new()).unwrap();
    ParserTables::new(catalog, rules, tabular)
        .with_stack_depth(stack_depth)
        .validate()
        .unwrap()
}

#[test]
fn goto_past_stack_depth_overflows() {
    let tables = empty_rule_tables(2);
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();

    assert_eq!(parser.parse(&mut summer, NUM, 7), Ok(Parsed::Shifted));
    let result = parser.parse(&mut summer, END, 0);
    assert_eq!(result, Err(ParseError::StackOverflow { depth: 2 }));
    assert_eq!(ParseStatus::of(&result), ParseStatus::InternalError);
    assert_eq!(summer.reduced, vec![2]);
    assert_eq!(parser.stack().states(), &[0, 1]);
    assert_eq!(parser.stack().values(), &[0, 7]);

    let tables = empty_rule_tables(3);
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();
    parser.parse(&mut summer, NUM, 7).unwrap();
    assert_eq!(parser.parse(&mut summer, END, 0), Ok(Parsed::Accepted));
    assert_eq!(summer.reduced, vec![2, 1]);
    assert_eq!(parser.result(), Some(&7));
}

#[test]
fn valid_tokens_follow_the_current_state() {
    for tables in &[expr_tabular(), expr_packed()] {
        let mut parser = Parser::<i64>::new(tables, ParserOptions::default());
        let mut summer = Summer::default();
        assert_eq!(parser.valid_tokens(), vec![NUM]);
        parser.parse(&mut summer, NUM, 1).unwrap();
        assert_eq!(parser.valid_tokens(), vec![END, PLUS]);
    }
}

#[test]
fn init_starts_a_new_session() {
    let tables = expr_tabular();
    let mut parser = Parser::<i64>::new(&tables, ParserOptions::default());
    let mut summer = Summer::default();

    parser.parse(&mut summer, NUM, 1).unwrap();
    parser.parse(&mut summer, PLUS, 0).unwrap();
    parser.init();
    assert_eq!(parser.state(), 0);
    assert_eq!(parser.stack().top(), 0);
    assert_eq!(parser.error_count(), 0);

    assert_eq!(parser.parse(&mut summer, NUM, 9), Ok(Parsed::Shifted));
    assert_eq!(parser.parse(&mut summer, END, 0), Ok(Parsed::Accepted));
    assert_eq!(parser.result(), Some(&9));
}

#[test]
fn status_codes() {
    let ok: Result<Parsed, ParseError> = Ok(Parsed::Shifted);
    assert_eq!(ParseStatus::of(&ok), ParseStatus::Shifted);
    assert_eq!(ParseStatus::of(&Ok(Parsed::Accepted)), ParseStatus::Accepted);
    assert_eq!(
        ParseError::RecoveryFailed { state: 0, token: 0 }.status(),
        ParseStatus::ParsingError
    );
    assert_eq!(
        ParseError::Tables("no goto".to_string()).status(),
        ParseStatus::InternalError
    );
}
