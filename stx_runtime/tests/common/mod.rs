//! Grammars shared by the integration tests, with tables worked out by hand.
//!
//! Expressions (one nonterminal, E = 0):
//!
//! ```text
//! 0: $accept -> E
//! 1: E -> E '+' E      (left associative)
//! 2: E -> num
//! ```
//!
//! Statements (L = 0, S = 1), where ';' is the recover token:
//!
//! ```text
//! 0: $accept -> L
//! 1: L -> L S
//! 2: L -> S
//! 3: S -> num ';'
//! ```

#![allow(dead_code)]

use stx_runtime::{
    ActionError, GrammarRule, PackedBuilder, ParserTables, SemanticActions, SymbolCatalog,
    TabularTables, TokenDef, ACCEPT,
};

pub const END: i32 = 0;
pub const NUM: i32 = 257;
pub const PLUS: i32 = b'+' as i32;
pub const SEMI: i32 = b';' as i32;

#[static_init::dynamic]
static INIT_LOGGING_DONE: () = env_logger::builder().default_format_timestamp(false).init();

pub fn expr_catalog() -> SymbolCatalog {
    SymbolCatalog::new(vec![
        TokenDef::new(END, "$end", "end of input"),
        TokenDef::new(NUM, "num", "number"),
        TokenDef::new(PLUS, "'+'", "'+'"),
    ])
}

pub fn expr_rules() -> Vec<GrammarRule> {
    vec![
        GrammarRule::new(0, 1),
        GrammarRule::new(0, 3),
        GrammarRule::new(0, 1),
    ]
}

pub fn expr_tabular() -> ParserTables {
    // columns: $end num '+' | E
    let rows = vec![
        vec![0, 1, 0, 2],
        vec![-2, 0, -2, 0],
        vec![ACCEPT, 0, 3, 0],
        vec![0, 1, 0, 4],
        vec![-1, 0, -1, 0],
    ];
    let tabular = TabularTables::new(3, 1, rows, Vec::new()).unwrap();
    ParserTables::new(expr_catalog(), expr_rules(), tabular)
        .validate()
        .unwrap()
}

pub fn expr_packed_builder() -> PackedBuilder {
    let mut b = PackedBuilder::new();

    b.start_state();
    b.push_action(NUM, 1);
    b.finish_state(0, -1);

    b.start_state();
    b.push_action(END, -2);
    b.push_action(PLUS, -2);
    b.finish_state(0, -1);

    b.start_state();
    b.push_action(END, ACCEPT);
    b.push_action(PLUS, 3);
    b.finish_state(0, -1);

    b.start_state();
    b.push_action(NUM, 1);
    b.finish_state(0, -1);

    b.start_state();
    b.push_action(END, -1);
    b.push_action(PLUS, -1);
    b.finish_state(0, -1);

    b.push_goto_chain(&[(0, 2)], 4);
    b
}

pub fn expr_packed() -> ParserTables {
    let packed = expr_packed_builder().finish().unwrap();
    ParserTables::new(expr_catalog(), expr_rules(), packed)
        .validate()
        .unwrap()
}

pub fn stmt_catalog() -> SymbolCatalog {
    SymbolCatalog::new(vec![
        TokenDef::new(END, "$end", "end of input"),
        TokenDef::new(NUM, "num", "number"),
        TokenDef::new(SEMI, "';'", "$m (statements end with ';')"),
    ])
}

pub fn stmt_rules() -> Vec<GrammarRule> {
    vec![
        GrammarRule::new(0, 1),
        GrammarRule::new(0, 2),
        GrammarRule::new(0, 1),
        GrammarRule::new(1, 2),
    ]
}

pub fn stmt_errors() -> Vec<String> {
    vec!["expected ';' after number".to_string()]
}

pub fn stmt_tabular_with(recovers: Vec<i32>) -> ParserTables {
    // columns: $end num ';' | L S
    let rows = vec![
        vec![0, 3, 0, 1, 2],
        vec![ACCEPT, 3, 0, 0, 4],
        vec![-2, -2, 0, 0, 0],
        vec![0, 0, 5, 0, 0],
        vec![-1, -1, 0, 0, 0],
        vec![-3, -3, 0, 0, 0],
    ];
    let messages = vec![-1, -1, -1, 0, -1, -1];
    let tabular = TabularTables::new(3, 2, rows, messages).unwrap();
    ParserTables::new(stmt_catalog(), stmt_rules(), tabular)
        .with_errors(stmt_errors())
        .with_recovers(recovers)
        .validate()
        .unwrap()
}

pub fn stmt_tabular() -> ParserTables {
    stmt_tabular_with(vec![SEMI])
}

pub fn stmt_packed() -> ParserTables {
    let mut b = PackedBuilder::new();
    let states: [(&[(i32, i32)], i32); 6] = [
        (&[(NUM, 3)], -1),
        (&[(END, ACCEPT), (NUM, 3)], -1),
        (&[(END, -2), (NUM, -2)], -1),
        (&[(SEMI, 5)], 0),
        (&[(END, -1), (NUM, -1)], -1),
        (&[(END, -3), (NUM, -3)], -1),
    ];
    for &(actions, msg) in states.iter() {
        b.start_state();
        for &(symbol, raw) in actions {
            b.push_action(symbol, raw);
        }
        b.finish_state(0, msg);
    }
    b.push_goto_chain(&[], 1);
    b.push_goto_chain(&[(1, 4)], 2);
    ParserTables::new(stmt_catalog(), stmt_rules(), b.finish().unwrap())
        .with_errors(stmt_errors())
        .with_recovers(vec![SEMI])
        .validate()
        .unwrap()
}

/// Sums the right-hand side of every rule, and records what the driver asked of it.
#[derive(Default, Debug)]
pub struct Summer {
    pub reduced: Vec<usize>,
    pub reports: Vec<String>,
    pub refuse_recovery: bool,
    pub fail_rule: Option<usize>,
    pub syntax_error_rule: Option<usize>,
}

impl SemanticActions<i64> for Summer {
    fn reduce(&mut self, rule: usize, rhs: &mut [i64]) -> Result<i64, ActionError> {
        if self.fail_rule == Some(rule) {
            return Err(ActionError::Failed);
        }
        if self.syntax_error_rule == Some(rule) {
            return Err(ActionError::SyntaxError);
        }
        self.reduced.push(rule);
        Ok(rhs.iter().sum())
    }

    fn report_error(&mut self, state: usize, token: i32, depth: usize, message: &str) -> bool {
        log::info!("error in state {} on {} at depth {}: {}", state, token, depth, message);
        self.reports.push(message.to_string());
        !self.refuse_recovery
    }
}
