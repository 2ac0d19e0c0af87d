//! Adds and subtracts, one statement per `;`:
//!
//! ```text
//! 0: $accept -> list
//! 1: list -> list stmt
//! 2: list -> stmt
//! 3: stmt -> expr ';'
//! 4: expr -> expr '+' num
//! 5: expr -> expr '-' num
//! 6: expr -> num
//! ```
//!
//! Usage: `stx_test [--tokens] [--verbose] [input...]`

use log::{error, info};
use std::str::Chars;
use stx_runtime::{
    dump_tokens, ActionError, DfaTables, LexerMode, Parser, ParserOptions, PushbackChars,
    RegexScanner, SemanticActions, SymbolCatalog, TableFile, TokenRule,
};

const NUM: i32 = 257;

// Start vertices in the table file's DFA.
const NUMBER_VERTEX: usize = 0;
const BLANK_VERTEX: usize = 2;

struct Calculator {
    results: Vec<i64>,
}

fn number(text: &str) -> Result<i64, ActionError> {
    text.parse().map_err(|_| ActionError::Failed)
}

impl SemanticActions<String> for Calculator {
    fn reduce(&mut self, rule: usize, rhs: &mut [String]) -> Result<String, ActionError> {
        match rule {
            3 => {
                let value = number(&rhs[0])?;
                println!("= {}", value);
                self.results.push(value);
                Ok(String::new())
            }
            4 => Ok((number(&rhs[0])? + number(&rhs[2])?).to_string()),
            5 => Ok((number(&rhs[0])? - number(&rhs[2])?).to_string()),
            6 => Ok(std::mem::take(&mut rhs[0])),
            _ => Ok(String::new()),
        }
    }

    fn report_error(&mut self, state: usize, token: i32, depth: usize, message: &str) -> bool {
        println!("error: {}", message);
        info!("state {}, token {}, depth {}", state, token, depth);
        true
    }
}

fn scanner<'a>(
    dfa: &'a DfaTables,
    catalog: &'a SymbolCatalog,
    mode: &LexerMode,
    text: &'a str,
) -> RegexScanner<'a, PushbackChars<Chars<'a>>> {
    let mut scanner = RegexScanner::new(dfa, catalog, PushbackChars::new(text.chars()));
    scanner.add_mode(mode.clone());
    scanner
}

fn main() {
    env_logger::init();

    let mut show_tokens = false;
    let mut verbose = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tokens" => show_tokens = true,
            "--verbose" => verbose = true,
            _ => words.push(arg),
        }
    }
    let input = if words.is_empty() {
        "1 + 2; 10 - 4 - 3; 7 + ; 5;".to_string()
    } else {
        words.join(" ")
    };

    let file = match TableFile::from_json_str(include_str!("../calc.json")) {
        Ok(file) => file,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    let (tables, dfa) = match (file.parser_tables(), file.dfa_tables()) {
        (Ok(tables), Ok(Some(dfa))) => (tables, dfa),
        (Err(e), _) | (_, Err(e)) => {
            error!("{}", e);
            std::process::exit(2);
        }
        (Ok(_), Ok(None)) => {
            error!("calc.json has no scanner tables");
            std::process::exit(2);
        }
    };

    let mode = LexerMode::new(
        "main",
        vec![
            TokenRule::skip(BLANK_VERTEX),
            TokenRule::token(NUMBER_VERTEX, NUM),
        ],
    );

    if show_tokens {
        let mut tokens = scanner(&dfa, tables.catalog(), &mode, &input);
        for line in dump_tokens::<String, _>(&mut tokens, tables.catalog()) {
            println!("{}", line);
        }
    }

    let mut calculator = Calculator {
        results: Vec::new(),
    };
    let mut parser = Parser::<String>::new(&tables, ParserOptions::default().verbose(verbose));
    let mut tokens = scanner(&dfa, tables.catalog(), &mode, &input);
    match parser.run(&mut calculator, &mut tokens) {
        Ok(()) => println!(
            "{} statement(s), {} error(s)",
            calculator.results.len(),
            parser.error_count()
        ),
        Err(e) => {
            println!("parse failed: {}", e);
            std::process::exit(1);
        }
    }
}
