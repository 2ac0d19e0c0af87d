//! The shift-reduce driver.

use crate::error::ParseError;
use crate::options::ParserOptions;
use crate::recovery::{Recovered, RecoveryPhase};
use crate::scanner::TokenSource;
use crate::stack::ParserStack;
use crate::tables::{Action, ParserTables};
use log::{debug, warn};
use std::fmt::Debug;
use thiserror::Error;

/// Outcome of a token that the parser accepted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Parsed {
    /// The input is complete; [`Parser::result`] holds the value of the start symbol.
    Accepted,
    /// The token was shifted; supply the next one.
    Shifted,
}

/// Returned by a semantic action to stop the reduction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ActionError {
    /// Abandon the parse.
    #[error("semantic action failed")]
    Failed,
    /// Treat the current lookahead as a syntax error.
    #[error("semantic action raised a syntax error")]
    SyntaxError,
}

/// The code a generated parser attaches to its grammar.
pub trait SemanticActions<V> {
    /// Called once per reduction of `rule`, before its frames are popped. `rhs` holds the values
    /// of the right-hand side, leftmost first; the returned value is pushed for the left-hand
    /// nonterminal. Values may be moved out of `rhs`.
    fn reduce(&mut self, rule: usize, rhs: &mut [V]) -> Result<V, ActionError>;

    /// Called for a syntax error, with the number of live frames above the start frame.
    /// Returning `false` stops recovery.
    fn report_error(&mut self, state: usize, token: i32, depth: usize, message: &str) -> bool {
        warn!("{} (state {}, token {}, depth {})", message, state, token, depth);
        true
    }
}

/// One parse session: the stacks and recovery state over a borrowed table set.
pub struct Parser<'t, V> {
    pub(crate) tables: &'t ParserTables,
    pub(crate) options: ParserOptions,
    pub(crate) recovery: bool,
    pub(crate) stack: ParserStack<V>,
    pub(crate) phase: RecoveryPhase,
    pub(crate) error_count: usize,
}

impl<'t, V: Default + Debug> Parser<'t, V> {
    pub fn new(tables: &'t ParserTables, options: ParserOptions) -> Parser<'t, V> {
        let recovery = options.recovery_enabled(tables.encoding());
        Parser {
            tables,
            options,
            recovery,
            stack: ParserStack::new(tables.stack_depth()),
            phase: RecoveryPhase::FirstError,
            error_count: 0,
        }
    }

    /// Resets the session to the start state.
    pub fn init(&mut self) {
        self.stack.reset();
        self.phase = RecoveryPhase::FirstError;
        self.error_count = 0;
        if self.options.verbose {
            debug!("starting to parse");
            self.dump_stack();
        }
    }

    /// Feeds one token.
    ///
    /// Runs every reduction the lookahead triggers, then shifts it or accepts. A syntax error
    /// with recovery enabled first tries to resynchronize; on success the same token is retried,
    /// so the result describes what finally happened to it.
    pub fn parse<A: SemanticActions<V>>(
        &mut self,
        actions: &mut A,
        token: i32,
        value: V,
    ) -> Result<Parsed, ParseError> {
        if self.options.verbose {
            debug!(
                "state {}, reading {} ({}) value {:?}",
                self.stack.state(),
                token,
                self.tables.catalog().name(token),
                value
            );
        }
        loop {
            let state = self.stack.state();
            match self.tables.action(state, token) {
                Action::Accept => {
                    if self.options.verbose {
                        debug!("input accepted");
                    }
                    return Ok(Parsed::Accepted);
                }
                Action::Shift(target) => {
                    self.shift(token, target, value)?;
                    self.phase = self.phase.after_shift();
                    return Ok(Parsed::Shifted);
                }
                Action::Reduce(rule) => self.reduce(actions, token, rule)?,
                Action::Error => self.syntax_error(actions, token)?,
            }
        }
    }

    /// Pull mode: resets the session and parses everything `source` produces.
    ///
    /// Tokens discarded by recovery are skipped here; any other error ends the parse.
    pub fn run<A, S>(&mut self, actions: &mut A, source: &mut S) -> Result<(), ParseError>
    where
        A: SemanticActions<V>,
        S: TokenSource<V> + ?Sized,
    {
        self.init();
        loop {
            let (token, value) = source.next_token();
            match self.parse(actions, token, value) {
                Ok(Parsed::Accepted) => return Ok(()),
                Ok(Parsed::Shifted) | Err(ParseError::TokenDropped { .. }) => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Value on top of the stack. After [`Parsed::Accepted`] this is the start symbol's value.
    pub fn result(&self) -> Option<&V> {
        self.stack.top_value()
    }

    pub fn into_result(self) -> Option<V> {
        self.stack.into_top_value()
    }

    pub fn state(&self) -> usize {
        self.stack.state()
    }

    pub fn stack(&self) -> &ParserStack<V> {
        &self.stack
    }

    pub fn tables(&self) -> &'t ParserTables {
        self.tables
    }

    pub fn phase(&self) -> RecoveryPhase {
        self.phase
    }

    /// Number of syntax errors reported since the last [`init`](Parser::init).
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Tokens with a non-error action in the current state.
    pub fn valid_tokens(&self) -> Vec<i32> {
        self.tables.valid_tokens(self.stack.state())
    }

    pub fn recovery_enabled(&self) -> bool {
        self.recovery
    }

    pub fn is_verbose(&self) -> bool {
        self.options.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.options.verbose = verbose;
    }

    pub(crate) fn shift(&mut self, token: i32, target: usize, value: V) -> Result<(), ParseError> {
        if self.stack.push(target, value).is_err() {
            return Err(ParseError::StackOverflow {
                depth: self.stack.depth(),
            });
        }
        if self.options.verbose {
            debug!("shift to {} with {}", target, token);
            self.dump_stack();
        }
        Ok(())
    }

    fn reduce<A: SemanticActions<V>>(
        &mut self,
        actions: &mut A,
        token: i32,
        rule: usize,
    ) -> Result<(), ParseError> {
        if self.options.verbose {
            debug!("reduce on rule {} with symbol {}", rule, token);
        }
        let (symbol, len) = match self.tables.rule(rule) {
            Some(r) => (r.symbol, r.reductions),
            None => return Err(ParseError::Tables(format!("reduce by unknown rule {}", rule))),
        };
        let live = self.stack.top();
        let value = match self.stack.top_values_mut(len) {
            Some(rhs) => actions.reduce(rule, rhs),
            None => {
                return Err(ParseError::Tables(format!(
                    "rule {} pops {} frames, but only {} are live",
                    rule, len, live
                )))
            }
        };
        let value = match value {
            Ok(value) => value,
            Err(ActionError::Failed) => return Err(ParseError::ActionFailed { rule }),
            Err(ActionError::SyntaxError) => return self.syntax_error(actions, token),
        };
        self.stack.discard(len);
        let from = self.stack.state();
        let target = self.tables.goto(from, symbol).ok_or_else(|| {
            ParseError::Tables(format!(
                "no goto from state {} on nonterminal {}",
                from, symbol
            ))
        })?;
        if self.stack.push(target, value).is_err() {
            return Err(ParseError::StackOverflow {
                depth: self.stack.depth(),
            });
        }
        if self.options.verbose {
            self.dump_stack();
        }
        Ok(())
    }

    fn syntax_error<A: SemanticActions<V>>(
        &mut self,
        actions: &mut A,
        token: i32,
    ) -> Result<(), ParseError> {
        if !self.recovery {
            let state = self.stack.state();
            let message = self.error_message(token);
            actions.report_error(state, token, self.stack.top(), &message);
            return Err(ParseError::Syntax {
                state,
                token,
                message,
            });
        }
        match self.recover(actions, token)? {
            Recovered::Resynchronized => Ok(()),
            Recovered::Dropped => Err(ParseError::TokenDropped {
                token,
                name: self.tables.catalog().name(token).into_owned(),
            }),
        }
    }

    fn dump_stack(&self) {
        debug!("states: {:?}  <-- top ({})", self.stack.states(), self.stack.top());
        debug!("values: {:?}", self.stack.values());
    }
}
