//! Syntax error messages and panic-mode recovery.

use crate::driver::{Parser, SemanticActions};
use crate::error::ParseError;
use crate::tables::Action;
use crate::END_OF_INPUT;
use log::debug;
use std::fmt::Debug;

/// Where a session stands with respect to the last syntax error.
///
/// | phase        | on syntax error                                   | after a real shift |
/// |--------------|---------------------------------------------------|--------------------|
/// | `FirstError` | report, count, then resynchronize -> `DropToken`  | `FirstError`       |
/// | `Attempt1`   | resynchronize -> `DropToken`                      | `FirstError`       |
/// | `Attempt2`   | resynchronize -> `DropToken`                      | `Attempt1`         |
/// | `DropToken`  | discard the lookahead (fails at end of input)     | `Attempt2`         |
///
/// Resynchronizing pops frames until some state shifts a recover token, then shifts it. Only
/// errors raised in `FirstError` are reported, so a burst of errors produces one diagnostic
/// until three real tokens have been shifted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecoveryPhase {
    FirstError,
    Attempt1,
    Attempt2,
    DropToken,
}

impl RecoveryPhase {
    pub fn after_shift(self) -> RecoveryPhase {
        match self {
            RecoveryPhase::DropToken => RecoveryPhase::Attempt2,
            RecoveryPhase::Attempt2 => RecoveryPhase::Attempt1,
            RecoveryPhase::Attempt1 | RecoveryPhase::FirstError => RecoveryPhase::FirstError,
        }
    }
}

impl Default for RecoveryPhase {
    fn default() -> Self {
        RecoveryPhase::FirstError
    }
}

/// What recovery did with the lookahead.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Recovered {
    /// A recover token was shifted; retry the same lookahead.
    Resynchronized,
    /// The lookahead was discarded; the caller must supply the next token.
    Dropped,
}

impl<'t, V: Default + Debug> Parser<'t, V> {
    /// Builds the diagnostic for `token` in the current state.
    ///
    /// The state's own message is used if the tables assign one, otherwise a generic one. If a
    /// state on the stack (excluding the start frame) accepts a recover token, that token's full
    /// name becomes the message, with `$m` replaced by the text above.
    pub fn error_message(&self, token: i32) -> String {
        let tables = self.tables;
        let state = self.stack.state();
        let base = match tables.state_message(state) {
            Some(message) => message.to_string(),
            None => format!(
                "Syntax error on state {} with token {}",
                state,
                tables.catalog().name(token)
            ),
        };

        for &frame in self.stack.states()[1..].iter().rev() {
            for &recover in tables.recovers().iter().filter(|&&r| r > 0) {
                if let Action::Shift(_) | Action::Accept = tables.action(frame, recover) {
                    return tables.catalog().full_name(recover).replace("$m", &base);
                }
            }
        }
        base
    }

    /// Handles a syntax error on `token` while recovery is enabled.
    pub(crate) fn recover<A: SemanticActions<V>>(
        &mut self,
        actions: &mut A,
        token: i32,
    ) -> Result<Recovered, ParseError> {
        let state = self.stack.state();
        match self.phase {
            RecoveryPhase::FirstError => {
                let message = self.error_message(token);
                if !actions.report_error(state, token, self.stack.top(), &message) {
                    return Err(ParseError::Aborted {
                        state,
                        token,
                        message,
                    });
                }
                self.error_count += 1;
                self.phase = RecoveryPhase::DropToken;
                self.resynchronize(state, token)
            }
            RecoveryPhase::Attempt1 | RecoveryPhase::Attempt2 => {
                self.phase = RecoveryPhase::DropToken;
                self.resynchronize(state, token)
            }
            RecoveryPhase::DropToken => {
                if self.options.verbose {
                    debug!(
                        "recovery: discarding token {} ({})",
                        token,
                        self.tables.catalog().name(token)
                    );
                }
                if token == END_OF_INPUT {
                    return Err(ParseError::RecoveryFailed { state, token });
                }
                Ok(Recovered::Dropped)
            }
        }
    }

    fn resynchronize(&mut self, state: usize, token: i32) -> Result<Recovered, ParseError> {
        let tables = self.tables;
        loop {
            let top = self.stack.state();
            let shift = tables.recovers().iter().find_map(|&recover| {
                match tables.action(top, recover) {
                    Action::Shift(target) => Some((recover, target)),
                    _ => None,
                }
            });
            if let Some((recover, target)) = shift {
                self.shift(recover, target, V::default())?;
                return Ok(Recovered::Resynchronized);
            }
            match self.stack.pop() {
                Some((removed, _)) => {
                    if self.options.verbose {
                        debug!(
                            "recovery: removing state {} and going to state {}",
                            removed,
                            self.stack.state()
                        );
                    }
                }
                None => break,
            }
        }
        self.stack.reset();
        Err(ParseError::RecoveryFailed { state, token })
    }
}
