use crate::tables::Encoding;
use serde::{Deserialize, Serialize};

/// Per-session parser settings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Trace every shift, reduce and recovery step, with stack contents, at `debug` level.
    pub verbose: bool,

    /// Panic-mode recovery. `None` uses the encoding's default: on for tabular tables, off for
    /// packed tables.
    pub recovery: Option<bool>,
}

impl ParserOptions {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_recovery(mut self, recovery: bool) -> Self {
        self.recovery = Some(recovery);
        self
    }

    pub fn recovery_enabled(&self, encoding: Encoding) -> bool {
        self.recovery.unwrap_or(encoding == Encoding::Tabular)
    }
}
