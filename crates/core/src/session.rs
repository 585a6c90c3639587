//! Evaluation sessions
//!
//! A [`Session`] owns everything one evaluation context needs: the
//! dictionary, the data stack, and the input/output streams that `stdin` and
//! `print` use. The stack persists across calls, so words defined and values
//! pushed by one line are visible to the next.
//!
//! ```rust
//! use calc::{Session, Value};
//!
//! let mut session = Session::new().unwrap();
//! session.load(",cube { dup dup mul mul } def").unwrap();
//! let stack = session.evaluate_line("3 cube").unwrap();
//! assert_eq!(stack, &[Value::Number(27.0)]);
//! ```

use crate::config::EngineConfig;
use crate::dictionary::Dictionary;
use crate::error::EvalResult;
use crate::prelude::PRELUDE;
use crate::reader::tokenize;
use crate::stack::Stack;
use crate::value::Value;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub struct Session {
    pub(crate) dict: Dictionary,
    pub(crate) stack: Stack,
    /// Stacks set aside by open `[ ... ]` scopes, innermost last
    pub(crate) enclosing: Vec<Stack>,
    /// Current nesting of user words and combinator bodies
    pub(crate) depth: usize,
    pub(crate) config: EngineConfig,
    pub(crate) input: Box<dyn BufRead>,
    pub(crate) output: Box<dyn Write>,
}

impl Session {
    /// A session on the process streams with the prelude loaded
    pub fn new() -> EvalResult<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// A session on the process streams
    pub fn with_config(config: EngineConfig) -> EvalResult<Self> {
        Self::with_io(config, io::BufReader::new(io::stdin()), io::stdout())
    }

    /// A session reading `stdin` from `input` and printing to `output`
    pub fn with_io(
        config: EngineConfig,
        input: impl BufRead + 'static,
        output: impl Write + 'static,
    ) -> EvalResult<Self> {
        let load_prelude = config.load_prelude;
        let mut session = Session {
            dict: Dictionary::new(),
            stack: Stack::new(),
            enclosing: Vec::new(),
            depth: 0,
            config,
            input: Box::new(input),
            output: Box::new(output),
        };
        if load_prelude {
            debug!("loading prelude");
            session.load(PRELUDE)?;
        }
        Ok(session)
    }

    /// Primitives only: no prelude, no input, output discarded
    pub fn bare() -> Self {
        Session {
            dict: Dictionary::new(),
            stack: Stack::new(),
            enclosing: Vec::new(),
            depth: 0,
            config: EngineConfig::default().with_prelude(false),
            input: Box::new(io::empty()),
            output: Box::new(io::sink()),
        }
    }

    /// Parse and evaluate a block of definitions and expressions
    pub fn load(&mut self, source: &str) -> EvalResult<()> {
        let tokens = tokenize(source)?;
        self.depth = 0;
        self.run(&tokens)
    }

    /// Evaluate one line and return the resulting stack, bottom to top.
    ///
    /// On error, whatever the line did to the stack before failing stays.
    pub fn evaluate_line(&mut self, source: &str) -> EvalResult<&[Value]> {
        self.load(source)?;
        Ok(self.stack.as_slice())
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn top(&self) -> Option<&Value> {
        self.stack.top()
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Bound names, sorted, each with the aliases made from it
    pub fn words(&self) -> Vec<(String, Vec<String>)> {
        self.dict.words()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stack", &self.stack)
            .field("words", &self.dict.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
