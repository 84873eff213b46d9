//! Evaluator configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default bound on nested function applications
///
/// Each application recurses through several evaluator frames. This bound
/// keeps an unoptimised build inside a 2 MiB thread stack, the size used by
/// `std::thread::spawn` and the test harness. Raise it only on threads with
/// a larger stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// How a call treats a mismatch between argument and parameter counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityPolicy {
    /// Mismatched counts produce a `wrong number of arguments` error object
    #[default]
    Strict,
    /// Parameters are bound positionally; extra arguments are dropped and
    /// missing parameters are left unbound
    Lenient,
}

/// Runtime limits and policies for an [`Evaluator`](crate::runtime::Evaluator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Maximum number of nested function applications (`None` = unbounded)
    pub max_call_depth: Option<usize>,
    /// Argument count policy for calls
    pub arity: ArityPolicy,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            arity: ArityPolicy::Strict,
        }
    }
}

impl EvaluatorConfig {
    /// Loads and validates a configuration from JSON; missing fields take defaults
    pub fn from_json(source: &str) -> Result<Self> {
        let config: EvaluatorConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the call-depth bound
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Sets the arity policy
    pub fn with_arity(mut self, arity: ArityPolicy) -> Self {
        self.arity = arity;
        self
    }

    /// Checks that every field holds a usable value
    pub fn validate(&self) -> Result<()> {
        if self.max_call_depth == Some(0) {
            return Err(Error::invalid_config(
                "max_call_depth",
                "must be greater than zero (use null for no limit)",
            ));
        }
        Ok(())
    }
}
