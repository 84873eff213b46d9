//! # mon-runtime - runtime core of the mon scripting language
//!
//! mon is a small expression-oriented language with let-bindings,
//! conditionals, first-class functions with lexical closures and
//! integer/boolean arithmetic. This crate holds the part that gives the
//! language its meaning:
//!
//! - [`ast`] - the syntax tree the evaluator consumes (built by an external
//!   parser, by the constructor helpers, or decoded from JSON)
//! - [`Object`] - the closed set of runtime values
//! - [`Environment`] - the lexically scoped chain of name bindings
//! - [`Evaluator`] - the recursive tree-walking evaluator
//!
//! Tokenizing and parsing source text, and printing the result, are left to
//! the host program.
//!
//! ## Basic Usage
//!
//! ```rust
//! use mon_runtime::ast::{BlockStatement, Expression, InfixOperator, Program, Statement};
//! use mon_runtime::{Environment, Evaluator, Object};
//!
//! // let add = fn(x, y) { x + y; }; add(2, 3);
//! let program = Program::new(vec![
//!     Statement::let_(
//!         "add",
//!         Expression::function(
//!             ["x", "y"],
//!             BlockStatement::new(vec![Statement::expression(Expression::infix(
//!                 Expression::ident("x"),
//!                 InfixOperator::Plus,
//!                 Expression::ident("y"),
//!             ))]),
//!         ),
//!     ),
//!     Statement::expression(Expression::call(
//!         Expression::ident("add"),
//!         vec![Expression::int(2), Expression::int(3)],
//!     )),
//! ]);
//!
//! let env = Environment::new();
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.execute(&program, &env);
//!
//! assert_eq!(result, Object::Integer(5));
//! assert_eq!(result.inspect(), "5");
//! ```
//!
//! ## Errors Are Values
//!
//! Runtime failures never panic and never surface as Rust errors during
//! evaluation. They are [`Object::Error`] values that stop the enclosing
//! construct and become the program's result:
//!
//! ```rust
//! use mon_runtime::ast::{Expression, InfixOperator, Program, Statement};
//! use mon_runtime::eval_program;
//!
//! let program = Program::new(vec![
//!     Statement::expression(Expression::infix(
//!         Expression::int(5),
//!         InfixOperator::Plus,
//!         Expression::boolean(true),
//!     )),
//!     Statement::expression(Expression::int(10)),
//! ]);
//!
//! let result = eval_program(&program);
//! assert_eq!(result.inspect(), "ERROR type mismatch: INTEGER + BOOLEAN");
//! assert!(result.into_result().is_err());
//! ```
//!
//! ## Configuration
//!
//! [`EvaluatorConfig`] bounds call depth and picks the arity policy; it can
//! be loaded from JSON:
//!
//! ```rust
//! use mon_runtime::{ArityPolicy, EvaluatorConfig, Evaluator};
//!
//! let config = EvaluatorConfig::from_json(r#"{"max_call_depth": 64, "arity": "lenient"}"#)?;
//! assert_eq!(config.arity, ArityPolicy::Lenient);
//! let evaluator = Evaluator::with_config(config);
//! # Ok::<(), mon_runtime::Error>(())
//! ```

/// Version of the mon runtime
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod config;
pub mod error;
pub mod runtime;

// Re-export main types
pub use ast::{Expression, Program, Statement};
pub use config::{ArityPolicy, EvaluatorConfig};
pub use error::{Error, Result};
pub use runtime::{eval_program, Environment, Evaluator, Object, ObjectType, FALSE, NULL, TRUE};
