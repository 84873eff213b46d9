//! Runtime execution for mon programs: object model, environments and the evaluator

mod environment;
mod evaluator;
mod value;

pub use environment::Environment;
pub use evaluator::{eval_program, Evaluator};
pub use value::{Function, Object, ObjectType, FALSE, NULL, TRUE};
