use std::sync::Arc;

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::config::{ArityPolicy, EvaluatorConfig};
use crate::runtime::{Environment, Function, Object, NULL};

/// Tree-walking evaluator
///
/// Maps every node to exactly one [`Object`]. Runtime failures are
/// [`Object::Error`] values: each composite node checks its sub-results and
/// hands the first error upward without evaluating anything after it.
///
/// - Programs unwrap a `return` as soon as one is produced.
/// - Blocks pass `return` and errors upward still wrapped, so a `return`
///   nested in any number of blocks reaches the enclosing call, which
///   unwraps it exactly once.
/// - Calls resolve names in a fresh scope enclosing the function's captured
///   environment, never the caller's.
#[derive(Debug, Default)]
pub struct Evaluator {
    /// Limits and policies
    config: EvaluatorConfig,
    /// Number of function applications currently in progress
    depth: usize,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with a custom configuration
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Evaluator { config, depth: 0 }
    }

    /// Active configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates a whole program in `env`
    ///
    /// A top-level `return` ends the program with its inner value; an error
    /// ends it with the error. An empty program evaluates to `null`.
    ///
    /// The result is always an [`Object`], so a host cannot tell a program
    /// that produced nothing apart from one whose last value is `null`.
    pub fn execute(&mut self, program: &Program, env: &Arc<Environment>) -> Object {
        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement, env);

            match result {
                Object::ReturnValue(value) => return *value,
                Object::Error(_) => return result,
                _ => {}
            }
        }

        result
    }

    /// Evaluates a block, leaving `return` wrappers in place
    pub fn eval_block(&mut self, block: &BlockStatement, env: &Arc<Environment>) -> Object {
        let mut result = NULL;

        for statement in &block.statements {
            result = self.eval_statement(statement, env);

            if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }

        result
    }

    /// Evaluate a statement
    pub fn eval_statement(&mut self, stmt: &Statement, env: &Arc<Environment>) -> Object {
        match stmt {
            Statement::Let { name, value } => {
                let val = self.eval_expression(value, env);
                if val.is_error() {
                    return val;
                }
                env.set(name.name.clone(), val.clone());
                val
            }

            Statement::Return { value } => {
                let val = self.eval_expression(value, env);
                if val.is_error() {
                    return val;
                }
                Object::ReturnValue(Box::new(val))
            }

            Statement::Expression(expr) => self.eval_expression(expr, env),
        }
    }

    /// Evaluate an expression
    pub fn eval_expression(&mut self, expr: &Expression, env: &Arc<Environment>) -> Object {
        match expr {
            Expression::IntegerLiteral(n) => Object::Integer(*n),

            Expression::Boolean(b) => Object::native_bool(*b),

            Expression::Identifier(ident) => eval_identifier(ident, env),

            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix(*operator, right)
            }

            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix(*operator, left, right)
            }

            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expression(condition, env);
                if condition.is_error() {
                    return condition;
                }

                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt, env)
                } else {
                    NULL
                }
            }

            Expression::Function(literal) => Object::function(Arc::clone(literal), Arc::clone(env)),

            Expression::Call {
                function,
                arguments,
            } => {
                let callee = self.eval_expression(function, env);
                if callee.is_error() {
                    return callee;
                }

                let args = match self.eval_arguments(arguments, env) {
                    Ok(args) => args,
                    Err(err) => return err,
                };

                self.apply_function(callee, args)
            }
        }
    }

    /// Evaluates arguments left to right, stopping at the first error
    fn eval_arguments(
        &mut self,
        arguments: &[Expression],
        env: &Arc<Environment>,
    ) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(arguments.len());

        for arg in arguments {
            let val = self.eval_expression(arg, env);
            if val.is_error() {
                return Err(val);
            }
            values.push(val);
        }

        Ok(values)
    }

    /// Calls `callee` with already-evaluated arguments
    pub fn apply_function(&mut self, callee: Object, args: Vec<Object>) -> Object {
        let function = match callee {
            Object::Function(function) => function,
            other => return new_error(format!("not a function: {}", other.object_type())),
        };

        let arity = function.parameters().len();
        if self.config.arity == ArityPolicy::Strict && arity != args.len() {
            return new_error(format!(
                "wrong number of arguments: want={}, got={}",
                arity,
                args.len()
            ));
        }

        if let Some(limit) = self.config.max_call_depth {
            if self.depth >= limit {
                tracing::warn!(limit, "call depth limit reached");
                return new_error(format!("maximum call depth exceeded: {}", limit));
            }
        }

        tracing::trace!(arity, depth = self.depth + 1, "applying function");

        let call_env = extend_function_env(&function, args);

        self.depth += 1;
        let evaluated = self.eval_block(function.body(), &call_env);
        self.depth -= 1;

        evaluated.unwrap_return()
    }
}

/// Evaluates `program` in a fresh global scope with the default configuration
pub fn eval_program(program: &Program) -> Object {
    Evaluator::new().execute(program, &Environment::new())
}

/// New scope enclosing the captured environment, parameters bound positionally
fn extend_function_env(function: &Function, args: Vec<Object>) -> Arc<Environment> {
    let env = Environment::new_enclosed(&function.env);

    for (param, arg) in function.parameters().iter().zip(args) {
        env.set(param.name.clone(), arg);
    }

    env
}

fn eval_identifier(ident: &Identifier, env: &Environment) -> Object {
    match env.get(&ident.name) {
        Some(val) => val,
        None => new_error(format!("identifier not found: {}", ident.name)),
    }
}

fn eval_prefix(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::Bang => Object::native_bool(!right.is_truthy()),
        PrefixOperator::Minus => match right {
            Object::Integer(n) => Object::Integer(n.wrapping_neg()),
            other => new_error(format!("unknown operator: -{}", other.object_type())),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: Object, right: Object) -> Object {
    if let (Object::Integer(l), Object::Integer(r)) = (&left, &right) {
        return eval_integer_infix(operator, *l, *r);
    }

    let (ltype, rtype) = (left.object_type(), right.object_type());
    match operator {
        InfixOperator::Eq => Object::native_bool(left.is_identical(&right)),
        InfixOperator::NotEq => Object::native_bool(!left.is_identical(&right)),
        _ if ltype != rtype => {
            new_error(format!("type mismatch: {} {} {}", ltype, operator, rtype))
        }
        _ => new_error(format!("unknown operator: {} {} {}", ltype, operator, rtype)),
    }
}

fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Object {
    match operator {
        InfixOperator::Plus => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Minus => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Slash => {
            if right == 0 {
                return new_error(format!("division by zero: {} / {}", left, right));
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOperator::Lt => Object::native_bool(left < right),
        InfixOperator::Gt => Object::native_bool(left > right),
        InfixOperator::Eq => Object::native_bool(left == right),
        InfixOperator::NotEq => Object::native_bool(left != right),
    }
}

fn new_error(message: String) -> Object {
    tracing::debug!(%message, "runtime error");
    Object::Error(message)
}
