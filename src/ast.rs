//! Syntax tree consumed by the evaluator
//!
//! Trees are built by an external parser (or by the constructor helpers
//! below) and are never mutated by the runtime. Function literals sit
//! behind an [`Arc`] so every closure created from the same literal shares
//! one parameter list and body.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Complete program: an ordered sequence of top-level statements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a program from its statements
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }

    /// Decodes a program from its JSON interchange form
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Encodes the program into its JSON interchange form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        /// Name being bound
        name: Identifier,
        /// Bound expression
        value: Expression,
    },

    /// `return <value>;`
    Return {
        /// Returned expression
        value: Expression,
    },

    /// Expression evaluated for its value
    Expression(Expression),
}

impl Statement {
    /// `let name = value;`
    pub fn let_(name: impl Into<String>, value: Expression) -> Self {
        Statement::Let {
            name: Identifier::new(name),
            value,
        }
    }

    /// `return value;`
    pub fn return_(value: Expression) -> Self {
        Statement::Return { value }
    }

    /// Expression statement
    pub fn expression(expr: Expression) -> Self {
        Statement::Expression(expr)
    }
}

/// Braced sequence of statements (if branches and function bodies)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStatement {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    /// Creates a block from its statements
    pub fn new(statements: Vec<Statement>) -> Self {
        BlockStatement { statements }
    }
}

/// Variable name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier {
    /// The name as written in source
    pub name: String,
}

impl Identifier {
    /// Creates an identifier
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    /// `!x` logical negation
    #[serde(rename = "!")]
    Bang,
    /// `-x` arithmetic negation
    #[serde(rename = "-")]
    Minus,
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfixOperator {
    /// `+`
    #[serde(rename = "+")]
    Plus,
    /// `-`
    #[serde(rename = "-")]
    Minus,
    /// `*`
    #[serde(rename = "*")]
    Asterisk,
    /// `/`
    #[serde(rename = "/")]
    Slash,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    NotEq,
}

impl InfixOperator {
    /// Source symbol for the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        }
    }
}

impl PrefixOperator {
    /// Source symbol for the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        }
    }
}

/// Function literal: `fn(<params>) { <body> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    /// Parameter names in positional order
    pub parameters: Vec<Identifier>,
    /// Function body
    pub body: BlockStatement,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Variable reference
    Identifier(Identifier),

    /// 64-bit signed integer literal
    IntegerLiteral(i64),

    /// `true` / `false`
    Boolean(bool),

    /// `<op><right>`
    Prefix {
        /// Prefix operator
        operator: PrefixOperator,
        /// Operand
        right: Box<Expression>,
    },

    /// `<left> <op> <right>`
    Infix {
        /// Left operand
        left: Box<Expression>,
        /// Infix operator
        operator: InfixOperator,
        /// Right operand
        right: Box<Expression>,
    },

    /// `if (<condition>) { ... } else { ... }`
    If {
        /// Condition expression
        condition: Box<Expression>,
        /// Block evaluated when the condition is truthy
        consequence: BlockStatement,
        /// Optional block evaluated otherwise
        alternative: Option<BlockStatement>,
    },

    /// Function literal, shared by every closure created from it
    Function(Arc<FunctionLiteral>),

    /// `<function>(<arguments>)`
    Call {
        /// Callee expression
        function: Box<Expression>,
        /// Arguments, evaluated left to right
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Identifier reference
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    /// Integer literal
    pub fn int(value: i64) -> Self {
        Expression::IntegerLiteral(value)
    }

    /// Boolean literal
    pub fn boolean(value: bool) -> Self {
        Expression::Boolean(value)
    }

    /// Prefix expression
    pub fn prefix(operator: PrefixOperator, right: Expression) -> Self {
        Expression::Prefix {
            operator,
            right: Box::new(right),
        }
    }

    /// Infix expression
    pub fn infix(left: Expression, operator: InfixOperator, right: Expression) -> Self {
        Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// If expression with an optional alternative
    pub fn if_(
        condition: Expression,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    ) -> Self {
        Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        }
    }

    /// Function literal
    pub fn function<I, S>(parameters: I, body: BlockStatement) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Function(Arc::new(FunctionLiteral {
            parameters: parameters.into_iter().map(Identifier::new).collect(),
            body,
        }))
    }

    /// Call expression
    pub fn call(function: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            function: Box::new(function),
            arguments,
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return { value } => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fn(")?;
        write_joined(f, &self.parameters)?;
        write!(f, ") {{ {}}}", self.body)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(n) => write!(f, "{}", n),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else{}", alt)?;
                }
                Ok(())
            }
            Expression::Function(literal) => write!(f, "{}", literal),
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_joined(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}
