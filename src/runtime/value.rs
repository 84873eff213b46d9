use std::fmt;
use std::sync::Arc;

use crate::ast::{BlockStatement, FunctionLiteral, Identifier};
use crate::error::{Error, Result};
use crate::runtime::Environment;

/// Canonical null value
pub const NULL: Object = Object::Null;
/// Canonical `true`
pub const TRUE: Object = Object::Boolean(true);
/// Canonical `false`
pub const FALSE: Object = Object::Boolean(false);

/// Variant kind of an [`Object`], rendered in upper case in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// `INTEGER`
    Integer,
    /// `BOOLEAN`
    Boolean,
    /// `NULL`
    Null,
    /// `RETURN_VALUE`
    ReturnValue,
    /// `ERROR`
    Error,
    /// `FUNCTION`
    Function,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
        };
        write!(f, "{}", name)
    }
}

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Object {
    /// 64-bit signed integer
    Integer(i64),
    /// Boolean; only the canonical [`TRUE`] and [`FALSE`] exist
    Boolean(bool),
    /// Absence of a value; only the canonical [`NULL`] exists
    Null,
    /// Carrier for `return`, unwrapped at the call or program boundary
    ReturnValue(Box<Object>),
    /// Runtime failure, propagated as a value
    Error(String),
    /// Closure over the environment active at its definition
    Function(Arc<Function>),
}

/// User-defined function value
///
/// The captured environment is held by a strong [`Arc`]. A function bound
/// into the scope it captures (`let f = fn(...) {...}` at any level) forms a
/// reference cycle, so that scope and everything reachable from it is never
/// freed. Long-lived hosts that evaluate many such programs should expect
/// memory to grow with each one.
pub struct Function {
    /// Literal this closure was created from, shared with sibling closures
    pub literal: Arc<FunctionLiteral>,
    /// Environment active where the literal was evaluated
    pub env: Arc<Environment>,
}

impl Function {
    /// Parameter names in positional order
    pub fn parameters(&self) -> &[Identifier] {
        &self.literal.parameters
    }

    /// Function body
    pub fn body(&self) -> &BlockStatement {
        &self.literal.body
    }
}

// The captured environment can hold this very function, so Debug must not
// walk into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("literal", &self.literal.to_string())
            .finish_non_exhaustive()
    }
}

impl Object {
    /// Returns the canonical boolean for `value`
    pub fn native_bool(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    /// Creates an error object
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    /// Creates a closure over `env`
    pub fn function(literal: Arc<FunctionLiteral>, env: Arc<Environment>) -> Self {
        Object::Function(Arc::new(Function { literal, env }))
    }

    /// Returns the variant kind
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
        }
    }

    /// Returns true if the value is an error object
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Truthiness: `null` and `false` are falsy, every other value (including 0) is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null => false,
            Object::Boolean(b) => *b,
            Object::Integer(_)
            | Object::ReturnValue(_)
            | Object::Error(_)
            | Object::Function(_) => true,
        }
    }

    /// Identity comparison used by `==` and `!=` outside integer arithmetic.
    ///
    /// Null and booleans only exist as canonical instances, so comparing
    /// their discriminants is comparing identity. Functions compare by
    /// reference. Every other pairing names two distinct allocations.
    pub fn is_identical(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Null, Object::Null) => true,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Strips one `ReturnValue` wrapper, if present
    pub fn unwrap_return(self) -> Self {
        match self {
            Object::ReturnValue(inner) => *inner,
            other => other,
        }
    }

    /// Textual rendering of the value
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Converts a finished evaluation into a host result
    pub fn into_result(self) -> Result<Object> {
        match self {
            Object::Error(message) => Err(Error::Runtime { message }),
            Object::ReturnValue(_) => Err(Error::ReturnOutsideFunction),
            other => Ok(other),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(inner) => write!(f, "{}", inner),
            Object::Error(message) => write!(f, "ERROR {}", message),
            Object::Function(func) => {
                write!(f, "fn(")?;
                for (i, param) in func.parameters().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {{\n{}\n}}", func.body())
            }
        }
    }
}

// Structural equality for assertions. The language's own `==` goes through
// integer comparison and `is_identical`.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
