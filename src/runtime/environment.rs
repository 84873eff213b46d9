use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::runtime::Object;

/// Lexical scope: a name-to-value map linked to the scope it was created in
///
/// Scopes are shared through [`Arc`] because closures keep their defining
/// scope alive. The outer link is fixed at construction, so a chain can only
/// point at scopes that already existed and never forms a cycle.
pub struct Environment {
    /// Variables bound in this scope
    store: RwLock<HashMap<String, Object>>,
    /// Enclosing scope (None for the global scope)
    outer: Option<Arc<Environment>>,
}

impl Environment {
    /// Creates a new global scope
    pub fn new() -> Arc<Self> {
        Arc::new(Environment {
            store: RwLock::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a scope whose lookups fall back to `outer`
    pub fn new_enclosed(outer: &Arc<Environment>) -> Arc<Self> {
        Arc::new(Environment {
            store: RwLock::new(HashMap::new()),
            outer: Some(Arc::clone(outer)),
        })
    }

    /// Looks up `name` from this scope outward, stopping at the first binding
    pub fn get(&self, name: &str) -> Option<Object> {
        let mut scope = self;
        loop {
            if let Some(val) = scope.store.read().get(name) {
                return Some(val.clone());
            }
            match &scope.outer {
                Some(outer) => scope = &**outer,
                None => return None,
            }
        }
    }

    /// Binds or rebinds `name` in this scope only; outer scopes are never touched
    pub fn set(&self, name: impl Into<String>, value: Object) {
        self.store.write().insert(name.into(), value);
    }

    /// Checks if a name resolves anywhere in the chain
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of scopes in the chain (1 for the global scope)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self;
        while let Some(outer) = &scope.outer {
            depth += 1;
            scope = &**outer;
        }
        depth
    }

    /// Enclosing scope, if any
    pub fn outer(&self) -> Option<&Arc<Environment>> {
        self.outer.as_ref()
    }
}

// Bindings may contain closures that capture this scope; print names only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<String> = self.store.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{FALSE, TRUE};

    #[test]
    fn test_basic_set_and_get() {
        let env = Environment::new();
        env.set("x", Object::Integer(42));

        assert_eq!(env.get("x"), Some(Object::Integer(42)));
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        assert_eq!(env.get("undefined"), None);
        assert!(!env.exists("undefined"));
    }

    #[test]
    fn test_lookup_walks_outward() {
        let global = Environment::new();
        global.set("x", Object::Integer(1));

        let middle = Environment::new_enclosed(&global);
        middle.set("y", Object::Integer(2));

        let inner = Environment::new_enclosed(&middle);
        inner.set("z", Object::Integer(3));

        assert_eq!(inner.get("x"), Some(Object::Integer(1)));
        assert_eq!(inner.get("y"), Some(Object::Integer(2)));
        assert_eq!(inner.get("z"), Some(Object::Integer(3)));
        assert_eq!(middle.get("z"), None);
        assert_eq!(global.get("y"), None);
    }

    #[test]
    fn test_shadowing_stops_at_first_binding() {
        let global = Environment::new();
        global.set("x", TRUE);

        let inner = Environment::new_enclosed(&global);
        inner.set("x", FALSE);

        assert_eq!(inner.get("x"), Some(FALSE));
        assert_eq!(global.get("x"), Some(TRUE));
    }

    #[test]
    fn test_set_never_mutates_outer_scope() {
        let global = Environment::new();
        global.set("x", Object::Integer(10));

        let inner = Environment::new_enclosed(&global);
        inner.set("x", Object::Integer(20));

        assert_eq!(global.get("x"), Some(Object::Integer(10)));
        assert_eq!(inner.get("x"), Some(Object::Integer(20)));
    }

    #[test]
    fn test_rebinding_in_same_scope() {
        let env = Environment::new();
        env.set("x", Object::Integer(10));
        env.set("x", Object::Integer(11));
        assert_eq!(env.get("x"), Some(Object::Integer(11)));
    }

    #[test]
    fn test_depth_and_outer() {
        let global = Environment::new();
        assert_eq!(global.depth(), 1);
        assert!(global.outer().is_none());

        let inner = Environment::new_enclosed(&global);
        let innermost = Environment::new_enclosed(&inner);
        assert_eq!(innermost.depth(), 3);
        assert!(Arc::ptr_eq(innermost.outer().unwrap(), &inner));
    }

    #[test]
    fn test_enclosed_scope_keeps_outer_alive() {
        let inner = {
            let global = Environment::new();
            global.set("kept", Object::Integer(9));
            Environment::new_enclosed(&global)
        };
        assert_eq!(inner.get("kept"), Some(Object::Integer(9)));
    }
}
