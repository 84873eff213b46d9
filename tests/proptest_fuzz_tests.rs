//! Property-based tests for the evaluator
//!
//! These tests use proptest to generate random operands and verify that:
//! 1. Integer arithmetic matches two's-complement i64 semantics and never panics
//! 2. Every integer, including zero, is truthy
//! 3. Equality on integers is structural while booleans and null are canonical
//! 4. Errors short-circuit regardless of what follows them

use mon_runtime::ast::{
    BlockStatement, Expression as E, InfixOperator as Op, PrefixOperator, Program, Statement as S,
};
use mon_runtime::{eval_program, Object};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

fn arith_op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Plus), Just(Op::Minus), Just(Op::Asterisk), Just(Op::Slash)]
}

fn comparison_op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Lt), Just(Op::Gt), Just(Op::Eq), Just(Op::NotEq)]
}

/// Small arithmetic trees over integer literals
fn arith_expr() -> impl Strategy<Value = E> {
    let leaf = (-1000i64..1000).prop_map(E::int);
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), arith_op(), inner.clone()).prop_map(|(l, op, r)| E::infix(l, op, r)),
            inner.prop_map(|e| E::prefix(PrefixOperator::Minus, e)),
        ]
    })
}

fn run_expr(expr: E) -> Object {
    eval_program(&Program::new(vec![S::expression(expr)]))
}

/// Reference semantics for the generated arithmetic trees
fn reference_eval(expr: &E) -> Option<i64> {
    match expr {
        E::IntegerLiteral(n) => Some(*n),
        E::Prefix { right, .. } => reference_eval(right).map(i64::wrapping_neg),
        E::Infix { left, operator, right } => {
            let l = reference_eval(left)?;
            let r = reference_eval(right)?;
            match operator {
                Op::Plus => Some(l.wrapping_add(r)),
                Op::Minus => Some(l.wrapping_sub(r)),
                Op::Asterisk => Some(l.wrapping_mul(r)),
                Op::Slash if r == 0 => None,
                Op::Slash => Some(l.wrapping_div(r)),
                _ => unreachable!("generator only emits arithmetic operators"),
            }
        }
        _ => unreachable!("generator only emits integer trees"),
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_binary_arithmetic_matches_i64(a in any::<i64>(), b in any::<i64>(), op in arith_op()) {
        let result = run_expr(E::infix(E::int(a), op, E::int(b)));

        let expected = match op {
            Op::Plus => Object::Integer(a.wrapping_add(b)),
            Op::Minus => Object::Integer(a.wrapping_sub(b)),
            Op::Asterisk => Object::Integer(a.wrapping_mul(b)),
            Op::Slash if b == 0 => Object::error(format!("division by zero: {} / 0", a)),
            Op::Slash => Object::Integer(a.wrapping_div(b)),
            _ => unreachable!(),
        };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn prop_comparisons_match_i64(a in any::<i64>(), b in any::<i64>(), op in comparison_op()) {
        let result = run_expr(E::infix(E::int(a), op, E::int(b)));

        let expected = match op {
            Op::Lt => a < b,
            Op::Gt => a > b,
            Op::Eq => a == b,
            Op::NotEq => a != b,
            _ => unreachable!(),
        };
        prop_assert_eq!(result, Object::native_bool(expected));
    }

    #[test]
    fn prop_arithmetic_trees_never_panic(expr in arith_expr()) {
        let expected = reference_eval(&expr);
        let result = run_expr(expr);

        match expected {
            Some(n) => prop_assert_eq!(result, Object::Integer(n)),
            None => prop_assert!(result.is_error()),
        }
    }

    #[test]
    fn prop_every_integer_is_truthy(n in any::<i64>()) {
        let bang = run_expr(E::prefix(PrefixOperator::Bang, E::int(n)));
        prop_assert_eq!(bang, Object::native_bool(false));

        let chosen = run_expr(E::if_(
            E::int(n),
            BlockStatement::new(vec![S::expression(E::int(1))]),
            Some(BlockStatement::new(vec![S::expression(E::int(2))])),
        ));
        prop_assert_eq!(chosen, Object::Integer(1));
    }

    #[test]
    fn prop_integer_equality_is_structural(n in any::<i64>()) {
        let result = run_expr(E::infix(E::int(n), Op::Eq, E::int(n)));
        prop_assert_eq!(result, Object::native_bool(true));
    }

    #[test]
    fn prop_boolean_equality_is_canonical(a in any::<bool>(), b in any::<bool>()) {
        let eq = run_expr(E::infix(E::boolean(a), Op::Eq, E::boolean(b)));
        prop_assert_eq!(eq, Object::native_bool(a == b));

        let ne = run_expr(E::infix(E::boolean(a), Op::NotEq, E::boolean(b)));
        prop_assert_eq!(ne, Object::native_bool(a != b));
    }

    #[test]
    fn prop_error_short_circuits_program(trailing in prop::collection::vec(any::<i64>(), 0..10)) {
        let mut statements = vec![S::expression(E::infix(E::int(5), Op::Plus, E::boolean(true)))];
        statements.extend(trailing.into_iter().map(|n| S::let_("x", E::int(n))));

        let result = eval_program(&Program::new(statements));
        prop_assert_eq!(result, Object::error("type mismatch: INTEGER + BOOLEAN"));
    }

    #[test]
    fn prop_let_then_read_roundtrips(n in any::<i64>(), name in "[a-z][a-z0-9_]{0,10}") {
        let result = eval_program(&Program::new(vec![
            S::let_(name.clone(), E::int(n)),
            S::expression(E::ident(name)),
        ]));
        prop_assert_eq!(result, Object::Integer(n));
    }
}
