//! Operand predicates used by [`Matcher`](crate::Matcher).
//!
//! A predicate is a plain `Fn(&NodeRef) -> bool`. Predicates answer `false`
//! for operands that lack whatever they look for (wrong variant, no shape,
//! ...); they never fail.

use std::rc::Rc;

use graft_ir::{NodeRef, Primitive, Shape, Value};

/// Shared, reusable operand test.
pub type Predicate = Rc<dyn Fn(&NodeRef) -> bool>;

/// Wrap a closure as a [`Predicate`].
pub fn predicate(f: impl Fn(&NodeRef) -> bool + 'static) -> Predicate {
    Rc::new(f)
}

/// Accepts every operand. Used as a placeholder in predicate lists.
pub fn any_node() -> Predicate {
    predicate(|_| true)
}

pub fn is_call() -> Predicate {
    predicate(|node| node.is_call())
}

pub fn is_constant() -> Predicate {
    predicate(|node| node.is_constant())
}

pub fn is_parameter() -> Predicate {
    predicate(|node| node.is_parameter())
}

/// Constant holding an int, float or bool scalar.
pub fn is_scalar_constant() -> Predicate {
    predicate(|node| constant_value(node).is_some_and(Value::is_scalar))
}

/// Numeric constant whose every element is zero.
pub fn is_zero_constant() -> Predicate {
    predicate(|node| constant_value(node).is_some_and(|v| v.is_numeric_splat(0.0)))
}

/// Numeric constant whose every element is one.
pub fn is_one_constant() -> Predicate {
    predicate(|node| constant_value(node).is_some_and(|v| v.is_numeric_splat(1.0)))
}

/// Operand whose known shape equals `shape`. Unknown shapes never match.
pub fn has_shape(shape: &[i64]) -> Predicate {
    let expected = Shape::from_slice(shape);
    predicate(move |node| node.shape().is_some_and(|s| s == expected))
}

/// Call node whose callee is `op`, with any arguments.
pub fn is_call_to(op: Primitive) -> Predicate {
    predicate(move |node| {
        node.as_call()
            .and_then(|call| call.primitive())
            .is_some_and(|prim| *prim == op)
    })
}

pub fn not(inner: Predicate) -> Predicate {
    predicate(move |node| !inner(node))
}

/// All of `preds` hold, checked in order and stopping at the first failure.
pub fn all_of(preds: Vec<Predicate>) -> Predicate {
    predicate(move |node| preds.iter().all(|p| p(node)))
}

/// At least one of `preds` holds, checked in order.
pub fn any_of(preds: Vec<Predicate>) -> Predicate {
    predicate(move |node| preds.iter().any(|p| p(node)))
}

fn constant_value(node: &NodeRef) -> Option<&Value> {
    node.as_constant().map(|c| c.value())
}
