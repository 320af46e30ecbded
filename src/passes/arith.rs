//! Arithmetic identities.
//!
//! - `add(x, 0)` → `x`
//! - `sub(x, 0)` → `x`
//! - `mul(x, 1)` → `x`
//! - `neg(neg(x))` → `x`
//!
//! Zero and one are recognized for int, float and splat tensor constants.

use graft_ir::{CallNode, NodeRef};
use graft_rewrite::predicate::{any_node, is_call_to, is_one_constant, is_zero_constant};
use graft_rewrite::{
    Matcher, Optimizer, RewriteError, RewriteResult, RewriteRule, Visitor, build_matcher,
};

use crate::ops;

// =============================================================================
// Neutral element patterns
// =============================================================================

/// `add(x, 0)` → `x`.
#[derive(Debug, Clone)]
pub struct AddZero {
    matcher: Matcher,
}

impl AddZero {
    pub fn new() -> Self {
        Self {
            matcher: build_matcher(ops::add(), [any_node(), is_zero_constant()]),
        }
    }
}

impl Default for AddZero {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteRule for AddZero {
    type Capture = NodeRef;

    fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
        left_operand(&self.matcher, node)
    }

    fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "add_zero"
    }
}

/// `sub(x, 0)` → `x`.
#[derive(Debug, Clone)]
pub struct SubZero {
    matcher: Matcher,
}

impl SubZero {
    pub fn new() -> Self {
        Self {
            matcher: build_matcher(ops::sub(), [any_node(), is_zero_constant()]),
        }
    }
}

impl Default for SubZero {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteRule for SubZero {
    type Capture = NodeRef;

    fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
        left_operand(&self.matcher, node)
    }

    fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "sub_zero"
    }
}

/// `mul(x, 1)` → `x`.
#[derive(Debug, Clone)]
pub struct MulOne {
    matcher: Matcher,
}

impl MulOne {
    pub fn new() -> Self {
        Self {
            matcher: build_matcher(ops::mul(), [any_node(), is_one_constant()]),
        }
    }
}

impl Default for MulOne {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteRule for MulOne {
    type Capture = NodeRef;

    fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
        left_operand(&self.matcher, node)
    }

    fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "mul_one"
    }
}

fn left_operand(matcher: &Matcher, node: &NodeRef) -> Option<NodeRef> {
    matcher.match_call(node)?.arg(0).cloned()
}

// =============================================================================
// Double negation
// =============================================================================

/// `neg(neg(x))` → `x`.
///
/// Written as a stateful visitor: `apply` runs the outer pattern through
/// [`Matcher::visit_args`], which hands the inner `neg` call to
/// `visit_call`, where `x` is captured. Build a fresh instance per node.
#[derive(Debug, Default)]
pub struct NegNeg {
    x: Option<NodeRef>,
    inner_seen: bool,
}

impl NegNeg {
    fn outer() -> Matcher {
        build_matcher(ops::neg(), [is_call_to(ops::neg())])
    }
}

impl Visitor for NegNeg {
    fn apply(&mut self, _opt: &Optimizer, node: &NodeRef) -> Option<NodeRef> {
        if !Self::outer().visit_args(self, node) {
            return None;
        }
        // An inner `neg()` without arguments leaves the capture empty.
        match self.x.take().ok_or(RewriteError::InvalidCapture("neg_neg")) {
            Ok(x) => Some(x),
            Err(err) => {
                tracing::warn!(node = %node, "{err}");
                None
            }
        }
    }

    /// Only the first argument is the inner `neg`; later calls are ignored.
    fn visit_call(&mut self, _node: &NodeRef, inner: &CallNode) {
        if !self.inner_seen {
            self.inner_seen = true;
            self.x = inner.arg(0).cloned();
        }
    }
}
