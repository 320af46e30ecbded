//! Capture-based rewrite rules.
//!
//! A [`RewriteRule`] splits a simplification into a pure match step that
//! returns the captured operands and a construction step that builds the
//! replacement from them. Nothing is stored on the rule itself, so one
//! instance can serve every node of a pass.

use graft_ir::NodeRef;
use tracing::{debug, warn};

use crate::{Optimizer, RewriteResult};

/// A single algebraic simplification: pattern, capture, replacement.
///
/// # Example
///
/// ```
/// use graft_ir::{Node, NodeRef, Primitive};
/// use graft_rewrite::predicate::{any_node, is_zero_constant};
/// use graft_rewrite::{Matcher, Optimizer, RewriteResult, RewriteRule, apply_rule, build_matcher};
///
/// struct AddZero(Matcher);
///
/// impl RewriteRule for AddZero {
///     type Capture = NodeRef;
///
///     fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
///         self.0.match_call(node).and_then(|call| call.arg(0).cloned())
///     }
///
///     fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
///         Ok(x)
///     }
/// }
///
/// let rule = AddZero(build_matcher(Primitive::new("add"), [any_node(), is_zero_constant()]));
/// let x = Node::parameter("x");
/// let node = Node::apply(Primitive::new("add"), [x.clone(), Node::constant(0)]);
/// let out = apply_rule(&rule, &Optimizer::default(), &node).unwrap();
/// assert!(std::rc::Rc::ptr_eq(&out, &x));
/// ```
pub trait RewriteRule {
    /// Operands a successful match hands to [`rewrite`](Self::rewrite).
    type Capture;

    /// Test `node` against the rule's pattern.
    ///
    /// Malformed operands (missing attributes, unknown shapes, ...) are
    /// reported as `None`, same as any other mismatch.
    fn match_node(&self, node: &NodeRef) -> Option<Self::Capture>;

    /// Build the replacement for a matched node.
    fn rewrite(&self, opt: &Optimizer, capture: Self::Capture) -> RewriteResult<NodeRef>;

    /// Name used in logs and in `OptimizerConfig::disabled_rules`.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Match and rewrite `node` with `rule`.
///
/// Returns `None` when the pattern does not hold. A rule that matched but
/// failed to build its replacement is logged and also yields `None`; the
/// surrounding pass keeps going.
pub fn apply_rule<R: RewriteRule + ?Sized>(
    rule: &R,
    opt: &Optimizer,
    node: &NodeRef,
) -> Option<NodeRef> {
    let capture = rule.match_node(node)?;
    match rule.rewrite(opt, capture) {
        Ok(replacement) => {
            debug!(rule = rule.name(), from = %node, to = %replacement, "rewrite");
            Some(replacement)
        }
        Err(err) => {
            warn!(rule = rule.name(), node = %node, "rewrite failed: {err}");
            None
        }
    }
}
