//! Open visitor over graft nodes.
//!
//! [`Visitor`] has a default body for every node variant, so a rule
//! overrides only the variants it cares about. Unhandled variants are not an
//! error; they simply mean "not interested".
//!
//! The default call handler walks every input of the call (callee first,
//! then arguments, left to right), so rules can look at subexpressions
//! without writing their own recursion.
//!
//! ```
//! use graft_ir::{Node, NodeRef, ParameterNode, Primitive};
//! use graft_rewrite::Visitor;
//!
//! #[derive(Default)]
//! struct CountParams(usize);
//!
//! impl Visitor for CountParams {
//!     fn visit_parameter(&mut self, _node: &NodeRef, _param: &ParameterNode) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let x = Node::parameter("x");
//! let call = Node::apply(Primitive::new("add"), [x.clone(), x]);
//! let mut counter = CountParams::default();
//! counter.visit(&call);
//! assert_eq!(counter.0, 2);
//! ```

use graft_ir::{CallNode, ConstantNode, Node, NodeRef, ParameterNode};
use tracing::trace;

use crate::Optimizer;

/// Variant-dispatching traversal that rewrite rules specialize.
///
/// Visiting never mutates the graph; a visitor may only update its own
/// fields. Instances that collect captures must be fresh for every
/// [`apply`](Visitor::apply) call.
pub trait Visitor {
    /// Entry point used by the pass driver, called once per node.
    ///
    /// The default dispatches `node` and proposes no rewrite. Rules override
    /// this to build a replacement from what they captured during dispatch.
    fn apply(&mut self, _opt: &Optimizer, node: &NodeRef) -> Option<NodeRef> {
        self.visit(node);
        None
    }

    /// Forward `node` to the handler of its variant.
    fn visit(&mut self, node: &NodeRef) {
        dispatch(self, node);
    }

    /// Called for call nodes. Defaults to visiting every input in order.
    fn visit_call(&mut self, _node: &NodeRef, call: &CallNode) {
        walk_call(self, call);
    }

    fn visit_constant(&mut self, _node: &NodeRef, _constant: &ConstantNode) {}

    fn visit_parameter(&mut self, _node: &NodeRef, _param: &ParameterNode) {}
}

/// Route `node` to the variant handler of `visitor`.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: &NodeRef) {
    match node.as_ref() {
        Node::Call(call) => {
            trace!(inputs = call.inputs().len(), "dispatch call");
            visitor.visit_call(node, call);
        }
        Node::Constant(constant) => visitor.visit_constant(node, constant),
        Node::Parameter(param) => visitor.visit_parameter(node, param),
    }
}

/// Visit every input of `call` exactly once, callee first.
pub fn walk_call<V: Visitor + ?Sized>(visitor: &mut V, call: &CallNode) {
    for input in call.inputs() {
        visitor.visit(input);
    }
}
