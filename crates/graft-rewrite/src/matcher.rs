//! Operator-identity + operand-predicate matching.

use std::fmt;

use graft_ir::{CallNode, NodeRef, Primitive};
use tracing::trace;

use crate::Visitor;
use crate::predicate::{Predicate, predicate};

/// Reusable match function bound to one operator and a list of operand
/// predicates.
///
/// A node matches when it is a call whose callee is the operator, and, if
/// predicates were given, the call has at least as many arguments as there
/// are predicates and `predicates[i]` holds for argument `i`. Evaluation
/// stops at the first failing predicate. Arguments beyond the predicate list
/// are not inspected.
///
/// A matcher holds no per-match state and can be shared across any number
/// of nodes and rules.
#[derive(Clone)]
pub struct Matcher {
    op: Primitive,
    predicates: Vec<Predicate>,
}

/// Build a matcher for calls to `op` whose arguments satisfy `predicates`.
///
/// An empty predicate list matches on operator identity alone.
pub fn build_matcher(op: Primitive, predicates: impl IntoIterator<Item = Predicate>) -> Matcher {
    Matcher {
        op,
        predicates: predicates.into_iter().collect(),
    }
}

impl Matcher {
    /// Matcher on operator identity only.
    pub fn new(op: Primitive) -> Self {
        build_matcher(op, [])
    }

    pub fn op(&self) -> &Primitive {
        &self.op
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, node: &NodeRef) -> bool {
        self.match_call(node).is_some()
    }

    /// Like [`matches`](Self::matches), but hands back the typed call view so
    /// the caller can capture operands.
    pub fn match_call<'n>(&self, node: &'n NodeRef) -> Option<&'n CallNode> {
        let call = node.as_call()?;
        if call.primitive()? != &self.op {
            return None;
        }
        if self.predicates.is_empty() {
            return Some(call);
        }
        if call.num_args() < self.predicates.len() {
            trace!(
                op = %self.op.name(),
                args = call.num_args(),
                required = self.predicates.len(),
                "insufficient arity"
            );
            return None;
        }
        let holds = self
            .predicates
            .iter()
            .zip(call.args())
            .all(|(pred, arg)| pred(arg));
        holds.then_some(call)
    }

    /// On a match, dispatch every argument of the call into `visitor`
    /// (the callee is skipped). Returns whether the node matched.
    ///
    /// Lets a stateful rule capture operands from its own variant handlers
    /// once the surrounding pattern is known to hold.
    pub fn visit_args<V: Visitor + ?Sized>(&self, visitor: &mut V, node: &NodeRef) -> bool {
        let Some(call) = self.match_call(node) else {
            return false;
        };
        for arg in call.args() {
            visitor.visit(arg);
        }
        true
    }

    /// Borrow the matcher as a plain function.
    pub fn as_fn(&self) -> impl Fn(&NodeRef) -> bool + '_ {
        move |node| self.matches(node)
    }

    /// Turn the matcher into a predicate, so patterns can nest.
    pub fn into_predicate(self) -> Predicate {
        predicate(move |node| self.matches(node))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("op", &self.op.name())
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use graft_ir::{CallNode, ConstantNode, Inputs, Node, ParameterNode};
    use proptest::prelude::*;

    use super::*;
    use crate::predicate::{any_node, is_call_to, is_parameter, is_zero_constant};

    fn add() -> Primitive {
        Primitive::new("add")
    }

    fn recording(log: &Rc<RefCell<Vec<usize>>>, index: usize, answer: bool) -> Predicate {
        let log = Rc::clone(log);
        predicate(move |_| {
            log.borrow_mut().push(index);
            answer
        })
    }

    #[test]
    fn identity_only_ignores_arity() {
        let matcher = Matcher::new(add());
        let x = Node::parameter("x");
        assert!(matcher.matches(&Node::apply(add(), [])));
        assert!(matcher.matches(&Node::apply(add(), [x.clone()])));
        assert!(matcher.matches(&Node::apply(add(), [x.clone(), x.clone(), x])));
    }

    #[test]
    fn identity_mismatch_fails_regardless_of_predicates() {
        let a = Node::parameter("a");
        let b = Node::parameter("b");
        let sub = Node::apply(Primitive::new("sub"), [a, b]);
        assert!(!Matcher::new(Primitive::new("mul")).matches(&sub));
        assert!(!build_matcher(Primitive::new("mul"), [any_node(), any_node()]).matches(&sub));
    }

    #[test]
    fn non_call_nodes_never_match() {
        let matcher = Matcher::new(add());
        assert!(!matcher.matches(&Node::parameter("add")));
        assert!(!matcher.matches(&Node::constant(0)));
        assert!(!matcher.matches(&Node::primitive(add())));
    }

    #[test]
    fn non_primitive_callee_never_matches() {
        let call = Node::call(Node::parameter("add"), [Node::constant(1)]);
        assert!(!Matcher::new(add()).matches(&call));
    }

    #[test]
    fn attributes_do_not_affect_identity() {
        let call = Node::apply(add().with_attr("fused", true), [Node::parameter("x")]);
        assert!(Matcher::new(add()).matches(&call));
    }

    #[test]
    fn predicate_i_applies_to_argument_i() {
        let matcher = build_matcher(add(), [is_parameter(), is_zero_constant()]);
        let x = Node::parameter("x");
        assert!(matcher.matches(&Node::apply(add(), [x.clone(), Node::constant(0)])));
        assert!(!matcher.matches(&Node::apply(add(), [Node::constant(0), x.clone()])));
        assert!(!matcher.matches(&Node::apply(add(), [x.clone(), Node::parameter("y")])));
    }

    #[test]
    fn extra_arguments_are_allowed() {
        let matcher = build_matcher(add(), [is_parameter()]);
        let call = Node::apply(add(), [Node::parameter("x"), Node::constant(9)]);
        assert!(matcher.matches(&call));
    }

    #[test]
    fn insufficient_arity_is_a_mismatch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let matcher = build_matcher(
            add(),
            [recording(&log, 0, true), recording(&log, 1, true), recording(&log, 2, true)],
        );
        let call = Node::apply(add(), [Node::parameter("x"), Node::parameter("y")]);
        assert!(!matcher.matches(&call));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn predicates_short_circuit_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let matcher = build_matcher(
            add(),
            [recording(&log, 0, true), recording(&log, 1, false), recording(&log, 2, true)],
        );
        let x = Node::parameter("x");
        let call = Node::apply(add(), [x.clone(), x.clone(), x]);

        assert!(!matcher.matches(&call));
        assert_eq!(*log.borrow(), [0, 1]);
    }

    #[test]
    fn callee_only_call_with_predicates() {
        let inputs = Inputs::from_elem(Node::primitive(add()), 1);
        let call = Node::call_node(CallNode::new(inputs).unwrap());
        assert!(Matcher::new(add()).matches(&call));
        assert!(!build_matcher(add(), [any_node()]).matches(&call));
    }

    #[test]
    fn match_call_exposes_operands() {
        let x = Node::parameter("x");
        let node = Node::apply(add(), [x.clone(), Node::constant(0)]);
        let matcher = build_matcher(add(), [any_node(), is_zero_constant()]);
        let call = matcher.match_call(&node).unwrap();
        assert!(Rc::ptr_eq(call.arg(0).unwrap(), &x));
    }

    #[test]
    fn nested_matchers_compose() {
        let neg = Primitive::new("neg");
        let inner = build_matcher(neg.clone(), [is_parameter()]).into_predicate();
        let outer = build_matcher(neg.clone(), [inner]);

        let x = Node::parameter("x");
        let double = Node::apply(neg.clone(), [Node::apply(neg.clone(), [x.clone()])]);
        assert!(outer.matches(&double));
        assert!(!outer.matches(&Node::apply(neg.clone(), [x])));
        assert!(is_call_to(neg)(&double));
    }

    #[test]
    fn as_fn_is_reusable() {
        let matcher = Matcher::new(add());
        let f = matcher.as_fn();
        let nodes = [
            Node::apply(add(), []),
            Node::parameter("x"),
            Node::apply(Primitive::new("sub"), []),
        ];
        let hits: Vec<bool> = nodes.iter().map(&f).collect();
        assert_eq!(hits, [true, false, false]);
        assert!(f(&nodes[0]));
    }

    /// Collects the names of parameters and the text of constants.
    #[derive(Default)]
    struct ArgCollector {
        seen: Vec<String>,
    }

    impl Visitor for ArgCollector {
        fn visit_constant(&mut self, node: &NodeRef, _constant: &ConstantNode) {
            self.seen.push(node.to_string());
        }

        fn visit_parameter(&mut self, node: &NodeRef, _param: &ParameterNode) {
            self.seen.push(node.to_string());
        }
    }

    #[test]
    fn visit_args_dispatches_arguments_only_on_match() {
        let matcher = build_matcher(add(), [any_node(), is_zero_constant()]);
        let mut collector = ArgCollector::default();

        let hit = Node::apply(add(), [Node::parameter("x"), Node::constant(0)]);
        assert!(matcher.visit_args(&mut collector, &hit));
        assert_eq!(collector.seen, ["%x", "0"]);

        let miss = Node::apply(add(), [Node::parameter("x"), Node::parameter("y")]);
        assert!(!matcher.visit_args(&mut collector, &miss));
        assert_eq!(collector.seen.len(), 2);
    }

    const OPS: [&str; 4] = ["add", "sub", "mul", "neg"];

    proptest! {
        #[test]
        fn prop_identity_match_is_independent_of_arity(
            op in 0usize..OPS.len(),
            target in 0usize..OPS.len(),
            arity in 0usize..6,
        ) {
            let args = (0..arity).map(|i| Node::constant(i as i64));
            let node = Node::apply(Primitive::new(OPS[op]), args);
            let matcher = Matcher::new(Primitive::new(OPS[target]));
            prop_assert_eq!(matcher.matches(&node), op == target);
        }

        #[test]
        fn prop_predicates_require_enough_args(
            arity in 0usize..6,
            required in 0usize..6,
        ) {
            let args = (0..arity).map(|_| Node::parameter("x"));
            let node = Node::apply(add(), args);
            let matcher = build_matcher(add(), (0..required).map(|_| any_node()));
            prop_assert_eq!(matcher.matches(&node), arity >= required);
        }

        #[test]
        fn prop_single_false_predicate_fails_match(
            arity in 1usize..6,
            failing in 0usize..6,
        ) {
            let failing = failing % arity;
            let args = (0..arity).map(|_| Node::parameter("x"));
            let node = Node::apply(add(), args);
            let preds = (0..arity).map(|i| predicate(move |_| i != failing));
            prop_assert!(!build_matcher(add(), preds).matches(&node));
        }
    }
}
