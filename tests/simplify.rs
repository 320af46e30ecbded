//! Driving the bundled rules through `RuleSet`.

mod common;

use std::rc::Rc;

use graft::ir::{Node, Tensor};
use graft::ops;
use graft::rewrite::{Optimizer, OptimizerConfig};
use graft::{arith_rules, default_rules};
use insta::assert_snapshot;

#[test]
fn add_zero_collapses_to_parameter() {
    common::init_tracing();
    let x = Node::parameter("x");
    let node = Node::apply(ops::add(), [x.clone(), Node::constant(0)]);

    let hit = default_rules()
        .apply_once(&Optimizer::default(), &node)
        .unwrap();
    assert_eq!(hit.rule, "add_zero");
    assert!(Rc::ptr_eq(&hit.node, &x));
}

#[test]
fn nothing_to_do_for_plain_add() {
    common::init_tracing();
    let node = Node::apply(ops::add(), [Node::parameter("x"), Node::parameter("y")]);
    assert!(default_rules().apply_once(&Optimizer::default(), &node).is_none());
}

#[test]
fn rewritten_node_is_stable() {
    common::init_tracing();
    let rules = default_rules();
    let opt = Optimizer::default();
    let node = Node::apply(ops::mul(), [Node::parameter("x"), Node::constant(1.0)]);

    let hit = rules.apply_once(&opt, &node).unwrap();
    assert_eq!(hit.rule, "mul_one");
    assert!(rules.apply_once(&opt, &hit.node).is_none());
}

#[test]
fn operator_identity_picks_the_rule() {
    common::init_tracing();
    let rules = default_rules();
    let opt = Optimizer::default();
    let x = Node::parameter("x");

    let sub = Node::apply(ops::sub(), [x.clone(), Node::constant(0)]);
    assert_eq!(rules.apply_once(&opt, &sub).unwrap().rule, "sub_zero");

    // One is not the neutral element of sub, and zero is not for mul.
    let sub_one = Node::apply(ops::sub(), [x.clone(), Node::constant(1)]);
    let mul_zero = Node::apply(ops::mul(), [x, Node::constant(0)]);
    assert!(rules.apply_once(&opt, &sub_one).is_none());
    assert!(rules.apply_once(&opt, &mul_zero).is_none());
}

#[test]
fn simplify_peels_nested_identities() {
    common::init_tracing();
    let x = Node::parameter_with_shape("x", &[2, 2]);
    let node = Node::apply(
        ops::add(),
        [
            Node::apply(
                ops::neg(),
                [Node::apply(
                    ops::neg(),
                    [Node::apply(ops::mul(), [x.clone(), Node::constant(1)])],
                )],
            ),
            Node::constant(Tensor::filled(&[2, 2], 0.0)),
        ],
    );
    assert_snapshot!(node.to_string(), @"add(neg(neg(mul(%x, 1))), tensor<2x2>)");

    let result = default_rules().simplify(&Optimizer::default(), &node);
    assert!(result.reached_fixpoint);
    assert_eq!(result.total_rewrites, 3);
    assert_eq!(result.iterations, 4);
    assert!(Rc::ptr_eq(&result.node, &x));
}

#[test]
fn simplify_only_touches_the_root() {
    common::init_tracing();
    let x = Node::parameter("x");
    let inner = Node::apply(ops::add(), [x, Node::constant(0)]);
    let node = Node::apply(ops::mul(), [inner, Node::parameter("y")]);

    let result = default_rules().simplify(&Optimizer::default(), &node);
    assert_eq!(result.total_rewrites, 0);
    assert_snapshot!(result.node.to_string(), @"mul(add(%x, 0), %y)");
}

#[test]
fn disabled_rules_are_not_applied() {
    common::init_tracing();
    let x = Node::parameter("x");
    let node = Node::apply(ops::neg(), [Node::apply(ops::neg(), [x.clone()])]);

    let opt = Optimizer::with_config(
        "no-neg",
        OptimizerConfig {
            disabled_rules: ["neg_neg".to_string()].into(),
            ..OptimizerConfig::default()
        },
    );
    assert!(arith_rules().apply_once(&opt, &node).is_none());

    let hit = arith_rules()
        .apply_once(&Optimizer::default(), &node)
        .unwrap();
    assert_eq!(hit.rule, "neg_neg");
    assert!(Rc::ptr_eq(&hit.node, &x));
}

#[test]
fn iteration_budget_is_respected() {
    common::init_tracing();
    let x = Node::parameter("x");
    let mut node = x.clone();
    for _ in 0..5 {
        node = Node::apply(ops::add(), [node, Node::constant(0)]);
    }

    let opt = Optimizer::default().with_max_iterations(2);
    let result = arith_rules().simplify(&opt, &node);
    assert!(!result.reached_fixpoint);
    assert_eq!(result.total_rewrites, 2);
    assert_snapshot!(result.node.to_string(), @"add(add(add(%x, 0), 0), 0)");

    let result = arith_rules().simplify(&Optimizer::default(), &node);
    assert!(result.reached_fixpoint);
    assert!(Rc::ptr_eq(&result.node, &x));
}
