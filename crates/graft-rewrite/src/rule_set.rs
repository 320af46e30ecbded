//! Ordered collection of rules, driven one node at a time.
//!
//! A [`RuleSet`] is what a pass manager hands nodes to. It decides *what*
//! a node would be rewritten to; putting the replacement into the graph is
//! the caller's business.

use std::rc::Rc;

use graft_ir::NodeRef;
use tracing::{debug, warn};

use crate::rule::{RewriteRule, apply_rule};
use crate::{Optimizer, Visitor};

/// Object-safe view over both rule flavours.
trait Rewrite {
    fn name(&self) -> &'static str;

    fn apply(&self, opt: &Optimizer, node: &NodeRef) -> Option<NodeRef>;
}

struct CaptureRule<R>(R);

impl<R: RewriteRule> Rewrite for CaptureRule<R> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn apply(&self, opt: &Optimizer, node: &NodeRef) -> Option<NodeRef> {
        apply_rule(&self.0, opt, node)
    }
}

/// Stateful visitor rule; a fresh instance is built for every node.
struct VisitorRule<F> {
    name: &'static str,
    factory: F,
}

impl<F, V> Rewrite for VisitorRule<F>
where
    F: Fn() -> V,
    V: Visitor,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, opt: &Optimizer, node: &NodeRef) -> Option<NodeRef> {
        let mut visitor = (self.factory)();
        let replacement = visitor.apply(opt, node)?;
        debug!(rule = self.name, from = %node, to = %replacement, "rewrite");
        Some(replacement)
    }
}

/// A replacement proposed by one rule.
#[derive(Clone, Debug)]
pub struct Rewritten {
    pub node: NodeRef,
    pub rule: &'static str,
}

/// Outcome of [`RuleSet::simplify`].
#[derive(Clone, Debug)]
pub struct SimplifyResult {
    /// Final form of the root.
    pub node: NodeRef,
    /// Number of `apply_once` rounds performed.
    pub iterations: usize,
    /// Rewrites applied across all rounds.
    pub total_rewrites: usize,
    /// Whether the last round found nothing left to rewrite.
    pub reached_fixpoint: bool,
}

/// Rules tried in insertion order; the first one that fires wins.
///
/// ```
/// use graft_ir::{Node, NodeRef, Primitive};
/// use graft_rewrite::predicate::{any_node, is_zero_constant};
/// use graft_rewrite::{
///     Matcher, Optimizer, RewriteResult, RewriteRule, RuleSet, build_matcher,
/// };
///
/// struct AddZero(Matcher);
///
/// impl RewriteRule for AddZero {
///     type Capture = NodeRef;
///     fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
///         self.0.match_call(node)?.arg(0).cloned()
///     }
///     fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
///         Ok(x)
///     }
///     fn name(&self) -> &'static str {
///         "add_zero"
///     }
/// }
///
/// let add = Primitive::new("add");
/// let rules = RuleSet::new()
///     .add_rule(AddZero(build_matcher(add.clone(), [any_node(), is_zero_constant()])));
///
/// let x = Node::parameter("x");
/// let inner = Node::apply(add.clone(), [x.clone(), Node::constant(0)]);
/// let outer = Node::apply(add, [inner, Node::constant(0)]);
///
/// let result = rules.simplify(&Optimizer::default(), &outer);
/// assert!(result.reached_fixpoint);
/// assert_eq!(result.total_rewrites, 2);
/// assert!(std::rc::Rc::ptr_eq(&result.node, &x));
/// ```
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rewrite>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capture-based rule.
    pub fn add_rule<R>(mut self, rule: R) -> Self
    where
        R: RewriteRule + 'static,
    {
        self.rules.push(Box::new(CaptureRule(rule)));
        self
    }

    /// Add a stateful visitor rule. `factory` is called once per node so
    /// captures never leak from one visit into the next.
    pub fn add_visitor<F, V>(mut self, name: &'static str, factory: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Visitor + 'static,
    {
        self.rules.push(Box::new(VisitorRule { name, factory }));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the rules, in the order they are tried.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Try every enabled rule on `node` and return the first replacement.
    ///
    /// A rule that hands back `node` itself is ignored, since applying it
    /// again would never terminate.
    pub fn apply_once(&self, opt: &Optimizer, node: &NodeRef) -> Option<Rewritten> {
        for rule in &self.rules {
            let name = rule.name();
            if !opt.is_enabled(name) {
                continue;
            }
            let Some(replacement) = rule.apply(opt, node) else {
                continue;
            };
            if Rc::ptr_eq(&replacement, node) {
                warn!(rule = name, node = %node, "rule returned its input unchanged");
                continue;
            }
            return Some(Rewritten {
                node: replacement,
                rule: name,
            });
        }
        None
    }

    /// Rewrite the root `node` repeatedly until no rule fires, or until
    /// `max_iterations` rewrites have been applied.
    ///
    /// Only the root is considered; operands are left as they are.
    pub fn simplify(&self, opt: &Optimizer, node: &NodeRef) -> SimplifyResult {
        let max_iterations = opt.config().max_iterations;
        let mut current = node.clone();
        let mut total_rewrites = 0;

        for iteration in 0..max_iterations {
            match self.apply_once(opt, &current) {
                Some(rewritten) => {
                    total_rewrites += 1;
                    current = rewritten.node;
                }
                None => {
                    return SimplifyResult {
                        node: current,
                        iterations: iteration + 1,
                        total_rewrites,
                        reached_fixpoint: true,
                    };
                }
            }
        }

        debug!(
            optimizer = opt.name(),
            max_iterations, "simplify stopped before reaching a fixpoint"
        );
        SimplifyResult {
            node: current,
            iterations: max_iterations,
            total_rewrites,
            reached_fixpoint: false,
        }
    }
}
