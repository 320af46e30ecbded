//! Pattern matching and rewrite core for graft IR.
//!
//! Optimization passes express each simplification as a rule over the node
//! graph:
//!
//! - [`Visitor`]: open, variant-dispatching traversal with no-op defaults
//! - [`Matcher`]: operator identity plus ordered operand [`Predicate`]s
//! - [`RewriteRule`]: pure match-and-capture step plus replacement builder
//! - [`RuleSet`]: ordered rules a pass manager drives node by node
//!
//! The core only computes replacements. Substituting them into the graph
//! and scheduling passes belong to the caller.

pub mod error;
pub mod matcher;
pub mod optimizer;
pub mod predicate;
pub mod rule;
pub mod rule_set;
pub mod visitor;

pub use error::{RewriteError, RewriteResult};
pub use matcher::{Matcher, build_matcher};
pub use optimizer::{Optimizer, OptimizerConfig};
pub use predicate::Predicate;
pub use rule::{RewriteRule, apply_rule};
pub use rule_set::{Rewritten, RuleSet, SimplifyResult};
pub use visitor::{Visitor, dispatch, walk_call};
