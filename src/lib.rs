//! Algebraic simplification rules built on the graft rewrite core.
//!
//! The rules here are meant to be driven by a pass manager through
//! [`RuleSet`](graft_rewrite::RuleSet):
//!
//! ```
//! use graft::ir::Node;
//! use graft::rewrite::Optimizer;
//!
//! let x = Node::parameter("x");
//! let node = Node::apply(graft::ops::add(), [x.clone(), Node::constant(0)]);
//!
//! let rewritten = graft::default_rules()
//!     .apply_once(&Optimizer::default(), &node)
//!     .unwrap();
//! assert_eq!(rewritten.rule, "add_zero");
//! assert!(std::rc::Rc::ptr_eq(&rewritten.node, &x));
//! ```

pub mod ops;
pub mod passes;

pub use graft_ir as ir;
pub use graft_rewrite as rewrite;

pub use passes::arith::{AddZero, MulOne, NegNeg, SubZero};
pub use passes::slice::{SliceIdentity, SliceWindow};
pub use passes::{arith_rules, default_rules};
