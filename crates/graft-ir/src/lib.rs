//! graft IR node model.
//!
//! Provides the graph nodes the rewrite core traverses: call nodes
//! (callee + ordered arguments), constant nodes and parameter nodes, plus
//! the operator identity ([`Primitive`]) attached to callees.

pub mod error;
pub mod node;
pub mod symbol;
pub mod types;

pub use error::{IrError, IrResult};
pub use node::{CallNode, ConstantNode, Inputs, Node, NodeRef, ParameterNode};
pub use symbol::Symbol;
pub use types::{Attribute, Primitive, Shape, Tensor, Value};

// Re-export smallvec for building `Inputs` and `Shape` downstream.
pub use smallvec;
