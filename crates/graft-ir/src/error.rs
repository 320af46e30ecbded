//! Errors raised while constructing or inspecting nodes.

use derive_more::{Display, Error};

use crate::Symbol;

pub type IrResult<T> = Result<T, IrError>;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum IrError {
    /// A call node needs at least its callee.
    #[display("call node must have at least one input (the callee)")]
    EmptyCall,

    #[display("operator `{op}` has no attribute `{attr}`")]
    MissingAttribute {
        op: Symbol,
        attr: Symbol,
    },

    #[display("attribute `{attr}` is not {expected}")]
    AttributeKind {
        attr: Symbol,
        expected: &'static str,
    },
}
