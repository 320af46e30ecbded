//! Errors raised while building a replacement node.
//!
//! A pattern that does not match is never an error; these only surface when
//! a rule matched but could not construct its replacement.

use derive_more::{Display, Error, From};
use graft_ir::IrError;

pub type RewriteResult<T> = std::result::Result<T, RewriteError>;

#[derive(Debug, Display, Error, From)]
pub enum RewriteError {
    #[display("IR error: {_0}")]
    Ir(#[error(source)] IrError),

    /// The capture handed to `rewrite` lacks an operand the rule relies on.
    #[from(ignore)]
    #[display("rule `{_0}` produced an incomplete capture")]
    InvalidCapture(#[error(not(source))] &'static str),
}
