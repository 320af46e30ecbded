//! Elide `slice` calls whose window covers the whole input.
//!
//! `slice{begin, size}(x)` keeps `size[i]` elements of axis `i` starting at
//! `begin[i]`. A slice that also carries `strides` is the strided form and
//! reads `end` in place of `size`; only unit strides can cover the input, so
//! any other stride is left alone. Before comparing against the input shape
//! the window is normalized the way the device kernel reads it:
//!
//! - `begin[i]` beyond the axis in either direction resets to `0`
//! - a negative `begin[i]` counts from the end of the axis
//! - a negative `size[i]` (or `end[i]`) becomes `max(size[i] + dim[i], 0)`
//!
//! The rewrite needs a known input shape; without one the call is kept.

use graft_ir::{CallNode, IrResult, NodeRef, Primitive};
use graft_rewrite::predicate::any_node;
use graft_rewrite::{Matcher, Optimizer, RewriteResult, RewriteRule, build_matcher};
use smallvec::SmallVec;
use tracing::debug;

use crate::ops::{self, ATTR_BEGIN, ATTR_END, ATTR_SIZE, ATTR_STRIDES};

/// Normalized `begin`/`size` window of a slice over a known shape.
///
/// For the strided form `size` holds the normalized `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceWindow {
    pub begin: SmallVec<[i64; 4]>,
    pub size: SmallVec<[i64; 4]>,
}

impl SliceWindow {
    /// Normalize `begin`/`size` against `shape`.
    ///
    /// Returns `None` when either list does not have one entry per axis, or
    /// when an entry is too large in magnitude to normalize.
    pub fn normalize(begin: &[i64], size: &[i64], shape: &[i64]) -> Option<Self> {
        if begin.len() != shape.len() || size.len() != shape.len() {
            return None;
        }
        let begin: SmallVec<[i64; 4]> = begin
            .iter()
            .zip(shape)
            .map(|(&b, &dim)| {
                if b.checked_abs()? > dim {
                    Some(0)
                } else if b < 0 {
                    b.checked_add(dim)
                } else {
                    Some(b)
                }
            })
            .collect::<Option<_>>()?;
        let size: SmallVec<[i64; 4]> = size
            .iter()
            .zip(shape)
            .map(|(&s, &dim)| {
                if s < 0 {
                    Some(s.checked_add(dim)?.max(0))
                } else {
                    Some(s)
                }
            })
            .collect::<Option<_>>()?;
        Some(Self { begin, size })
    }

    /// Whether the window selects every element of `shape`.
    pub fn covers(&self, shape: &[i64]) -> bool {
        self.begin.iter().all(|&b| b == 0) && self.size.as_slice() == shape
    }
}

/// `slice{begin, size}(x)` → `x` when the window covers all of `x`.
#[derive(Debug, Clone)]
pub struct SliceIdentity {
    matcher: Matcher,
}

impl SliceIdentity {
    pub fn new() -> Self {
        Self {
            matcher: build_matcher(ops::slice(&[], &[]), [any_node()]),
        }
    }

    /// The `size` list, or `end` for a unit-stride strided slice.
    /// `None` when some stride is not 1.
    fn extent(prim: &Primitive) -> IrResult<Option<&[i64]>> {
        if prim.attr(ATTR_STRIDES()).is_none() {
            return prim.ints_attr(ATTR_SIZE()).map(Some);
        }
        if prim.ints_attr(ATTR_STRIDES())?.iter().any(|&s| s != 1) {
            return Ok(None);
        }
        prim.ints_attr(ATTR_END()).map(Some)
    }

    fn window(
        &self,
        node: &NodeRef,
        call: &CallNode,
        shape: &[i64],
    ) -> IrResult<Option<SliceWindow>> {
        let Some(prim) = call.primitive() else {
            return Ok(None);
        };
        let begin = prim.ints_attr(ATTR_BEGIN())?;
        let Some(extent) = Self::extent(prim)? else {
            debug!(node = %node, "strided slice skips elements");
            return Ok(None);
        };
        let window = SliceWindow::normalize(begin, extent, shape);
        if window.is_none() {
            debug!(node = %node, ?shape, "slice window does not fit input rank");
        }
        Ok(window)
    }
}

impl Default for SliceIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteRule for SliceIdentity {
    type Capture = NodeRef;

    fn match_node(&self, node: &NodeRef) -> Option<NodeRef> {
        let call = self.matcher.match_call(node)?;
        let input = call.arg(0)?;
        let shape = input.shape()?;

        match self.window(node, call, &shape) {
            Ok(window) => window?.covers(&shape).then(|| input.clone()),
            Err(err) => {
                debug!(node = %node, "malformed slice: {err}");
                None
            }
        }
    }

    fn rewrite(&self, _opt: &Optimizer, x: NodeRef) -> RewriteResult<NodeRef> {
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "slice_identity"
    }
}
