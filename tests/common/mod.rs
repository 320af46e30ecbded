//! Common test utilities for integration tests.

use graft::ir::{Node, NodeRef};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parameter with a known shape.
#[allow(dead_code)]
pub fn param(name: &'static str, shape: &[i64]) -> NodeRef {
    Node::parameter_with_shape(name, shape)
}
