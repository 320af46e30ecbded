//! Operators the bundled rules know about.

use graft_ir::Primitive;

graft_ir::symbols! {
    OP_ADD => "add",
    OP_SUB => "sub",
    OP_MUL => "mul",
    OP_NEG => "neg",
    OP_SLICE => "slice",
    ATTR_BEGIN => "begin",
    ATTR_SIZE => "size",
    ATTR_END => "end",
    ATTR_STRIDES => "strides",
}

pub fn add() -> Primitive {
    Primitive::new(OP_ADD())
}

pub fn sub() -> Primitive {
    Primitive::new(OP_SUB())
}

pub fn mul() -> Primitive {
    Primitive::new(OP_MUL())
}

pub fn neg() -> Primitive {
    Primitive::new(OP_NEG())
}

/// `slice` with its `begin` and `size` attributes.
pub fn slice(begin: &[i64], size: &[i64]) -> Primitive {
    Primitive::new(OP_SLICE())
        .with_attr(ATTR_BEGIN(), begin)
        .with_attr(ATTR_SIZE(), size)
}

/// Strided `slice`: `end` takes the place of `size`.
pub fn strided_slice(begin: &[i64], end: &[i64], strides: &[i64]) -> Primitive {
    Primitive::new(OP_SLICE())
        .with_attr(ATTR_BEGIN(), begin)
        .with_attr(ATTR_END(), end)
        .with_attr(ATTR_STRIDES(), strides)
}
