//! Attribute, operator identity and constant payload types.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::{IrError, IrResult, Symbol};

/// Dimensions of a tensor value. An empty shape is a scalar.
pub type Shape = SmallVec<[i64; 4]>;

/// Static attribute attached to an operator.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Bool(bool),
    Int(i64),
    /// Integer list, e.g. `begin`/`size` of a slice.
    Ints(Vec<i64>),
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::Int(value)
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Attribute::Bool(value)
    }
}

impl From<Vec<i64>> for Attribute {
    fn from(value: Vec<i64>) -> Self {
        Attribute::Ints(value)
    }
}

impl From<&[i64]> for Attribute {
    fn from(value: &[i64]) -> Self {
        Attribute::Ints(value.to_vec())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Bool(b) => write!(f, "{b}"),
            Attribute::Int(i) => write!(f, "{i}"),
            Attribute::Ints(items) => write!(f, "{items:?}"),
        }
    }
}

/// Operator identity carried by the callee of a call node.
///
/// Two primitives are equal when their names are equal. Attributes ride
/// along for rules that need them but never take part in identity.
#[derive(Clone, Debug)]
pub struct Primitive {
    name: Symbol,
    attrs: SmallVec<[(Symbol, Attribute); 2]>,
}

impl Primitive {
    pub fn new(name: impl Into<Symbol>) -> Self {
        Self {
            name: name.into(),
            attrs: SmallVec::new(),
        }
    }

    /// Set an attribute, replacing any previous value under the same key.
    pub fn with_attr(mut self, key: impl Into<Symbol>, value: impl Into<Attribute>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
        self
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (Symbol, &Attribute)> {
        self.attrs.iter().map(|(k, v)| (*k, v))
    }

    pub fn attr(&self, key: Symbol) -> Option<&Attribute> {
        self.attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn require_attr(&self, key: Symbol) -> IrResult<&Attribute> {
        self.attr(key).ok_or(IrError::MissingAttribute {
            op: self.name,
            attr: key,
        })
    }

    pub fn int_attr(&self, key: Symbol) -> IrResult<i64> {
        match self.require_attr(key)? {
            Attribute::Int(value) => Ok(*value),
            _ => Err(IrError::AttributeKind {
                attr: key,
                expected: "an integer",
            }),
        }
    }

    pub fn ints_attr(&self, key: Symbol) -> IrResult<&[i64]> {
        match self.require_attr(key)? {
            Attribute::Ints(values) => Ok(values),
            _ => Err(IrError::AttributeKind {
                attr: key,
                expected: "an integer list",
            }),
        }
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.attrs.is_empty() {
            f.write_str("{")?;
            for (i, (key, value)) in self.attrs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key} = {value}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Dense `f64` tensor literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub shape: Shape,
    pub data: Vec<f64>,
}

impl Tensor {
    /// Tensor of the given shape with every element set to `value`.
    pub fn filled(shape: &[i64], value: f64) -> Self {
        let len = shape.iter().map(|d| (*d).max(0) as usize).product();
        Self {
            shape: Shape::from_slice(shape),
            data: vec![value; len],
        }
    }
}

/// Payload of a constant node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An operator, used as the callee of call nodes.
    Primitive(Primitive),
    Int(i64),
    Float(f64),
    Bool(bool),
    Tensor(Tensor),
}

impl Value {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    /// Returns `true` for numeric scalars and tensors whose every element
    /// equals `target`. Bools and primitives never qualify.
    pub fn is_numeric_splat(&self, target: f64) -> bool {
        match self {
            Value::Int(i) => *i as f64 == target,
            Value::Float(x) => *x == target,
            Value::Tensor(t) => t.data.iter().all(|x| *x == target),
            Value::Bool(_) | Value::Primitive(_) => false,
        }
    }

    /// Known shape of the value; primitives have none.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => Some(Shape::new()),
            Value::Tensor(t) => Some(t.shape.clone()),
            Value::Primitive(_) => None,
        }
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        Value::Primitive(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Tensor> for Value {
    fn from(value: Tensor) -> Self {
        Value::Tensor(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Primitive(p) => write!(f, "{p}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Tensor(t) => {
                f.write_str("tensor<")?;
                for (i, dim) in t.shape.iter().enumerate() {
                    if i > 0 {
                        f.write_str("x")?;
                    }
                    write!(f, "{dim}")?;
                }
                f.write_str(">")
            }
        }
    }
}
