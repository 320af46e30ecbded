//! Graph nodes in call / constant / parameter normal form.
//!
//! Nodes are immutable once built and shared through [`NodeRef`]. Identity
//! of a node is pointer identity; use [`Rc::ptr_eq`] to ask whether two
//! references denote the same node.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{IrError, IrResult, Primitive, Shape, Symbol, Value};

/// Shared reference to a graph node.
pub type NodeRef = Rc<Node>;

/// Ordered inputs of a call node: callee first, then arguments.
pub type Inputs = SmallVec<[NodeRef; 4]>;

#[derive(Clone, Debug)]
pub enum Node {
    Call(CallNode),
    Constant(ConstantNode),
    Parameter(ParameterNode),
}

/// Operator invocation. `inputs[0]` is the callee, `inputs[1..]` the arguments.
#[derive(Clone, Debug)]
pub struct CallNode {
    inputs: Inputs,
    shape: Option<Shape>,
}

#[derive(Clone, Debug)]
pub struct ConstantNode {
    value: Value,
}

#[derive(Clone, Debug)]
pub struct ParameterNode {
    name: Symbol,
    shape: Option<Shape>,
}

impl CallNode {
    /// Build a call from its full input list.
    ///
    /// Fails with [`IrError::EmptyCall`] when `inputs` is empty.
    pub fn new(inputs: Inputs) -> IrResult<Self> {
        if inputs.is_empty() {
            return Err(IrError::EmptyCall);
        }
        Ok(Self {
            inputs,
            shape: None,
        })
    }

    /// Attach the output shape computed by shape inference.
    pub fn with_shape(mut self, shape: &[i64]) -> Self {
        self.shape = Some(Shape::from_slice(shape));
        self
    }

    pub fn inputs(&self) -> &[NodeRef] {
        &self.inputs
    }

    pub fn input(&self, index: usize) -> Option<&NodeRef> {
        self.inputs.get(index)
    }

    pub fn callee(&self) -> &NodeRef {
        &self.inputs[0]
    }

    /// Argument operands, excluding the callee.
    pub fn args(&self) -> &[NodeRef] {
        &self.inputs[1..]
    }

    /// Argument `index`, counted from the first operand after the callee.
    pub fn arg(&self, index: usize) -> Option<&NodeRef> {
        self.args().get(index)
    }

    pub fn num_args(&self) -> usize {
        self.inputs.len() - 1
    }

    /// The callee's operator identity, if the callee is a primitive constant.
    pub fn primitive(&self) -> Option<&Primitive> {
        match self.callee().as_constant()?.value() {
            Value::Primitive(prim) => Some(prim),
            _ => None,
        }
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }
}

impl ConstantNode {
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl ParameterNode {
    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }
}

impl Node {
    /// Call `callee` with `args`. Never empty, so this cannot fail.
    pub fn call(callee: NodeRef, args: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        let mut inputs = Inputs::new();
        inputs.push(callee);
        inputs.extend(args);
        Rc::new(Node::Call(CallNode {
            inputs,
            shape: None,
        }))
    }

    /// Call a primitive operator with `args`.
    pub fn apply(op: Primitive, args: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        Node::call(Node::primitive(op), args)
    }

    pub fn call_node(call: CallNode) -> NodeRef {
        Rc::new(Node::Call(call))
    }

    pub fn constant(value: impl Into<Value>) -> NodeRef {
        Rc::new(Node::Constant(ConstantNode {
            value: value.into(),
        }))
    }

    /// Constant holding an operator, suitable as a callee.
    pub fn primitive(op: Primitive) -> NodeRef {
        Node::constant(Value::Primitive(op))
    }

    pub fn parameter(name: impl Into<Symbol>) -> NodeRef {
        Rc::new(Node::Parameter(ParameterNode {
            name: name.into(),
            shape: None,
        }))
    }

    pub fn parameter_with_shape(name: impl Into<Symbol>, shape: &[i64]) -> NodeRef {
        Rc::new(Node::Parameter(ParameterNode {
            name: name.into(),
            shape: Some(Shape::from_slice(shape)),
        }))
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Node::Call(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Node::Parameter(_))
    }

    pub fn as_call(&self) -> Option<&CallNode> {
        match self {
            Node::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&ConstantNode> {
        match self {
            Node::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterNode> {
        match self {
            Node::Parameter(param) => Some(param),
            _ => None,
        }
    }

    /// Shape known for this node, if any.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Node::Call(call) => call.shape().cloned(),
            Node::Constant(constant) => constant.value().shape(),
            Node::Parameter(param) => param.shape().cloned(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Call(call) => {
                write!(f, "{}(", call.callee())?;
                for (i, arg) in call.args().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Node::Constant(constant) => write!(f, "{}", constant.value()),
            Node::Parameter(param) => write!(f, "%{}", param.name()),
        }
    }
}
