//! Expression bodies
//!
//! A function body is an arena of nodes addressed by `ExprId`. Children are
//! referenced by handle, so a pass can hold `&mut` to one node's types while
//! the rest of the arena stays reachable through its handles.

use crate::path::{GenericPath, Path};
use crate::types::TypeRef;
use std::ops::{Index, IndexMut};

/// Handle to a node, the node's position in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(u128),
    Float(f64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Block {
        stmts: Vec<ExprId>,
        tail: Option<ExprId>,
    },
    /// `let` with the declared type of binding slot `binding`
    Let {
        binding: usize,
        ty: TypeRef,
        value: Option<ExprId>,
    },
    Return(Option<ExprId>),
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    Literal(Literal),
    Variable {
        name: String,
        binding: usize,
    },
    /// A function item used as a value
    PathValue(Path),
    CallPath {
        path: Path,
        args: Vec<ExprId>,
    },
    /// Method call, `path` is the method the typechecker resolved it to
    CallMethod {
        receiver: ExprId,
        method: String,
        args: Vec<ExprId>,
        path: Path,
    },
    Field {
        value: ExprId,
        field: String,
    },
    Tuple(Vec<ExprId>),
    StructLiteral {
        path: GenericPath,
        fields: Vec<(String, ExprId)>,
    },
    Cast {
        value: ExprId,
        ty: TypeRef,
    },
    Closure {
        args: Vec<(String, TypeRef)>,
        ret: TypeRef,
        body: ExprId,
    },
}

impl ExprKind {
    /// Child handles in evaluation order
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Block { stmts, tail } => stmts.iter().copied().chain(*tail).collect(),
            ExprKind::Let { value, .. } => value.iter().copied().collect(),
            ExprKind::Return(value) => value.iter().copied().collect(),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => [*cond, *then_branch]
                .into_iter()
                .chain(*else_branch)
                .collect(),
            ExprKind::Literal(_) | ExprKind::Variable { .. } | ExprKind::PathValue(_) => {
                Vec::new()
            }
            ExprKind::CallPath { args, .. } => args.clone(),
            ExprKind::CallMethod { receiver, args, .. } => {
                std::iter::once(*receiver).chain(args.iter().copied()).collect()
            }
            ExprKind::Field { value, .. } | ExprKind::Cast { value, .. } => vec![*value],
            ExprKind::Tuple(elements) => elements.clone(),
            ExprKind::StructLiteral { fields, .. } => fields.iter().map(|(_, id)| *id).collect(),
            ExprKind::Closure { body, .. } => vec![*body],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub kind: ExprKind,
    /// Type computed by the typechecker for this node
    pub res_type: TypeRef,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ExprKind, res_type: TypeRef) -> ExprId {
        let id = ExprId(self.nodes.len());
        self.nodes.push(ExprNode { kind, res_type });
        id
    }
}

impl Index<ExprId> for ExprArena {
    type Output = ExprNode;

    fn index(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<ExprId> for ExprArena {
    fn index_mut(&mut self, id: ExprId) -> &mut ExprNode {
        &mut self.nodes[id.index()]
    }
}

/// A complete body: the node arena plus per-body type tables
#[derive(Debug, Clone, PartialEq)]
pub struct ExprPtr {
    pub arena: ExprArena,
    pub root: ExprId,
    /// Types of local bindings, indexed by binding slot
    pub bindings: Vec<TypeRef>,
    /// Erased-type templates, one per `impl Trait` written in the signature,
    /// in source order
    pub erased_types: Vec<TypeRef>,
}

impl ExprPtr {
    pub fn new(arena: ExprArena, root: ExprId) -> Self {
        Self {
            arena,
            root,
            bindings: Vec::new(),
            erased_types: Vec::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<TypeRef>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_erased_types(mut self, erased_types: Vec<TypeRef>) -> Self {
        self.erased_types = erased_types;
        self
    }

    pub fn root_node(&self) -> &ExprNode {
        &self.arena[self.root]
    }
}
