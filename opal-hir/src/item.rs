//! Item definitions
//!
//! Functions, type definitions, traits and impl blocks. Method and associated
//! item tables are `IndexMap`s so iteration follows declaration order.

use crate::expr::ExprPtr;
use crate::path::GenericPath;
use crate::types::TypeRef;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDef {
    pub name: String,
    pub default: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueParamDef {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenericBound {
    /// `T: Trait`
    TraitBound { ty: TypeRef, trait_: GenericPath },
    /// `<T as Trait>::Assoc == U`
    TypeEquality { ty: TypeRef, other: TypeRef },
}

/// Generic parameter list of an item or impl block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericParams {
    pub types: Vec<TypeParamDef>,
    pub values: Vec<ValueParamDef>,
    pub bounds: Vec<GenericBound>,
}

impl GenericParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter list with the given type parameter names and no bounds
    pub fn with_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: names
                .into_iter()
                .map(|name| TypeParamDef {
                    name: name.into(),
                    default: None,
                })
                .collect(),
            values: Vec::new(),
            bounds: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArg {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub params: GenericParams,
    pub args: Vec<FunctionArg>,
    pub ret: TypeRef,
    /// `None` for trait method signatures without a default body
    pub code: Option<ExprPtr>,
}

impl Function {
    pub fn new(params: GenericParams, args: Vec<FunctionArg>, ret: TypeRef) -> Self {
        Self {
            params,
            args,
            ret,
            code: None,
        }
    }

    pub fn with_body(mut self, code: ExprPtr) -> Self {
        self.code = Some(code);
        self
    }

    /// Erased-type templates of this function's body
    pub fn erased_types(&self) -> &[TypeRef] {
        self.code
            .as_ref()
            .map(|code| code.erased_types.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub params: GenericParams,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub fields: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub params: GenericParams,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub params: GenericParams,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Static {
    pub ty: TypeRef,
    pub value: Option<ExprPtr>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssociatedType {
    pub bounds: Vec<GenericPath>,
    pub default: Option<TypeRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trait {
    pub params: GenericParams,
    pub types: IndexMap<String, AssociatedType>,
    pub methods: IndexMap<String, Function>,
}

/// Inherent impl block, `impl<T> Wrapper<T> { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeImpl {
    pub params: GenericParams,
    /// Self-type pattern; may reference the block's generic parameters
    pub self_ty: TypeRef,
    pub methods: IndexMap<String, Function>,
}

impl TypeImpl {
    pub fn new(params: GenericParams, self_ty: TypeRef) -> Self {
        Self {
            params,
            self_ty,
            methods: IndexMap::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, function: Function) -> Self {
        self.methods.insert(name.into(), function);
        self
    }
}

/// Trait impl block, `impl<T> Display for Wrapper<T> { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TraitImpl {
    pub params: GenericParams,
    pub trait_: GenericPath,
    pub self_ty: TypeRef,
    pub types: IndexMap<String, TypeRef>,
    pub methods: IndexMap<String, Function>,
}

impl TraitImpl {
    pub fn new(params: GenericParams, trait_: GenericPath, self_ty: TypeRef) -> Self {
        Self {
            params,
            trait_,
            self_ty,
            types: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Module(Module),
    Function(Function),
    Struct(Struct),
    Enum(Enum),
    TypeAlias(TypeAlias),
    Static(Static),
    Trait(Trait),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub items: IndexMap<String, Item>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }
}
