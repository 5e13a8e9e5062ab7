//! Visitor traits for mutable traversal of the HIR
//!
//! Three traits share one type walker:
//!
//! - [`TypeVisitor`] walks types and paths
//! - [`Visitor`] walks a crate's items and their signatures, handing bodies
//!   to [`Visitor::visit_expr`]
//! - [`ExprVisitor`] walks a single body
//!
//! Every method defaults to the matching `walk_*` function, which performs a
//! depth-first traversal. Implementors override the methods they care about
//! and call back into `walk_*` to keep descending.

use crate::expr::{ExprArena, ExprId, ExprKind, ExprPtr};
use crate::item::{
    Enum, Function, GenericBound, GenericParams, Item, Module, Static, Struct, Trait, TraitImpl,
    TypeAlias, TypeImpl,
};
use crate::krate::Crate;
use crate::path::{GenericPath, Path, PathParams, SimplePath};
use crate::types::{TypeData, TypeRef};
use std::fmt;

/// Visitor over types and the paths embedded in them
pub trait TypeVisitor: Sized {
    type Error;

    /// Visit a type
    fn visit_type(&mut self, ty: &mut TypeRef) -> Result<(), Self::Error> {
        walk_type(self, ty)
    }

    /// Visit a path embedded in a type or expression
    fn visit_path(&mut self, path: &mut Path) -> Result<(), Self::Error> {
        walk_path(self, path)
    }

    /// Visit a path with generic arguments
    fn visit_generic_path(&mut self, path: &mut GenericPath) -> Result<(), Self::Error> {
        walk_generic_path(self, path)
    }

    /// Visit the generic arguments of a path
    fn visit_path_params(&mut self, params: &mut PathParams) -> Result<(), Self::Error> {
        walk_path_params(self, params)
    }
}

pub fn walk_type<V: TypeVisitor>(visitor: &mut V, ty: &mut TypeRef) -> Result<(), V::Error> {
    match ty.data_mut() {
        TypeData::Diverge | TypeData::Primitive(_) | TypeData::Generic(_) => Ok(()),
        TypeData::Path(path) => visitor.visit_path(path),
        TypeData::TraitObject { trait_, markers } => {
            visitor.visit_generic_path(trait_)?;
            for marker in markers {
                visitor.visit_generic_path(marker)?;
            }
            Ok(())
        }
        TypeData::ErasedType(erased) => {
            visitor.visit_path(&mut erased.origin)?;
            for bound in &mut erased.bounds {
                visitor.visit_generic_path(bound)?;
            }
            Ok(())
        }
        TypeData::Array { inner, .. }
        | TypeData::Slice(inner)
        | TypeData::Borrow { inner, .. }
        | TypeData::Pointer { inner, .. } => visitor.visit_type(inner),
        TypeData::Tuple(elements) => {
            for element in elements {
                visitor.visit_type(element)?;
            }
            Ok(())
        }
        TypeData::Function(func) => {
            for arg in &mut func.args {
                visitor.visit_type(arg)?;
            }
            visitor.visit_type(&mut func.ret)
        }
    }
}

pub fn walk_path<V: TypeVisitor>(visitor: &mut V, path: &mut Path) -> Result<(), V::Error> {
    match path {
        Path::Generic(path) => visitor.visit_generic_path(path),
        Path::UfcsInherent { ty, params, .. } | Path::UfcsUnknown { ty, params, .. } => {
            visitor.visit_type(ty)?;
            visitor.visit_path_params(params)
        }
        Path::UfcsKnown {
            ty, trait_, params, ..
        } => {
            visitor.visit_type(ty)?;
            visitor.visit_generic_path(trait_)?;
            visitor.visit_path_params(params)
        }
    }
}

pub fn walk_generic_path<V: TypeVisitor>(
    visitor: &mut V,
    path: &mut GenericPath,
) -> Result<(), V::Error> {
    visitor.visit_path_params(&mut path.params)
}

pub fn walk_path_params<V: TypeVisitor>(
    visitor: &mut V,
    params: &mut PathParams,
) -> Result<(), V::Error> {
    for ty in &mut params.types {
        visitor.visit_type(ty)?;
    }
    Ok(())
}

/// Names the function currently being visited
#[derive(Debug, Clone, Copy)]
pub enum ItemPath<'a> {
    Item(&'a SimplePath),
    InherentMethod {
        self_ty: &'a TypeRef,
        name: &'a str,
    },
    /// `self_ty` is `None` inside the trait definition itself
    TraitMethod {
        trait_: &'a SimplePath,
        self_ty: Option<&'a TypeRef>,
        name: &'a str,
    },
}

impl fmt::Display for ItemPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemPath::Item(path) => write!(f, "{path}"),
            ItemPath::InherentMethod { self_ty, name } => write!(f, "<{self_ty}>::{name}"),
            ItemPath::TraitMethod {
                trait_,
                self_ty: Some(self_ty),
                name,
            } => write!(f, "<{self_ty} as {trait_}>::{name}"),
            ItemPath::TraitMethod {
                trait_,
                self_ty: None,
                name,
            } => write!(f, "{trait_}::{name}"),
        }
    }
}

/// Crate-wide visitor over items and signatures
pub trait Visitor: TypeVisitor {
    /// Visit a whole crate
    fn visit_crate(&mut self, krate: &mut Crate) -> Result<(), Self::Error> {
        walk_crate(self, krate)
    }

    /// Visit a module and its items
    fn visit_module(&mut self, path: &SimplePath, module: &mut Module) -> Result<(), Self::Error> {
        walk_module(self, path, module)
    }

    /// Visit a module item
    fn visit_item(&mut self, path: &SimplePath, item: &mut Item) -> Result<(), Self::Error> {
        walk_item(self, path, item)
    }

    /// Visit a function definition
    fn visit_function(
        &mut self,
        _path: ItemPath<'_>,
        function: &mut Function,
    ) -> Result<(), Self::Error> {
        walk_function(self, function)
    }

    /// Visit a struct definition
    fn visit_struct(&mut self, _path: &SimplePath, item: &mut Struct) -> Result<(), Self::Error> {
        walk_struct(self, item)
    }

    /// Visit an enum definition
    fn visit_enum(&mut self, _path: &SimplePath, item: &mut Enum) -> Result<(), Self::Error> {
        walk_enum(self, item)
    }

    /// Visit a type alias
    fn visit_type_alias(
        &mut self,
        _path: &SimplePath,
        item: &mut TypeAlias,
    ) -> Result<(), Self::Error> {
        self.visit_generic_params(&mut item.params)?;
        self.visit_type(&mut item.ty)
    }

    /// Visit a static and its initialiser
    fn visit_static(&mut self, _path: &SimplePath, item: &mut Static) -> Result<(), Self::Error> {
        walk_static(self, item)
    }

    /// Visit a trait definition
    fn visit_trait(&mut self, path: &SimplePath, item: &mut Trait) -> Result<(), Self::Error> {
        walk_trait(self, path, item)
    }

    /// Visit an inherent impl block
    fn visit_type_impl(&mut self, imp: &mut TypeImpl) -> Result<(), Self::Error> {
        walk_type_impl(self, imp)
    }

    /// Visit a trait impl block
    fn visit_trait_impl(&mut self, imp: &mut TraitImpl) -> Result<(), Self::Error> {
        walk_trait_impl(self, imp)
    }

    /// Visit a generic parameter list
    fn visit_generic_params(&mut self, params: &mut GenericParams) -> Result<(), Self::Error> {
        walk_generic_params(self, params)
    }

    /// Bodies are opaque at item level
    fn visit_expr(&mut self, _expr: &mut ExprPtr) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk_crate<V: Visitor>(visitor: &mut V, krate: &mut Crate) -> Result<(), V::Error> {
    let root = SimplePath::root(krate.name.clone());
    visitor.visit_module(&root, &mut krate.root)?;
    for imp in &mut krate.type_impls {
        visitor.visit_type_impl(imp)?;
    }
    for imp in &mut krate.trait_impls {
        visitor.visit_trait_impl(imp)?;
    }
    Ok(())
}

pub fn walk_module<V: Visitor>(
    visitor: &mut V,
    path: &SimplePath,
    module: &mut Module,
) -> Result<(), V::Error> {
    for (name, item) in module.items.iter_mut() {
        let item_path = path.join(name.clone());
        visitor.visit_item(&item_path, item)?;
    }
    Ok(())
}

pub fn walk_item<V: Visitor>(
    visitor: &mut V,
    path: &SimplePath,
    item: &mut Item,
) -> Result<(), V::Error> {
    match item {
        Item::Module(module) => visitor.visit_module(path, module),
        Item::Function(function) => visitor.visit_function(ItemPath::Item(path), function),
        Item::Struct(item) => visitor.visit_struct(path, item),
        Item::Enum(item) => visitor.visit_enum(path, item),
        Item::TypeAlias(item) => visitor.visit_type_alias(path, item),
        Item::Static(item) => visitor.visit_static(path, item),
        Item::Trait(item) => visitor.visit_trait(path, item),
    }
}

pub fn walk_function<V: Visitor>(visitor: &mut V, function: &mut Function) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut function.params)?;
    for arg in &mut function.args {
        visitor.visit_type(&mut arg.ty)?;
    }
    visitor.visit_type(&mut function.ret)?;
    if let Some(code) = &mut function.code {
        visitor.visit_expr(code)?;
    }
    Ok(())
}

pub fn walk_struct<V: Visitor>(visitor: &mut V, item: &mut Struct) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut item.params)?;
    for field in &mut item.fields {
        visitor.visit_type(&mut field.ty)?;
    }
    Ok(())
}

pub fn walk_enum<V: Visitor>(visitor: &mut V, item: &mut Enum) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut item.params)?;
    for variant in &mut item.variants {
        for field in &mut variant.fields {
            visitor.visit_type(field)?;
        }
    }
    Ok(())
}

pub fn walk_static<V: Visitor>(visitor: &mut V, item: &mut Static) -> Result<(), V::Error> {
    visitor.visit_type(&mut item.ty)?;
    if let Some(value) = &mut item.value {
        visitor.visit_expr(value)?;
    }
    Ok(())
}

pub fn walk_trait<V: Visitor>(
    visitor: &mut V,
    path: &SimplePath,
    item: &mut Trait,
) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut item.params)?;
    for associated in item.types.values_mut() {
        for bound in &mut associated.bounds {
            visitor.visit_generic_path(bound)?;
        }
        if let Some(default) = &mut associated.default {
            visitor.visit_type(default)?;
        }
    }
    for (name, method) in item.methods.iter_mut() {
        let method_path = ItemPath::TraitMethod {
            trait_: path,
            self_ty: None,
            name: name.as_str(),
        };
        visitor.visit_function(method_path, method)?;
    }
    Ok(())
}

pub fn walk_type_impl<V: Visitor>(visitor: &mut V, imp: &mut TypeImpl) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut imp.params)?;
    visitor.visit_type(&mut imp.self_ty)?;
    for (name, method) in imp.methods.iter_mut() {
        let method_path = ItemPath::InherentMethod {
            self_ty: &imp.self_ty,
            name: name.as_str(),
        };
        visitor.visit_function(method_path, method)?;
    }
    Ok(())
}

pub fn walk_trait_impl<V: Visitor>(visitor: &mut V, imp: &mut TraitImpl) -> Result<(), V::Error> {
    visitor.visit_generic_params(&mut imp.params)?;
    visitor.visit_generic_path(&mut imp.trait_)?;
    visitor.visit_type(&mut imp.self_ty)?;
    for ty in imp.types.values_mut() {
        visitor.visit_type(ty)?;
    }
    for (name, method) in imp.methods.iter_mut() {
        let method_path = ItemPath::TraitMethod {
            trait_: &imp.trait_.path,
            self_ty: Some(&imp.self_ty),
            name: name.as_str(),
        };
        visitor.visit_function(method_path, method)?;
    }
    Ok(())
}

pub fn walk_generic_params<V: Visitor>(
    visitor: &mut V,
    params: &mut GenericParams,
) -> Result<(), V::Error> {
    for param in &mut params.types {
        if let Some(default) = &mut param.default {
            visitor.visit_type(default)?;
        }
    }
    for param in &mut params.values {
        visitor.visit_type(&mut param.ty)?;
    }
    for bound in &mut params.bounds {
        match bound {
            GenericBound::TraitBound { ty, trait_ } => {
                visitor.visit_type(ty)?;
                visitor.visit_generic_path(trait_)?;
            }
            GenericBound::TypeEquality { ty, other } => {
                visitor.visit_type(ty)?;
                visitor.visit_type(other)?;
            }
        }
    }
    Ok(())
}

/// Visitor over one body
pub trait ExprVisitor: TypeVisitor {
    /// Visit a whole body
    fn visit_root(&mut self, expr: &mut ExprPtr) -> Result<(), Self::Error> {
        walk_root(self, expr)
    }

    /// Visit one expression node
    fn visit_node(&mut self, arena: &mut ExprArena, id: ExprId) -> Result<(), Self::Error> {
        walk_node(self, arena, id)
    }
}

/// Root node first, then binding types, then the erased-type table
pub fn walk_root<V: ExprVisitor>(visitor: &mut V, expr: &mut ExprPtr) -> Result<(), V::Error> {
    visitor.visit_node(&mut expr.arena, expr.root)?;
    for ty in &mut expr.bindings {
        visitor.visit_type(ty)?;
    }
    for ty in &mut expr.erased_types {
        visitor.visit_type(ty)?;
    }
    Ok(())
}

/// Children first, then the node's own types, then its result type
pub fn walk_node<V: ExprVisitor>(
    visitor: &mut V,
    arena: &mut ExprArena,
    id: ExprId,
) -> Result<(), V::Error> {
    for child in arena[id].kind.children() {
        visitor.visit_node(arena, child)?;
    }
    let node = &mut arena[id];
    walk_node_kind(visitor, &mut node.kind)?;
    visitor.visit_type(&mut node.res_type)
}

fn walk_node_kind<V: TypeVisitor>(visitor: &mut V, kind: &mut ExprKind) -> Result<(), V::Error> {
    match kind {
        ExprKind::Let { ty, .. } | ExprKind::Cast { ty, .. } => visitor.visit_type(ty),
        ExprKind::PathValue(path)
        | ExprKind::CallPath { path, .. }
        | ExprKind::CallMethod { path, .. } => visitor.visit_path(path),
        ExprKind::StructLiteral { path, .. } => visitor.visit_generic_path(path),
        ExprKind::Closure { args, ret, .. } => {
            for (_, ty) in args {
                visitor.visit_type(ty)?;
            }
            visitor.visit_type(ret)
        }
        ExprKind::Block { .. }
        | ExprKind::Return(_)
        | ExprKind::If { .. }
        | ExprKind::Literal(_)
        | ExprKind::Variable { .. }
        | ExprKind::Field { .. }
        | ExprKind::Tuple(_) => Ok(()),
    }
}
