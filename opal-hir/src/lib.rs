//! Opal HIR
//!
//! The typed, fully-resolved intermediate representation consumed by the
//! Opal expansion passes.
//!
//! ## Layout
//!
//! - **Types** (`types`): owned type trees, including the erased-type
//!   placeholder left behind by `impl Trait` return positions
//! - **Paths** (`path`): item references, plain or qualified by a type
//! - **Items** (`item`, `krate`): functions, type definitions, traits and impl
//!   blocks gathered into a `Crate`
//! - **Bodies** (`expr`): per-function expression arenas with cached types
//! - **Traversal** (`visitor`, `matching`): mutable visitors and the structural
//!   generic matcher

pub mod expr;
pub mod item;
pub mod krate;
pub mod matching;
pub mod path;
pub mod types;
pub mod visitor;

pub use expr::{ExprArena, ExprId, ExprKind, ExprNode, ExprPtr, Literal};
pub use item::{
    AssociatedType, Enum, EnumVariant, Function, FunctionArg, GenericBound, GenericParams, Item,
    Module, Static, Struct, StructField, Trait, TraitImpl, TypeAlias, TypeImpl, TypeParamDef,
    ValueParamDef,
};
pub use krate::Crate;
pub use matching::MatchGenerics;
pub use path::{GenericPath, Path, PathParams, SimplePath};
pub use types::{
    BorrowKind, ConstValue, CoreType, ErasedType, FunctionType, GenericRef, GenericSlot, TypeData,
    TypeRef,
};
pub use visitor::{ExprVisitor, ItemPath, TypeVisitor, Visitor};
