//! Structural matching of a generic pattern type against a concrete type
//!
//! The walk itself never decides what a binding means. Each generic slot
//! reached in the pattern is handed to a [`MatchGenerics`] implementation,
//! and so is every constructor disagreement.

use crate::path::{GenericPath, Path, PathParams};
use crate::types::{ConstValue, GenericRef, TypeData, TypeRef};

/// Receives bindings produced by [`TypeRef::match_generics`]
pub trait MatchGenerics {
    type Error;

    /// `generic` in the pattern lines up with `ty` in the concrete type
    fn bind_type(&mut self, generic: &GenericRef, ty: &TypeRef) -> Result<(), Self::Error>;

    /// A value generic in the pattern lines up with `value`
    fn bind_value(&mut self, generic: &GenericRef, value: &ConstValue) -> Result<(), Self::Error>;

    /// Pattern and concrete type disagree at this position
    fn mismatch(&mut self, pattern: &TypeRef, concrete: &TypeRef) -> Self::Error;
}

impl TypeRef {
    /// Match `self` as a pattern against `concrete`
    pub fn match_generics<M: MatchGenerics>(
        &self,
        concrete: &TypeRef,
        matcher: &mut M,
    ) -> Result<(), M::Error> {
        match_type(self, concrete, matcher)
    }
}

fn match_type<M: MatchGenerics>(
    pattern: &TypeRef,
    concrete: &TypeRef,
    m: &mut M,
) -> Result<(), M::Error> {
    match (pattern.data(), concrete.data()) {
        (TypeData::Generic(generic), _) => m.bind_type(generic, concrete),
        (TypeData::Diverge, TypeData::Diverge) => Ok(()),
        (TypeData::Primitive(a), TypeData::Primitive(b)) if a == b => Ok(()),
        (TypeData::Path(a), TypeData::Path(b)) => match_path(a, b, pattern, concrete, m),
        (
            TypeData::TraitObject {
                trait_: trait_a,
                markers: markers_a,
            },
            TypeData::TraitObject {
                trait_: trait_b,
                markers: markers_b,
            },
        ) if markers_a.len() == markers_b.len() => {
            match_generic_path(trait_a, trait_b, pattern, concrete, m)?;
            for (a, b) in markers_a.iter().zip(markers_b) {
                match_generic_path(a, b, pattern, concrete, m)?;
            }
            Ok(())
        }
        (TypeData::ErasedType(a), TypeData::ErasedType(b)) if a.index == b.index => {
            match_path(&a.origin, &b.origin, pattern, concrete, m)
        }
        (
            TypeData::Array {
                inner: inner_a,
                size: size_a,
            },
            TypeData::Array {
                inner: inner_b,
                size: size_b,
            },
        ) => {
            match_type(inner_a, inner_b, m)?;
            match_value(size_a, size_b, pattern, concrete, m)
        }
        (TypeData::Slice(a), TypeData::Slice(b)) => match_type(a, b, m),
        (TypeData::Tuple(a), TypeData::Tuple(b)) if a.len() == b.len() => {
            for (a, b) in a.iter().zip(b) {
                match_type(a, b, m)?;
            }
            Ok(())
        }
        (
            TypeData::Borrow {
                kind: kind_a,
                inner: inner_a,
            },
            TypeData::Borrow {
                kind: kind_b,
                inner: inner_b,
            },
        ) if kind_a == kind_b => match_type(inner_a, inner_b, m),
        (
            TypeData::Pointer {
                mutable: mut_a,
                inner: inner_a,
            },
            TypeData::Pointer {
                mutable: mut_b,
                inner: inner_b,
            },
        ) if mut_a == mut_b => match_type(inner_a, inner_b, m),
        (TypeData::Function(a), TypeData::Function(b)) if a.args.len() == b.args.len() => {
            for (a, b) in a.args.iter().zip(&b.args) {
                match_type(a, b, m)?;
            }
            match_type(&a.ret, &b.ret, m)
        }
        _ => Err(m.mismatch(pattern, concrete)),
    }
}

fn match_value<M: MatchGenerics>(
    value: &ConstValue,
    concrete_value: &ConstValue,
    pattern: &TypeRef,
    concrete: &TypeRef,
    m: &mut M,
) -> Result<(), M::Error> {
    match value {
        ConstValue::Generic(generic) => m.bind_value(generic, concrete_value),
        _ if value == concrete_value => Ok(()),
        _ => Err(m.mismatch(pattern, concrete)),
    }
}

fn match_path<M: MatchGenerics>(
    a: &Path,
    b: &Path,
    pattern: &TypeRef,
    concrete: &TypeRef,
    m: &mut M,
) -> Result<(), M::Error> {
    match (a, b) {
        (Path::Generic(a), Path::Generic(b)) => match_generic_path(a, b, pattern, concrete, m),
        (
            Path::UfcsInherent {
                ty: ty_a,
                item: item_a,
                params: params_a,
            },
            Path::UfcsInherent {
                ty: ty_b,
                item: item_b,
                params: params_b,
            },
        )
        | (
            Path::UfcsUnknown {
                ty: ty_a,
                item: item_a,
                params: params_a,
            },
            Path::UfcsUnknown {
                ty: ty_b,
                item: item_b,
                params: params_b,
            },
        ) if item_a == item_b => {
            match_type(ty_a, ty_b, m)?;
            match_params(params_a, params_b, pattern, concrete, m)
        }
        (
            Path::UfcsKnown {
                ty: ty_a,
                trait_: trait_a,
                item: item_a,
                params: params_a,
            },
            Path::UfcsKnown {
                ty: ty_b,
                trait_: trait_b,
                item: item_b,
                params: params_b,
            },
        ) if item_a == item_b => {
            match_type(ty_a, ty_b, m)?;
            match_generic_path(trait_a, trait_b, pattern, concrete, m)?;
            match_params(params_a, params_b, pattern, concrete, m)
        }
        _ => Err(m.mismatch(pattern, concrete)),
    }
}

fn match_generic_path<M: MatchGenerics>(
    a: &GenericPath,
    b: &GenericPath,
    pattern: &TypeRef,
    concrete: &TypeRef,
    m: &mut M,
) -> Result<(), M::Error> {
    if a.path != b.path {
        return Err(m.mismatch(pattern, concrete));
    }
    match_params(&a.params, &b.params, pattern, concrete, m)
}

fn match_params<M: MatchGenerics>(
    a: &PathParams,
    b: &PathParams,
    pattern: &TypeRef,
    concrete: &TypeRef,
    m: &mut M,
) -> Result<(), M::Error> {
    if a.types.len() != b.types.len() || a.values.len() != b.values.len() {
        return Err(m.mismatch(pattern, concrete));
    }
    for (a, b) in a.types.iter().zip(&b.types) {
        match_type(a, b, m)?;
    }
    for (a, b) in a.values.iter().zip(&b.values) {
        match_value(a, b, pattern, concrete, m)?;
    }
    Ok(())
}
