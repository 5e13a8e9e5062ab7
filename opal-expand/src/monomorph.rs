//! Substitution of concrete types for generic slots
//!
//! A `MonomorphState` holds up to three independent binding sources: the
//! self type, the impl block's parameters and the function's own parameters.
//! Each generic slot kind reads from exactly one of them.

use crate::error::{ExpandError, ExpandResult};
use opal_hir::{
    ConstValue, ErasedType, FunctionType, GenericPath, GenericRef, GenericSlot, Path, PathParams,
    TypeData, TypeRef,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonomorphState {
    pub self_ty: Option<TypeRef>,
    pub impl_params: Option<PathParams>,
    pub method_params: Option<PathParams>,
}

impl MonomorphState {
    /// State for a free function called with `params`
    pub fn for_function(params: PathParams) -> Self {
        Self {
            self_ty: None,
            impl_params: None,
            method_params: Some(params),
        }
    }

    /// State for an inherent method on `self_ty`
    pub fn for_inherent(self_ty: TypeRef, impl_params: PathParams, params: PathParams) -> Self {
        Self {
            self_ty: Some(self_ty),
            impl_params: Some(impl_params),
            method_params: Some(params),
        }
    }

    pub fn get_type(&self, generic: &GenericRef) -> Option<&TypeRef> {
        match generic.slot {
            GenericSlot::SelfType => self.self_ty.as_ref(),
            GenericSlot::Impl(index) => self.impl_params.as_ref()?.types.get(index),
            GenericSlot::Method(index) => self.method_params.as_ref()?.types.get(index),
        }
    }

    pub fn get_value(&self, generic: &GenericRef) -> Option<&ConstValue> {
        match generic.slot {
            GenericSlot::SelfType => None,
            GenericSlot::Impl(index) => self.impl_params.as_ref()?.values.get(index),
            GenericSlot::Method(index) => self.method_params.as_ref()?.values.get(index),
        }
    }

    /// Instantiate `template` under this state
    ///
    /// Erased types inside the template keep their placeholder form; only
    /// the generics in their origin paths are substituted.
    pub fn monomorph_type(&self, template: &TypeRef) -> ExpandResult<TypeRef> {
        Monomorphizer {
            state: self,
            template,
        }
        .ty(template)
    }
}

/// Carries the top-level template for error reporting
struct Monomorphizer<'a> {
    state: &'a MonomorphState,
    template: &'a TypeRef,
}

impl Monomorphizer<'_> {
    fn uncovered(&self, generic: &GenericRef) -> ExpandError {
        ExpandError::UncoveredGeneric {
            generic: generic.clone(),
            template: self.template.clone(),
        }
    }

    fn ty(&self, ty: &TypeRef) -> ExpandResult<TypeRef> {
        let data = match ty.data() {
            TypeData::Generic(generic) => {
                return self
                    .state
                    .get_type(generic)
                    .cloned()
                    .ok_or_else(|| self.uncovered(generic));
            }
            TypeData::Diverge => TypeData::Diverge,
            TypeData::Primitive(core) => TypeData::Primitive(*core),
            TypeData::Path(path) => TypeData::Path(self.path(path)?),
            TypeData::TraitObject { trait_, markers } => TypeData::TraitObject {
                trait_: self.generic_path(trait_)?,
                markers: markers
                    .iter()
                    .map(|marker| self.generic_path(marker))
                    .collect::<ExpandResult<_>>()?,
            },
            TypeData::ErasedType(erased) => TypeData::ErasedType(ErasedType {
                origin: self.path(&erased.origin)?,
                index: erased.index,
                bounds: erased
                    .bounds
                    .iter()
                    .map(|bound| self.generic_path(bound))
                    .collect::<ExpandResult<_>>()?,
            }),
            TypeData::Array { inner, size } => TypeData::Array {
                inner: self.ty(inner)?,
                size: self.value(size)?,
            },
            TypeData::Slice(inner) => TypeData::Slice(self.ty(inner)?),
            TypeData::Tuple(elements) => TypeData::Tuple(self.types(elements)?),
            TypeData::Borrow { kind, inner } => TypeData::Borrow {
                kind: *kind,
                inner: self.ty(inner)?,
            },
            TypeData::Pointer { mutable, inner } => TypeData::Pointer {
                mutable: *mutable,
                inner: self.ty(inner)?,
            },
            TypeData::Function(func) => TypeData::Function(FunctionType {
                args: self.types(&func.args)?,
                ret: self.ty(&func.ret)?,
            }),
        };
        Ok(TypeRef::new(data))
    }

    fn types(&self, types: &[TypeRef]) -> ExpandResult<Vec<TypeRef>> {
        types.iter().map(|ty| self.ty(ty)).collect()
    }

    fn value(&self, value: &ConstValue) -> ExpandResult<ConstValue> {
        match value {
            ConstValue::Generic(generic) => self
                .state
                .get_value(generic)
                .cloned()
                .ok_or_else(|| self.uncovered(generic)),
            ConstValue::Integer(_) => Ok(value.clone()),
        }
    }

    fn path(&self, path: &Path) -> ExpandResult<Path> {
        Ok(match path {
            Path::Generic(path) => Path::Generic(self.generic_path(path)?),
            Path::UfcsInherent { ty, item, params } => Path::UfcsInherent {
                ty: self.ty(ty)?,
                item: item.clone(),
                params: self.params(params)?,
            },
            Path::UfcsKnown {
                ty,
                trait_,
                item,
                params,
            } => Path::UfcsKnown {
                ty: self.ty(ty)?,
                trait_: self.generic_path(trait_)?,
                item: item.clone(),
                params: self.params(params)?,
            },
            Path::UfcsUnknown { ty, item, params } => Path::UfcsUnknown {
                ty: self.ty(ty)?,
                item: item.clone(),
                params: self.params(params)?,
            },
        })
    }

    fn generic_path(&self, path: &GenericPath) -> ExpandResult<GenericPath> {
        Ok(GenericPath {
            path: path.path.clone(),
            params: self.params(&path.params)?,
        })
    }

    fn params(&self, params: &PathParams) -> ExpandResult<PathParams> {
        Ok(PathParams {
            types: self.types(&params.types)?,
            values: params
                .values
                .iter()
                .map(|value| self.value(value))
                .collect::<ExpandResult<_>>()?,
        })
    }
}
