//! Generic matchers used when resolving inherent-method origins

use crate::error::{ExpandError, ExpandResult};
use opal_hir::{
    ConstValue, GenericParams, GenericRef, GenericSlot, MatchGenerics, Path, PathParams, TypeRef,
};
use tracing::trace;

/// Binds an impl block's parameters by matching its self type against a
/// concrete receiver
///
/// A slot seen twice keeps the last binding. The values are expected to
/// agree and are not compared.
pub struct ImplParamMatcher<'a> {
    origin: &'a Path,
    bindings: Vec<Option<TypeRef>>,
}

impl<'a> ImplParamMatcher<'a> {
    pub fn new(origin: &'a Path, params: &GenericParams) -> Self {
        Self {
            origin,
            bindings: vec![None; params.types.len()],
        }
    }

    /// Collect the bindings, failing on the first slot left unbound
    pub fn finish(self, params: &GenericParams) -> ExpandResult<PathParams> {
        let mut types = Vec::with_capacity(self.bindings.len());
        for (index, binding) in self.bindings.into_iter().enumerate() {
            match binding {
                Some(ty) => types.push(ty),
                None => {
                    return Err(ExpandError::UnboundGenericSlot {
                        path: self.origin.clone(),
                        name: params.types[index].name.clone(),
                        index,
                    })
                }
            }
        }
        if !params.values.is_empty() {
            return Err(ExpandError::UnsupportedShape {
                path: self.origin.clone(),
                feature: "value parameters on an inherent impl".to_string(),
            });
        }
        Ok(PathParams::from_types(types))
    }
}

impl MatchGenerics for ImplParamMatcher<'_> {
    type Error = ExpandError;

    fn bind_type(&mut self, generic: &GenericRef, ty: &TypeRef) -> ExpandResult {
        match generic.slot {
            GenericSlot::Impl(index) if index < self.bindings.len() => {
                trace!(%generic, %ty, "bound impl parameter");
                self.bindings[index] = Some(ty.clone());
                Ok(())
            }
            _ => Err(ExpandError::UnsupportedShape {
                path: self.origin.clone(),
                feature: format!("generic {generic} in an impl self type"),
            }),
        }
    }

    fn bind_value(&mut self, generic: &GenericRef, value: &ConstValue) -> ExpandResult {
        Err(ExpandError::UnsupportedShape {
            path: self.origin.clone(),
            feature: format!("value generic {generic} matched against {value}"),
        })
    }

    fn mismatch(&mut self, pattern: &TypeRef, concrete: &TypeRef) -> ExpandError {
        ExpandError::StructuralMismatch {
            pattern: pattern.clone(),
            concrete: concrete.clone(),
        }
    }
}

/// Probe matcher for candidate filtering; rejects conflicting bindings
#[derive(Default)]
struct ProbeMatcher {
    types: Vec<(GenericRef, TypeRef)>,
    values: Vec<(GenericRef, ConstValue)>,
}

impl MatchGenerics for ProbeMatcher {
    type Error = ();

    fn bind_type(&mut self, generic: &GenericRef, ty: &TypeRef) -> Result<(), ()> {
        match self.types.iter().find(|(bound, _)| bound == generic) {
            Some((_, existing)) if existing != ty => Err(()),
            Some(_) => Ok(()),
            None => {
                self.types.push((generic.clone(), ty.clone()));
                Ok(())
            }
        }
    }

    fn bind_value(&mut self, generic: &GenericRef, value: &ConstValue) -> Result<(), ()> {
        match self.values.iter().find(|(bound, _)| bound == generic) {
            Some((_, existing)) if existing != value => Err(()),
            Some(_) => Ok(()),
            None => {
                self.values.push((generic.clone(), value.clone()));
                Ok(())
            }
        }
    }

    fn mismatch(&mut self, _pattern: &TypeRef, _concrete: &TypeRef) {}
}

/// Could an impl with self-type `pattern` apply to `concrete`?
pub fn could_match(pattern: &TypeRef, concrete: &TypeRef) -> bool {
    pattern
        .match_generics(concrete, &mut ProbeMatcher::default())
        .is_ok()
}
