//! Resolution of erased-type origin paths
//!
//! The crate is mutated while it is walked, so lookups go through a
//! `CrateIndex`: a read-only snapshot of every function that can own an
//! erased-type table.

use crate::error::{ExpandError, ExpandResult};
use crate::matcher::{could_match, ImplParamMatcher};
use crate::monomorph::MonomorphState;
use indexmap::IndexMap;
use opal_hir::{Crate, Function, GenericParams, Path, SimplePath, TypeRef};
use tracing::debug;

/// The parts of a function the expansion pass reads
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub params: GenericParams,
    pub erased_types: Vec<TypeRef>,
}

impl FunctionInfo {
    fn from_function(function: &Function) -> Self {
        Self {
            params: function.params.clone(),
            erased_types: function.erased_types().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImplInfo {
    pub params: GenericParams,
    pub self_ty: TypeRef,
    pub methods: IndexMap<String, FunctionInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct CrateIndex {
    functions: IndexMap<SimplePath, FunctionInfo>,
    type_impls: Vec<ImplInfo>,
}

impl CrateIndex {
    pub fn build(krate: &Crate) -> Self {
        let functions = krate
            .functions()
            .into_iter()
            .map(|(path, function)| (path, FunctionInfo::from_function(function)))
            .collect();

        let type_impls = krate
            .type_impls
            .iter()
            .map(|imp| ImplInfo {
                params: imp.params.clone(),
                self_ty: imp.self_ty.clone(),
                methods: imp
                    .methods
                    .iter()
                    .map(|(name, function)| (name.clone(), FunctionInfo::from_function(function)))
                    .collect(),
            })
            .collect();

        Self {
            functions,
            type_impls,
        }
    }

    pub fn get_function(&self, path: &SimplePath) -> Option<&FunctionInfo> {
        self.functions.get(path)
    }

    /// First inherent impl, in declaration order, whose self type could
    /// match `receiver` and which defines `name`
    pub fn find_inherent_method(
        &self,
        receiver: &TypeRef,
        name: &str,
    ) -> Option<(&ImplInfo, &FunctionInfo)> {
        self.type_impls
            .iter()
            .filter(|imp| could_match(&imp.self_ty, receiver))
            .find_map(|imp| {
                debug!(self_ty = %imp.self_ty, method = name, "candidate impl");
                imp.methods.get(name).map(|function| (imp, function))
            })
    }

    /// Find the function an erased type's origin path names, together with
    /// the substitution the path establishes
    pub fn resolve_origin(&self, origin: &Path) -> ExpandResult<(&FunctionInfo, MonomorphState)> {
        match origin {
            Path::UfcsUnknown { .. } => Err(ExpandError::StaleState {
                path: origin.clone(),
            }),
            Path::UfcsKnown { .. } => Err(ExpandError::UnsupportedShape {
                path: origin.clone(),
                feature: "erased type through a trait method".to_string(),
            }),
            Path::Generic(path) => {
                let function = self.get_function(&path.path).ok_or_else(|| {
                    ExpandError::LookupFailure {
                        path: origin.clone(),
                        what: "function",
                    }
                })?;
                Ok((function, MonomorphState::for_function(path.params.clone())))
            }
            Path::UfcsInherent { ty, item, params } => {
                let (imp, function) = self.find_inherent_method(ty, item).ok_or_else(|| {
                    ExpandError::LookupFailure {
                        path: origin.clone(),
                        what: "inherent method",
                    }
                })?;

                let mut matcher = ImplParamMatcher::new(origin, &imp.params);
                imp.self_ty.match_generics(ty, &mut matcher)?;
                let impl_params = matcher.finish(&imp.params)?;

                Ok((
                    function,
                    MonomorphState::for_inherent(ty.clone(), impl_params, params.clone()),
                ))
            }
        }
    }
}
