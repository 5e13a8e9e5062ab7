//! Paths to crate items
//!
//! Every item reference in the HIR is one of the `Path` variants. Paths that
//! go through a type (`<T>::item`, `<T as Trait>::item`) are "UFCS" paths.

use crate::types::{ConstValue, TypeRef};
use std::fmt;

/// A bare item path with no generic arguments, e.g. `demo::iter::make`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimplePath {
    pub crate_name: String,
    pub components: Vec<String>,
}

impl SimplePath {
    pub fn new<I, S>(crate_name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            crate_name: crate_name.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// The crate root, `demo`
    pub fn root(crate_name: impl Into<String>) -> Self {
        Self {
            crate_name: crate_name.into(),
            components: Vec::new(),
        }
    }

    /// Append a component, `demo::a` + `b` => `demo::a::b`
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut components = self.components.clone();
        components.push(name.into());
        Self {
            crate_name: self.crate_name.clone(),
            components,
        }
    }

    /// Last component, if any
    pub fn name(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.components.split_last()?;
        Some(Self {
            crate_name: self.crate_name.clone(),
            components: rest.to_vec(),
        })
    }
}

impl fmt::Display for SimplePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.crate_name)?;
        for component in &self.components {
            write!(f, "::{component}")?;
        }
        Ok(())
    }
}

/// Generic arguments attached to a path, `<u8, String, 4>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathParams {
    pub types: Vec<TypeRef>,
    pub values: Vec<ConstValue>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_types(types: Vec<TypeRef>) -> Self {
        Self {
            types,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.values.is_empty()
    }

    pub fn contains_erased(&self) -> bool {
        self.types.iter().any(TypeRef::contains_erased)
    }
}

impl fmt::Display for PathParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        let mut first = true;
        for ty in &self.types {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{ty}")?;
        }
        for value in &self.values {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        f.write_str(">")
    }
}

/// An item path with generic arguments, `demo::Wrapper<i32>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericPath {
    pub path: SimplePath,
    pub params: PathParams,
}

impl GenericPath {
    pub fn new(path: SimplePath, params: PathParams) -> Self {
        Self { path, params }
    }

    pub fn bare(path: SimplePath) -> Self {
        Self {
            path,
            params: PathParams::new(),
        }
    }

    pub fn with_types(path: SimplePath, types: Vec<TypeRef>) -> Self {
        Self {
            path,
            params: PathParams::from_types(types),
        }
    }

    pub fn contains_erased(&self) -> bool {
        self.params.contains_erased()
    }
}

impl fmt::Display for GenericPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.params)
    }
}

/// A reference to an item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Path {
    /// A free item, `demo::make::<u8>`
    Generic(GenericPath),
    /// An inherent associated item, `<Wrapper<i32>>::get`
    UfcsInherent {
        ty: TypeRef,
        item: String,
        params: PathParams,
    },
    /// An associated item through a known trait, `<T as Iterator>::next`
    UfcsKnown {
        ty: TypeRef,
        trait_: GenericPath,
        item: String,
        params: PathParams,
    },
    /// An associated item whose trait has not been resolved yet
    UfcsUnknown {
        ty: TypeRef,
        item: String,
        params: PathParams,
    },
}

impl Path {
    pub fn function(path: SimplePath, params: PathParams) -> Self {
        Path::Generic(GenericPath::new(path, params))
    }

    pub fn inherent(ty: TypeRef, item: impl Into<String>, params: PathParams) -> Self {
        Path::UfcsInherent {
            ty,
            item: item.into(),
            params,
        }
    }

    pub fn known(
        ty: TypeRef,
        trait_: GenericPath,
        item: impl Into<String>,
        params: PathParams,
    ) -> Self {
        Path::UfcsKnown {
            ty,
            trait_,
            item: item.into(),
            params,
        }
    }

    pub fn unknown(ty: TypeRef, item: impl Into<String>, params: PathParams) -> Self {
        Path::UfcsUnknown {
            ty,
            item: item.into(),
            params,
        }
    }

    pub fn contains_erased(&self) -> bool {
        match self {
            Path::Generic(path) => path.contains_erased(),
            Path::UfcsInherent { ty, params, .. } | Path::UfcsUnknown { ty, params, .. } => {
                ty.contains_erased() || params.contains_erased()
            }
            Path::UfcsKnown {
                ty, trait_, params, ..
            } => ty.contains_erased() || trait_.contains_erased() || params.contains_erased(),
        }
    }
}

impl From<GenericPath> for Path {
    fn from(path: GenericPath) -> Self {
        Path::Generic(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Generic(path) => write!(f, "{path}"),
            Path::UfcsInherent { ty, item, params } => write!(f, "<{ty}>::{item}{params}"),
            Path::UfcsKnown {
                ty,
                trait_,
                item,
                params,
            } => write!(f, "<{ty} as {trait_}>::{item}{params}"),
            Path::UfcsUnknown { ty, item, params } => write!(f, "<{ty} as _>::{item}{params}"),
        }
    }
}
