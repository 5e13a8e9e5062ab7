//! Type representation for the HIR
//!
//! Types are owned trees. A `TypeRef` is a thin box around `TypeData` so that
//! a pass holding `&mut TypeRef` can overwrite a node in place without touching
//! its parent.

use crate::path::{GenericPath, Path};
use std::fmt;

/// Built-in primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreType {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
    F32,
    F64,
}

impl CoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreType::Bool => "bool",
            CoreType::Char => "char",
            CoreType::Str => "str",
            CoreType::U8 => "u8",
            CoreType::U16 => "u16",
            CoreType::U32 => "u32",
            CoreType::U64 => "u64",
            CoreType::Usize => "usize",
            CoreType::I8 => "i8",
            CoreType::I16 => "i16",
            CoreType::I32 => "i32",
            CoreType::I64 => "i64",
            CoreType::Isize => "isize",
            CoreType::F32 => "f32",
            CoreType::F64 => "f64",
        }
    }
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which generic parameter list a generic reference points into
///
/// `Impl` slots index the enclosing impl block's (or type's) parameters,
/// `Method` slots index the function's own parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericSlot {
    SelfType,
    Impl(usize),
    Method(usize),
}

/// A reference to a generic parameter, e.g. `T` in `impl<T> Wrapper<T>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericRef {
    pub name: String,
    pub slot: GenericSlot,
}

impl GenericRef {
    pub fn self_type() -> Self {
        Self {
            name: "Self".to_string(),
            slot: GenericSlot::SelfType,
        }
    }

    pub fn impl_param(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            slot: GenericSlot::Impl(index),
        }
    }

    pub fn method_param(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            slot: GenericSlot::Method(index),
        }
    }
}

impl fmt::Display for GenericRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A value (const) argument, e.g. the length of an array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Integer(u128),
    Generic(GenericRef),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Integer(value) => write!(f, "{value}"),
            ConstValue::Generic(generic) => write!(f, "{generic}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowKind {
    Shared,
    Unique,
}

/// Placeholder for the concrete type behind an opaque return type
///
/// Refers to slot `index` of the erased-type table of the function that
/// `origin` resolves to. `bounds` are the traits written in the
/// `impl Trait` position and only matter for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErasedType {
    pub origin: Path,
    pub index: usize,
    pub bounds: Vec<GenericPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub args: Vec<TypeRef>,
    pub ret: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// `!`
    Diverge,
    Primitive(CoreType),
    /// Named types (`Vec<u8>`) and associated types (`<T as Iterator>::Item`)
    Path(Path),
    Generic(GenericRef),
    TraitObject {
        trait_: GenericPath,
        markers: Vec<GenericPath>,
    },
    ErasedType(ErasedType),
    Array {
        inner: TypeRef,
        size: ConstValue,
    },
    Slice(TypeRef),
    Tuple(Vec<TypeRef>),
    Borrow {
        kind: BorrowKind,
        inner: TypeRef,
    },
    Pointer {
        mutable: bool,
        inner: TypeRef,
    },
    Function(FunctionType),
}

/// Owning handle to a type node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(Box<TypeData>);

impl TypeRef {
    pub fn new(data: TypeData) -> Self {
        Self(Box::new(data))
    }

    pub fn data(&self) -> &TypeData {
        &self.0
    }

    pub fn data_mut(&mut self) -> &mut TypeData {
        &mut self.0
    }

    /// `()`
    pub fn unit() -> Self {
        Self::new(TypeData::Tuple(Vec::new()))
    }

    pub fn diverge() -> Self {
        Self::new(TypeData::Diverge)
    }

    pub fn primitive(core: CoreType) -> Self {
        Self::new(TypeData::Primitive(core))
    }

    /// A nominal type such as `Vec<u8>`
    pub fn named(path: GenericPath) -> Self {
        Self::new(TypeData::Path(Path::Generic(path)))
    }

    pub fn generic(generic: GenericRef) -> Self {
        Self::new(TypeData::Generic(generic))
    }

    pub fn self_type() -> Self {
        Self::generic(GenericRef::self_type())
    }

    pub fn erased(origin: Path, index: usize) -> Self {
        Self::new(TypeData::ErasedType(ErasedType {
            origin,
            index,
            bounds: Vec::new(),
        }))
    }

    pub fn erased_with_bounds(origin: Path, index: usize, bounds: Vec<GenericPath>) -> Self {
        Self::new(TypeData::ErasedType(ErasedType {
            origin,
            index,
            bounds,
        }))
    }

    pub fn array(inner: TypeRef, size: ConstValue) -> Self {
        Self::new(TypeData::Array { inner, size })
    }

    pub fn slice(inner: TypeRef) -> Self {
        Self::new(TypeData::Slice(inner))
    }

    pub fn tuple(elements: Vec<TypeRef>) -> Self {
        Self::new(TypeData::Tuple(elements))
    }

    pub fn borrow(kind: BorrowKind, inner: TypeRef) -> Self {
        Self::new(TypeData::Borrow { kind, inner })
    }

    pub fn pointer(mutable: bool, inner: TypeRef) -> Self {
        Self::new(TypeData::Pointer { mutable, inner })
    }

    pub fn function(args: Vec<TypeRef>, ret: TypeRef) -> Self {
        Self::new(TypeData::Function(FunctionType { args, ret }))
    }

    pub fn is_erased(&self) -> bool {
        matches!(self.data(), TypeData::ErasedType(_))
    }

    /// True if an erased-type placeholder appears anywhere inside this type
    pub fn contains_erased(&self) -> bool {
        match self.data() {
            TypeData::ErasedType(_) => true,
            TypeData::Diverge | TypeData::Primitive(_) | TypeData::Generic(_) => false,
            TypeData::Path(path) => path.contains_erased(),
            TypeData::TraitObject { trait_, markers } => {
                trait_.contains_erased() || markers.iter().any(GenericPath::contains_erased)
            }
            TypeData::Array { inner, .. }
            | TypeData::Slice(inner)
            | TypeData::Borrow { inner, .. }
            | TypeData::Pointer { inner, .. } => inner.contains_erased(),
            TypeData::Tuple(elements) => elements.iter().any(TypeRef::contains_erased),
            TypeData::Function(func) => {
                func.args.iter().any(TypeRef::contains_erased) || func.ret.contains_erased()
            }
        }
    }
}

impl From<TypeData> for TypeRef {
    fn from(data: TypeData) -> Self {
        Self::new(data)
    }
}

impl From<CoreType> for TypeRef {
    fn from(core: CoreType) -> Self {
        Self::primitive(core)
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for ErasedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("impl ")?;
        if self.bounds.is_empty() {
            f.write_str("?")?;
        } else {
            write_list(f, &self.bounds, " + ")?;
        }
        write!(f, " @ {}#{}", self.origin, self.index)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            TypeData::Diverge => f.write_str("!"),
            TypeData::Primitive(core) => write!(f, "{core}"),
            TypeData::Path(path) => write!(f, "{path}"),
            TypeData::Generic(generic) => write!(f, "{generic}"),
            TypeData::TraitObject { trait_, markers } => {
                write!(f, "dyn {trait_}")?;
                for marker in markers {
                    write!(f, " + {marker}")?;
                }
                Ok(())
            }
            TypeData::ErasedType(erased) => write!(f, "{erased}"),
            TypeData::Array { inner, size } => write!(f, "[{inner}; {size}]"),
            TypeData::Slice(inner) => write!(f, "[{inner}]"),
            TypeData::Tuple(elements) => {
                f.write_str("(")?;
                write_list(f, elements, ", ")?;
                if elements.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            TypeData::Borrow { kind, inner } => match kind {
                BorrowKind::Shared => write!(f, "&{inner}"),
                BorrowKind::Unique => write!(f, "&mut {inner}"),
            },
            TypeData::Pointer { mutable, inner } => {
                if *mutable {
                    write!(f, "*mut {inner}")
                } else {
                    write!(f, "*const {inner}")
                }
            }
            TypeData::Function(func) => {
                f.write_str("fn(")?;
                write_list(f, &func.args, ", ")?;
                write!(f, ") -> {}", func.ret)
            }
        }
    }
}
