// Rendering of types and paths
// Diagnostics print these, so the format is part of the contract

use opal_hir::{
    BorrowKind, ConstValue, CoreType, GenericPath, GenericRef, Path, PathParams, SimplePath,
    TypeRef,
};
use pretty_assertions::assert_eq;

fn named(name: &str, types: Vec<TypeRef>) -> TypeRef {
    TypeRef::named(GenericPath::with_types(SimplePath::new("demo", [name]), types))
}

#[test]
fn test_display_primitives_and_compounds() {
    let u8_ty = TypeRef::primitive(CoreType::U8);

    assert_eq!(u8_ty.to_string(), "u8");
    assert_eq!(TypeRef::unit().to_string(), "()");
    assert_eq!(TypeRef::diverge().to_string(), "!");
    assert_eq!(TypeRef::tuple(vec![u8_ty.clone()]).to_string(), "(u8,)");
    assert_eq!(
        TypeRef::borrow(BorrowKind::Unique, TypeRef::slice(u8_ty.clone())).to_string(),
        "&mut [u8]"
    );
    assert_eq!(
        TypeRef::array(u8_ty.clone(), ConstValue::Integer(4)).to_string(),
        "[u8; 4]"
    );
    assert_eq!(
        TypeRef::pointer(false, u8_ty.clone()).to_string(),
        "*const u8"
    );
    assert_eq!(
        TypeRef::function(vec![u8_ty.clone()], TypeRef::unit()).to_string(),
        "fn(u8) -> ()"
    );
}

#[test]
fn test_display_named_and_generic() {
    let t = TypeRef::generic(GenericRef::impl_param("T", 0));

    assert_eq!(
        named("Wrapper", vec![t, TypeRef::primitive(CoreType::I32)]).to_string(),
        "demo::Wrapper<T, i32>"
    );
    assert_eq!(named("Unit", Vec::new()).to_string(), "demo::Unit");
}

#[test]
fn test_display_paths() {
    let wrapper = named("Wrapper", vec![TypeRef::primitive(CoreType::I32)]);
    let iterator = GenericPath::bare(SimplePath::new("core", ["Iterator"]));

    assert_eq!(
        Path::inherent(wrapper.clone(), "get", PathParams::new()).to_string(),
        "<demo::Wrapper<i32>>::get"
    );
    assert_eq!(
        Path::known(wrapper.clone(), iterator, "next", PathParams::new()).to_string(),
        "<demo::Wrapper<i32> as core::Iterator>::next"
    );
    assert_eq!(
        Path::unknown(wrapper, "next", PathParams::new()).to_string(),
        "<demo::Wrapper<i32> as _>::next"
    );
}

#[test]
fn test_display_erased_type() {
    let origin = Path::function(SimplePath::new("demo", ["make"]), PathParams::new());
    let iterator = GenericPath::bare(SimplePath::new("core", ["Iterator"]));

    assert_eq!(
        TypeRef::erased(origin.clone(), 0).to_string(),
        "impl ? @ demo::make#0"
    );
    assert_eq!(
        TypeRef::erased_with_bounds(origin, 1, vec![iterator]).to_string(),
        "impl core::Iterator @ demo::make#1"
    );
}

#[test]
fn test_contains_erased_looks_through_paths() {
    let origin = Path::function(SimplePath::new("demo", ["make"]), PathParams::new());
    let erased = TypeRef::erased(origin, 0);

    assert!(erased.is_erased());
    assert!(named("Vec", vec![erased.clone()]).contains_erased());
    assert!(TypeRef::borrow(BorrowKind::Shared, erased).contains_erased());
    assert!(!named("Vec", vec![TypeRef::unit()]).contains_erased());
}
