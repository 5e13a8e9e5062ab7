//! Binding impl parameters from a receiver type

use super::fixtures::*;
use crate::{could_match, ExpandError, ImplParamMatcher};
use opal_hir::{
    BorrowKind, ConstValue, GenericParams, GenericRef, Path, PathParams, TypeRef, ValueParamDef,
};
use pretty_assertions::assert_eq;

fn origin() -> Path {
    Path::inherent(named("Wrapper", vec![i32_ty()]), "get", PathParams::new())
}

fn impl_u() -> TypeRef {
    TypeRef::generic(GenericRef::impl_param("U", 1))
}

#[test]
fn test_binds_every_impl_param() {
    let origin = origin();
    let params = GenericParams::with_types(["T", "U"]);
    let pattern = named("Pair", vec![impl_t(), TypeRef::borrow(BorrowKind::Shared, impl_u())]);
    let concrete = named(
        "Pair",
        vec![i32_ty(), TypeRef::borrow(BorrowKind::Shared, string_ty())],
    );

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    pattern.match_generics(&concrete, &mut matcher).unwrap();
    let bound = matcher.finish(&params).unwrap();

    assert_eq!(bound, PathParams::from_types(vec![i32_ty(), string_ty()]));
}

#[test]
fn test_repeated_slot_keeps_last_binding() {
    let origin = origin();
    let params = GenericParams::with_types(["T"]);
    let pattern = TypeRef::tuple(vec![impl_t(), impl_t()]);
    let concrete = TypeRef::tuple(vec![i32_ty(), u8_ty()]);

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    pattern.match_generics(&concrete, &mut matcher).unwrap();

    assert_eq!(
        matcher.finish(&params).unwrap(),
        PathParams::from_types(vec![u8_ty()])
    );
}

#[test]
fn test_constructor_disagreement_is_mismatch() {
    let origin = origin();
    let params = GenericParams::with_types(["T"]);
    let pattern = named("Wrapper", vec![impl_t()]);
    let concrete = TypeRef::slice(i32_ty());

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    let result = pattern.match_generics(&concrete, &mut matcher);

    match result {
        Err(ExpandError::StructuralMismatch { pattern: p, concrete: c }) => {
            assert_eq!(p, pattern);
            assert_eq!(c, concrete);
        }
        other => panic!("expected StructuralMismatch, got {other:?}"),
    }
}

#[test]
fn test_value_generic_is_unsupported() {
    let origin = origin();
    let params = GenericParams::with_types(["T"]);
    let pattern = TypeRef::array(
        impl_t(),
        ConstValue::Generic(GenericRef::impl_param("N", 1)),
    );
    let concrete = TypeRef::array(i32_ty(), ConstValue::Integer(4));

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    let result = pattern.match_generics(&concrete, &mut matcher);

    assert!(matches!(result, Err(ExpandError::UnsupportedShape { .. })));
}

#[test]
fn test_impl_with_value_params_is_unsupported() {
    let origin = origin();
    let mut params = GenericParams::with_types(["T"]);
    params.values.push(ValueParamDef {
        name: "N".to_string(),
        ty: TypeRef::primitive(opal_hir::CoreType::Usize),
    });

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    impl_t().match_generics(&i32_ty(), &mut matcher).unwrap();

    assert!(matches!(
        matcher.finish(&params),
        Err(ExpandError::UnsupportedShape { .. })
    ));
}

#[test]
fn test_method_generic_in_self_type_is_unsupported() {
    let origin = origin();
    let params = GenericParams::with_types(["T"]);

    let mut matcher = ImplParamMatcher::new(&origin, &params);
    let result = method_t().match_generics(&i32_ty(), &mut matcher);

    assert!(matches!(result, Err(ExpandError::UnsupportedShape { .. })));
}

#[test]
fn test_could_match_filters_candidates() {
    let pattern = named("Wrapper", vec![impl_t()]);

    assert!(could_match(&pattern, &named("Wrapper", vec![i32_ty()])));
    assert!(!could_match(&pattern, &named("Other", vec![i32_ty()])));
    assert!(!could_match(&pattern, &named("Wrapper", Vec::new())));
    assert!(could_match(&i32_ty(), &i32_ty()));
    assert!(!could_match(&i32_ty(), &u8_ty()));
}

#[test]
fn test_could_match_rejects_conflicting_bindings() {
    let pattern = TypeRef::tuple(vec![impl_t(), impl_t()]);

    assert!(could_match(&pattern, &TypeRef::tuple(vec![i32_ty(), i32_ty()])));
    assert!(!could_match(&pattern, &TypeRef::tuple(vec![i32_ty(), u8_ty()])));
}
