//! Erased types whose origin is a free function

use super::fixtures::*;
use crate::{expand_erased_types, CrateIndex, ExpandError, MonomorphState};
use opal_hir::{Crate, PathParams, TypeRef};
use pretty_assertions::assert_eq;

#[test]
fn test_resolve_generic_origin_seeds_method_params() {
    let mut krate = Crate::new(CRATE);
    add_function(
        &mut krate,
        "make_vec",
        opaque_fn("make_vec", &["T"], vec![named("VecIter", vec![method_t()])]),
    );
    let index = CrateIndex::build(&krate);

    let (function, state) = index
        .resolve_origin(&call_path("make_vec", vec![i32_ty()]))
        .unwrap();

    assert_eq!(function.erased_types.len(), 1);
    assert_eq!(
        state,
        MonomorphState::for_function(PathParams::from_types(vec![i32_ty()]))
    );
    assert!(state.self_ty.is_none());
    assert!(state.impl_params.is_none());
}

#[test]
fn test_make_resolves_to_vec_iter() {
    let krate = expand_erased_types(make_crate()).unwrap();

    assert_eq!(root_type(&krate, "main"), &named("VecIter", vec![u8_ty()]));
    assert_eq!(function(&krate, "make").ret, named("VecIter", vec![u8_ty()]));
}

#[test]
fn test_call_site_arguments_are_substituted() {
    let mut krate = Crate::new(CRATE);
    add_function(
        &mut krate,
        "make_vec",
        opaque_fn("make_vec", &["T"], vec![named("VecIter", vec![method_t()])]),
    );
    add_function(
        &mut krate,
        "main",
        caller(
            call_path("make_vec", vec![i32_ty()]),
            TypeRef::erased(call_path("make_vec", vec![i32_ty()]), 0),
        ),
    );

    let krate = expand_erased_types(krate).unwrap();

    assert_eq!(root_type(&krate, "main"), &named("VecIter", vec![i32_ty()]));
    // Inside its own signature the parameter stays generic
    assert_eq!(
        function(&krate, "make_vec").ret,
        named("VecIter", vec![method_t()])
    );
}

#[test]
fn test_unknown_function_is_lookup_failure() {
    let mut krate = Crate::new(CRATE);
    add_function(
        &mut krate,
        "main",
        caller(
            call_path("missing", Vec::new()),
            TypeRef::erased(call_path("missing", Vec::new()), 0),
        ),
    );

    let result = expand_erased_types(krate);

    assert!(matches!(
        result,
        Err(ExpandError::LookupFailure {
            what: "function",
            ..
        })
    ));
}

#[test]
fn test_index_past_table_is_out_of_range() {
    let mut krate = make_crate();
    add_function(
        &mut krate,
        "other",
        caller(
            call_path("make", Vec::new()),
            TypeRef::erased(call_path("make", Vec::new()), 3),
        ),
    );

    let result = expand_erased_types(krate);

    assert!(matches!(
        result,
        Err(ExpandError::IndexOutOfRange {
            index: 3,
            len: 1,
            ..
        })
    ));
}

#[test]
fn test_missing_method_argument_is_uncovered() {
    let mut krate = Crate::new(CRATE);
    add_function(
        &mut krate,
        "make_vec",
        opaque_fn("make_vec", &["T"], vec![named("VecIter", vec![method_t()])]),
    );
    add_function(
        &mut krate,
        "main",
        caller(
            call_path("make_vec", Vec::new()),
            TypeRef::erased(call_path("make_vec", Vec::new()), 0),
        ),
    );

    let result = expand_erased_types(krate);

    assert!(matches!(result, Err(ExpandError::UncoveredGeneric { .. })));
}
