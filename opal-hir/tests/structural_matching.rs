// Lock-step matching of generic patterns against concrete types

use opal_hir::{
    ConstValue, CoreType, GenericPath, GenericRef, MatchGenerics, Path, PathParams, SimplePath,
    TypeRef,
};
use pretty_assertions::assert_eq;

fn named(name: &str, types: Vec<TypeRef>) -> TypeRef {
    TypeRef::named(GenericPath::with_types(SimplePath::new("demo", [name]), types))
}

fn generic(name: &str, index: usize) -> TypeRef {
    TypeRef::generic(GenericRef::impl_param(name, index))
}

#[derive(Default)]
struct Collect {
    bindings: Vec<String>,
}

impl MatchGenerics for Collect {
    type Error = String;

    fn bind_type(&mut self, generic: &GenericRef, ty: &TypeRef) -> Result<(), String> {
        self.bindings.push(format!("{generic}={ty}"));
        Ok(())
    }

    fn bind_value(&mut self, generic: &GenericRef, value: &ConstValue) -> Result<(), String> {
        self.bindings.push(format!("{generic}={value}"));
        Ok(())
    }

    fn mismatch(&mut self, pattern: &TypeRef, concrete: &TypeRef) -> String {
        format!("{pattern} vs {concrete}")
    }
}

#[test]
fn test_bindings_reported_in_walk_order() {
    let pattern = named(
        "Pair",
        vec![
            generic("T", 0),
            TypeRef::array(
                generic("U", 1),
                ConstValue::Generic(GenericRef::impl_param("N", 2)),
            ),
        ],
    );
    let concrete = named(
        "Pair",
        vec![
            TypeRef::primitive(CoreType::I32),
            TypeRef::array(TypeRef::primitive(CoreType::U8), ConstValue::Integer(4)),
        ],
    );

    let mut collect = Collect::default();
    pattern.match_generics(&concrete, &mut collect).unwrap();

    assert_eq!(collect.bindings, ["T=i32", "U=u8", "N=4"]);
}

#[test]
fn test_concrete_pattern_binds_nothing() {
    let ty = TypeRef::function(
        vec![TypeRef::slice(TypeRef::primitive(CoreType::Char))],
        TypeRef::unit(),
    );

    let mut collect = Collect::default();
    ty.match_generics(&ty.clone(), &mut collect).unwrap();

    assert!(collect.bindings.is_empty());
}

#[test]
fn test_mismatch_reports_enclosing_types() {
    let pattern = named("Wrapper", vec![generic("T", 0)]);
    let concrete = named("Other", vec![TypeRef::primitive(CoreType::I32)]);

    let result = pattern.match_generics(&concrete, &mut Collect::default());

    assert_eq!(
        result,
        Err("demo::Wrapper<T> vs demo::Other<i32>".to_string())
    );
}

#[test]
fn test_arity_and_length_disagreements_mismatch() {
    let mut collect = Collect::default();

    let pair = TypeRef::tuple(vec![generic("T", 0), generic("U", 1)]);
    let triple = TypeRef::tuple(vec![TypeRef::unit(), TypeRef::unit(), TypeRef::unit()]);
    assert!(pair.match_generics(&triple, &mut collect).is_err());

    let four = TypeRef::array(TypeRef::unit(), ConstValue::Integer(4));
    let five = TypeRef::array(TypeRef::unit(), ConstValue::Integer(5));
    assert!(four.match_generics(&five, &mut collect).is_err());
}

#[test]
fn test_erased_types_match_through_origin() {
    let make = SimplePath::new("demo", ["make"]);
    let pattern = TypeRef::erased(
        Path::function(make.clone(), PathParams::from_types(vec![generic("T", 0)])),
        0,
    );
    let concrete = TypeRef::erased(
        Path::function(
            make,
            PathParams::from_types(vec![TypeRef::primitive(CoreType::Bool)]),
        ),
        0,
    );

    let mut collect = Collect::default();
    pattern.match_generics(&concrete, &mut collect).unwrap();

    assert_eq!(collect.bindings, ["T=bool"]);
}
