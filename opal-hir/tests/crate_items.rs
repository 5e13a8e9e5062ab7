// Item storage and lookup on Crate

use opal_hir::{
    Crate, Function, FunctionArg, GenericParams, Item, Module, SimplePath, Struct, TypeRef,
};
use pretty_assertions::assert_eq;

fn unit_fn() -> Function {
    Function::new(GenericParams::new(), Vec::new(), TypeRef::unit())
}

#[test]
fn test_insert_creates_modules() {
    let mut krate = Crate::new("demo");
    let path = krate.path(["iter", "adapters", "make"]);

    assert_eq!(krate.insert_item(&path, Item::Function(unit_fn())), Ok(None));

    assert!(matches!(
        krate.get_item(&krate.path(["iter"])),
        Some(Item::Module(_))
    ));
    assert!(krate.get_function_by_path(&path).is_some());
}

#[test]
fn test_insert_replaces_existing() {
    let mut krate = Crate::new("demo");
    let path = krate.path(["make"]);
    krate.insert_item(&path, Item::Function(unit_fn())).unwrap();

    let previous = krate
        .insert_item(&path, Item::Module(Module::new()))
        .unwrap();

    assert!(matches!(previous, Some(Item::Function(_))));
    assert!(krate.get_function_by_path(&path).is_none());
}

#[test]
fn test_insert_rejects_foreign_and_blocked_paths() {
    let mut krate = Crate::new("demo");
    let strukt = Item::Struct(Struct {
        params: GenericParams::new(),
        fields: Vec::new(),
    });
    krate.insert_item(&krate.path(["Point"]), strukt).unwrap();

    let foreign = SimplePath::new("other", ["make"]);
    assert!(krate.insert_item(&foreign, Item::Function(unit_fn())).is_err());

    let through_struct = krate.path(["Point", "make"]);
    assert!(krate
        .insert_item(&through_struct, Item::Function(unit_fn()))
        .is_err());

    let empty = SimplePath::root("demo");
    assert!(krate.insert_item(&empty, Item::Function(unit_fn())).is_err());
}

#[test]
fn test_functions_follow_declaration_order() {
    let mut krate = Crate::new("demo");
    for components in [vec!["zeta"], vec!["inner", "beta"], vec!["alpha"]] {
        let path = krate.path(components);
        krate.insert_item(&path, Item::Function(unit_fn())).unwrap();
    }

    let names: Vec<String> = krate
        .functions()
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();

    assert_eq!(names, ["demo::zeta", "demo::inner::beta", "demo::alpha"]);
}

#[test]
fn test_function_without_body_has_no_erased_types() {
    let function = Function::new(
        GenericParams::with_types(["T"]),
        vec![FunctionArg {
            name: "value".to_string(),
            ty: TypeRef::unit(),
        }],
        TypeRef::unit(),
    );

    assert!(function.erased_types().is_empty());
    assert_eq!(function.params.types[0].name, "T");
}

#[test]
fn test_simple_path_navigation() {
    let path = SimplePath::new("demo", ["iter", "make"]);

    assert_eq!(path.name(), Some("make"));
    assert_eq!(path.parent(), Some(SimplePath::new("demo", ["iter"])));
    assert_eq!(path.to_string(), "demo::iter::make");
    assert_eq!(SimplePath::root("demo").name(), None);
}
