//! The crate container

use crate::item::{Function, Item, Module, TraitImpl, TypeImpl};
use crate::path::SimplePath;

/// A whole compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Crate {
    pub name: String,
    pub root: Module,
    /// Inherent impls in declaration order
    pub type_impls: Vec<TypeImpl>,
    /// Trait impls in declaration order
    pub trait_impls: Vec<TraitImpl>,
}

impl Crate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Module::new(),
            type_impls: Vec::new(),
            trait_impls: Vec::new(),
        }
    }

    /// Path to an item of this crate, `krate.path(["iter", "make"])`
    pub fn path<I, S>(&self, components: I) -> SimplePath
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SimplePath::new(self.name.clone(), components)
    }

    /// Insert an item, creating any missing intermediate modules
    ///
    /// Returns the previous item at that path, if any. Paths into another
    /// crate, empty paths, and paths through a non-module item are rejected
    /// and the item is handed back.
    pub fn insert_item(&mut self, path: &SimplePath, item: Item) -> Result<Option<Item>, Item> {
        if path.crate_name != self.name {
            return Err(item);
        }
        let Some((name, parents)) = path.components.split_last() else {
            return Err(item);
        };

        let mut module = &mut self.root;
        for parent in parents {
            let entry = module
                .items
                .entry(parent.clone())
                .or_insert_with(|| Item::Module(Module::new()));
            match entry {
                Item::Module(inner) => module = inner,
                _ => return Err(item),
            }
        }
        Ok(module.items.insert(name.clone(), item))
    }

    pub fn get_item(&self, path: &SimplePath) -> Option<&Item> {
        if path.crate_name != self.name {
            return None;
        }
        let (name, parents) = path.components.split_last()?;

        let mut module = &self.root;
        for parent in parents {
            match module.items.get(parent)? {
                Item::Module(inner) => module = inner,
                _ => return None,
            }
        }
        module.items.get(name)
    }

    pub fn get_function_by_path(&self, path: &SimplePath) -> Option<&Function> {
        match self.get_item(path)? {
            Item::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn add_type_impl(&mut self, imp: TypeImpl) {
        self.type_impls.push(imp);
    }

    pub fn add_trait_impl(&mut self, imp: TraitImpl) {
        self.trait_impls.push(imp);
    }

    /// All free functions with their paths, in declaration order
    pub fn functions(&self) -> Vec<(SimplePath, &Function)> {
        let mut out = Vec::new();
        collect_functions(&SimplePath::root(self.name.clone()), &self.root, &mut out);
        out
    }
}

fn collect_functions<'a>(
    prefix: &SimplePath,
    module: &'a Module,
    out: &mut Vec<(SimplePath, &'a Function)>,
) {
    for (name, item) in &module.items {
        match item {
            Item::Function(function) => out.push((prefix.join(name.clone()), function)),
            Item::Module(inner) => collect_functions(&prefix.join(name.clone()), inner, out),
            _ => {}
        }
    }
}
