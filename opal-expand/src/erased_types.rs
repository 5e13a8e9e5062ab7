//! Replace `impl Trait` placeholders with the concrete type they stand for
//!
//! Two passes run in order:
//!
//! 1. **Extraction** walks every body: node result types, `let` and cast
//!    annotations, paths, binding types and the erased-type tables.
//! 2. **Fixup** walks every type in item signatures, which the first pass
//!    never sees (e.g. a function's own declared return type).
//!
//! Each placeholder is resolved through its origin path, the template is
//! instantiated, and the result is visited again so that chains of erased
//! types collapse to a concrete type.

use crate::error::{ExpandError, ExpandResult};
use crate::options::ExpandOptions;
use crate::resolve::CrateIndex;
use opal_hir::visitor::{walk_function, walk_type};
use opal_hir::{
    Crate, ExprPtr, ExprVisitor, Function, ItemPath, Path, TypeData, TypeRef, TypeVisitor, Visitor,
};
use std::collections::HashMap;
use tracing::{debug, debug_span, instrument};

/// Number of placeholders rewritten by each pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub extracted: usize,
    pub fixed_up: usize,
    /// Rewrites served from the memo cache, both passes
    pub cache_hits: usize,
}

impl ExpansionReport {
    pub fn total(&self) -> usize {
        self.extracted + self.fixed_up
    }
}

/// Erased-type expansion over a whole crate
#[derive(Debug, Clone, Default)]
pub struct ErasedTypeExpansion {
    options: ExpandOptions,
}

impl ErasedTypeExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExpandOptions) -> Self {
        Self { options }
    }

    /// Run both passes over `krate` in place
    ///
    /// On error the crate is left partially rewritten and must be discarded.
    #[instrument(skip_all, fields(krate = %krate.name))]
    pub fn run(&self, krate: &mut Crate) -> ExpandResult<ExpansionReport> {
        let index = CrateIndex::build(krate);
        let mut extract = ExtractVisitor {
            expander: Expander::new(&index, &self.options),
        };
        extract.visit_crate(krate)?;
        let extracted = extract.expander.resolved;
        let mut cache_hits = extract.expander.cache_hits;
        debug!(extracted, cache_hits, "extraction pass complete");

        // Fixup must see the bodies as extraction left them
        let index = CrateIndex::build(krate);
        let mut fixup = FixupVisitor {
            expander: Expander::new(&index, &self.options),
        };
        fixup.visit_crate(krate)?;
        let fixed_up = fixup.expander.resolved;
        cache_hits += fixup.expander.cache_hits;
        debug!(fixed_up, cache_hits, "fixup pass complete");

        Ok(ExpansionReport {
            extracted,
            fixed_up,
            cache_hits,
        })
    }
}

/// Expand every erased type in `krate` with default options
///
/// The crate is consumed; on error nothing is returned.
pub fn expand_erased_types(mut krate: Crate) -> ExpandResult<Crate> {
    ErasedTypeExpansion::new().run(&mut krate)?;
    Ok(krate)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ErasedKey {
    origin: Path,
    index: usize,
}

/// Resolution state shared by one pass
struct Expander<'a> {
    index: &'a CrateIndex,
    options: &'a ExpandOptions,
    /// Keys currently being expanded, outermost first
    active: Vec<ErasedKey>,
    cache: HashMap<ErasedKey, TypeRef>,
    resolved: usize,
    cache_hits: usize,
}

impl<'a> Expander<'a> {
    fn new(index: &'a CrateIndex, options: &'a ExpandOptions) -> Self {
        Self {
            index,
            options,
            active: Vec::new(),
            cache: HashMap::new(),
            resolved: 0,
            cache_hits: 0,
        }
    }

    fn resolve(&self, key: &ErasedKey) -> ExpandResult<TypeRef> {
        let (function, state) = self.index.resolve_origin(&key.origin)?;
        let template = function.erased_types.get(key.index).ok_or_else(|| {
            ExpandError::IndexOutOfRange {
                origin: key.origin.clone(),
                index: key.index,
                len: function.erased_types.len(),
            }
        })?;
        state.monomorph_type(template)
    }

    /// Resolve `key` one step and mark it active
    fn enter(&mut self, key: &ErasedKey) -> ExpandResult<TypeRef> {
        if self.active.contains(key) {
            return Err(ExpandError::CycleDetected {
                origin: key.origin.clone(),
                index: key.index,
            });
        }
        if self.active.len() >= self.options.max_depth {
            return Err(ExpandError::DepthLimitExceeded {
                origin: key.origin.clone(),
                index: key.index,
                limit: self.options.max_depth,
            });
        }
        let resolved = self.resolve(key)?;
        self.active.push(key.clone());
        Ok(resolved)
    }

    fn leave(&mut self, key: ErasedKey, expanded: Option<&TypeRef>) {
        self.active.pop();
        if let (true, Some(expanded)) = (self.options.memoize, expanded) {
            self.cache.insert(key, expanded.clone());
        }
    }
}

/// Visitors that rewrite erased types through an `Expander`
trait ExpandErased<'a>: TypeVisitor<Error = ExpandError> {
    fn expander(&mut self) -> &mut Expander<'a>;
}

/// Shared `visit_type` for both passes
fn visit_type_expanding<'a, V: ExpandErased<'a>>(
    visitor: &mut V,
    ty: &mut TypeRef,
) -> ExpandResult {
    if !ty.contains_erased() {
        return Ok(());
    }
    let TypeData::ErasedType(erased) = ty.data_mut() else {
        return walk_type(visitor, ty);
    };
    // Receiver types and arguments in the origin may be erased themselves
    visitor.visit_path(&mut erased.origin)?;
    let key = ErasedKey {
        origin: erased.origin.clone(),
        index: erased.index,
    };
    let _span = debug_span!("erased_type", origin = %key.origin, index = key.index).entered();

    let expander = visitor.expander();
    expander.resolved += 1;
    if let Some(cached) = expander.cache.get(&key) {
        expander.cache_hits += 1;
        *ty = cached.clone();
        return Ok(());
    }

    let new_ty = expander.enter(&key)?;
    debug!(before = %ty, after = %new_ty, "expanded erased type");
    *ty = new_ty;

    // The replacement may itself contain erased types
    let result = visitor.visit_type(ty);
    visitor.expander().leave(key, result.as_ref().ok().map(|_| &*ty));
    result
}

/// Extraction pass: item level, hands each body to `BodyVisitor`
struct ExtractVisitor<'a> {
    expander: Expander<'a>,
}

impl TypeVisitor for ExtractVisitor<'_> {
    type Error = ExpandError;
}

impl Visitor for ExtractVisitor<'_> {
    fn visit_function(&mut self, path: ItemPath<'_>, function: &mut Function) -> ExpandResult {
        let _span = debug_span!("function", path = %path).entered();
        walk_function(self, function)
    }

    fn visit_expr(&mut self, expr: &mut ExprPtr) -> ExpandResult {
        BodyVisitor {
            expander: &mut self.expander,
        }
        .visit_root(expr)
    }
}

struct BodyVisitor<'e, 'a> {
    expander: &'e mut Expander<'a>,
}

impl<'a> ExpandErased<'a> for BodyVisitor<'_, 'a> {
    fn expander(&mut self) -> &mut Expander<'a> {
        self.expander
    }
}

impl TypeVisitor for BodyVisitor<'_, '_> {
    type Error = ExpandError;

    fn visit_type(&mut self, ty: &mut TypeRef) -> ExpandResult {
        visit_type_expanding(self, ty)
    }
}

impl ExprVisitor for BodyVisitor<'_, '_> {}

/// Fixup pass: every type reachable from item signatures
struct FixupVisitor<'a> {
    expander: Expander<'a>,
}

impl<'a> ExpandErased<'a> for FixupVisitor<'a> {
    fn expander(&mut self) -> &mut Expander<'a> {
        &mut self.expander
    }
}

impl TypeVisitor for FixupVisitor<'_> {
    type Error = ExpandError;

    fn visit_type(&mut self, ty: &mut TypeRef) -> ExpandResult {
        visit_type_expanding(self, ty)
    }
}

impl Visitor for FixupVisitor<'_> {
    fn visit_function(&mut self, path: ItemPath<'_>, function: &mut Function) -> ExpandResult {
        let _span = debug_span!("function", path = %path).entered();
        walk_function(self, function)
    }
}
