//! Opal erased-type expansion
//!
//! After type checking, every `impl Trait` in return position is left in the
//! HIR as a placeholder naming the function that produced it and a slot in
//! that function's erased-type table. This crate replaces each placeholder
//! with the concrete type the slot holds, instantiated for the call site.
//!
//! ## Pipeline
//!
//! - **Resolve** (`resolve`): origin path to function, plus the generic
//!   bindings the path fixes
//! - **Match** (`matcher`): bind inherent impl parameters from the receiver
//! - **Instantiate** (`monomorph`): substitute bindings into the template
//! - **Walk** (`erased_types`): extraction over bodies, then fixup over
//!   item signatures
//!
//! ```ignore
//! let krate = opal_expand::expand_erased_types(krate)?;
//! ```

pub mod erased_types;
pub mod error;
pub mod matcher;
pub mod monomorph;
pub mod options;
pub mod resolve;

pub use erased_types::{expand_erased_types, ErasedTypeExpansion, ExpansionReport};
pub use error::{ExpandError, ExpandResult};
pub use matcher::{could_match, ImplParamMatcher};
pub use monomorph::MonomorphState;
pub use options::ExpandOptions;
pub use resolve::{CrateIndex, FunctionInfo, ImplInfo};

#[cfg(test)]
mod tests;
