//! Error types for erased-type expansion
//!
//! Every variant is fatal. Earlier passes guarantee a well-formed crate, so
//! reaching any of these means a bug upstream or a language feature this pass
//! does not handle yet.

use miette::Diagnostic;
use opal_hir::{GenericRef, Path, TypeRef};
use thiserror::Error;

/// Result type for expansion operations
pub type ExpandResult<T = ()> = Result<T, ExpandError>;

#[derive(Error, Diagnostic, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum ExpandError {
    #[error("Unresolved path reached erased type expansion: {path}")]
    #[diagnostic(
        code(opal::expand::stale_state),
        help("UfcsUnknown paths must be resolved to a trait before this pass runs")
    )]
    StaleState { path: Path },

    #[error("Failed to locate {what} for {path}")]
    #[diagnostic(
        code(opal::expand::lookup_failure),
        help("The origin of an erased type must name a function defined in this crate")
    )]
    LookupFailure { path: Path, what: &'static str },

    #[error("Erased type index out of range for {origin} - {index} >= {len}")]
    #[diagnostic(
        code(opal::expand::index_out_of_range),
        help("The origin function only declares {len} erased types")
    )]
    IndexOutOfRange {
        origin: Path,
        index: usize,
        len: usize,
    },

    #[error("Unsupported erased type origin {path}: {feature}")]
    #[diagnostic(
        code(opal::expand::unsupported_shape),
        help("This form of opaque type is not implemented yet")
    )]
    UnsupportedShape { path: Path, feature: String },

    #[error("Impl parameter {name} (#{index}) is not constrained by the self type of {path}")]
    #[diagnostic(
        code(opal::expand::unbound_generic_slot),
        help("Impl parameters that only appear in bounds cannot be bound by direct matching")
    )]
    UnboundGenericSlot {
        path: Path,
        name: String,
        index: usize,
    },

    #[error("Impl self type {pattern} does not match {concrete}")]
    #[diagnostic(
        code(opal::expand::structural_mismatch),
        help("The impl was selected for this receiver, so its self type must match structurally")
    )]
    StructuralMismatch { pattern: TypeRef, concrete: TypeRef },

    #[error("Generic {generic} in {template} has no binding")]
    #[diagnostic(
        code(opal::expand::uncovered_generic),
        help("Every generic in an erased type template must be bound by its origin path")
    )]
    UncoveredGeneric { generic: GenericRef, template: TypeRef },

    #[error("Erased type {origin}#{index} expands to itself")]
    #[diagnostic(
        code(opal::expand::cycle_detected),
        help("An opaque type cannot be defined in terms of itself")
    )]
    CycleDetected { origin: Path, index: usize },

    #[error("Erased type expansion exceeded depth {limit} at {origin}#{index}")]
    #[diagnostic(
        code(opal::expand::depth_limit),
        help("The opaque type is likely defined through polymorphic recursion")
    )]
    DepthLimitExceeded {
        origin: Path,
        index: usize,
        limit: usize,
    },
}
