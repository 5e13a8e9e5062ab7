//! Unit tests for erased-type expansion
//!
//! Each file covers one stage of the pass; `fixtures` holds the small crates
//! they share.


mod test_generic_matcher;
mod test_generic_origin;
