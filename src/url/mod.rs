//! URL handling module for orgtree
//!
//! Links discovered in directory pages are mostly site-relative. Everything
//! stored in the tree or compared against the visited set goes through
//! [`resolve_link`] first, so node URLs are always absolute and canonical.

mod resolve;

pub use resolve::{canonical_key, resolve_link};
