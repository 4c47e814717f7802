//! The two list-file passes.
//!
//! [`DeclarationListener`] fills the graph's declared state from every list
//! file. [`RewriteListener`] then walks each file again and collects the
//! edits that replace link statements with their reconciled form.

pub mod args;
pub mod declaration;
pub mod reconcile;
pub mod rewrite;

pub use declaration::DeclarationListener;
pub use reconcile::{DependencyOrdering, Reconciliation, reconcile};
pub use rewrite::RewriteListener;
