//! Locating and rewriting image references inside document text.
//!
//! This module intentionally splits the responsibilities into focused
//! submodules so that classification and the two reference grammars can be
//! tested independently. The same extraction code is shared between the
//! rewrite pass and the verification pass, which is what keeps the two from
//! ever disagreeing about what counts as a reference.

mod classify;
mod grammar;

pub use classify::{ReferenceKind, classify_reference};
pub use grammar::{
    CodeLiteralGrammar, ContentRegion, MarkdownGrammar, ReferenceGrammar, ReferenceMatch,
    RewriteRule, grammar_for,
};
