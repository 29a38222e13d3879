//! Tree error definitions.

use smol_str::SmolStr;
use thiserror::Error;

/// A structural error while changing or linking the component tree.
///
/// Node names are qualified from the root, e.g. `bar.biz.foo.in`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("`{child}` is already a child of `{parent}`")]
    AlreadyChild { parent: SmolStr, child: SmolStr },

    #[error("`{parent}` already has a different child named `{child}`")]
    NameTaken { parent: SmolStr, child: SmolStr },

    #[error("`{child}` is already attached to `{parent}`")]
    AlreadyAttached { parent: SmolStr, child: SmolStr },

    #[error("attaching `{child}` under `{parent}` would create a cycle")]
    WouldCycle { parent: SmolStr, child: SmolStr },

    #[error("`{parent}` has no child named `{child}`")]
    NoSuchChild { parent: SmolStr, child: SmolStr },

    #[error("`{name}` is {found}, expected {expected}")]
    KindMismatch {
        name: SmolStr,
        expected: &'static str,
        found: &'static str,
    },
}
