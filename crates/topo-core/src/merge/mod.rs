//! Ordered, key-deduplicating list merge.
//!
//! Every category of a descriptor (environment, volumes, containers, ...) is
//! folded through [`merge_lists_dedupe`]: one list is designated primary and wins
//! every key collision, the other contributes only the keys the primary lacks.
//! Items whose identity cannot be determined abort the merge with a
//! [`MergeError`] naming the category.
mod error;
pub use error::{MergeError, Side};

mod key;
pub use key::MergeKey;

mod dedupe;
pub use dedupe::merge_lists_dedupe;
