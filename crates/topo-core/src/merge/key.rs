/// Identity key of a mergeable item.
///
/// Keys are compared for equality and ordered; a key reporting
/// [`MergeKey::is_blank`] is treated exactly like a missing one.
pub trait MergeKey: Ord {
    /// Returns `true` if the key cannot identify an item.
    fn is_blank(&self) -> bool {
        false
    }
}

impl MergeKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl MergeKey for i32 {}

impl<A: MergeKey, B: MergeKey> MergeKey for (A, B) {
    fn is_blank(&self) -> bool {
        self.0.is_blank() || self.1.is_blank()
    }
}
