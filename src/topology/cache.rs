//! Cache invalidation for lazily derived topology.

/// Implemented by structures that memoize derived connectivity.
///
/// Invalidation takes `&mut self`, so it cannot run while any cursor still
/// borrows a row of a derived table.
pub trait InvalidateCache {
    /// Drop every derived table so the next query recomputes it.
    fn invalidate_cache(&mut self);
}
