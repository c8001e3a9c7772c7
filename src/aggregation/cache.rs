//! Explicit holder for the current aggregation
//!
//! The presentation layer owns one of these and invalidates it after any
//! mutating transfer. Nothing is rebuilt behind its back.

use std::path::Path;

use super::{Aggregations, aggregate};
use crate::fs::FileSystem;
use crate::layout::Layout;

#[derive(Debug, Default)]
pub struct DecorationCache {
    current: Option<Aggregations>,
}

impl DecorationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached aggregation, running a pass first if there is none
    pub fn get_or_build(&mut self, fs: &dyn FileSystem, layout: &Layout) -> &Aggregations {
        self.current.get_or_insert_with(|| aggregate(fs, layout))
    }

    pub fn get(&self) -> Option<&Aggregations> {
        self.current.as_ref()
    }

    pub fn is_cached(&self) -> bool {
        self.current.is_some()
    }

    pub fn invalidate(&mut self) {
        if self.current.take().is_some() {
            tracing::debug!("decoration cache invalidated");
        }
    }

    /// Remove a single deleted decoration without rebuilding
    pub fn forget(&mut self, path: &Path) -> bool {
        self.current
            .as_mut()
            .is_some_and(|aggregations| aggregations.remove(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use crate::test_fixtures::SdCard;

    #[test]
    fn test_cache_keeps_result_until_invalidated() {
        let card = SdCard::new();
        card.file("Roms/Game Boy (GB)/.media/bg.png");
        let layout = card.layout();
        let mut cache = DecorationCache::new();

        assert_eq!(cache.get_or_build(&LocalFileSystem, &layout).len(), 1);

        card.file("Roms/Game Boy (GB)/.media/bglist.png");
        assert_eq!(cache.get_or_build(&LocalFileSystem, &layout).len(), 1);

        cache.invalidate();
        assert!(!cache.is_cached());
        assert_eq!(cache.get_or_build(&LocalFileSystem, &layout).len(), 2);
    }

    #[test]
    fn test_forget_removes_single_decoration() {
        let card = SdCard::new();
        let bg = card.file("Roms/Game Boy (GB)/.media/bg.png");
        card.file("Roms/Game Boy (GB)/.media/bglist.png");
        let layout = card.layout();
        let mut cache = DecorationCache::new();
        cache.get_or_build(&LocalFileSystem, &layout);

        assert!(cache.forget(&bg));
        assert_eq!(cache.get().map(Aggregations::len), Some(1));
    }

    #[test]
    fn test_forget_without_cache_is_noop() {
        let mut cache = DecorationCache::new();
        assert!(!cache.forget(Path::new("/nowhere/bg.png")));
        assert!(cache.get().is_none());
    }
}
