//! Process-wide resource state: dedup marks and the category filter
//!
//! A single [`ResourceRegistry`] is created at startup and shared (via `Arc`)
//! with every caller and download task. Both pieces of state sit behind
//! `tokio::sync::RwLock`, so lookups run concurrently and updates are
//! exclusive. A filter update builds the complete replacement set before
//! taking the write lock, so readers see either the old filter or the new one.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tokio::sync::RwLock;

use crate::config::UnknownCategoryPolicy;
use crate::error::Result;
use crate::types::Category;

/// Dedup set and category filter shared across download tasks
#[derive(Debug)]
pub struct ResourceRegistry {
    marks: RwLock<HashSet<String>>,
    filter: RwLock<HashMap<Category, bool>>,
    unknown_policy: UnknownCategoryPolicy,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new(UnknownCategoryPolicy::default())
    }
}

impl ResourceRegistry {
    /// Create a registry with no marks and every category allowed
    pub fn new(unknown_policy: UnknownCategoryPolicy) -> Self {
        Self {
            marks: RwLock::new(HashSet::new()),
            filter: RwLock::new(Category::ALL.into_iter().map(|c| (c, true)).collect()),
            unknown_policy,
        }
    }

    /// Record a signature as already handled (idempotent)
    pub async fn mark_media(&self, signature: &str) {
        self.marks.write().await.insert(signature.to_string());
    }

    /// Whether a signature has been marked
    pub async fn media_is_marked(&self, signature: &str) -> bool {
        self.marks.read().await.contains(signature)
    }

    /// Remove one mark; absent signatures are ignored
    pub async fn delete(&self, signature: &str) {
        self.marks.write().await.remove(signature);
    }

    /// Remove every mark
    pub async fn clear(&self) {
        self.marks.write().await.clear();
    }

    /// Number of signatures currently marked
    pub async fn marked_count(&self) -> usize {
        self.marks.read().await.len()
    }

    /// Replace the category filter
    ///
    /// All nine known categories are disabled, then every named category is
    /// enabled. Names outside the known set follow the registry's
    /// [`UnknownCategoryPolicy`]: `Ignore` logs and skips them, `Reject`
    /// fails with [`Error::UnknownCategory`](crate::Error::UnknownCategory) and leaves the current filter
    /// untouched.
    pub async fn set_category_filter<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let mut next: HashMap<Category, bool> =
            Category::ALL.into_iter().map(|c| (c, false)).collect();

        for name in names {
            let name = name.as_ref();
            match Category::from_str(name) {
                Ok(category) => {
                    next.insert(category, true);
                }
                Err(err) => match self.unknown_policy {
                    UnknownCategoryPolicy::Ignore => {
                        tracing::warn!(category = name, "Ignoring unknown category in filter");
                    }
                    UnknownCategoryPolicy::Reject => return Err(err),
                },
            }
        }

        let enabled = next.values().filter(|&&on| on).count();
        *self.filter.write().await = next;
        tracing::debug!(enabled, "Category filter replaced");
        Ok(())
    }

    /// Look up a category by name
    ///
    /// Returns `(allowed, known)`. Names outside the nine known categories
    /// yield `(false, false)`.
    pub async fn is_category_allowed(&self, name: &str) -> (bool, bool) {
        let Ok(category) = Category::from_str(name) else {
            return (false, false);
        };
        match self.filter.read().await.get(&category) {
            Some(&allowed) => (allowed, true),
            None => (false, false),
        }
    }

    /// Typed variant of [`is_category_allowed`](Self::is_category_allowed)
    pub async fn allows(&self, category: Category) -> bool {
        self.filter
            .read()
            .await
            .get(&category)
            .copied()
            .unwrap_or(false)
    }

    /// Snapshot of the currently enabled categories, in declaration order
    pub async fn enabled_categories(&self) -> Vec<Category> {
        let filter = self.filter.read().await;
        Category::ALL
            .into_iter()
            .filter(|c| filter.get(c).copied().unwrap_or(false))
            .collect()
    }
}
