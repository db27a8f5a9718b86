//! Raw field name -> canonical key resolution.
//!
//! Resolution is stage-scoped. A key that belongs to the other stage is
//! rejected here, at the source, rather than left for a downstream check to
//! catch. The [`crate::contamination`] checker reports the same keys as
//! violations.

use crate::core::Stage;
use crate::registry::{self, normalize_key, AliasTable};

/// Resolves raw answer-bag keys against a pair of stage alias tables
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    idea: &'a AliasTable,
    early_revenue: &'a AliasTable,
}

impl AliasResolver<'static> {
    /// Resolver over the built-in registry tables
    pub fn standard() -> Self {
        Self {
            idea: registry::table_for(Stage::IdeaStage),
            early_revenue: registry::table_for(Stage::EarlyRevenueStage),
        }
    }
}

impl Default for AliasResolver<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> AliasResolver<'a> {
    pub fn with_tables(idea: &'a AliasTable, early_revenue: &'a AliasTable) -> Self {
        Self {
            idea,
            early_revenue,
        }
    }

    pub fn table(&self, stage: Stage) -> &'a AliasTable {
        match stage {
            Stage::IdeaStage => self.idea,
            Stage::EarlyRevenueStage => self.early_revenue,
        }
    }

    /// Canonical key of `stage` for a raw key, or `None` when the key is
    /// unknown or belongs to the other stage.
    pub fn resolve_key(&self, raw_key: &str, stage: Stage) -> Option<&'static str> {
        if self.foreign_resolution(raw_key, stage).is_some() {
            return None;
        }

        self.table(stage)
            .lookup(raw_key)
            .filter(|canonical| registry::is_canonical_key(canonical, stage))
    }

    /// The other stage's canonical key a raw key maps to, when the key is
    /// foreign to `stage`.
    ///
    /// A key is foreign when it is a canonical key of the other stage, when
    /// only the other stage's table knows it, or when this stage's table
    /// points it at a canonical key outside this stage. Short names listed in
    /// both tables are not foreign.
    pub fn foreign_resolution(&self, raw_key: &str, stage: Stage) -> Option<&'static str> {
        let other = stage.other();
        let own = self.table(stage).lookup(raw_key);

        if let Some(canonical) = own {
            if !registry::is_canonical_key(canonical, stage) {
                return registry::stage_of(canonical).map(|_| canonical);
            }
        }

        let theirs = self.table(other).lookup(raw_key)?;
        if registry::is_canonical_key(&normalize_key(raw_key), other) || own.is_none() {
            Some(theirs)
        } else {
            None
        }
    }

    pub fn is_foreign(&self, raw_key: &str, stage: Stage) -> bool {
        self.foreign_resolution(raw_key, stage).is_some()
    }

    /// Every registered raw spelling of a canonical key, canonical key first
    pub fn aliases_for(&self, canonical_key: &str) -> Vec<&'static str> {
        let Some(definition) = registry::definition(canonical_key) else {
            return Vec::new();
        };
        std::iter::once(definition.canonical_key)
            .chain(self.table(definition.stage).aliases_for(canonical_key))
            .collect()
    }
}

/// Resolve a raw key with the built-in tables
pub fn resolve_key(raw_key: &str, stage: Stage) -> Option<&'static str> {
    AliasResolver::standard().resolve_key(raw_key, stage)
}
