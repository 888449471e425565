//! Owner of the mutable draft.
//!
//! # Design
//! `FieldStore` keeps the current draft behind an `Arc`. Every update builds
//! a fresh `ProfileDraft` and swaps the pointer, so a snapshot handed out
//! earlier is never affected by later edits and can be held across the
//! submission's await point.
//!
//! `FormHandle` is the shared handle given to both the rendering layer and
//! the `SubmissionController`. The lock is only ever held for the duration of
//! a pointer swap or clone, never across an await.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FormError;
use crate::seasons::toggle;
use crate::types::{DraftSeed, FieldName, FieldValue, ProfileDraft, Season};

#[derive(Debug, Clone)]
pub struct FieldStore {
    seed: DraftSeed,
    draft: Arc<ProfileDraft>,
}

impl FieldStore {
    pub fn new(seed: DraftSeed) -> Self {
        let draft = Arc::new(ProfileDraft::seeded(&seed));
        Self { seed, draft }
    }

    /// Replace exactly one field.
    pub fn set(&mut self, value: FieldValue) {
        self.draft = Arc::new(self.draft.with(value));
    }

    /// Replace one field from raw widget text. Ill-shaped input leaves the
    /// draft unchanged.
    pub fn set_raw(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let name: FieldName = field
            .parse()
            .map_err(|_| FormError::invalid_field(field, "unknown field"))?;
        self.set(FieldValue::parse(name, raw)?);
        Ok(())
    }

    pub fn toggle_season(&mut self, season: Season) {
        let seasons = toggle(&self.draft.seasons, season);
        self.set(FieldValue::Seasons(seasons));
    }

    /// Replace the whole draft with the canonical default.
    pub fn reset(&mut self) {
        self.draft = Arc::new(self.default_draft());
    }

    pub fn snapshot(&self) -> Arc<ProfileDraft> {
        Arc::clone(&self.draft)
    }

    pub fn default_draft(&self) -> ProfileDraft {
        ProfileDraft::seeded(&self.seed)
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new(DraftSeed::default())
    }
}

/// Cloneable handle to the single `FieldStore` of a form session.
#[derive(Debug, Clone, Default)]
pub struct FormHandle {
    inner: Arc<RwLock<FieldStore>>,
}

impl FormHandle {
    pub fn new(store: FieldStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn set(&self, value: FieldValue) {
        self.write().set(value);
    }

    pub fn set_raw(&self, field: &str, raw: &str) -> Result<(), FormError> {
        self.write().set_raw(field, raw)
    }

    pub fn toggle_season(&self, season: Season) {
        self.write().toggle_season(season);
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    pub fn snapshot(&self) -> Arc<ProfileDraft> {
        self.read().snapshot()
    }

    pub fn default_draft(&self) -> ProfileDraft {
        self.read().default_draft()
    }

    // A panic while holding the lock can only interrupt a pointer swap, so
    // the store is still consistent and poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, FieldStore> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FieldStore> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
