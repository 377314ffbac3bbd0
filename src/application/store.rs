//! Visitor store.
//!
//! Owns the ordered (newest-first) visitor collection and mirrors it to
//! local storage. Every mutation is written through before it becomes
//! visible in memory, so the two never diverge.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::config::VISITORS_STORAGE_KEY;
use crate::domain::{AppError, Result, Visitor, VisitorFormData};
use crate::infrastructure::KeyValueStore;

/// In-memory visitor collection backed by a [`KeyValueStore`].
pub struct VisitorStore<S: KeyValueStore> {
    storage: S,
    visitors: Vec<Visitor>,
}

impl<S: KeyValueStore> VisitorStore<S> {
    /// Load the persisted collection.
    ///
    /// An absent or malformed value yields an empty collection.
    ///
    /// # Errors
    /// Returns error only if the storage backend itself cannot be read.
    pub fn load(storage: S) -> Result<Self> {
        let visitors = match storage.get_item(VISITORS_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Visitor>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored visitor list is malformed, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };

        tracing::debug!(count = visitors.len(), "Loaded visitors");
        Ok(Self { storage, visitors })
    }

    /// All visitors, newest first.
    #[must_use]
    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Find a visitor by full id or unique id prefix.
    ///
    /// # Errors
    /// Returns `VisitorNotFound` if nothing matches, `InvalidData` if the
    /// prefix is ambiguous.
    pub fn find(&self, id: &str) -> Result<&Visitor> {
        if let Some(exact) = self.visitors.iter().find(|v| v.id == id) {
            return Ok(exact);
        }

        let mut matches = self.visitors.iter().filter(|v| v.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(visitor), None) if !id.is_empty() => Ok(visitor),
            (Some(_), Some(_)) => Err(AppError::InvalidData {
                message: format!("Id prefix '{id}' matches more than one visitor"),
            }),
            _ => Err(AppError::VisitorNotFound { id: id.to_string() }),
        }
    }

    /// Register a new visitor with a fresh id and the current time.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn add(&mut self, form: VisitorFormData) -> Result<Visitor> {
        self.add_at(form, Utc::now())
    }

    /// Register a new visitor with an explicit creation time.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn add_at(&mut self, form: VisitorFormData, created_at: DateTime<Utc>) -> Result<Visitor> {
        let visitor = Visitor::from_form(form, Uuid::new_v4().to_string(), created_at);

        let mut next = Vec::with_capacity(self.visitors.len() + 1);
        next.push(visitor.clone());
        next.extend(self.visitors.iter().cloned());
        self.commit(next)?;

        tracing::info!(id = %visitor.id, count = self.visitors.len(), "Visitor added");
        Ok(visitor)
    }

    /// Remove the visitor with `id`. Absent ids are a no-op.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn remove(&mut self, id: &str) -> Result<Option<Visitor>> {
        let Some(pos) = self.visitors.iter().position(|v| v.id == id) else {
            return Ok(None);
        };

        let mut next = self.visitors.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        tracing::info!(id = %removed.id, count = self.visitors.len(), "Visitor removed");
        Ok(Some(removed))
    }

    /// Remove every visitor whose id is in `ids`. Returns how many were removed.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn remove_all(&mut self, ids: &[String]) -> Result<usize> {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let next: Vec<Visitor> = self
            .visitors
            .iter()
            .filter(|v| !ids.contains(v.id.as_str()))
            .cloned()
            .collect();

        let removed = self.visitors.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
            tracing::info!(removed, count = self.visitors.len(), "Visitors removed");
        }

        Ok(removed)
    }

    /// Remove every visitor. Returns how many were removed.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.visitors.len();
        self.commit(Vec::new())?;

        tracing::info!(removed, "Visitor list cleared");
        Ok(removed)
    }

    /// Merge records exported from another copy of the list.
    ///
    /// Records whose id already exists are skipped. The result is ordered
    /// newest-first by creation time. Returns how many were added.
    ///
    /// # Errors
    /// Returns error if the collection cannot be persisted.
    pub fn import(&mut self, records: Vec<Visitor>) -> Result<usize> {
        let mut seen: HashSet<String> = self.visitors.iter().map(|v| v.id.clone()).collect();
        let mut next = self.visitors.clone();
        let mut added = 0;

        for record in records {
            if seen.insert(record.id.clone()) {
                next.push(record);
                added += 1;
            }
        }

        if added > 0 {
            next.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            self.commit(next)?;
            tracing::info!(added, count = self.visitors.len(), "Visitors imported");
        }

        Ok(added)
    }

    /// Consume the store and hand back its backend.
    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Persist `next` and only then make it the in-memory collection.
    fn commit(&mut self, next: Vec<Visitor>) -> Result<()> {
        let json = serde_json::to_string(&next).map_err(AppError::json_parse)?;
        self.storage.set_item(VISITORS_STORAGE_KEY, &json)?;
        self.visitors = next;
        Ok(())
    }
}
