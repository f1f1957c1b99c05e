//! Selection state store.
//!
//! Holds the currently chosen option for each customizable slot and the
//! catalogs the choices are drawn from. A successful [`SelectionStore::select`]
//! produces a typed [`SelectionChange`] event; the session root dispatches it
//! synchronously to every dependent (materials, camera rig, spin controller)
//! before the call returns, so no torn intermediate state is ever observable.

use crate::catalog::{CatalogEntry, Catalogs, Slot};

/// Typed change event published on every effective selection switch.
#[derive(Debug, Clone)]
pub struct SelectionChange {
    pub slot: Slot,
    pub previous: CatalogEntry,
    pub next: CatalogEntry,
}

/// A dependent that reacts to selection changes.
///
/// Observers receive every change and filter for the slot(s) they care
/// about. Dispatch is synchronous and ordered by the session root.
pub trait SelectionObserver {
    fn selection_changed(&mut self, change: &SelectionChange);
}

/// The customizer session's selection state.
///
/// Exactly one entry is selected per slot at all times; the store is
/// initialized from each catalog's first entry and mutated only through
/// [`select`](Self::select).
#[derive(Debug)]
pub struct SelectionStore {
    catalogs: Catalogs,
    selected: [usize; Slot::COUNT],
}

impl SelectionStore {
    /// Creates a store with every slot on its catalog default (first entry).
    #[must_use]
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            catalogs,
            selected: [0; Slot::COUNT],
        }
    }

    #[inline]
    #[must_use]
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// The currently selected entry for `slot`.
    #[must_use]
    pub fn selected(&self, slot: Slot) -> &CatalogEntry {
        &self.catalogs.get(slot).entries()[self.selected[slot.index()]]
    }

    /// Switches `slot` to the catalog entry with id `id`.
    ///
    /// Returns the change event on an effective switch. Two no-op cases
    /// return `None` without touching state:
    ///
    /// - `id` is not in the slot's catalog. This is a caller contract
    ///   violation; it asserts in debug builds and logs a warning in
    ///   release builds.
    /// - `id` is already the current selection (idempotence). No event is
    ///   published, so no material rebuild, camera transition or settle
    ///   animation fires downstream.
    pub fn select(&mut self, slot: Slot, id: &str) -> Option<SelectionChange> {
        let catalog = self.catalogs.get(slot);
        let Some(index) = catalog.position(id) else {
            debug_assert!(false, "option `{id}` is not in the {slot} catalog");
            log::warn!("ignoring select: option `{id}` is not in the {slot} catalog");
            return None;
        };

        let current = self.selected[slot.index()];
        if index == current {
            return None;
        }

        let previous = catalog.entries()[current].clone();
        let next = catalog.entries()[index].clone();
        self.selected[slot.index()] = index;

        Some(SelectionChange {
            slot,
            previous,
            next,
        })
    }
}
