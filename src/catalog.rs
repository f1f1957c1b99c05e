//! Option catalogs — the content-source input contract.
//!
//! The surrounding host (CMS, page shell) hands the core an ordered list of
//! selectable option records per slot. Each record exposes an opaque texture
//! reference and/or a color string; the core never interprets the reference
//! itself, it only passes it to the host's [`AssetResolver`].
//!
//! [`AssetResolver`]: crate::assets::AssetResolver

use std::fmt;

use serde::Deserialize;

use crate::errors::{HalfpipeError, Result};

/// One of the four independently customizable board slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Wheel,
    Deck,
    Truck,
    Bolt,
}

impl Slot {
    /// All slots, in dispatch order.
    pub const ALL: [Slot; 4] = [Slot::Wheel, Slot::Deck, Slot::Truck, Slot::Bolt];

    /// Number of slots.
    pub const COUNT: usize = 4;

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Wheel => "wheel",
            Slot::Deck => "deck",
            Slot::Truck => "truck",
            Slot::Bolt => "bolt",
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Slot::Wheel => 0,
            Slot::Deck => 1,
            Slot::Truck => 2,
            Slot::Bolt => 3,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque texture reference.
///
/// Understood only by the host's asset resolver; the core treats it as an
/// identity token. An entry without a reference falls back to the slot's
/// built-in default texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(pub String);

impl TextureRef {
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One selectable option record.
///
/// Texture-bearing slots (wheel, deck) resolve their visual via `texture`;
/// color-bearing slots (truck, bolt) via `color`. A missing field means
/// "use the slot default", never an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub texture: Option<TextureRef>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CatalogEntry {
    #[must_use]
    pub fn with_texture(id: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            texture: Some(TextureRef::new(texture)),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            texture: None,
            color: Some(color.into()),
        }
    }
}

/// The full ordered list of selectable options for one slot.
///
/// Invariant: never empty. The first entry is the slot's default selection.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(slot: Slot, entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(HalfpipeError::EmptyCatalog(slot));
        }
        Ok(Self { entries })
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// The default selection for this slot: the first catalog entry.
    #[inline]
    #[must_use]
    pub fn default_entry(&self) -> &CatalogEntry {
        &self.entries[0]
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogs for all four slots.
#[derive(Debug, Clone)]
pub struct Catalogs {
    wheel: Catalog,
    deck: Catalog,
    truck: Catalog,
    bolt: Catalog,
}

/// Wire shape of the content source's customizer settings document.
///
/// Trucks and bolts draw from one shared `metals` list.
#[derive(Debug, Deserialize)]
struct RawCatalogs {
    wheels: Vec<CatalogEntry>,
    decks: Vec<CatalogEntry>,
    metals: Vec<CatalogEntry>,
}

impl Catalogs {
    pub fn new(
        wheel: Vec<CatalogEntry>,
        deck: Vec<CatalogEntry>,
        truck: Vec<CatalogEntry>,
        bolt: Vec<CatalogEntry>,
    ) -> Result<Self> {
        Ok(Self {
            wheel: Catalog::new(Slot::Wheel, wheel)?,
            deck: Catalog::new(Slot::Deck, deck)?,
            truck: Catalog::new(Slot::Truck, truck)?,
            bolt: Catalog::new(Slot::Bolt, bolt)?,
        })
    }

    /// Parses the content source's JSON settings payload.
    ///
    /// The payload carries `wheels`, `decks` and a shared `metals` list;
    /// the metals feed both the truck and the bolt catalogs.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawCatalogs = serde_json::from_str(payload)?;
        Self::new(raw.wheels, raw.decks, raw.metals.clone(), raw.metals)
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> &Catalog {
        match slot {
            Slot::Wheel => &self.wheel,
            Slot::Deck => &self.deck,
            Slot::Truck => &self.truck,
            Slot::Bolt => &self.bolt,
        }
    }
}
