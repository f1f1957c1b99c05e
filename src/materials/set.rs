//! Per-slot material resolution and memoization.

use glam::Vec2;

use crate::assets::{AssetResolver, TextureCache};
use crate::catalog::{Catalog, CatalogEntry, Slot};
use crate::materials::{StandardMaterial, parse_hex_color};
use crate::selection::SelectionStore;

/// Built-in fallbacks, used whenever resolution yields nothing.
pub const DEFAULT_WHEEL_TEXTURE: &str = "/skateboard/SkateWheel1.png";
pub const DEFAULT_DECK_TEXTURE: &str = "/skateboard/Deck.webp";
pub const DEFAULT_TRUCK_COLOR: &str = "#6f6e6a";
pub const DEFAULT_BOLT_COLOR: &str = "#6f6e6a";

/// Fixed imagery baked into the board design (not user-selectable).
pub const GRIPTAPE_DIFFUSE_TEXTURE: &str = "/skateboard/griptape-diffuse.webp";
pub const GRIPTAPE_ROUGHNESS_TEXTURE: &str = "/skateboard/griptape-roughness.webp";
pub const METAL_NORMAL_TEXTURE: &str = "/skateboard/metal-normal.webp";

/// The full resolved URL list for one texture-bearing slot, plus the URL
/// of the active selection.
///
/// Invariant: `active` is a member of `urls`, or equals the slot's
/// built-in default when resolution yielded nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTextureSet {
    /// Ordered, deduplicated URLs for the whole catalog. Preloaded up
    /// front so a selection switch never stalls on a texture load.
    pub urls: Vec<String>,
    /// URL of the current selection.
    pub active: String,
}

/// Resolves a texture-bearing slot's whole catalog plus its active entry.
#[must_use]
pub fn resolve_texture_set(
    catalog: &Catalog,
    selected: &CatalogEntry,
    resolver: &dyn AssetResolver,
    default_url: &str,
) -> ResolvedTextureSet {
    let mut urls: Vec<String> = Vec::with_capacity(catalog.len());
    for entry in catalog.entries() {
        let Some(url) = entry.texture.as_ref().and_then(|t| resolver.resolve_url(t)) else {
            continue;
        };
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    let active = selected
        .texture
        .as_ref()
        .and_then(|t| resolver.resolve_url(t))
        .unwrap_or_else(|| default_url.to_owned());

    ResolvedTextureSet { urls, active }
}

/// Memoization key: the one resolved input a slot material depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MaterialKey {
    Texture(String),
    Color(String),
}

/// The five materials of the assembled board, memoized per slot.
///
/// Each slot material is rebuilt (in place, version bump) only when its own
/// resolved input changes; switching the deck never touches the wheel
/// material and vice versa.
pub struct MaterialSet {
    wheel: StandardMaterial,
    deck: StandardMaterial,
    truck: StandardMaterial,
    bolt: StandardMaterial,
    grip_tape: StandardMaterial,

    wheel_textures: ResolvedTextureSet,
    deck_textures: ResolvedTextureSet,

    keys: [MaterialKey; Slot::COUNT],
}

impl MaterialSet {
    #[must_use]
    pub fn new(
        store: &SelectionStore,
        resolver: &dyn AssetResolver,
        cache: &TextureCache,
    ) -> Self {
        let wheel_textures = resolve_texture_set(
            store.catalogs().get(Slot::Wheel),
            store.selected(Slot::Wheel),
            resolver,
            DEFAULT_WHEEL_TEXTURE,
        );
        let deck_textures = resolve_texture_set(
            store.catalogs().get(Slot::Deck),
            store.selected(Slot::Deck),
            resolver,
            DEFAULT_DECK_TEXTURE,
        );

        let mut wheel = StandardMaterial::new("Wheel");
        wheel.roughness = 0.35;
        wheel.map = cache.handle_for(&wheel_textures.active);

        let mut deck = StandardMaterial::new("Deck");
        deck.roughness = 0.1;
        deck.map = cache.handle_for(&deck_textures.active);

        let truck_color = color_of(store.selected(Slot::Truck), DEFAULT_TRUCK_COLOR);
        let mut truck = StandardMaterial::new("Truck");
        truck.metalness = 0.8;
        truck.roughness = 0.25;
        truck.color = parse_hex_color(&truck_color)
            .unwrap_or_else(|| parse_hex_color(DEFAULT_TRUCK_COLOR).unwrap());
        truck.normal_map = cache.handle_for(METAL_NORMAL_TEXTURE);
        truck.normal_scale = Vec2::splat(0.3);
        truck.map_repeat = Vec2::splat(8.0);
        truck.anisotropy = 8;

        let bolt_color = color_of(store.selected(Slot::Bolt), DEFAULT_BOLT_COLOR);
        let mut bolt = StandardMaterial::new("Bolt");
        bolt.metalness = 0.5;
        bolt.roughness = 0.3;
        bolt.color = parse_hex_color(&bolt_color)
            .unwrap_or_else(|| parse_hex_color(DEFAULT_BOLT_COLOR).unwrap());

        let mut grip_tape = StandardMaterial::new("GripTape");
        grip_tape.roughness = 0.8;
        grip_tape.color = parse_hex_color("#555555").unwrap();
        grip_tape.map = cache.handle_for(GRIPTAPE_DIFFUSE_TEXTURE);
        grip_tape.roughness_map = cache.handle_for(GRIPTAPE_ROUGHNESS_TEXTURE);
        grip_tape.bump_map = cache.handle_for(GRIPTAPE_ROUGHNESS_TEXTURE);
        grip_tape.bump_scale = 3.5;
        grip_tape.map_repeat = Vec2::splat(9.0);
        grip_tape.anisotropy = 8;

        let keys = [
            MaterialKey::Texture(wheel_textures.active.clone()),
            MaterialKey::Texture(deck_textures.active.clone()),
            MaterialKey::Color(truck_color),
            MaterialKey::Color(bolt_color),
        ];

        Self {
            wheel,
            deck,
            truck,
            bolt,
            grip_tape,
            wheel_textures,
            deck_textures,
            keys,
        }
    }

    /// Re-resolves one slot against the current selection.
    ///
    /// Memoized: if the slot's resolved input is unchanged the material is
    /// left untouched (same version, same contents). Returns whether a
    /// rebuild happened.
    pub fn refresh_slot(
        &mut self,
        store: &SelectionStore,
        slot: Slot,
        resolver: &dyn AssetResolver,
        cache: &TextureCache,
    ) -> bool {
        let key = self.resolve_key(store, slot, resolver);
        if key == self.keys[slot.index()] {
            return false;
        }
        self.keys[slot.index()] = key.clone();

        match (slot, key) {
            (Slot::Wheel, MaterialKey::Texture(active)) => {
                self.wheel_textures = resolve_texture_set(
                    store.catalogs().get(Slot::Wheel),
                    store.selected(Slot::Wheel),
                    resolver,
                    DEFAULT_WHEEL_TEXTURE,
                );
                debug_assert_eq!(self.wheel_textures.active, active);
                self.wheel.map = cache.handle_for(&active);
                self.wheel.mark_changed();
            }
            (Slot::Deck, MaterialKey::Texture(active)) => {
                self.deck_textures = resolve_texture_set(
                    store.catalogs().get(Slot::Deck),
                    store.selected(Slot::Deck),
                    resolver,
                    DEFAULT_DECK_TEXTURE,
                );
                debug_assert_eq!(self.deck_textures.active, active);
                self.deck.map = cache.handle_for(&active);
                self.deck.mark_changed();
            }
            (Slot::Truck, MaterialKey::Color(color)) => {
                self.truck.color = parse_hex_color(&color)
                    .unwrap_or_else(|| parse_hex_color(DEFAULT_TRUCK_COLOR).unwrap());
                self.truck.mark_changed();
            }
            (Slot::Bolt, MaterialKey::Color(color)) => {
                self.bolt.color = parse_hex_color(&color)
                    .unwrap_or_else(|| parse_hex_color(DEFAULT_BOLT_COLOR).unwrap());
                self.bolt.mark_changed();
            }
            _ => unreachable!("slot/key kind mismatch"),
        }
        true
    }

    /// Re-binds texture handles after a (pre)load changed cache contents.
    ///
    /// Bumps only materials whose bound handle actually moved.
    pub fn rebind_textures(&mut self, cache: &TextureCache) {
        let wheel_map = cache.handle_for(&self.wheel_textures.active);
        if self.wheel.map != wheel_map {
            self.wheel.map = wheel_map;
            self.wheel.mark_changed();
        }
        let deck_map = cache.handle_for(&self.deck_textures.active);
        if self.deck.map != deck_map {
            self.deck.map = deck_map;
            self.deck.mark_changed();
        }
        let metal_normal = cache.handle_for(METAL_NORMAL_TEXTURE);
        if self.truck.normal_map != metal_normal {
            self.truck.normal_map = metal_normal;
            self.truck.mark_changed();
        }
        let grip_diffuse = cache.handle_for(GRIPTAPE_DIFFUSE_TEXTURE);
        let grip_roughness = cache.handle_for(GRIPTAPE_ROUGHNESS_TEXTURE);
        if self.grip_tape.map != grip_diffuse || self.grip_tape.roughness_map != grip_roughness {
            self.grip_tape.map = grip_diffuse;
            self.grip_tape.roughness_map = grip_roughness;
            self.grip_tape.bump_map = grip_roughness;
            self.grip_tape.mark_changed();
        }
    }

    fn resolve_key(
        &self,
        store: &SelectionStore,
        slot: Slot,
        resolver: &dyn AssetResolver,
    ) -> MaterialKey {
        let selected = store.selected(slot);
        match slot {
            Slot::Wheel | Slot::Deck => {
                let default_url = if slot == Slot::Wheel {
                    DEFAULT_WHEEL_TEXTURE
                } else {
                    DEFAULT_DECK_TEXTURE
                };
                let active = selected
                    .texture
                    .as_ref()
                    .and_then(|t| resolver.resolve_url(t))
                    .unwrap_or_else(|| default_url.to_owned());
                MaterialKey::Texture(active)
            }
            Slot::Truck => MaterialKey::Color(color_of(selected, DEFAULT_TRUCK_COLOR)),
            Slot::Bolt => MaterialKey::Color(color_of(selected, DEFAULT_BOLT_COLOR)),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn wheel(&self) -> &StandardMaterial {
        &self.wheel
    }

    #[must_use]
    pub fn deck(&self) -> &StandardMaterial {
        &self.deck
    }

    #[must_use]
    pub fn truck(&self) -> &StandardMaterial {
        &self.truck
    }

    #[must_use]
    pub fn bolt(&self) -> &StandardMaterial {
        &self.bolt
    }

    #[must_use]
    pub fn grip_tape(&self) -> &StandardMaterial {
        &self.grip_tape
    }

    #[must_use]
    pub fn wheel_textures(&self) -> &ResolvedTextureSet {
        &self.wheel_textures
    }

    #[must_use]
    pub fn deck_textures(&self) -> &ResolvedTextureSet {
        &self.deck_textures
    }

    /// The active truck color string (post-default).
    #[must_use]
    pub fn truck_color(&self) -> &str {
        match &self.keys[Slot::Truck.index()] {
            MaterialKey::Color(c) => c,
            MaterialKey::Texture(_) => unreachable!("truck key is always a color"),
        }
    }

    /// The active bolt color string (post-default).
    #[must_use]
    pub fn bolt_color(&self) -> &str {
        match &self.keys[Slot::Bolt.index()] {
            MaterialKey::Color(c) => c,
            MaterialKey::Texture(_) => unreachable!("bolt key is always a color"),
        }
    }

    /// Every built-in (non-catalog) texture URL the board needs.
    #[must_use]
    pub fn builtin_texture_urls() -> [&'static str; 3] {
        [
            GRIPTAPE_DIFFUSE_TEXTURE,
            GRIPTAPE_ROUGHNESS_TEXTURE,
            METAL_NORMAL_TEXTURE,
        ]
    }
}

fn color_of(entry: &CatalogEntry, default_color: &str) -> String {
    entry
        .color
        .clone()
        .unwrap_or_else(|| default_color.to_owned())
}
