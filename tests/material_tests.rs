//! Material Resolution Tests
//!
//! Tests for:
//! - ResolvedTextureSet: ordered dedup, active-in-list invariant, defaults
//! - MaterialSet memoization: rebuild only on own-input change
//! - Cross-slot referential stability (identity and version counters)
//! - Hex color parsing and color defaults

use glam::Vec4;

use halfpipe::assets::resolver::MapResolver;
use halfpipe::assets::{AssetResolver, TextureCache};
use halfpipe::catalog::{CatalogEntry, Catalogs, Slot, TextureRef};
use halfpipe::materials::set::{
    DEFAULT_DECK_TEXTURE, DEFAULT_TRUCK_COLOR, DEFAULT_WHEEL_TEXTURE, resolve_texture_set,
};
use halfpipe::materials::{MaterialSet, parse_hex_color};
use halfpipe::selection::SelectionStore;

const EPSILON: f32 = 1e-6;

fn approx(a: Vec4, b: Vec4) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn resolver() -> MapResolver {
    MapResolver::new()
        .with("wheel-og-ref", "/img/wheel-og.png")
        .with("wheel-red-ref", "/img/wheel-red.png")
        .with("deck-classic-ref", "/img/deck-classic.webp")
        .with("deck-pink-ref", "/img/deck-pink.webp")
}

fn catalogs() -> Catalogs {
    Catalogs::new(
        vec![
            CatalogEntry::with_texture("wheel-og", "wheel-og-ref"),
            CatalogEntry::with_texture("wheel-red", "wheel-red-ref"),
            // Unresolvable reference: falls back to the slot default.
            CatalogEntry::with_texture("wheel-mystery", "missing-ref"),
        ],
        vec![
            CatalogEntry::with_texture("deck-classic", "deck-classic-ref"),
            CatalogEntry::with_texture("deck-pink", "deck-pink-ref"),
        ],
        vec![
            CatalogEntry::with_color("metal-silver", "#6f6e6a"),
            CatalogEntry::with_color("metal-black", "#222222"),
            CatalogEntry {
                id: "metal-unpainted".to_owned(),
                texture: None,
                color: None,
            },
        ],
        vec![
            CatalogEntry::with_color("metal-silver", "#6f6e6a"),
            CatalogEntry::with_color("metal-gold", "#ffd700"),
        ],
    )
    .unwrap()
}

// ============================================================================
// ResolvedTextureSet
// ============================================================================

#[test]
fn texture_set_is_ordered_and_deduplicated() {
    let resolver = MapResolver::new()
        .with("a", "/img/one.png")
        .with("b", "/img/two.png")
        .with("c", "/img/one.png"); // duplicate URL
    let catalogs = Catalogs::new(
        vec![
            CatalogEntry::with_texture("w1", "a"),
            CatalogEntry::with_texture("w2", "b"),
            CatalogEntry::with_texture("w3", "c"),
        ],
        vec![CatalogEntry::with_texture("d", "a")],
        vec![CatalogEntry::with_color("m", "#ffffff")],
        vec![CatalogEntry::with_color("m", "#ffffff")],
    )
    .unwrap();
    let catalog = catalogs.get(Slot::Wheel);

    let set = resolve_texture_set(
        catalog,
        catalog.default_entry(),
        &resolver,
        DEFAULT_WHEEL_TEXTURE,
    );
    assert_eq!(set.urls, vec!["/img/one.png", "/img/two.png"]);
    assert_eq!(set.active, "/img/one.png");
    assert!(set.urls.contains(&set.active));
}

#[test]
fn unresolvable_active_falls_back_to_slot_default() {
    let resolver = resolver();
    let catalogs = catalogs();
    let catalog = catalogs.get(Slot::Wheel);

    let set = resolve_texture_set(
        catalog,
        catalog.get("wheel-mystery").unwrap(),
        &resolver,
        DEFAULT_WHEEL_TEXTURE,
    );
    assert_eq!(set.active, DEFAULT_WHEEL_TEXTURE);
    // The unresolvable entry contributes no URL to the preload list.
    assert_eq!(set.urls.len(), 2);
}

#[test]
fn sized_resolution_defaults_to_plain_resolution() {
    let resolver = resolver();
    let reference = TextureRef::new("wheel-og-ref");
    assert_eq!(
        resolver.resolve_url_sized(&reference, 600),
        resolver.resolve_url(&reference)
    );
}

// ============================================================================
// MaterialSet: resolution and defaults
// ============================================================================

#[test]
fn initial_materials_resolve_from_defaults() {
    let store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let materials = MaterialSet::new(&store, &resolver(), &cache);

    assert_eq!(materials.wheel_textures().active, "/img/wheel-og.png");
    assert_eq!(materials.deck_textures().active, "/img/deck-classic.webp");
    assert_eq!(materials.truck_color(), "#6f6e6a");
    assert!(approx(
        materials.truck().color,
        parse_hex_color("#6f6e6a").unwrap()
    ));
}

#[test]
fn color_slot_without_color_uses_neutral_default() {
    let mut store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    store.select(Slot::Truck, "metal-unpainted").unwrap();
    materials.refresh_slot(&store, Slot::Truck, &resolver, &cache);
    assert_eq!(materials.truck_color(), DEFAULT_TRUCK_COLOR);
}

#[test]
fn selected_color_reads_back_for_color_slots() {
    let mut store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    store.select(Slot::Bolt, "metal-gold").unwrap();
    materials.refresh_slot(&store, Slot::Bolt, &resolver, &cache);
    assert_eq!(materials.bolt_color(), "#ffd700");
    assert!(approx(
        materials.bolt().color,
        parse_hex_color("#ffd700").unwrap()
    ));
}

// ============================================================================
// Memoization & referential stability
// ============================================================================

#[test]
fn deck_change_does_not_invalidate_wheel_material() {
    let mut store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    let wheel_id = materials.wheel().id();
    let wheel_version = materials.wheel().version();

    store.select(Slot::Deck, "deck-pink").unwrap();
    assert!(materials.refresh_slot(&store, Slot::Deck, &resolver, &cache));

    assert_eq!(materials.wheel().id(), wheel_id);
    assert_eq!(materials.wheel().version(), wheel_version);
    assert_eq!(materials.deck_textures().active, "/img/deck-pink.webp");
}

#[test]
fn wheel_change_does_not_invalidate_deck_material() {
    let mut store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    let deck_version = materials.deck().version();
    store.select(Slot::Wheel, "wheel-red").unwrap();
    assert!(materials.refresh_slot(&store, Slot::Wheel, &resolver, &cache));
    assert_eq!(materials.deck().version(), deck_version);
}

#[test]
fn refreshing_an_unchanged_slot_is_memoized() {
    let store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    let version = materials.wheel().version();
    assert!(!materials.refresh_slot(&store, Slot::Wheel, &resolver, &cache));
    assert_eq!(materials.wheel().version(), version);
}

#[test]
fn material_identity_is_stable_across_rebuilds() {
    let mut store = SelectionStore::new(catalogs());
    let cache = TextureCache::new();
    let resolver = resolver();
    let mut materials = MaterialSet::new(&store, &resolver, &cache);

    let wheel_id = materials.wheel().id();
    let version = materials.wheel().version();

    store.select(Slot::Wheel, "wheel-red").unwrap();
    assert!(materials.refresh_slot(&store, Slot::Wheel, &resolver, &cache));

    // Same material object, new version: renderers rebuild GPU state off
    // the version, mesh bindings keep pointing at the same id.
    assert_eq!(materials.wheel().id(), wheel_id);
    assert_eq!(materials.wheel().version(), version + 1);
}

// ============================================================================
// Hex colors
// ============================================================================

#[test]
fn parse_hex_color_accepts_rrggbb() {
    let color = parse_hex_color("#ff8000").unwrap();
    assert!(approx(color, Vec4::new(1.0, 128.0 / 255.0, 0.0, 1.0)));
}

#[test]
fn parse_hex_color_rejects_malformed_input() {
    assert!(parse_hex_color("ff8000").is_none());
    assert!(parse_hex_color("#ff80").is_none());
    assert!(parse_hex_color("#zzzzzz").is_none());
    assert!(parse_hex_color("").is_none());
}

// ============================================================================
// Deck default fallback
// ============================================================================

#[test]
fn deck_without_resolvable_texture_uses_deck_default() {
    let resolver = MapResolver::new();
    let catalogs = Catalogs::new(
        vec![CatalogEntry::with_texture("w", "nope")],
        vec![CatalogEntry::with_texture("d", "nope")],
        vec![CatalogEntry::with_color("m", "#ffffff")],
        vec![CatalogEntry::with_color("m", "#ffffff")],
    )
    .unwrap();
    let store = SelectionStore::new(catalogs);
    let cache = TextureCache::new();
    let materials = MaterialSet::new(&store, &resolver, &cache);

    assert_eq!(materials.wheel_textures().active, DEFAULT_WHEEL_TEXTURE);
    assert_eq!(materials.deck_textures().active, DEFAULT_DECK_TEXTURE);
}
