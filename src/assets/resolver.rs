//! The host-supplied asset resolution contract.

use rustc_hash::FxHashMap;

use crate::catalog::TextureRef;

/// Turns an opaque texture reference into a loadable URL.
///
/// Resolution is pure and infallible in shape: a reference the resolver
/// does not know yields `None`, and the core substitutes the slot's
/// built-in default URL. A miss is never surfaced as an error.
pub trait AssetResolver {
    fn resolve_url(&self, texture: &TextureRef) -> Option<String>;

    /// Size-hinted variant used by decorative collaborators (e.g. the
    /// footer effect requests height-bounded imagery). Defaults to the
    /// plain resolution.
    fn resolve_url_sized(&self, texture: &TextureRef, height_hint: u32) -> Option<String> {
        let _ = height_hint;
        self.resolve_url(texture)
    }
}

/// A static reference→URL table.
///
/// Suitable for hosts whose content source hands over a fully resolved
/// image manifest, and for tests.
#[derive(Debug, Default)]
pub struct MapResolver {
    urls: FxHashMap<String, String>,
}

impl MapResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(reference.into(), url.into());
    }

    #[must_use]
    pub fn with(mut self, reference: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(reference, url);
        self
    }
}

impl AssetResolver for MapResolver {
    fn resolve_url(&self, texture: &TextureRef) -> Option<String> {
        self.urls.get(texture.as_str()).cloned()
    }
}

/// Resolver that treats every reference as already being a URL.
///
/// Matches content sources that inline absolute image URLs in the catalog.
#[derive(Debug, Default)]
pub struct PassthroughResolver;

impl AssetResolver for PassthroughResolver {
    fn resolve_url(&self, texture: &TextureRef) -> Option<String> {
        Some(texture.as_str().to_owned())
    }
}
