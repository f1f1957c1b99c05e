//! Texture decoding, fetching and shared storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use uuid::Uuid;

use crate::errors::Result;

new_key_type! {
    /// Strongly-typed handle into the [`TextureCache`].
    pub struct TextureHandle;
}

/// Color interpretation of texture texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Display-referred (authored imagery: board graphics, grip tape).
    Srgb,
    /// Linear data (normal maps, roughness maps).
    Linear,
}

/// A decoded texture, CPU side.
///
/// Customizer imagery is authored with a non-flipped vertical orientation
/// and display-referred colors, so `flip_y` is `false` and the color space
/// defaults to sRGB; data maps (normals, roughness) opt into linear.
#[derive(Debug, Clone)]
pub struct Texture {
    pub id: Uuid,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub flip_y: bool,
    data: Vec<u8>,
}

impl Texture {
    /// Decodes an encoded image (PNG/JPEG/WebP) into an RGBA8 texture.
    pub fn from_bytes(url: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            id: Uuid::new_v4(),
            url: url.into(),
            width,
            height,
            color_space: ColorSpace::Srgb,
            flip_y: false,
            data: image.into_raw(),
        })
    }

    /// A 1×1 opaque white texture. Stands in for imagery in headless
    /// hosts and tests.
    #[must_use]
    pub fn placeholder(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            width: 1,
            height: 1,
            color_space: ColorSpace::Srgb,
            flip_y: false,
            data: vec![255; 4],
        }
    }

    #[must_use]
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Raw RGBA8 texel data, row-major from the top of the image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Supplies encoded image bytes for a URL.
///
/// The cache stays agnostic of where bytes come from; hosts plug in a
/// filesystem reader, an HTTP client, or an in-memory table.
pub trait TextureFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Reads textures from a local asset root. A leading `/` in the URL is
/// interpreted relative to the root, matching the host's public-asset
/// convention.
#[derive(Debug)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl TextureFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let relative = url.trim_start_matches('/');
        Ok(std::fs::read(self.root.join(relative))?)
    }
}

/// Fetches textures over HTTP.
#[cfg(feature = "http")]
#[derive(Debug, Default)]
pub struct HttpFetcher;

#[cfg(feature = "http")]
impl TextureFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        use crate::errors::HalfpipeError;

        let response = ehttp::fetch_blocking(&ehttp::Request::get(url))
            .map_err(HalfpipeError::HttpError)?;
        if !response.ok {
            return Err(HalfpipeError::HttpResponseError {
                status: response.status,
            });
        }
        Ok(response.bytes)
    }
}

#[derive(Default)]
struct CacheInner {
    textures: SlotMap<TextureHandle, Arc<Texture>>,
    by_url: FxHashMap<String, TextureHandle>,
}

/// Shared texture storage, keyed by handle and by source URL.
///
/// Re-inserting a URL replaces the texture in place and keeps the handle
/// stable, so downstream material bindings never dangle.
#[derive(Default)]
pub struct TextureCache {
    inner: RwLock<CacheInner>,
}

impl TextureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, texture: Texture) -> TextureHandle {
        let mut inner = self.inner.write();
        if let Some(&handle) = inner.by_url.get(&texture.url) {
            inner.textures[handle] = Arc::new(texture);
            return handle;
        }
        let url = texture.url.clone();
        let handle = inner.textures.insert(Arc::new(texture));
        inner.by_url.insert(url, handle);
        handle
    }

    #[must_use]
    pub fn get(&self, handle: TextureHandle) -> Option<Arc<Texture>> {
        self.inner.read().textures.get(handle).cloned()
    }

    #[must_use]
    pub fn handle_for(&self, url: &str) -> Option<TextureHandle> {
        self.inner.read().by_url.get(url).copied()
    }

    #[must_use]
    pub fn contains_url(&self, url: &str) -> bool {
        self.inner.read().by_url.contains_key(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetches and decodes every URL not already cached.
    ///
    /// This is the catalog preload path: the whole selectable set is
    /// requested up front so a later selection switch never waits on a
    /// load. Returns the number of newly loaded textures.
    pub fn preload<I, S>(&self, urls: I, fetcher: &dyn TextureFetcher) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loaded = 0;
        for url in urls {
            let url = url.as_ref();
            if self.contains_url(url) {
                continue;
            }
            let bytes = fetcher.fetch(url)?;
            self.insert(Texture::from_bytes(url, &bytes)?);
            loaded += 1;
        }
        if loaded > 0 {
            log::info!("preloaded {loaded} texture(s)");
        }
        Ok(loaded)
    }

    /// Releases every cached texture. Called on customizer teardown.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.textures.clear();
        inner.by_url.clear();
    }
}
