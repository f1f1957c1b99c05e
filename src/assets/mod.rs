//! Asset plumbing: URL resolution and texture storage.
//!
//! - [`AssetResolver`]: the host-supplied contract turning an opaque texture
//!   reference into a loadable URL.
//! - [`TextureCache`]: shared storage for decoded textures, keyed both by
//!   handle and by source URL. The whole per-slot catalog is preloaded up
//!   front so switching a selection never stalls on a texture load.

pub mod resolver;
pub mod textures;

pub use resolver::{AssetResolver, MapResolver, PassthroughResolver};
pub use textures::{
    ColorSpace, FileFetcher, Texture, TextureCache, TextureFetcher, TextureHandle,
};

#[cfg(feature = "http")]
pub use textures::HttpFetcher;
