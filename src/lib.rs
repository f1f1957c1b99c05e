#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod camera;
pub mod catalog;
pub mod customizer;
pub mod errors;
pub mod materials;
pub mod scene;
pub mod selection;
pub mod utils;

pub use animation::SpinController;
pub use assets::{AssetResolver, TextureCache, TextureFetcher, TextureHandle};
pub use camera::{CameraPreset, CameraRig, OrbitControls, PointerState};
pub use catalog::{Catalog, CatalogEntry, Catalogs, Slot, TextureRef};
pub use customizer::{BoardProps, Customizer, CustomizerOptions, Stage};
pub use errors::{HalfpipeError, Result};
pub use materials::{MaterialSet, ResolvedTextureSet, StandardMaterial};
pub use scene::{BoardAssembly, BoardGeometry, Geometry, Node, PartId, Pose, Scene, Transform};
pub use selection::{SelectionChange, SelectionObserver, SelectionStore};
