//! The render host: composes store, materials, board, animation and camera
//! into one customizer session.
//!
//! A session owns everything with state. Selection changes enter through
//! [`Customizer::select`] and are fully applied — store mutated, material
//! rebuilt, camera retargeted, settle triggered — before the call returns;
//! the frame loop then advances animation state through
//! [`Customizer::update`]. There is no concurrency inside the core: one
//! logical frame loop owns materials, camera and animation state.

use glam::{Vec3, Vec4};

use crate::animation::SpinController;
use crate::assets::{AssetResolver, TextureCache, TextureFetcher};
use crate::camera::{
    CAMERA_MAX_DISTANCE, CameraRig, INITIAL_CAMERA_POSITION, INITIAL_CAMERA_TARGET, OrbitControls,
    PointerState,
};
use crate::catalog::{CatalogEntry, Catalogs, Slot};
use crate::errors::Result;
use crate::materials::{MaterialSet, parse_hex_color};
use crate::scene::scene::{Environment, Fog};
use crate::scene::{BoardAssembly, BoardGeometry, PartId, Pose, Scene};
use crate::selection::{SelectionObserver, SelectionStore};
use crate::utils::Timer;

/// Stage background (and fog) color.
pub const ENVIRONMENT_COLOR: &str = "#3b3a3a";

/// Session configuration, chosen by the hosting context.
///
/// The passive product-card preview and the interactive customizer are the
/// same core under two configurations: choreography (and usually a pose)
/// differ, nothing else.
#[derive(Debug, Clone, Copy)]
pub struct CustomizerOptions {
    pub pose: Pose,
    pub constant_wheel_spinning: bool,
    /// Selection-driven camera transitions. Off for passive previews.
    pub choreography: bool,
}

impl Default for CustomizerOptions {
    fn default() -> Self {
        Self {
            pose: Pose::Upright,
            constant_wheel_spinning: false,
            choreography: true,
        }
    }
}

/// Global stage dressing: lighting, fog, and the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub background: Vec4,
    pub fog: Fog,
    pub environment: Environment,
    /// Ground plane edge length; sized to contain the board and the
    /// camera's full operating radius.
    pub floor_size: f32,
    pub floor_height: f32,
}

impl Default for Stage {
    fn default() -> Self {
        let background = parse_hex_color(ENVIRONMENT_COLOR).unwrap();
        Self {
            background,
            fog: Fog {
                color: background,
                near: 1.0,
                far: 10.0,
            },
            environment: Environment::default(),
            floor_size: CAMERA_MAX_DISTANCE * 1.5,
            floor_height: 0.0,
        }
    }
}

/// The host-facing props surface: everything the hosting page needs to
/// mirror the current board state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardProps {
    pub wheel_texture_url: String,
    pub wheel_texture_urls: Vec<String>,
    pub deck_texture_url: String,
    pub deck_texture_urls: Vec<String>,
    pub truck_color: String,
    pub bolt_color: String,
    pub pose: Pose,
    pub constant_wheel_spinning: bool,
}

/// One active customizer session.
pub struct Customizer {
    store: SelectionStore,
    resolver: Box<dyn AssetResolver>,
    textures: TextureCache,
    materials: MaterialSet,
    scene: Scene,
    board: BoardAssembly,
    spin: SpinController,
    rig: CameraRig,
    stage: Stage,
    options: CustomizerOptions,
    timer: Timer,
}

impl Customizer {
    /// Assembles a session: defaults selected, board built and bound,
    /// stage dressed, camera rig created unmounted (it mounts on the
    /// first frame, mirroring first paint).
    pub fn new(
        catalogs: Catalogs,
        geometry: &BoardGeometry,
        resolver: Box<dyn AssetResolver>,
        options: CustomizerOptions,
    ) -> Result<Self> {
        let store = SelectionStore::new(catalogs);
        let textures = TextureCache::new();
        let materials = MaterialSet::new(&store, resolver.as_ref(), &textures);

        let stage = Stage::default();
        let mut scene = Scene::new();
        scene.background = Some(stage.background);
        scene.fog = Some(stage.fog);
        scene.environment = stage.environment;

        let board = BoardAssembly::build(&mut scene, geometry, &materials, options.pose);

        let mut spin = SpinController::new(options.constant_wheel_spinning);
        for part in [PartId::Wheel1, PartId::Wheel2, PartId::Wheel3, PartId::Wheel4] {
            spin.register_wheel(
                board.part_node(part),
                part.local_transform().rotation_quat(),
            );
        }

        let rig = CameraRig::new(options.choreography);

        Ok(Self {
            store,
            resolver,
            textures,
            materials,
            scene,
            board,
            spin,
            rig,
            stage,
            options,
            timer: Timer::new(),
        })
    }

    /// Requests every catalog texture plus the built-in board imagery.
    ///
    /// This is the one place the core may block: first paint waits here,
    /// but later selection switches never load. Material texture handles
    /// are re-bound once the cache is populated.
    pub fn preload_textures(&mut self, fetcher: &dyn TextureFetcher) -> Result<usize> {
        let mut urls: Vec<String> = Vec::new();
        urls.extend(self.materials.wheel_textures().urls.iter().cloned());
        urls.extend(self.materials.deck_textures().urls.iter().cloned());
        urls.push(self.materials.wheel_textures().active.clone());
        urls.push(self.materials.deck_textures().active.clone());
        urls.extend(MaterialSet::builtin_texture_urls().map(str::to_owned));

        let loaded = self.textures.preload(&urls, fetcher)?;
        self.materials.rebind_textures(&self.textures);
        Ok(loaded)
    }

    /// Switches a slot's selection and synchronously applies every
    /// reactive effect before returning: material refresh, camera
    /// retarget, settle trigger, in that order.
    ///
    /// Unknown ids and reselecting the current option are no-ops (no
    /// rebuild, no transition, no animation).
    pub fn select(&mut self, slot: Slot, id: &str) {
        let Some(change) = self.store.select(slot, id) else {
            return;
        };
        self.materials
            .refresh_slot(&self.store, change.slot, self.resolver.as_ref(), &self.textures);
        self.rig.selection_changed(&change);
        self.spin.selection_changed(&change);
    }

    /// Advances one frame by `dt` seconds: camera (mounting the controls
    /// on the first frame), wheel spin, then the transform pass.
    pub fn update(&mut self, dt: f32, input: &PointerState) {
        if !self.rig.is_mounted() {
            self.rig.mount(OrbitControls::new(
                INITIAL_CAMERA_TARGET,
                INITIAL_CAMERA_POSITION,
            ));
        }
        if input.is_active() {
            self.rig.begin_interaction(self.stage.floor_height);
        }

        self.rig.update(dt, input);
        self.spin.update(dt, &mut self.scene);
        self.scene.update_world_transforms();
    }

    /// [`update`](Self::update) driven by the session's own frame clock.
    pub fn tick(&mut self, input: &PointerState) {
        let dt = self.timer.tick();
        self.update(dt, input);
    }

    /// Toggles continuous wheel spin. Enabling it cancels in-flight
    /// settle animations and spins on from the current angles.
    pub fn set_constant_wheel_spinning(&mut self, on: bool) {
        self.options.constant_wheel_spinning = on;
        self.spin.set_continuous(on);
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.options.pose = pose;
        self.board.set_pose(&mut self.scene, pose);
    }

    /// The host-facing props surface for the current state.
    #[must_use]
    pub fn props(&self) -> BoardProps {
        BoardProps {
            wheel_texture_url: self.materials.wheel_textures().active.clone(),
            wheel_texture_urls: self.materials.wheel_textures().urls.clone(),
            deck_texture_url: self.materials.deck_textures().active.clone(),
            deck_texture_urls: self.materials.deck_textures().urls.clone(),
            truck_color: self.materials.truck_color().to_owned(),
            bolt_color: self.materials.bolt_color().to_owned(),
            pose: self.board.pose(),
            constant_wheel_spinning: self.options.constant_wheel_spinning,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    #[must_use]
    pub fn selected(&self, slot: Slot) -> &CatalogEntry {
        self.store.selected(slot)
    }

    #[must_use]
    pub fn materials(&self) -> &MaterialSet {
        &self.materials
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn board(&self) -> &BoardAssembly {
        &self.board
    }

    #[must_use]
    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    #[must_use]
    pub fn spin(&self) -> &SpinController {
        &self.spin
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[must_use]
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Initial camera placement, exposed for hosts that drive their own
    /// canvas camera.
    #[must_use]
    pub fn initial_camera() -> (Vec3, Vec3) {
        (INITIAL_CAMERA_TARGET, INITIAL_CAMERA_POSITION)
    }
}

impl Drop for Customizer {
    /// Teardown: no background work outlives the session. In-flight
    /// animations are cancelled and texture resources released.
    fn drop(&mut self) {
        self.spin.cancel_all();
        self.textures.clear();
    }
}
