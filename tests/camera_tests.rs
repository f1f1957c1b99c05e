//! Camera Choreography Tests
//!
//! Tests for:
//! - Orbit controls: spherical state round-trip, zoom bounds, rotation
//! - Rig mounting race: pre-mount transition requests are dropped
//! - Preset transitions: convergence, interruption, redirect
//! - Floor collider: once-only registration, eye clamped above the floor

use glam::{Vec2, Vec3};

use halfpipe::camera::{
    CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_TRANSITION_DURATION, CameraRig,
    INITIAL_CAMERA_POSITION, INITIAL_CAMERA_TARGET, OrbitControls, PointerState, preset_for,
};
use halfpipe::catalog::Slot;

const EPSILON: f32 = 1e-3;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn mounted_rig() -> CameraRig {
    let mut rig = CameraRig::new(true);
    rig.mount(OrbitControls::new(
        INITIAL_CAMERA_TARGET,
        INITIAL_CAMERA_POSITION,
    ));
    rig
}

fn run_to_rest(rig: &mut CameraRig) {
    let idle = PointerState::idle();
    let mut elapsed = 0.0;
    while rig.in_transition() && elapsed < 5.0 {
        rig.update(1.0 / 60.0, &idle);
        elapsed += 1.0 / 60.0;
    }
}

// ============================================================================
// Orbit controls
// ============================================================================

#[test]
fn set_look_at_round_trips_within_distance_bounds() {
    let preset = preset_for(Slot::Bolt);
    let controls = OrbitControls::new(preset.target, preset.position);
    assert!(approx_vec(controls.target(), preset.target));
    assert!(approx_vec(controls.position(), preset.position));
}

#[test]
fn set_look_at_clamps_distance() {
    let mut controls = OrbitControls::new(Vec3::ZERO, Vec3::new(2.5, 1.0, 0.0));
    controls.set_look_at(Vec3::ZERO, Vec3::new(30.0, 0.0, 0.0));
    assert!((controls.distance() - CAMERA_MAX_DISTANCE).abs() < EPSILON);
    controls.set_look_at(Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0));
    assert!((controls.distance() - CAMERA_MIN_DISTANCE).abs() < EPSILON);
}

#[test]
fn rotation_preserves_target_and_distance() {
    let mut controls = OrbitControls::new(INITIAL_CAMERA_TARGET, INITIAL_CAMERA_POSITION);
    let distance = controls.distance();
    let input = PointerState {
        cursor_delta: Vec2::new(120.0, -45.0),
        rotating: true,
        ..PointerState::idle()
    };
    controls.apply_input(&input, 50.0);
    assert!(approx_vec(controls.target(), INITIAL_CAMERA_TARGET));
    assert!((controls.distance() - distance).abs() < EPSILON);
    assert!(!approx_vec(controls.position(), INITIAL_CAMERA_POSITION));
}

#[test]
fn zoom_respects_distance_bounds() {
    let mut controls = OrbitControls::new(INITIAL_CAMERA_TARGET, INITIAL_CAMERA_POSITION);
    let zoom_out = PointerState {
        scroll_delta: Vec2::new(0.0, -200.0),
        ..PointerState::idle()
    };
    controls.apply_input(&zoom_out, 50.0);
    assert!(controls.distance() <= CAMERA_MAX_DISTANCE + EPSILON);

    let zoom_in = PointerState {
        scroll_delta: Vec2::new(0.0, 400.0),
        ..PointerState::idle()
    };
    controls.apply_input(&zoom_in, 50.0);
    assert!(controls.distance() >= CAMERA_MIN_DISTANCE - EPSILON);
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn retarget_before_mount_is_dropped() {
    let mut rig = CameraRig::new(true);
    rig.retarget(Slot::Deck);
    assert!(!rig.in_transition());

    // Mounting afterwards starts from the initial framing, unaffected by
    // the dropped request.
    rig.mount(OrbitControls::new(
        INITIAL_CAMERA_TARGET,
        INITIAL_CAMERA_POSITION,
    ));
    assert!(approx_vec(rig.target().unwrap(), INITIAL_CAMERA_TARGET));
    assert!(approx_vec(rig.position().unwrap(), INITIAL_CAMERA_POSITION));
}

#[test]
fn update_while_unmounted_is_a_no_op() {
    let mut rig = CameraRig::new(true);
    rig.update(0.1, &PointerState::idle());
    assert!(rig.target().is_none());
}

// ============================================================================
// Preset transitions
// ============================================================================

#[test]
fn retarget_converges_to_preset() {
    let mut rig = mounted_rig();
    rig.retarget(Slot::Bolt);
    assert!(rig.in_transition());

    run_to_rest(&mut rig);
    let preset = preset_for(Slot::Bolt);
    assert!(approx_vec(rig.target().unwrap(), preset.target));
    assert!(approx_vec(rig.position().unwrap(), preset.position));
}

#[test]
fn far_preset_settles_at_max_distance_along_its_view_direction() {
    let mut rig = mounted_rig();
    rig.retarget(Slot::Wheel);
    run_to_rest(&mut rig);

    // The wheel framing is authored beyond the zoom bound; the rig holds
    // the authored target and view direction and sits at the bound.
    let preset = preset_for(Slot::Wheel);
    assert!(approx_vec(rig.target().unwrap(), preset.target));

    let offset = rig.position().unwrap() - preset.target;
    assert!((offset.length() - CAMERA_MAX_DISTANCE).abs() < EPSILON);
    let authored_dir = (preset.position - preset.target).normalize();
    assert!(approx_vec(offset.normalize(), authored_dir));
}

#[test]
fn rapid_retargets_redirect_the_in_flight_transition() {
    let mut rig = mounted_rig();
    let idle = PointerState::idle();

    // Three selections inside one transition window; only the newest
    // destination matters and there is never more than one transition.
    rig.retarget(Slot::Truck);
    rig.update(CAMERA_TRANSITION_DURATION / 4.0, &idle);
    rig.retarget(Slot::Deck);
    rig.update(CAMERA_TRANSITION_DURATION / 4.0, &idle);
    rig.retarget(Slot::Bolt);
    assert!(rig.in_transition());

    run_to_rest(&mut rig);
    let preset = preset_for(Slot::Bolt);
    assert!(approx_vec(rig.target().unwrap(), preset.target));
    assert!(approx_vec(rig.position().unwrap(), preset.position));
}

#[test]
fn choreography_disabled_ignores_retargets() {
    let mut rig = CameraRig::new(false);
    rig.mount(OrbitControls::new(
        INITIAL_CAMERA_TARGET,
        INITIAL_CAMERA_POSITION,
    ));
    rig.retarget(Slot::Wheel);
    assert!(!rig.in_transition());

    rig.update(1.0, &PointerState::idle());
    assert!(approx_vec(rig.position().unwrap(), INITIAL_CAMERA_POSITION));
}

#[test]
fn user_interaction_takes_over_from_transition() {
    let mut rig = mounted_rig();
    rig.retarget(Slot::Deck);
    rig.update(0.1, &PointerState::idle());
    assert!(rig.in_transition());

    rig.begin_interaction(0.0);
    assert!(!rig.in_transition());
}

// ============================================================================
// Floor collider
// ============================================================================

#[test]
fn floor_collider_registers_once_and_never_reassigns() {
    let mut rig = mounted_rig();
    assert!(rig.floor_collider().is_none());

    rig.begin_interaction(0.0);
    let first = rig.floor_collider().unwrap();
    assert!((first.height - 0.0).abs() < EPSILON);

    rig.begin_interaction(5.0);
    assert_eq!(rig.floor_collider().unwrap(), first);
}

#[test]
fn camera_is_clamped_above_the_floor() {
    let mut rig = CameraRig::new(true);
    // Start below the floor plane.
    rig.mount(OrbitControls::new(
        Vec3::new(0.0, 0.3, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
    ));
    rig.begin_interaction(0.0);
    rig.update(1.0 / 60.0, &PointerState::idle());
    assert!(rig.position().unwrap().y >= -EPSILON);
}
