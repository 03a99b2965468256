pub mod runner;

pub use runner::{placeholder_for, SceneRunner, LOADING_LABEL};

use std::cell::RefCell;

use orrery_engine::{BoundaryState, InputEvent, SceneError, SceneSlot, SceneVariant};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

thread_local! {
    static RUNNER: RefCell<SceneRunner> = RefCell::new(SceneRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

/// Install the panic hook and console logger. Safe to call more than once.
#[wasm_bindgen]
pub fn orrery_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("orrery: initialized");
}

/// Mount a built-in scene by name (`"solar-system"`, `"about"`, `"floating-low"`, ...).
/// Returns the slot id, or undefined for an unknown name.
#[wasm_bindgen]
pub fn scene_mount_variant(name: &str) -> Option<u32> {
    match name.parse::<SceneVariant>() {
        Ok(variant) => Some(with_runner(|r| r.mount_variant(variant)).0),
        Err(err) => {
            log::warn!("scene_mount_variant: {err}");
            None
        }
    }
}

/// Mount a scene whose config JSON arrives through `module` (a Promise of a string).
/// The slot shows its spinner until the promise settles.
#[wasm_bindgen]
pub fn scene_mount_module(module: js_sys::Promise) -> u32 {
    let load = async move {
        let value = JsFuture::from(module)
            .await
            .map_err(|e| SceneError::module_load(format!("{e:?}")))?;
        value
            .as_string()
            .ok_or_else(|| SceneError::module_load("scene module did not resolve to a JSON string"))
    };
    let (slot, pending) = with_runner(|r| r.mount_module(load));
    spawn_local(async move {
        let outcome = pending.await;
        log::debug!("slot {}: module load finished ({outcome:?})", slot.0);
    });
    slot.0
}

#[wasm_bindgen]
pub fn scene_unmount(slot: u32) -> bool {
    with_runner(|r| r.unmount(SceneSlot(slot)))
}

/// Advance a slot to `elapsed` seconds since mount. False when nothing was drawn.
#[wasm_bindgen]
pub fn scene_frame(slot: u32, elapsed: f32) -> bool {
    with_runner(|r| r.frame(SceneSlot(slot), elapsed))
}

/// `"idle"`, `"loading"`, `"ready"`, `"failed"` or `"unmounted"`.
#[wasm_bindgen]
pub fn scene_state(slot: u32) -> String {
    let state = with_runner(|r| r.state(SceneSlot(slot)));
    match state {
        BoundaryState::Idle => "idle",
        BoundaryState::Loading => "loading",
        BoundaryState::Ready => "ready",
        BoundaryState::Failed(_) => "failed",
        BoundaryState::Unmounted => "unmounted",
    }
    .to_string()
}

/// Spinner label to render for the slot, or undefined for none.
#[wasm_bindgen]
pub fn scene_placeholder(slot: u32) -> Option<String> {
    with_runner(|r| r.placeholder_label(SceneSlot(slot)))
}

// ---- Input ----

#[wasm_bindgen]
pub fn scene_pointer_down(slot: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(SceneSlot(slot), InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_move(slot: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(SceneSlot(slot), InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_up(slot: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(SceneSlot(slot), InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn scene_resize(slot: u32, width: f32, height: f32) {
    with_runner(|r| r.push_input(SceneSlot(slot), InputEvent::Resize { width, height }));
}

// ---- Frame buffer accessors ----

#[wasm_bindgen]
pub fn scene_frame_ptr(slot: u32) -> *const f32 {
    with_runner(|r| r.frame_ptr(SceneSlot(slot)))
}

#[wasm_bindgen]
pub fn scene_frame_len(slot: u32) -> u32 {
    with_runner(|r| r.frame_len(SceneSlot(slot)))
}
