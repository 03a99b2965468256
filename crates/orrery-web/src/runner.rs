use std::collections::HashMap;
use std::future::Future;

use orrery_engine::systems::render::build_render_buffer;
use orrery_engine::{
    encode_frame, BodyRegistry, BoundaryState, BoundaryView, FailurePolicy, InputEvent, InputQueue,
    LazyBoundary, Placeholder, RenderBuffer, RequestOutcome, Result, SceneComposer, SceneConfig,
    SceneHandle, SceneSlot, SceneVariant,
};

/// Label shown by the loading placeholder of section scenes.
pub const LOADING_LABEL: &str = "Loading scene";

/// One mounted scene: its boundary plus the per-slot frame plumbing.
struct MountedScene {
    boundary: LazyBoundary<SceneHandle>,
    input: InputQueue,
    render_buffer: RenderBuffer,
    frame: Vec<f32>,
}

impl MountedScene {
    fn new(placeholder: Placeholder, policy: FailurePolicy) -> Self {
        Self {
            boundary: LazyBoundary::new(placeholder, policy),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            frame: Vec::new(),
        }
    }
}

/// Owns every scene instance on the page, keyed by slot.
///
/// The page's exports live in a `thread_local!` runner because wasm-bindgen
/// cannot export stateful structs with borrowed data. Scenes never share
/// mutable state; the body registry is the only shared value.
pub struct SceneRunner {
    registry: &'static BodyRegistry,
    scenes: HashMap<SceneSlot, MountedScene>,
    next_slot: u32,
}

impl SceneRunner {
    pub fn new() -> Self {
        Self::with_registry(BodyRegistry::builtin())
    }

    pub fn with_registry(registry: &'static BodyRegistry) -> Self {
        Self {
            registry,
            scenes: HashMap::new(),
            next_slot: 1,
        }
    }

    fn allocate(&mut self, placeholder: Placeholder, policy: FailurePolicy) -> (SceneSlot, LazyBoundary<SceneHandle>) {
        let slot = SceneSlot(self.next_slot);
        self.next_slot += 1;
        let mounted = MountedScene::new(placeholder, policy);
        let boundary = mounted.boundary.clone();
        self.scenes.insert(slot, mounted);
        (slot, boundary)
    }

    /// Mount a built-in preset. Composition is synchronous.
    pub fn mount_variant(&mut self, variant: SceneVariant) -> SceneSlot {
        self.mount_config(&variant.config(), placeholder_for(variant))
    }

    /// Mount an explicit config. A failed composition leaves the slot empty,
    /// never showing an error.
    pub fn mount_config(&mut self, config: &SceneConfig, (placeholder, policy): (Placeholder, FailurePolicy)) -> SceneSlot {
        let (slot, boundary) = self.allocate(placeholder, policy);
        let outcome = boundary.resolve(SceneComposer::new(self.registry).compose(config));
        log::debug!("slot {}: mounted ({outcome:?})", slot.0);
        slot
    }

    /// Mount a scene whose config arrives later as JSON.
    ///
    /// Returns the slot (showing its spinner right away) and the future that
    /// finishes the mount. The caller drives the future; dropping the slot
    /// first makes it resolve to `Abandoned`.
    pub fn mount_module<F>(&mut self, load: F) -> (SceneSlot, impl Future<Output = RequestOutcome> + 'static)
    where
        F: Future<Output = Result<String>> + 'static,
    {
        let registry = self.registry;
        let (slot, boundary) = self.allocate(Placeholder::spinner(LOADING_LABEL), FailurePolicy::KeepPlaceholder);
        let pending = boundary.request(async move {
            let json = load.await?;
            let config = SceneConfig::from_json(&json)?;
            SceneComposer::new(registry).compose(&config)
        });
        (slot, pending)
    }

    /// Drop the instance immediately. Returns false for unknown slots.
    pub fn unmount(&mut self, slot: SceneSlot) -> bool {
        match self.scenes.remove(&slot) {
            Some(mounted) => {
                mounted.boundary.unmount();
                log::debug!("slot {}: unmounted", slot.0);
                true
            }
            None => false,
        }
    }

    /// Queue a pointer or resize event for the slot's next frame.
    pub fn push_input(&mut self, slot: SceneSlot, event: InputEvent) -> bool {
        match self.scenes.get_mut(&slot) {
            Some(mounted) => {
                mounted.input.push(event);
                true
            }
            None => false,
        }
    }

    /// Advance one slot to `elapsed` seconds and re-encode its frame buffer.
    ///
    /// Returns false (and does nothing) for unknown or not-yet-ready slots.
    pub fn frame(&mut self, slot: SceneSlot, elapsed: f32) -> bool {
        let Some(mounted) = self.scenes.get_mut(&slot) else {
            return false;
        };
        let MountedScene { boundary, input, render_buffer, frame } = mounted;
        let events = input.drain();
        let advanced = boundary.with_ready_mut(|scene| {
            scene.handle_input(&events);
            if !scene.on_frame(elapsed) {
                return false;
            }
            build_render_buffer(scene, render_buffer);
            encode_frame(scene, render_buffer, frame);
            true
        });
        advanced.unwrap_or_else(|| {
            // not ready yet: the scene must still start with the right aspect
            input.carry_resize(&events);
            false
        })
    }

    pub fn state(&self, slot: SceneSlot) -> BoundaryState {
        self.scenes
            .get(&slot)
            .map(|m| m.boundary.state())
            .unwrap_or(BoundaryState::Unmounted)
    }

    /// Spinner label to show for the slot, if it should show one.
    pub fn placeholder_label(&self, slot: SceneSlot) -> Option<String> {
        let mounted = self.scenes.get(&slot)?;
        mounted.boundary.view(|view| match view {
            BoundaryView::Placeholder(Placeholder::Spinner { label }) => Some(label.clone()),
            _ => None,
        })
    }

    /// Encoded frame of the last accepted `frame` call.
    pub fn frame_data(&self, slot: SceneSlot) -> &[f32] {
        self.scenes.get(&slot).map(|m| m.frame.as_slice()).unwrap_or(&[])
    }

    pub fn frame_ptr(&self, slot: SceneSlot) -> *const f32 {
        self.frame_data(slot).as_ptr()
    }

    pub fn frame_len(&self, slot: SceneSlot) -> u32 {
        self.frame_data(slot).len() as u32
    }

    pub fn mounted_count(&self) -> usize {
        self.scenes.len()
    }
}

impl Default for SceneRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Section scenes show a spinner and keep it on failure; the floating
/// overlay shows nothing either way.
pub fn placeholder_for(variant: SceneVariant) -> (Placeholder, FailurePolicy) {
    match variant {
        SceneVariant::Floating(_) => (Placeholder::Empty, FailurePolicy::Collapse),
        _ => (Placeholder::spinner(LOADING_LABEL), FailurePolicy::KeepPlaceholder),
    }
}
