//! Deferred scene loading.
//!
//! A `LazyBoundary` stands in for a scene whose module is still being
//! fetched. Until the load finishes the host shows a placeholder; when it
//! finishes the module is swapped in, unless the boundary was unmounted or a
//! newer request replaced it in the meantime. Failures never surface as
//! errors to the page, only as a placeholder or empty space: a module that
//! could not be fetched follows the `FailurePolicy`, a module that arrived
//! but could not be composed always collapses to nothing.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::error::{Result, SceneError};

/// What the host shows while the module is not ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// Centered loading indicator.
    Spinner { label: String },
    /// Nothing at all (decorative overlays).
    Empty,
}

impl Placeholder {
    pub fn spinner(label: impl Into<String>) -> Self {
        Placeholder::Spinner { label: label.into() }
    }
}

/// What the host shows after a module failed to load.
/// Composition errors ignore the policy and always collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    KeepPlaceholder,
    Collapse,
}

/// Observable lifecycle of a boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryState {
    Idle,
    Loading,
    Ready,
    Failed(SceneError),
    Unmounted,
}

/// How a finished request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The module is now live.
    Applied,
    /// The load failed; the boundary shows its failure view.
    Failed,
    /// The boundary was unmounted, dropped or re-requested; result discarded.
    Abandoned,
}

/// What to draw this frame.
#[derive(Debug)]
pub enum BoundaryView<'a, M> {
    Placeholder(&'a Placeholder),
    Ready(&'a M),
    Empty,
}

enum Slot<M> {
    Idle,
    Loading,
    Ready(M),
    Failed(SceneError),
}

struct Inner<M> {
    slot: Slot<M>,
    generation: u64,
    mounted: bool,
    placeholder: Placeholder,
    policy: FailurePolicy,
}

/// Single-threaded handle to a deferred module slot.
///
/// Clones share the slot. In-flight requests only hold a weak reference, so
/// dropping every handle abandons them.
pub struct LazyBoundary<M> {
    inner: Rc<RefCell<Inner<M>>>,
}

impl<M> Clone for LazyBoundary<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M> LazyBoundary<M> {
    pub fn new(placeholder: Placeholder, policy: FailurePolicy) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                slot: Slot::Idle,
                generation: 0,
                mounted: true,
                placeholder,
                policy,
            })),
        }
    }

    /// Start loading. The boundary shows its placeholder immediately; the
    /// returned future applies the result when it completes.
    pub fn request<F>(&self, load: F) -> impl Future<Output = RequestOutcome> + 'static
    where
        F: Future<Output = Result<M>> + 'static,
        M: 'static,
    {
        let generation = self.begin();
        let weak = Rc::downgrade(&self.inner);
        async move {
            let result = load.await;
            let Some(inner) = weak.upgrade() else {
                log::debug!("scene module finished after its boundary was dropped");
                return RequestOutcome::Abandoned;
            };
            let mut inner = inner.borrow_mut();
            apply(&mut inner, generation, result)
        }
    }

    /// Apply an already-available result, superseding any request in flight.
    pub fn resolve(&self, result: Result<M>) -> RequestOutcome {
        let generation = self.begin();
        apply(&mut self.inner.borrow_mut(), generation, result)
    }

    fn begin(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.generation += 1;
        if inner.mounted {
            inner.slot = Slot::Loading;
        }
        inner.generation
    }

    /// Render branch. `f` must not call back into this boundary.
    pub fn view<R>(&self, f: impl FnOnce(BoundaryView<'_, M>) -> R) -> R {
        let inner = self.inner.borrow();
        let view = if !inner.mounted {
            BoundaryView::Empty
        } else {
            match &inner.slot {
                Slot::Idle | Slot::Loading => BoundaryView::Placeholder(&inner.placeholder),
                Slot::Ready(module) => BoundaryView::Ready(module),
                Slot::Failed(SceneError::ModuleLoad { .. }) => match inner.policy {
                    FailurePolicy::KeepPlaceholder => BoundaryView::Placeholder(&inner.placeholder),
                    FailurePolicy::Collapse => BoundaryView::Empty,
                },
                Slot::Failed(_) => BoundaryView::Empty,
            }
        };
        f(view)
    }

    /// Run `f` on the live module, if there is one.
    pub fn with_ready_mut<R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        let mut inner = self.inner.borrow_mut();
        if !inner.mounted {
            return None;
        }
        match &mut inner.slot {
            Slot::Ready(module) => Some(f(module)),
            _ => None,
        }
    }

    pub fn state(&self) -> BoundaryState {
        let inner = self.inner.borrow();
        if !inner.mounted {
            return BoundaryState::Unmounted;
        }
        match &inner.slot {
            Slot::Idle => BoundaryState::Idle,
            Slot::Loading => BoundaryState::Loading,
            Slot::Ready(_) => BoundaryState::Ready,
            Slot::Failed(err) => BoundaryState::Failed(err.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == BoundaryState::Ready
    }

    /// Tear down: drop the module and ignore any request still in flight.
    pub fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted = false;
        inner.generation += 1;
        inner.slot = Slot::Idle;
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }
}

fn apply<M>(inner: &mut Inner<M>, generation: u64, result: Result<M>) -> RequestOutcome {
    if !inner.mounted || inner.generation != generation {
        log::debug!("discarding stale scene module (request {generation})");
        return RequestOutcome::Abandoned;
    }
    match result {
        Ok(module) => {
            inner.slot = Slot::Ready(module);
            RequestOutcome::Applied
        }
        Err(err) => {
            log::warn!("scene module failed: {err}");
            inner.slot = Slot::Failed(err);
            RequestOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use std::future::ready;

    fn boundary() -> LazyBoundary<u32> {
        LazyBoundary::new(Placeholder::spinner("Loading scene"), FailurePolicy::KeepPlaceholder)
    }

    fn shown(b: &LazyBoundary<u32>) -> String {
        b.view(|v| match v {
            BoundaryView::Placeholder(Placeholder::Spinner { label }) => format!("spinner:{label}"),
            BoundaryView::Placeholder(Placeholder::Empty) => "placeholder:empty".into(),
            BoundaryView::Ready(m) => format!("ready:{m}"),
            BoundaryView::Empty => "empty".into(),
        })
    }

    #[test]
    fn placeholder_until_ready() {
        let b = boundary();
        let pending = b.request(ready(Ok(7)));
        assert_eq!(b.state(), BoundaryState::Loading);
        assert_eq!(shown(&b), "spinner:Loading scene");
        assert_eq!(block_on(pending), RequestOutcome::Applied);
        assert_eq!(shown(&b), "ready:7");
        assert!(b.is_ready());
    }

    #[test]
    fn failure_keeps_placeholder() {
        let b = boundary();
        let outcome = block_on(b.request(ready(Err(SceneError::module_load("404")))));
        assert_eq!(outcome, RequestOutcome::Failed);
        assert_eq!(shown(&b), "spinner:Loading scene");
        assert!(matches!(b.state(), BoundaryState::Failed(SceneError::ModuleLoad { .. })));
    }

    #[test]
    fn failure_collapses_when_asked() {
        let b = LazyBoundary::<u32>::new(Placeholder::Empty, FailurePolicy::Collapse);
        block_on(b.request(ready(Err(SceneError::module_load("offline")))));
        assert_eq!(shown(&b), "empty");
    }

    #[test]
    fn composition_errors_collapse_and_keep_their_kind() {
        let b = boundary();
        let outcome = block_on(b.request(ready(Err(SceneError::not_found("pluto")))));
        assert_eq!(outcome, RequestOutcome::Failed);
        assert_eq!(b.state(), BoundaryState::Failed(SceneError::not_found("pluto")));
        assert_eq!(shown(&b), "empty");

        assert_eq!(b.resolve(Err(SceneError::config("bad json"))), RequestOutcome::Failed);
        assert!(matches!(b.state(), BoundaryState::Failed(SceneError::Configuration { .. })));
        assert_eq!(shown(&b), "empty");
    }

    #[test]
    fn unmount_before_completion_discards_result() {
        let b = boundary();
        let pending = b.request(ready(Ok(1)));
        b.unmount();
        assert_eq!(block_on(pending), RequestOutcome::Abandoned);
        assert_eq!(b.state(), BoundaryState::Unmounted);
        assert_eq!(shown(&b), "empty");
        assert_eq!(b.with_ready_mut(|m| *m), None);
    }

    #[test]
    fn dropped_boundary_abandons_request() {
        let b = boundary();
        let pending = b.request(ready(Ok(1)));
        drop(b);
        assert_eq!(block_on(pending), RequestOutcome::Abandoned);
    }

    #[test]
    fn newer_request_supersedes_older() {
        let b = boundary();
        let first = b.request(ready(Ok(1)));
        let second = b.request(ready(Ok(2)));
        assert_eq!(block_on(second), RequestOutcome::Applied);
        assert_eq!(block_on(first), RequestOutcome::Abandoned);
        assert_eq!(shown(&b), "ready:2");
    }

    #[test]
    fn resolve_supersedes_pending_request() {
        let b = boundary();
        let pending = b.request(ready(Ok(1)));
        assert_eq!(b.resolve(Ok(5)), RequestOutcome::Applied);
        assert_eq!(block_on(pending), RequestOutcome::Abandoned);
        assert_eq!(shown(&b), "ready:5");
    }

    #[test]
    fn with_ready_mut_reaches_module() {
        let b = boundary();
        block_on(b.request(ready(Ok(10))));
        assert_eq!(b.with_ready_mut(|m| { *m += 1; *m }), Some(11));
        assert_eq!(shown(&b), "ready:11");
    }
}
