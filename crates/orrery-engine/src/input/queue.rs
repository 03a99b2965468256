/// Pointer and surface events, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// The host surface changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Whether a later `other` makes this event redundant when both sit
    /// back to back in the queue.
    fn superseded_by(&self, other: &InputEvent) -> bool {
        matches!(
            (self, other),
            (InputEvent::PointerMove { .. }, InputEvent::PointerMove { .. })
                | (InputEvent::Resize { .. }, InputEvent::Resize { .. })
        )
    }
}

/// Events gathered between two frames of one scene.
///
/// Runs of pointer moves or resizes collapse to the newest one; drag
/// rotation only depends on where the pointer ended up.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match self.pending.last_mut() {
            Some(last) if last.superseded_by(&event) => *last = event,
            _ => self.pending.push(event),
        }
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Re-queue the newest resize from `events`, dropping the rest.
    /// Used when a frame could not consume its input yet.
    pub fn carry_resize(&mut self, events: &[InputEvent]) {
        if let Some(resize) = events.iter().rev().find(|e| matches!(e, InputEvent::Resize { .. })) {
            self.push(*resize);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_collapse_but_clicks_do_not() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        q.push(InputEvent::PointerMove { x: 5.0, y: 0.0 });
        q.push(InputEvent::PointerMove { x: 9.0, y: 2.0 });
        q.push(InputEvent::PointerUp { x: 9.0, y: 2.0 });
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        assert_eq!(q.len(), 4);
        let events = q.drain();
        assert_eq!(events[1], InputEvent::PointerMove { x: 9.0, y: 2.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn carry_keeps_only_newest_resize() {
        let events = [
            InputEvent::Resize { width: 400.0, height: 300.0 },
            InputEvent::PointerDown { x: 1.0, y: 1.0 },
            InputEvent::Resize { width: 800.0, height: 600.0 },
            InputEvent::PointerUp { x: 1.0, y: 1.0 },
        ];
        let mut q = InputQueue::new();
        q.carry_resize(&events);
        assert_eq!(q.drain(), vec![InputEvent::Resize { width: 800.0, height: 600.0 }]);

        q.carry_resize(&[InputEvent::PointerMove { x: 0.0, y: 0.0 }]);
        assert!(q.is_empty());
    }
}
