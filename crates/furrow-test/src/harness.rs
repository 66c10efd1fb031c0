//! Test harness for Furrow widgets.

use furrow_core::{Event, Key, Message, MouseButton, Point, Rect, RecordingCanvas, Widget};
use log::trace;
use std::collections::VecDeque;

/// Drives a widget with synthetic input and keeps the messages it emits.
pub struct Harness<W: Widget> {
    /// Widget under test
    root: W,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Messages returned by the widget, oldest first
    messages: Vec<Message>,
    /// Current viewport
    viewport: Rect,
}

impl<W: Widget> Harness<W> {
    /// Create a harness and lay the widget out in a 1280x720 viewport.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            messages: Vec::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size and lay the widget out again.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// Widget under test.
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// Mutable access to the widget under test.
    ///
    /// Call [`Harness::relayout`] after changes that affect its size.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Lay the widget out in the viewport again.
    pub fn relayout(&mut self) {
        self.root.layout(self.viewport);
    }

    // === Event Simulation ===

    /// Simulate a left click at `position`.
    pub fn click_at(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Deliver an arbitrary event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                trace!("harness: {event:?} produced a message");
                self.messages.push(message);
            }
        }
    }

    // === Messages ===

    /// Number of messages received so far.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// All received messages of type `T`, oldest first.
    pub fn messages_of<T: 'static>(&self) -> Vec<&T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .collect()
    }

    /// Most recent message of type `T`.
    pub fn last_message<T: 'static>(&self) -> Option<&T> {
        self.messages
            .iter()
            .rev()
            .find_map(|m| m.downcast_ref::<T>())
    }

    /// Drop all received messages.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    // === Rendering ===

    /// Paint the widget into a fresh recording canvas.
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// All text the widget draws, in paint order.
    pub fn texts(&self) -> Vec<String> {
        self.paint().texts().into_iter().map(String::from).collect()
    }

    // === Assertions ===

    /// Assert that some drawn text contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if no drawn text contains `needle`.
    pub fn assert_text_contains(&self, needle: &str) -> &Self {
        let texts = self.texts();
        assert!(
            texts.iter().any(|t| t.contains(needle)),
            "expected text containing '{needle}', drawn: {texts:?}"
        );
        self
    }

    /// Assert that no drawn text contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if some drawn text contains `needle`.
    pub fn assert_no_text(&self, needle: &str) -> &Self {
        let texts = self.texts();
        assert!(
            !texts.iter().any(|t| t.contains(needle)),
            "expected no text containing '{needle}', drawn: {texts:?}"
        );
        self
    }

    /// Assert the number of received messages of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    pub fn assert_message_count<T: 'static>(&self, expected: usize) -> &Self {
        let actual = self.messages_of::<T>().len();
        assert_eq!(
            actual,
            expected,
            "expected {expected} messages of type {}, got {actual}",
            std::any::type_name::<T>()
        );
        self
    }
}
