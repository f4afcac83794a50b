use egui::{Context, Pos2, Rect};

use crate::point::Point;

/// Pointer events delivered to the drawing surface, in surface-local
/// coordinates with a millisecond timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer went down on the surface
    Start(Point),
    /// Pointer moved while held down
    Move(Point),
    /// Pointer was released
    End(Point),
}

impl InputEvent {
    pub fn point(&self) -> Point {
        match self {
            Self::Start(point) | Self::Move(point) | Self::End(point) => *point,
        }
    }

    /// Whether the surface claims an interaction that starts on it. It always does.
    pub fn claims_interaction(&self) -> bool {
        true
    }
}

/// Translate a screen position into the surface's local space
pub fn to_local(pos: Pos2, canvas_rect: Rect) -> (f32, f32) {
    let local = pos - canvas_rect.min;
    (local.x, local.y)
}

/// Handles converting raw egui pointer input into [`InputEvent`]s
pub struct InputHandler {
    canvas_rect: Rect,
    tracking: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            tracking: false,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn make_point(&self, pos: Pos2, time_ms: f64) -> Point {
        let (x, y) = to_local(pos, self.canvas_rect);
        Point::new(x, y, time_ms)
    }

    /// Process this frame's egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let time_ms = input.time * 1000.0;
            let pos = input.pointer.interact_pos();

            if input.pointer.primary_pressed() {
                if let Some(pos) = pos.filter(|pos| self.canvas_rect.contains(*pos)) {
                    self.tracking = true;
                    self.last_pointer_pos = Some(pos);
                    events.push(InputEvent::Start(self.make_point(pos, time_ms)));
                }
            } else if self.tracking && input.pointer.primary_down() {
                if let Some(pos) = pos.filter(|pos| Some(*pos) != self.last_pointer_pos) {
                    self.last_pointer_pos = Some(pos);
                    events.push(InputEvent::Move(self.make_point(pos, time_ms)));
                }
            }

            // Press and release may land in the same frame for a quick tap.
            if self.tracking && input.pointer.primary_released() {
                let pos = pos.or(self.last_pointer_pos).unwrap_or(self.canvas_rect.min);
                events.push(InputEvent::End(self.make_point(pos, time_ms)));
                self.tracking = false;
                self.last_pointer_pos = None;
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use egui::{Event, Modifiers, PointerButton, RawInput};

    use super::*;

    fn raw(time: f64, events: Vec<Event>) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            time: Some(time),
            events,
            ..Default::default()
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn frame(ctx: &Context, handler: &mut InputHandler, input: RawInput) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let _ = ctx.run(input, |ctx| {
            events.extend(handler.process_input(ctx));
        });
        events
    }

    #[test]
    fn positions_are_made_surface_local() {
        let canvas = Rect::from_min_size(Pos2::new(100.0, 40.0), egui::vec2(300.0, 200.0));
        assert_eq!(to_local(Pos2::new(110.0, 45.0), canvas), (10.0, 5.0));
    }

    #[test]
    fn event_exposes_its_sample() {
        let point = Point::new(1.0, 2.0, 3.0);
        assert_eq!(InputEvent::Move(point).point(), point);
        assert!(InputEvent::Start(point).claims_interaction());
    }

    #[test]
    fn idle_frame_produces_no_events() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let mut handler = InputHandler::new(canvas);

        let _ = ctx.run(Default::default(), |ctx| {
            assert!(handler.process_input(ctx).is_empty());
        });
        assert!(!handler.is_tracking());
    }

    #[test]
    fn press_move_release_across_frames() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(300.0, 200.0));
        let mut handler = InputHandler::new(canvas);

        let down = Pos2::new(120.0, 60.0);
        let started = frame(&ctx, &mut handler, raw(0.5, vec![Event::PointerMoved(down), button(down, true)]));
        assert_eq!(started, vec![InputEvent::Start(Point::new(20.0, 10.0, 500.0))]);
        assert!(handler.is_tracking());

        let moved_to = Pos2::new(130.0, 75.0);
        let moved = frame(&ctx, &mut handler, raw(0.75, vec![Event::PointerMoved(moved_to)]));
        assert_eq!(moved, vec![InputEvent::Move(Point::new(30.0, 25.0, 750.0))]);

        let ended = frame(&ctx, &mut handler, raw(1.0, vec![button(moved_to, false)]));
        assert_eq!(ended, vec![InputEvent::End(Point::new(30.0, 25.0, 1000.0))]);
        assert!(!handler.is_tracking());
    }

    #[test]
    fn tap_within_one_frame_starts_and_ends() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let mut handler = InputHandler::new(canvas);

        let pos = Pos2::new(40.0, 40.0);
        let events = frame(
            &ctx,
            &mut handler,
            raw(2.0, vec![Event::PointerMoved(pos), button(pos, true), button(pos, false)]),
        );

        assert_eq!(
            events,
            vec![
                InputEvent::Start(Point::new(40.0, 40.0, 2000.0)),
                InputEvent::End(Point::new(40.0, 40.0, 2000.0)),
            ]
        );
        assert!(!handler.is_tracking());
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(Pos2::new(200.0, 200.0), egui::vec2(100.0, 100.0));
        let mut handler = InputHandler::new(canvas);

        let outside = Pos2::new(10.0, 10.0);
        let pressed = frame(&ctx, &mut handler, raw(0.5, vec![Event::PointerMoved(outside), button(outside, true)]));
        assert!(pressed.is_empty());

        // Dragging onto the canvas does not pick the interaction up.
        let inside = Pos2::new(250.0, 250.0);
        let dragged = frame(&ctx, &mut handler, raw(0.75, vec![Event::PointerMoved(inside)]));
        assert!(dragged.is_empty());

        let released = frame(&ctx, &mut handler, raw(1.0, vec![button(inside, false)]));
        assert!(released.is_empty());
        assert!(!handler.is_tracking());
    }
}
