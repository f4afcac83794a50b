use log::debug;

use crate::pen::Pen;
use crate::point::Point;
use crate::stroke::{Stroke, StrokeElement, StrokeStyle};

/// Gesture samples taken out of the store, each tagged with the order it
/// was captured in so it can be merged back later
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrainedSamples {
    seqs: Vec<u64>,
    strokes: Vec<Stroke>,
}

impl DrainedSamples {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }
}

/// The authoritative record of drawing state.
///
/// Holds the committed history, the stroke being captured (if any) and the
/// gesture-class samples. History and samples grow and shrink together.
#[derive(Debug, Clone)]
pub struct StrokeStore {
    pen: Pen,
    style: StrokeStyle,
    history: Vec<StrokeElement>,
    current: Option<Stroke>,
    samples: Vec<Stroke>,
    // Capture order of each entry in `samples`, always ascending
    sample_seqs: Vec<u64>,
    next_seq: u64,
}

impl StrokeStore {
    /// Create an empty store. Committed strokes get `style`.
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            pen: Pen::new(),
            style,
            history: Vec::new(),
            current: None,
            samples: Vec::new(),
            sample_seqs: Vec::new(),
            next_seq: 0,
        }
    }

    /// Create a store seeded with an existing history
    pub fn with_history(style: StrokeStyle, history: Vec<StrokeElement>) -> Self {
        let mut store = Self::new(style);
        store.pen.reset_to(history.len());
        store.history = history;
        store
    }

    pub fn history(&self) -> &[StrokeElement] {
        &self.history
    }

    pub fn gesture_class_samples(&self) -> &[Stroke] {
        &self.samples
    }

    pub fn current_points(&self) -> &[Point] {
        self.current.as_ref().map(Stroke::points).unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }

    /// Path of the stroke currently being captured
    pub fn preview_path(&self) -> String {
        self.pen.points_to_svg(self.current_points())
    }

    /// Start capturing a new stroke. Returns false if one is already active.
    pub fn begin_interaction(&mut self) -> bool {
        if self.current.is_some() {
            debug!("Ignoring interaction start: one is already active");
            return false;
        }
        self.current = Some(Stroke::new());
        true
    }

    /// Add a sample to the active stroke. Dropped when nothing is active.
    pub fn append_sample(&mut self, point: Point) -> bool {
        match &mut self.current {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Commit the active stroke to the history and the gesture samples.
    ///
    /// A stroke with no samples is discarded and `None` returned.
    pub fn finalize_interaction(&mut self) -> Option<StrokeElement> {
        let mut stroke = self.current.take()?;
        if stroke.is_empty() {
            debug!("Discarding interaction without samples");
            return None;
        }
        stroke.pad_single_tap(self.style.stroke_width);

        let element = StrokeElement::path(self.pen.points_to_svg(stroke.points()), self.style.clone());
        self.pen.add_stroke(stroke.points());
        self.history.push(element.clone());
        self.samples.push(stroke);
        self.sample_seqs.push(self.next_seq);
        self.next_seq += 1;
        debug!("Committed stroke #{}", self.history.len());
        Some(element)
    }

    /// Remove the last committed stroke and its gesture sample.
    ///
    /// Refused while a stroke is being captured or when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.current.is_some() {
            debug!("Ignoring undo during an active interaction");
            return false;
        }
        if self.history.pop().is_none() {
            debug!("Ignoring undo with empty history");
            return false;
        }
        self.samples.pop();
        self.sample_seqs.pop();
        self.pen.rewind_stroke();
        true
    }

    /// Drop all committed strokes, samples and captured points.
    ///
    /// An active interaction stays active but loses the samples seen so far.
    pub fn clear(&mut self) {
        self.history.clear();
        self.samples.clear();
        self.sample_seqs.clear();
        if let Some(stroke) = &mut self.current {
            *stroke = Stroke::new();
        }
        self.pen.clear();
    }

    /// Take the gesture-class samples, leaving the accumulator empty
    pub fn drain_gesture_class_samples(&mut self) -> DrainedSamples {
        DrainedSamples {
            seqs: std::mem::take(&mut self.sample_seqs),
            strokes: std::mem::take(&mut self.samples),
        }
    }

    /// Put previously drained samples back, merged by capture order with
    /// whatever the accumulator holds now
    pub fn restore_gesture_class_samples(&mut self, drained: DrainedSamples) {
        if drained.is_empty() {
            return;
        }
        let total = self.samples.len() + drained.len();
        let mut seqs = Vec::with_capacity(total);
        let mut samples = Vec::with_capacity(total);

        let mut current = std::mem::take(&mut self.sample_seqs)
            .into_iter()
            .zip(std::mem::take(&mut self.samples))
            .peekable();
        let mut restored = drained.seqs.into_iter().zip(drained.strokes).peekable();

        loop {
            let take_restored = match (restored.peek(), current.peek()) {
                (Some((a, _)), Some((b, _))) => a < b,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_restored { restored.next() } else { current.next() };
            if let Some((seq, stroke)) = next {
                seqs.push(seq);
                samples.push(stroke);
            }
        }

        self.sample_seqs = seqs;
        self.samples = samples;
    }

    /// Replace the history wholesale.
    ///
    /// Ignored while a stroke is being captured or when `history` already
    /// matches. Gesture samples are left alone.
    pub fn reconcile(&mut self, history: Vec<StrokeElement>) -> bool {
        if self.current.is_some() {
            debug!("Deferring history reset during an active interaction");
            return false;
        }
        if self.history == history {
            return false;
        }
        self.pen.reset_to(history.len());
        self.history = history;
        debug!("History replaced with {} strokes", self.history.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StrokeStore {
        StrokeStore::new(StrokeStyle::default())
    }

    fn draw(store: &mut StrokeStore, points: &[(f32, f32, f64)]) -> Option<StrokeElement> {
        store.begin_interaction();
        for &(x, y, t) in points {
            store.append_sample(Point::new(x, y, t));
        }
        store.finalize_interaction()
    }

    #[test]
    fn finalize_appends_history_and_samples() {
        let mut store = store();
        let element = draw(&mut store, &[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 20.0)]).unwrap();

        assert_eq!(element.d(), "M 0,0 L 10,0 L 10,10");
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.gesture_class_samples().len(), 1);
        assert_eq!(store.gesture_class_samples()[0].len(), 3);
        assert!(!store.is_active());
        assert_eq!(store.pen().stroke_count(), 1);
    }

    #[test]
    fn samples_are_dropped_when_idle() {
        let mut store = store();
        assert!(!store.append_sample(Point::new(1.0, 1.0, 0.0)));
        assert!(store.current_points().is_empty());
        assert!(store.finalize_interaction().is_none());
    }

    #[test]
    fn empty_interaction_is_discarded() {
        let mut store = store();
        assert!(draw(&mut store, &[]).is_none());
        assert!(store.history().is_empty());
        assert!(!store.is_active());
    }

    #[test]
    fn second_begin_is_refused() {
        let mut store = store();
        assert!(store.begin_interaction());
        store.append_sample(Point::new(1.0, 1.0, 0.0));
        assert!(!store.begin_interaction());
        assert_eq!(store.current_points().len(), 1);
    }

    #[test]
    fn undo_removes_from_both_lists() {
        let mut store = store();
        draw(&mut store, &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        draw(&mut store, &[(5.0, 5.0, 2.0), (6.0, 6.0, 3.0)]);

        assert!(store.undo());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].d(), "M 0,0 L 1,1");
        assert_eq!(store.gesture_class_samples().len(), 1);
        assert_eq!(store.pen().stroke_count(), 1);
    }

    #[test]
    fn undo_refused_while_active() {
        let mut store = store();
        draw(&mut store, &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        store.begin_interaction();
        store.append_sample(Point::new(3.0, 3.0, 5.0));

        assert!(!store.undo());
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.current_points().len(), 1);
    }

    #[test]
    fn undo_with_empty_history_is_noop() {
        let mut store = store();
        assert!(!store.undo());
        assert_eq!(store.pen().stroke_count(), 0);
    }

    #[test]
    fn clear_keeps_interaction_open() {
        let mut store = store();
        draw(&mut store, &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        store.begin_interaction();
        store.append_sample(Point::new(3.0, 3.0, 5.0));

        store.clear();
        assert!(store.history().is_empty());
        assert!(store.gesture_class_samples().is_empty());
        assert!(store.current_points().is_empty());
        assert!(store.is_active());

        store.append_sample(Point::new(4.0, 4.0, 6.0));
        store.finalize_interaction();
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].d(), "M 4,4 L 5,5");
    }

    #[test]
    fn restore_puts_samples_back_in_order() {
        let mut store = store();
        draw(&mut store, &[(1.0, 1.0, 0.0)]);
        let drained = store.drain_gesture_class_samples();
        assert!(store.gesture_class_samples().is_empty());

        draw(&mut store, &[(2.0, 2.0, 1.0)]);
        store.restore_gesture_class_samples(drained);

        let firsts: Vec<f32> = store.gesture_class_samples().iter().map(|s| s.points()[0].x).collect();
        assert_eq!(firsts, vec![1.0, 2.0]);
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn restores_merge_by_capture_order() {
        let mut store = store();
        draw(&mut store, &[(1.0, 1.0, 0.0)]);
        let first = store.drain_gesture_class_samples();
        draw(&mut store, &[(2.0, 2.0, 1.0)]);
        let second = store.drain_gesture_class_samples();
        draw(&mut store, &[(3.0, 3.0, 2.0)]);

        // The older batch comes back first, the newer one must still land after it.
        store.restore_gesture_class_samples(first);
        store.restore_gesture_class_samples(second);

        let firsts: Vec<f32> = store.gesture_class_samples().iter().map(|s| s.points()[0].x).collect();
        assert_eq!(firsts, vec![1.0, 2.0, 3.0]);

        // Undo still removes the newest sample.
        assert!(store.undo());
        assert_eq!(store.gesture_class_samples().last().unwrap().points()[0].x, 2.0);
    }

    #[test]
    fn reconcile_replaces_history_when_idle() {
        let mut store = store();
        draw(&mut store, &[(0.0, 0.0, 0.0)]);
        let seeded = vec![
            StrokeElement::path("M 1,1 L 2,2", StrokeStyle::default()),
            StrokeElement::path("M 3,3 L 4,4", StrokeStyle::default()),
        ];

        assert!(store.reconcile(seeded.clone()));
        assert_eq!(store.history(), &seeded[..]);
        assert_eq!(store.pen().stroke_count(), 2);
        assert_eq!(store.gesture_class_samples().len(), 1);

        assert!(!store.reconcile(seeded));
    }

    #[test]
    fn reconcile_is_deferred_while_active() {
        let mut store = store();
        store.begin_interaction();
        assert!(!store.reconcile(vec![StrokeElement::path("M 1,1", StrokeStyle::default())]));
        assert!(store.history().is_empty());
    }
}
