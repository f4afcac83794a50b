use std::path::PathBuf;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::SurfaceConfig;
use crate::export;
use crate::input::InputEvent;
use crate::pen::SurfaceRect;
use crate::persistence::{BlobWriter, DRAWING_FILE, ExportTicket, GESTURE_CLASS_FILE};
use crate::point::Point;
use crate::renderer::PathRenderer;
use crate::store::{DrainedSamples, StrokeStore};
use crate::stroke::{Stroke, StrokeElement, StrokeStyle};

/// Whether a pointer interaction is currently being captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Active,
}

/// Callback invoked with the full history after every committed change
pub type ChangeObserver = Box<dyn FnMut(&[StrokeElement])>;

/// An export whose write has not been confirmed yet
struct PendingExport {
    id: Uuid,
    path: PathBuf,
    /// Samples to put back if the write fails
    samples: DrainedSamples,
    ticket: ExportTicket,
}

/// Drives pointer input into the [`StrokeStore`] and fires the
/// undo / clear / export actions of the drawing surface.
pub struct InteractionController {
    state: InteractionState,
    store: StrokeStore,
    preview_style: StrokeStyle,
    export_dir: PathBuf,
    writer: Box<dyn BlobWriter>,
    pending: Vec<PendingExport>,
    observers: Vec<ChangeObserver>,
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &self.state)
            .field("store", &self.store)
            .field("layout", &self.layout())
            .field("pending", &self.pending.len())
            .field("observers", &format!("<{} observers>", self.observers.len()))
            .finish()
    }
}

impl InteractionController {
    pub fn new(config: SurfaceConfig, writer: Box<dyn BlobWriter>) -> Self {
        let store = match &config.strokes {
            Some(strokes) => StrokeStore::with_history(config.committed_style(), strokes.clone()),
            None => StrokeStore::new(config.committed_style()),
        };
        Self {
            state: InteractionState::Idle,
            store,
            preview_style: config.preview_style(),
            export_dir: config.path,
            writer,
            pending: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register a callback run after every committed change to the history
    pub fn on_change_strokes(&mut self, observer: impl FnMut(&[StrokeElement]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == InteractionState::Active
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn history(&self) -> &[StrokeElement] {
        self.store.history()
    }

    pub fn gesture_class_samples(&self) -> &[Stroke] {
        self.store.gesture_class_samples()
    }

    /// The surface rect from the last layout pass, if any
    pub fn layout(&self) -> Option<SurfaceRect> {
        self.store.pen().offset()
    }

    pub fn pending_exports(&self) -> usize {
        self.pending.len()
    }

    fn notify(&mut self) {
        let history = self.store.history();
        for observer in &mut self.observers {
            observer(history);
        }
    }

    /// Feed one pointer event through the state machine
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Start(point) => self.on_interaction_start(point),
            InputEvent::Move(point) => self.on_interaction_move(point),
            InputEvent::End(_) => self.on_interaction_end(),
        }
    }

    pub fn on_interaction_start(&mut self, point: Point) {
        if self.is_active() {
            debug!("Ignoring overlapping interaction start");
            return;
        }
        if self.store.begin_interaction() {
            self.state = InteractionState::Active;
            self.store.append_sample(point);
            debug!("Interaction started at ({}, {})", point.x, point.y);
        }
    }

    pub fn on_interaction_move(&mut self, point: Point) {
        if self.is_active() {
            self.store.append_sample(point);
        }
    }

    pub fn on_interaction_end(&mut self) {
        if !self.is_active() {
            return;
        }
        self.state = InteractionState::Idle;
        if self.store.finalize_interaction().is_some() {
            self.notify();
        }
    }

    /// Record a new surface rect from a layout pass
    pub fn set_layout(&mut self, rect: SurfaceRect) {
        self.store.pen_mut().set_offset(rect);
    }

    /// Undo the last committed stroke. Refused while drawing.
    pub fn rewind(&mut self) -> bool {
        if self.is_active() {
            debug!("Ignoring undo during an active interaction");
            return false;
        }
        if !self.store.undo() {
            return false;
        }
        self.notify();
        true
    }

    /// Throw away everything drawn and collected so far.
    ///
    /// Exports still in flight keep running but will not put their samples
    /// back if they fail.
    pub fn clear(&mut self) {
        self.store.clear();
        for export in &mut self.pending {
            if !export.samples.is_empty() {
                debug!("Export {}: dropping {} gestures on clear", export.id, export.samples.len());
                export.samples = DrainedSamples::default();
            }
        }
        self.notify();
    }

    /// Replace the history with an externally supplied one.
    ///
    /// Only applied while idle and when the content actually differs.
    pub fn reconcile(&mut self, strokes: Vec<StrokeElement>) -> bool {
        if self.is_active() {
            debug!("Deferring history reset until the interaction ends");
            return false;
        }
        self.store.reconcile(strokes)
    }

    /// Hand the collected gesture samples to the writer.
    ///
    /// The accumulator is emptied straight away. If the write later fails
    /// the samples are put back by [`Self::poll_exports`].
    pub fn export_gesture_class(&mut self) {
        if self.store.gesture_class_samples().is_empty() {
            debug!("Nothing to export");
            return;
        }

        let samples = self.store.drain_gesture_class_samples();
        let blob = match export::to_gesture_class_blob(samples.strokes()) {
            Ok(blob) => blob,
            Err(err) => {
                error!("Gesture class export failed: {err}");
                self.store.restore_gesture_class_samples(samples);
                return;
            }
        };

        let id = Uuid::new_v4();
        let path = self.export_dir.join(GESTURE_CLASS_FILE);
        debug!("Export {id}: writing {} gestures to {}", samples.len(), path.display());
        let ticket = self.writer.write_blob(path.clone(), blob);
        self.pending.push(PendingExport { id, path, samples, ticket });
    }

    /// The history as a standalone SVG document sized to the last layout
    pub fn export_to_svg(&self) -> String {
        export::to_vector_document(self.store.history(), self.layout().unwrap_or_default())
    }

    /// Write the SVG document next to the gesture classes
    pub fn save_svg(&mut self) {
        let id = Uuid::new_v4();
        let path = self.export_dir.join(DRAWING_FILE);
        let ticket = self.writer.write_blob(path.clone(), self.export_to_svg());
        self.pending.push(PendingExport {
            id,
            path,
            samples: DrainedSamples::default(),
            ticket,
        });
    }

    /// Settle finished writes without blocking.
    ///
    /// Samples of failed exports are merged back into the accumulator in
    /// the order they were drawn.
    pub fn poll_exports(&mut self) {
        let mut restored = Vec::new();
        self.pending.retain_mut(|export| match export.ticket.try_result() {
            None => true,
            Some(Ok(())) => {
                info!("Export {}: {} written", export.id, export.path.display());
                false
            }
            Some(Err(err)) => {
                error!("Export {}: {err}", export.id);
                if !export.samples.is_empty() {
                    warn!("Export {}: restoring {} gestures", export.id, export.samples.len());
                    restored.push(std::mem::take(&mut export.samples));
                }
                false
            }
        });

        for samples in restored {
            self.store.restore_gesture_class_samples(samples);
        }
    }

    /// Paint the committed history followed by the stroke being drawn
    pub fn render(&self, renderer: &mut dyn PathRenderer) {
        for element in self.store.history() {
            renderer.draw_path(element.d(), element.style());
        }
        let preview = self.store.preview_path();
        if !preview.is_empty() {
            renderer.draw_path(&preview, &self.preview_style);
        }
    }
}
