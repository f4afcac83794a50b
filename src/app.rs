use egui::Rect;
use log::debug;

use crate::config::SurfaceConfig;
use crate::controller::InteractionController;
use crate::input::InputHandler;
use crate::pen::SurfaceRect;
use crate::persistence::FsBlobWriter;
use crate::renderer::PainterRenderer;
use crate::stroke::StrokeElement;

const HISTORY_KEY: &str = "gesture_pad_history";

/// Native host of the drawing surface: a canvas plus Clear / Export / Undo
pub struct GesturePadApp {
    controller: InteractionController,
    input: InputHandler,
    canvas_rect: Option<Rect>,
}

impl GesturePadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SurfaceConfig) -> Self {
        let seeded = config.strokes.is_some();
        let mut controller = InteractionController::new(config, Box::new(FsBlobWriter::new()));

        // A configured history wins over whatever was saved last time.
        if !seeded {
            if let Some(history) = cc
                .storage
                .and_then(|storage| eframe::get_value::<Vec<StrokeElement>>(storage, HISTORY_KEY))
            {
                debug!("Restoring {} strokes from the last session", history.len());
                controller.reconcile(history);
            }
        }

        let ctx = cc.egui_ctx.clone();
        controller.on_change_strokes(move |history| {
            debug!("Strokes changed, {} in history", history.len());
            ctx.request_repaint();
        });

        Self {
            controller,
            input: InputHandler::new(Rect::NOTHING),
            canvas_rect: None,
        }
    }

    fn update_layout(&mut self, rect: Rect) {
        if self.canvas_rect == Some(rect) {
            return;
        }
        self.canvas_rect = Some(rect);
        self.input.set_canvas_rect(rect);
        self.controller
            .set_layout(SurfaceRect::new(rect.min.x, rect.min.y, rect.width(), rect.height()));
    }
}

impl eframe::App for GesturePadApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, HISTORY_KEY, &self.controller.history());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll_exports();

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    self.controller.clear();
                }
                if ui.button("Export").clicked() {
                    self.controller.export_gesture_class();
                }
                if ui.button("Undo").clicked() {
                    self.controller.rewind();
                }
                ui.separator();
                if ui.button("Save SVG").clicked() {
                    self.controller.save_svg();
                }
                ui.separator();
                ui.label(format!(
                    "{} strokes, {} gestures collected",
                    self.controller.history().len(),
                    self.controller.gesture_class_samples().len()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            self.update_layout(response.rect);

            for event in self.input.process_input(ctx) {
                self.controller.handle_event(event);
            }

            let mut renderer = PainterRenderer::new(&painter, response.rect.min);
            self.controller.render(&mut renderer);
        });

        if self.controller.pending_exports() > 0 {
            ctx.request_repaint();
        }
    }
}
