use egui::{Color32, Sense, Slider, Vec2};

use crate::InkboardApp;
use crate::tool::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, SWATCHES};

pub fn toolbar_panel(app: &mut InkboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Reset").clicked() {
                app.reset_canvas();
            }

            ui.separator();

            let tool = app.tool();
            for &swatch in SWATCHES.iter() {
                let selected = !tool.eraser && tool.color == swatch;
                if swatch_button(ui, swatch, selected).clicked() {
                    app.select_color(swatch);
                }
            }
            if ui.selectable_label(tool.eraser, "Eraser").clicked() {
                app.toggle_eraser();
            }

            ui.separator();

            let mut width = tool.width;
            let slider = ui.add(Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH));
            if slider.changed() {
                app.set_stroke_width(width);
            }

            ui.separator();

            let can_undo = app.history().can_undo();
            let can_redo = app.history().can_redo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.redo();
            }

            ui.separator();

            if ui.button("Run").clicked() {
                app.run_recognition();
            }
        });
    });
}

// Circular color swatch, ringed while selected
fn swatch_button(ui: &mut egui::Ui, color: Color32, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(20.0), Sense::click());
    if ui.is_rect_visible(rect) {
        let radius = rect.height() * 0.5 - 2.0;
        let ring = if selected {
            egui::Stroke::new(2.0, ui.visuals().strong_text_color())
        } else {
            egui::Stroke::new(1.0, ui.visuals().weak_text_color())
        };
        let painter = ui.painter();
        painter.circle_filled(rect.center(), radius, color);
        painter.circle_stroke(rect.center(), radius, ring);
    }
    response
}
