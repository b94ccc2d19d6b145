use crate::InkboardApp;

pub fn canvas_panel(app: &mut InkboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
        let rect = response.rect;

        app.ensure_surface(rect);

        let events = app.process_pointer(&response, rect);
        for event in events {
            app.handle_input(event, rect);
        }

        // Repaint from the latest undo/redo target before drawing the frame.
        app.drain_restore();

        app.paint_canvas(ctx, &painter, rect);
    });

    if let Some(result) = app.result().cloned() {
        egui::Window::new("Result")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("{} = {}", result.expression, result.answer));
                if ui.button("Dismiss").clicked() {
                    app.clear_result();
                }
            });
    }
}
