use crate::state::app_state::PlotModel;
use crate::state::theme::Theme;

/// Draw the per-dataset statistics annotations over the plot and handle
/// drag-to-move. Positions are normalized over `plot_rect` (y up) and
/// clamped to the unit square on every move; the session's `active_drag`
/// flag tracks the drag lifecycle.
pub fn show(
    plot: &mut PlotModel,
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    plot_rect: egui::Rect,
    theme: &Theme,
) {
    let font = egui::FontId::proportional(11.0);
    let text_color = ui.visuals().text_color();

    for idx in 0..plot.annotations.len() {
        let (dataset_id, pos, text) = {
            let a = &plot.annotations[idx];
            (a.dataset_id, a.pos, a.text.clone())
        };

        let galley = painter.layout_no_wrap(text, font.clone(), text_color);
        let size = galley.rect.size() + egui::vec2(12.0, 8.0);

        let center = egui::Pos2::new(
            plot_rect.left() + pos.x * plot_rect.width(),
            plot_rect.bottom() - pos.y * plot_rect.height(),
        );
        let bg_rect = egui::Rect::from_center_size(center, size);

        let id = egui::Id::new("stats_annotation").with(dataset_id);
        let response = ui.interact(bg_rect, id, egui::Sense::drag());

        let mut pos = pos;
        if response.drag_started() {
            plot.active_drag = Some(dataset_id);
        }
        if response.dragged() {
            let delta = response.drag_delta();
            pos = pos.translated(
                delta.x / plot_rect.width(),
                -delta.y / plot_rect.height(),
            );
        }
        if response.drag_stopped() && plot.active_drag == Some(dataset_id) {
            plot.active_drag = None;
        }
        plot.annotations[idx].pos = pos;

        // Paint at the (possibly moved) position so the box tracks the
        // pointer without a one-frame lag.
        let center = egui::Pos2::new(
            plot_rect.left() + pos.x * plot_rect.width(),
            plot_rect.bottom() - pos.y * plot_rect.height(),
        );
        let bg_rect = egui::Rect::from_center_size(center, size);

        let border = if response.hovered() || response.dragged() {
            egui::Stroke::new(1.0, text_color.gamma_multiply(0.7))
        } else {
            egui::Stroke::new(0.5, text_color.gamma_multiply(0.3))
        };
        painter.rect_filled(bg_rect, 4.0, theme.annotation_bg());
        painter.rect_stroke(bg_rect, 4.0, border, egui::StrokeKind::Outside);
        painter.galley(bg_rect.min + egui::vec2(6.0, 4.0), galley, text_color);
    }
}
