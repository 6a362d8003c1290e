use crate::render::plot_interaction;
use crate::state::app_state::PlotModel;
use crate::state::theme::Theme;
use crate::ui::stats_overlay;

/// Render the box plot for the current `PlotModel`.
/// `panel_height` is the target total height for the plot area.
pub fn show_plot_panel(
    plot: &mut PlotModel,
    ui: &mut egui::Ui,
    theme: &Theme,
    x_label: &str,
    y_label: &str,
    panel_height: f32,
) {
    // --- Layout: left margin for Y axis, main plot area, margins for labels ---
    let left_margin = 70.0_f32;
    let right_margin = 20.0_f32;
    let bottom_margin = 40.0_f32;
    let top_margin = 28.0_f32;
    let plot_height = (panel_height - bottom_margin - top_margin).max(100.0);

    let total_height = plot_height + bottom_margin + top_margin;
    let available_width = ui.available_width();
    let total_rect = ui.allocate_space(egui::Vec2::new(available_width, total_height)).1;

    let plot_rect = egui::Rect::from_min_max(
        egui::Pos2::new(total_rect.left() + left_margin, total_rect.top() + top_margin),
        egui::Pos2::new(total_rect.right() - right_margin, total_rect.bottom() - bottom_margin),
    );

    // --- Auto-fit on first display or when requested ---
    if plot.view.auto_fit || !plot.view.initialized {
        plot.view.fit_to_datasets(&plot.datasets);
        plot.view.auto_fit = false;
    }

    // Plot-area interaction is registered before the annotations so that a
    // drag starting over an annotation belongs to the annotation.
    let plot_id = egui::Id::new("box_plot").with(ui.id());
    let response = ui.interact(plot_rect, plot_id, egui::Sense::click_and_drag());

    let painter = ui.painter_at(total_rect);

    // --- Plot background ---
    painter.rect_filled(plot_rect, 0.0, theme.plot_bg());

    draw_grid(&painter, plot, plot_rect, theme);
    draw_boxes(&painter, plot, plot_rect);
    draw_axes_and_labels(&painter, plot, plot_rect, total_rect, x_label, y_label);

    // --- Draggable statistics annotations (on top of the plot) ---
    stats_overlay::show(plot, ui, &painter, plot_rect, theme);

    // Pan/zoom only while no annotation is being dragged.
    if plot.active_drag.is_none() {
        plot.view.handle_input(&response, plot_rect);
    }

    plot.last_frame_rect = Some(total_rect);
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

fn draw_grid(painter: &egui::Painter, plot: &PlotModel, plot_rect: egui::Rect, theme: &Theme) {
    let clipped = painter.with_clip_rect(plot_rect);
    let stroke = egui::Stroke::new(0.5, theme.grid_color());
    let pv = &plot.view;

    // Vertical grid lines at the dataset slots.
    for slot in 1..=plot.datasets.len() {
        let x = pv.data_to_screen(slot as f64, pv.y_min, plot_rect).x;
        clipped.extend(egui::Shape::dashed_line(
            &[
                egui::Pos2::new(x, plot_rect.top()),
                egui::Pos2::new(x, plot_rect.bottom()),
            ],
            stroke,
            4.0,
            4.0,
        ));
    }

    // Horizontal grid lines at the major Y ticks.
    for &(yval, is_major) in &plot_interaction::compute_grid_lines(pv.y_min, pv.y_max) {
        if !is_major {
            continue;
        }
        let y = pv.data_to_screen(pv.x_min, yval, plot_rect).y;
        clipped.extend(egui::Shape::dashed_line(
            &[
                egui::Pos2::new(plot_rect.left(), y),
                egui::Pos2::new(plot_rect.right(), y),
            ],
            stroke,
            4.0,
            4.0,
        ));
    }
}

// ---------------------------------------------------------------------------
// Box glyphs
// ---------------------------------------------------------------------------

fn draw_boxes(painter: &egui::Painter, plot: &PlotModel, plot_rect: egui::Rect) {
    let clipped = painter.with_clip_rect(plot_rect);
    let pv = &plot.view;
    let half_width = plot.box_width() / 2.0;

    for (i, dataset) in plot.datasets.iter().enumerate() {
        let stats = &plot.summaries[i];
        let extents = &plot.extents[i];
        let slot = (i + 1) as f64;
        let color = dataset.color32();
        let stroke = egui::Stroke::new(1.5, color);

        // Whisker stems and caps
        let cap_half = half_width * 0.5;
        for (from, to) in [
            (extents.whisker_lo, stats.q1),
            (stats.q3, extents.whisker_hi),
        ] {
            let a = pv.data_to_screen(slot, from, plot_rect);
            let b = pv.data_to_screen(slot, to, plot_rect);
            clipped.line_segment([a, b], stroke);
        }
        for whisker in [extents.whisker_lo, extents.whisker_hi] {
            let left = pv.data_to_screen(slot - cap_half, whisker, plot_rect);
            let right = pv.data_to_screen(slot + cap_half, whisker, plot_rect);
            clipped.line_segment([left, right], stroke);
        }

        // Box from Q1 to Q3, translucent fill with a solid outline
        let top_left = pv.data_to_screen(slot - half_width, stats.q3, plot_rect);
        let bottom_right = pv.data_to_screen(slot + half_width, stats.q1, plot_rect);
        let box_rect = egui::Rect::from_min_max(top_left, bottom_right);
        clipped.rect_filled(box_rect, 0.0, color.gamma_multiply(0.35));
        clipped.rect_stroke(box_rect, 0.0, stroke, egui::StrokeKind::Middle);

        // Median line
        let median_left = pv.data_to_screen(slot - half_width, stats.median, plot_rect);
        let median_right = pv.data_to_screen(slot + half_width, stats.median, plot_rect);
        clipped.line_segment([median_left, median_right], egui::Stroke::new(2.0, color));

        // Outliers beyond the whiskers
        for &v in &extents.outliers {
            let pos = pv.data_to_screen(slot, v, plot_rect);
            clipped.circle_stroke(pos, 3.0, egui::Stroke::new(1.0, color));
        }
    }
}

// ---------------------------------------------------------------------------
// Axis labels, tick marks, title
// ---------------------------------------------------------------------------

fn draw_axes_and_labels(
    painter: &egui::Painter,
    plot: &PlotModel,
    plot_rect: egui::Rect,
    total_rect: egui::Rect,
    x_label: &str,
    y_label: &str,
) {
    let pv = &plot.view;
    let text_color = painter.ctx().style().visuals.text_color();
    let dim_color = text_color.gamma_multiply(0.6);

    // --- Plot border ---
    painter.rect_stroke(
        plot_rect,
        0.0,
        egui::Stroke::new(1.0, dim_color),
        egui::StrokeKind::Outside,
    );

    // --- Title ---
    painter.text(
        egui::Pos2::new(plot_rect.center().x, total_rect.top() + 2.0),
        egui::Align2::CENTER_TOP,
        "Vertical Box Plot",
        egui::FontId::proportional(14.0),
        text_color,
    );

    // --- X-axis tick labels: dataset names at their slots ---
    for (i, dataset) in plot.datasets.iter().enumerate() {
        let slot = (i + 1) as f64;
        let screen_x = pv.data_to_screen(slot, pv.y_min, plot_rect).x;
        if screen_x < plot_rect.left() || screen_x > plot_rect.right() {
            continue;
        }
        painter.text(
            egui::Pos2::new(screen_x, plot_rect.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &dataset.name,
            egui::FontId::proportional(11.0),
            dim_color,
        );
    }

    // --- X-axis label ---
    if !x_label.is_empty() {
        painter.text(
            egui::Pos2::new(plot_rect.center().x, total_rect.bottom() - 4.0),
            egui::Align2::CENTER_BOTTOM,
            x_label,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }

    // --- Y-axis tick labels ---
    for &(yval, is_major) in &plot_interaction::compute_grid_lines(pv.y_min, pv.y_max) {
        if !is_major {
            continue;
        }
        let screen_y = pv.data_to_screen(pv.x_min, yval, plot_rect).y;
        if screen_y < plot_rect.top() || screen_y > plot_rect.bottom() {
            continue;
        }
        painter.text(
            egui::Pos2::new(plot_rect.left() - 4.0, screen_y),
            egui::Align2::RIGHT_CENTER,
            plot_interaction::format_tick_value(yval),
            egui::FontId::proportional(10.0),
            dim_color,
        );
    }

    // --- Y-axis label ---
    if !y_label.is_empty() {
        painter.text(
            egui::Pos2::new(total_rect.left() + 2.0, plot_rect.center().y),
            egui::Align2::LEFT_CENTER,
            y_label,
            egui::FontId::proportional(11.0),
            text_color,
        );
    }
}
