use eframe::egui;
use std::sync::Arc;

use crate::state::app_state::{PlotModel, SessionState, VERSION};
use crate::ui::plot_panel;

/// What to do when a screenshot arrives.
enum PendingScreenshot {
    SaveFile,
    Clipboard,
}

/// The main Boxplot Studio application.
pub struct BoxPlotApp {
    pub state: SessionState,
    /// An error message shown in the footer until dismissed or replaced.
    pub error_message: Option<String>,
    /// Whether to show the About window (hidden menu).
    pub show_about: bool,
    /// Pending export action (save file or clipboard).
    pending_screenshot: Option<PendingScreenshot>,
}

impl BoxPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = SessionState::new();

        // --- Global UI style improvements ---
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(15.0));
        style
            .text_styles
            .insert(egui::TextStyle::Button, egui::FontId::proportional(14.5));
        style
            .text_styles
            .insert(egui::TextStyle::Heading, egui::FontId::proportional(22.0));
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(state.theme.visuals());

        Self {
            state,
            error_message: None,
            show_about: false,
            pending_screenshot: None,
        }
    }

    /// Run the parse + statistics pipeline over the current input text.
    fn generate_plot(&mut self) {
        match PlotModel::from_input(&self.state.input_text) {
            Ok(plot) => {
                tracing::info!(datasets = plot.datasets.len(), "Generated box plot");
                self.state.plot = Some(plot);
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!("Failed to generate plot: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Crop a viewport screenshot to the plot panel and dispatch it to the
    /// pending export target.
    fn handle_screenshot(&mut self, ctx: &egui::Context, color_image: Arc<egui::ColorImage>) {
        let action = match self.pending_screenshot.take() {
            Some(action) => action,
            None => return,
        };

        // Crop to just the plot panel rect
        let ppp = ctx.pixels_per_point();
        let full_w = color_image.width();
        let crop_rect = self.state.plot.as_ref().and_then(|p| p.last_frame_rect);

        let (rgba, width, height) = if let Some(rect) = crop_rect {
            let x0 = ((rect.left() * ppp) as usize).min(full_w);
            let y0 = ((rect.top() * ppp) as usize).min(color_image.height());
            let x1 = ((rect.right() * ppp).ceil() as usize).min(full_w);
            let y1 = ((rect.bottom() * ppp).ceil() as usize).min(color_image.height());
            let cw = x1.saturating_sub(x0);
            let ch = y1.saturating_sub(y0);
            let mut cropped = Vec::with_capacity(cw * ch * 4);
            for row in y0..y1 {
                for col in x0..x1 {
                    let c = color_image.pixels[row * full_w + col];
                    cropped.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
                }
            }
            (cropped, cw, ch)
        } else {
            let w = color_image.width();
            let h = color_image.height();
            let rgba: Vec<u8> = color_image
                .pixels
                .iter()
                .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
                .collect();
            (rgba, w, h)
        };

        match action {
            PendingScreenshot::SaveFile => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("boxplot_output.png")
                    .add_filter("PNG Image", &["png"])
                    .save_file()
                {
                    if let Some(img) =
                        image::RgbaImage::from_raw(width as u32, height as u32, rgba)
                    {
                        if let Err(e) = img.save(&path) {
                            self.error_message = Some(format!("Failed to save image: {e}"));
                        } else {
                            tracing::info!("Saved plot to {:?}", path);
                        }
                    }
                }
            }
            PendingScreenshot::Clipboard => match arboard::Clipboard::new() {
                Ok(mut clipboard) => {
                    let img_data = arboard::ImageData {
                        width,
                        height,
                        bytes: std::borrow::Cow::Owned(rgba),
                    };
                    if let Err(e) = clipboard.set_image(img_data) {
                        self.error_message = Some(format!("Failed to copy to clipboard: {e}"));
                    } else {
                        tracing::info!("Copied plot to clipboard");
                    }
                }
                Err(e) => {
                    self.error_message = Some(format!("Failed to access clipboard: {e}"));
                }
            },
        }
    }
}

impl eframe::App for BoxPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // ------------------------------------------------------------------
        // 0. Handle screenshot events from previous frame
        // ------------------------------------------------------------------
        if self.pending_screenshot.is_some() {
            let mut screenshot_image: Option<Arc<egui::ColorImage>> = None;
            ctx.input(|i| {
                for event in &i.raw.events {
                    if let egui::Event::Screenshot { image, .. } = event {
                        screenshot_image = Some(image.clone());
                    }
                }
            });
            if let Some(color_image) = screenshot_image {
                self.handle_screenshot(ctx, color_image);
            }
        }

        // ------------------------------------------------------------------
        // 1. Header panel
        // ------------------------------------------------------------------
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.visuals_mut().override_text_color =
                        Some(ui.visuals().strong_text_color());
                    let heading_response = ui.heading("Boxplot Studio");
                    ui.visuals_mut().override_text_color = None;
                    heading_response.context_menu(|ui| {
                        if ui.button("About Boxplot Studio").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_icon = match self.state.theme {
                            crate::state::theme::Theme::Dark => "Light Mode",
                            crate::state::theme::Theme::Light => "Dark Mode",
                        };
                        if ui.button(theme_icon).clicked() {
                            self.state.theme = self.state.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // ------------------------------------------------------------------
        // 2. Footer panel: status and error display
        // ------------------------------------------------------------------
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status = match &self.state.plot {
                        Some(plot) => {
                            let n = plot.datasets.len();
                            if n == 1 {
                                "1 dataset".to_string()
                            } else {
                                format!("{n} datasets")
                            }
                        }
                        None => "no plot".to_string(),
                    };
                    ui.label(egui::RichText::new(status).weak());

                    if let Some(msg) = &self.error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.error_message = None;
                        }
                    }
                });
            });

        // ------------------------------------------------------------------
        // 3. Central panel: inputs + plot
        // ------------------------------------------------------------------
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut generate = false;

            let data_response = ui.add(
                egui::TextEdit::singleline(&mut self.state.input_text)
                    .hint_text("Enter data list: e.g., boxplot(salary=[10,20,30,40], age=[15,25,35,45])")
                    .desired_width(f32::INFINITY),
            );
            if data_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                generate = true;
            }

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.x_label)
                        .hint_text("X-axis label")
                        .desired_width(ui.available_width() / 2.0 - 8.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.y_label)
                        .hint_text("Y-axis label")
                        .desired_width(f32::INFINITY),
                );
            });

            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Generate Plot").strong())
                    .clicked()
                {
                    generate = true;
                }

                let has_plot = self.state.plot.is_some();
                if ui
                    .add_enabled(has_plot, egui::Button::new("Save Plot"))
                    .on_hover_text("Save the figure as a PNG image")
                    .clicked()
                {
                    self.pending_screenshot = Some(PendingScreenshot::SaveFile);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(
                        egui::UserData::default(),
                    ));
                }
                if ui
                    .add_enabled(has_plot, egui::Button::new("Copy Image"))
                    .on_hover_text("Copy the figure to the clipboard")
                    .clicked()
                {
                    self.pending_screenshot = Some(PendingScreenshot::Clipboard);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(
                        egui::UserData::default(),
                    ));
                }
            });

            if generate {
                self.generate_plot();
            }

            ui.add_space(4.0);

            let theme = self.state.theme;
            let x_label = self.state.x_label.clone();
            let y_label = self.state.y_label.clone();
            let panel_height = ui.available_height();

            match self.state.plot.as_mut() {
                Some(plot) => {
                    plot_panel::show_plot_panel(
                        plot,
                        ui,
                        &theme,
                        &x_label,
                        &y_label,
                        panel_height,
                    );
                }
                None => {
                    ui.add_space(80.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Welcome to Boxplot Studio");
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(
                                "Type named value lists above, like salary=[10,20,30,40], then click \"Generate Plot\".",
                            )
                            .weak(),
                        );
                    });
                }
            }
        });

        // ------------------------------------------------------------------
        // 4. About window (hidden menu)
        // ------------------------------------------------------------------
        if self.show_about {
            egui::Window::new("About Boxplot Studio")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui.heading("Boxplot Studio");
                    ui.label(format!("Version: {VERSION}"));
                    ui.add_space(4.0);
                    ui.label("Box plots with summary statistics from typed-in data.");
                    ui.add_space(10.0);
                    ui.label("Features:");
                    ui.label("  \u{2022} Named datasets: name=[1,2,3]");
                    ui.label("  \u{2022} Mean, STD, quartiles, IQR and range");
                    ui.label("  \u{2022} Draggable statistics annotations");
                    ui.label("  \u{2022} PNG export and clipboard copy");
                    ui.add_space(10.0);
                    ui.label("Right-click the title for this menu.");
                });
        }
    }
}
