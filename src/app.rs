//! Application state and egui frontend.

use std::path::Path;

use eframe::egui;
use image::DynamicImage;
use log::{error, info};

use crate::grid::{GridDims, GridRect, ResizeHandle};
use crate::image_util::{self, SUPPORTED_EXTENSIONS};
use crate::scale::ScaleMapper;
use crate::slicer::{self, NamingScheme, SliceJob};

const CANVAS_PADDING: f32 = 20.0;

const INSTRUCTIONS: &str = "\
• Load an image to start
• Drag the grid to reposition
• Drag corners/edges to resize
• Adjust rows/columns as needed
• Set cell dimensions manually
• Use aspect ratio for proportional cells
• Customize filename prefix for output
• Save to slice the image";

pub struct SpriteCutterApp {
    image: Option<DynamicImage>,
    texture: Option<egui::TextureHandle>,
    grid: GridRect,
    grid_needs_init: bool,
    dims: GridDims,
    // Cell size in display pixels, kept in sync with the grid rect.
    cell_width: u32,
    cell_height: u32,
    maintain_aspect: bool,
    aspect_ratio: f32,
    prefix: String,
    naming: NamingScheme,
    drag_handle: Option<ResizeHandle>,
    mapper: ScaleMapper,
}

impl Default for SpriteCutterApp {
    fn default() -> Self {
        Self {
            image: None,
            texture: None,
            grid: GridRect::default(),
            grid_needs_init: false,
            dims: GridDims::default(),
            cell_width: 100,
            cell_height: 100,
            maintain_aspect: false,
            aspect_ratio: 1.0,
            prefix: slicer::DEFAULT_PREFIX.to_owned(),
            naming: NamingScheme::default(),
            drag_handle: None,
            mapper: ScaleMapper::default(),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn show_message(level: rfd::MessageLevel, title: &str, text: String) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .show();
}

impl SpriteCutterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn load_image_from_path(&mut self, ctx: &egui::Context, path: &Path) {
        match image_util::load_image(path) {
            Ok(image) => {
                info!(
                    "loaded {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                if let Some(stem) = slicer::prefix_for_loaded_file(&self.prefix, path) {
                    self.prefix = stem;
                }
                self.image = Some(image);
                self.load_texture(ctx);
                self.drag_handle = None;
                self.grid_needs_init = true;
                show_message(
                    rfd::MessageLevel::Info,
                    "Success",
                    "Image loaded successfully!".to_owned(),
                );
            }
            Err(err) => {
                error!("loading {} failed: {err}", path.display());
                show_message(
                    rfd::MessageLevel::Error,
                    "Error",
                    format!("Failed to load image: {err}"),
                );
            }
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        if let Some(image) = &self.image {
            let size = [image.width() as _, image.height() as _];
            let image_buffer = image.to_rgba8();
            let pixels = image_buffer.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture =
                Some(ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.dropped_files.is_empty()) {
            return;
        }
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.first().and_then(|f| f.path.clone()) {
            self.load_image_from_path(ctx, &path);
        }
    }

    fn update_cell_dims_from_grid(&mut self) {
        self.cell_width = (self.grid.width / self.dims.cols as f32) as u32;
        self.cell_height = (self.grid.height / self.dims.rows as f32) as u32;
        if self.cell_width > 0 {
            self.aspect_ratio = round2(self.cell_height as f32 / self.cell_width as f32);
        }
    }

    fn apply_grid_size_from_cells(&mut self) {
        self.grid.width = (self.cell_width * self.dims.cols) as f32;
        self.grid.height = (self.cell_height * self.dims.rows) as f32;
        if self.maintain_aspect && self.cell_width > 0 {
            self.aspect_ratio = round2(self.cell_height as f32 / self.cell_width as f32);
        }
    }

    fn apply_aspect_to_grid(&mut self) {
        if !self.maintain_aspect {
            return;
        }
        self.cell_height = (self.cell_width as f32 * self.aspect_ratio) as u32;
        self.grid.width = (self.cell_width * self.dims.cols) as f32;
        self.grid.height = (self.cell_height * self.dims.rows) as f32;
    }

    /// Grid rect mapped into source pixels, with coordinates that fell
    /// left of or above the image clamped to its edge.
    fn slice_job(&self) -> SliceJob {
        SliceJob {
            x: self.mapper.to_source(self.grid.x).max(0.0) as u32,
            y: self.mapper.to_source(self.grid.y).max(0.0) as u32,
            width: self.mapper.to_source(self.grid.width) as u32,
            height: self.mapper.to_source(self.grid.height) as u32,
            rows: self.dims.rows,
            cols: self.dims.cols,
        }
    }

    fn save_sliced_images(&self) {
        let Some(image) = &self.image else {
            show_message(
                rfd::MessageLevel::Warning,
                "Warning",
                "Please load an image first!".to_owned(),
            );
            return;
        };

        // Cancelling the folder dialog is not an error.
        let Some(out_dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let job = self.slice_job();
        let prefix = slicer::resolve_prefix(&self.prefix);

        match slicer::save_cells(image, &job, self.naming, prefix, &out_dir) {
            Ok(saved) => {
                info!("saved {saved} slices to {}", out_dir.display());
                let example = match self.naming {
                    NamingScheme::RowCol => {
                        format!("{prefix}_r00_c00.png, {prefix}_r00_c01.png, etc.")
                    }
                    NamingScheme::Sequential => {
                        let digits = slicer::index_digits(job.rows * job.cols);
                        format!(
                            "{prefix}_{:0digits$}.png, {prefix}_{:0digits$}.png, etc.",
                            1, 2
                        )
                    }
                };
                show_message(
                    rfd::MessageLevel::Info,
                    "Success",
                    format!(
                        "Saved {saved} images to:\n{}\n\nFiles named: {example}",
                        out_dir.display()
                    ),
                );
            }
            Err(err) => {
                error!("saving slices failed: {err}");
                show_message(
                    rfd::MessageLevel::Error,
                    "Error",
                    format!("Failed to save images: {err}"),
                );
            }
        }
    }

    fn grid_info_text(&self) -> String {
        let Some(image) = &self.image else {
            return "No image loaded".to_owned();
        };
        let job = self.slice_job();
        let (cell_w, cell_h) = job.cell_size();
        format!(
            "Image: {}×{}\nGrid: {},{} ({}×{})\nCells: {}×{} ({}×{} each)\nTotal sprites: {}",
            image.width(),
            image.height(),
            job.x,
            job.y,
            job.width,
            job.height,
            self.dims.rows,
            self.dims.cols,
            cell_w,
            cell_h,
            self.dims.total(),
        )
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("File Operations");
        if ui.button("Load Image").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Image", SUPPORTED_EXTENSIONS)
                .pick_file()
            {
                self.load_image_from_path(ctx, &path);
            }
        }

        ui.horizontal(|ui| {
            ui.label("Filename prefix:");
            ui.text_edit_singleline(&mut self.prefix);
        });
        ui.label(
            egui::RichText::new("(custom name for saved files)")
                .weak()
                .small(),
        );

        ui.label("File naming:");
        ui.radio_value(
            &mut self.naming,
            NamingScheme::RowCol,
            "Row & column (prefix_r00_c00.png)",
        );
        ui.radio_value(
            &mut self.naming,
            NamingScheme::Sequential,
            "Sequential number (prefix_001.png)",
        );

        if ui.button("Save Sliced Images").clicked() {
            self.save_sliced_images();
        }

        ui.separator();
        ui.heading("Grid Settings");

        let mut dims_changed = false;
        ui.horizontal(|ui| {
            ui.label("Rows:");
            dims_changed |= ui
                .add(egui::DragValue::new(&mut self.dims.rows).range(1..=50))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.label("Columns:");
            dims_changed |= ui
                .add(egui::DragValue::new(&mut self.dims.cols).range(1..=50))
                .changed();
        });
        if dims_changed {
            if self.maintain_aspect {
                self.apply_aspect_to_grid();
            } else {
                self.update_cell_dims_from_grid();
            }
        }

        ui.separator();

        let mut cells_changed = false;
        ui.horizontal(|ui| {
            ui.label("Cell width:");
            cells_changed |= ui
                .add(egui::DragValue::new(&mut self.cell_width).range(1..=1000))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.label("Cell height:");
            cells_changed |= ui
                .add(egui::DragValue::new(&mut self.cell_height).range(1..=1000))
                .changed();
        });
        if cells_changed {
            self.apply_grid_size_from_cells();
        }

        ui.separator();

        if ui
            .checkbox(&mut self.maintain_aspect, "Maintain aspect ratio")
            .changed()
            && self.maintain_aspect
            && self.cell_width > 0
        {
            self.aspect_ratio = round2(self.cell_height as f32 / self.cell_width as f32);
        }
        ui.horizontal(|ui| {
            ui.label("Aspect ratio:");
            if ui
                .add(
                    egui::DragValue::new(&mut self.aspect_ratio)
                        .speed(0.1)
                        .range(0.1..=10.0),
                )
                .changed()
            {
                self.apply_aspect_to_grid();
            }
        });

        ui.separator();
        ui.heading("Grid Info");
        ui.label(self.grid_info_text());

        ui.separator();
        ui.heading("Instructions");
        ui.label(egui::RichText::new(INSTRUCTIONS).weak());
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(texture) = self.texture.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Load an image to start").weak());
            });
            return;
        };

        let available = ui.available_size();
        let max_size = available - egui::vec2(CANVAS_PADDING * 2.0, CANVAS_PADDING * 2.0);
        let image_size = texture.size_vec2();

        let mapper = ScaleMapper::fit(max_size.x, max_size.y, image_size.x, image_size.y);
        let display_size = egui::vec2(
            mapper.to_display(image_size.x),
            mapper.to_display(image_size.y),
        );

        if self.grid_needs_init {
            self.grid = GridRect::initial_for_display(display_size.x, display_size.y);
            self.update_cell_dims_from_grid();
            self.grid_needs_init = false;
        } else if self.mapper.scale() > 0.0
            && (mapper.scale() - self.mapper.scale()).abs() > f32::EPSILON
        {
            // Window resize changed the fit scale; keep the grid over the
            // same part of the image.
            self.grid.rescale(mapper.scale() / self.mapper.scale());
            self.update_cell_dims_from_grid();
        }
        self.mapper = mapper;

        let total_display_size = display_size + egui::vec2(CANVAS_PADDING * 2.0, CANVAS_PADDING * 2.0);

        let x_offset = (available.x - total_display_size.x) / 2.0;
        let y_offset = (available.y - total_display_size.y) / 2.0;
        let start_pos = ui.cursor().min + egui::vec2(x_offset.max(0.0), y_offset.max(0.0));

        let target_rect = egui::Rect::from_min_size(start_pos, total_display_size);

        let response = ui.allocate_rect(target_rect, egui::Sense::drag());
        let painter = ui.painter_at(target_rect);

        let image_rect = egui::Rect::from_min_size(
            target_rect.min + egui::vec2(CANVAS_PADDING, CANVAS_PADDING),
            display_size,
        );
        let origin = image_rect.min;

        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.drag_handle = self.grid.hit_test(pos - origin.to_vec2());
            }
        }

        if response.dragged() {
            if let Some(handle) = self.drag_handle {
                let delta = response.drag_delta();
                match handle {
                    ResizeHandle::Center => {
                        self.grid.translate_clamped(
                            delta.x,
                            delta.y,
                            display_size.x,
                            display_size.y,
                        );
                    }
                    _ => {
                        self.grid.resize(handle, delta.x, delta.y);
                        if self.maintain_aspect {
                            self.grid
                                .apply_aspect_lock(handle, delta.x, delta.y, self.aspect_ratio);
                        }
                        self.update_cell_dims_from_grid();
                    }
                }
            }
        }

        if response.drag_stopped() {
            self.drag_handle = None;
        }

        let cursor_handle = self.drag_handle.or_else(|| {
            response
                .hover_pos()
                .and_then(|pos| self.grid.hit_test(pos - origin.to_vec2()))
        });
        if let Some(handle) = cursor_handle {
            ctx.set_cursor_icon(handle.cursor_icon());
        }

        self.draw_grid(&painter, origin);
    }

    fn draw_grid(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let screen_grid = self.grid.to_rect().translate(origin.to_vec2());

        painter.rect_stroke(screen_grid, 0.0, egui::Stroke::new(2.0, egui::Color32::RED));

        let line_stroke = egui::Stroke::new(1.0, egui::Color32::RED);
        for col in 1..self.dims.cols {
            let x = origin.x + self.grid.cell_rect(0, col, self.dims).min.x;
            painter.line_segment(
                [
                    egui::pos2(x, screen_grid.min.y),
                    egui::pos2(x, screen_grid.max.y),
                ],
                line_stroke,
            );
        }
        for row in 1..self.dims.rows {
            let y = origin.y + self.grid.cell_rect(row, 0, self.dims).min.y;
            painter.line_segment(
                [
                    egui::pos2(screen_grid.min.x, y),
                    egui::pos2(screen_grid.max.x, y),
                ],
                line_stroke,
            );
        }

        let handle_radius = 6.0;
        let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
        let handle_fill = egui::Color32::WHITE;

        let handles = [
            screen_grid.min,
            screen_grid.max,
            egui::pos2(screen_grid.min.x, screen_grid.max.y),
            egui::pos2(screen_grid.max.x, screen_grid.min.y),
            screen_grid.center_top(),
            screen_grid.center_bottom(),
            screen_grid.left_center(),
            screen_grid.right_center(),
        ];

        for pos in handles {
            painter.circle(pos, handle_radius, handle_fill, handle_stroke);
        }
    }
}

impl eframe::App for SpriteCutterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::SidePanel::left("control_panel")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.controls_ui(ui, ctx));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.canvas_ui(ui, ctx));
    }
}
