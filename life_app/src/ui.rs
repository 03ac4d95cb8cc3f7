// ui.rs - egui front end: controls, painted grid, population readout

use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use tokio::runtime::Runtime;

use conway_life::{Config, Grid, PATTERNS, Simulation};

const SPACING: f32 = 0.5;             // Gap between painted cells
const CHROME_WIDTH: f32 = 40.0;
const CHROME_HEIGHT: f32 = 220.0;     // Controls above and statistics below the grid

pub struct LifeApp {
    simulation: Simulation,
    // Hosts the step task; declared after `simulation` so it is dropped last
    _runtime: Runtime,
    cell_size: f32,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

/// Window size that shows the whole grid at the configured cell size.
pub fn window_size(config: &Config) -> [f32; 2] {
    let pitch = config.cell_size + SPACING;
    [
        config.dimensions.cols as f32 * pitch + CHROME_WIDTH,
        config.dimensions.rows as f32 * pitch + CHROME_HEIGHT,
    ]
}

impl LifeApp {
    pub fn new(simulation: Simulation, runtime: Runtime, config: &Config) -> Self {
        Self {
            simulation,
            _runtime: runtime,
            cell_size: config.cell_size,
            live_color: Color32::BLACK,
            dead_color: Color32::from_rgb(0xC9, 0xDA, 0xF8),
            selected_pattern: 0,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, generation: u64) {
        ui.horizontal(|ui| {
            let button_text = if self.simulation.is_running() { "⏸ Stop simulation" } else { "▶ Start simulation" };
            if ui.button(button_text).clicked() {
                self.simulation.toggle_running();
            }

            if ui.button("⏹ Empty Grid").clicked() {
                self.simulation.reset_empty();
            }

            if ui.button("🎲 Random Grid").clicked() {
                self.simulation.reset_random();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                if let Err(err) = self.simulation.apply_pattern(&PATTERNS[self.selected_pattern]) {
                    log::warn!("{}", err);
                }
            }

            ui.separator();

            ui.label(format!("Generation: {}", generation));
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui, grid: &Grid) {
        let pitch = self.cell_size + SPACING;
        let total_size = Vec2::new(
            pitch * grid.cols() as f32 - SPACING,
            pitch * grid.rows() as f32 - SPACING,
        );

        let (response, painter) = ui.allocate_painter(total_size, Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::from_gray(60));

        for (row, cells) in grid.rows_iter().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                let min = origin + Vec2::new(col as f32 * pitch, row as f32 * pitch);
                let rect = Rect::from_min_size(min, Vec2::splat(self.cell_size));
                let color = if alive { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        if response.clicked() {
            if let Some((row, col)) = response.interact_pointer_pos().and_then(|pos| cell_at(origin, pos, pitch)) {
                if let Err(err) = self.simulation.toggle_cell(row, col) {
                    log::warn!("ignoring cell toggle: {}", err);
                }
            }
        }
    }
}

fn cell_at(origin: Pos2, pos: Pos2, pitch: f32) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    Some(((offset.y / pitch) as usize, (offset.x / pitch) as usize))
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.simulation.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui, snapshot.generation);

            ui.separator();
            ui.label("Click cells to toggle them alive/dead.");
            ui.separator();

            self.board(ui, &snapshot.grid);

            ui.separator();

            let total = snapshot.grid.dimensions().area();
            let live_cells = snapshot.grid.live_count();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
            });
        });

        // Pick up generations published by the step task
        if self.simulation.is_running() {
            ctx.request_repaint_after(self.simulation.step_delay());
        }
    }
}
