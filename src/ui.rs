// src/ui.rs
use egui;

pub struct OverlayStats {
    pub mesh_kind: &'static str,
    pub pieces: usize,
    pub phase: &'static str,
    pub cycles: u32,
}

pub fn build_ui(ctx: &egui::Context, stats: &OverlayStats) {
    egui::Window::new("Breathing Polygons")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label(format!("Mesh: {}", stats.mesh_kind));
                ui.label(format!("Pieces: {}", stats.pieces));
                ui.separator();
                ui.label(format!("Phase: {}", stats.phase));
                ui.label(format!("Cycles: {}", stats.cycles));
            });
        });
}
