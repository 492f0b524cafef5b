use eframe::egui::{self, Align, Color32, Context, Layout, Pos2, Sense, Ui, vec2};

use crate::data::MIN_POPULATION;
use crate::util::format_population;

use super::sim::{Node, Simulation};
use super::ViewModel;

const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 248);
const FILL_ALPHA: u8 = 204;

fn with_fill_alpha(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), FILL_ALPHA)
}

/// Nearest bubble under the pointer, if any.
fn hovered_index(nodes: &[Node], origin: Pos2, pointer: Option<Pos2>) -> Option<(usize, f32)> {
    let pointer = pointer?;
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let center = origin + node.position;
            let distance = center.distance(pointer);
            if distance <= node.radius {
                Some((index, distance))
            } else {
                None
            }
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, csv_path: &str, reload_requested: &mut bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("world-bubbles");
                    ui.separator();
                    ui.label(format!("dataset: {csv_path}"));
                    let count = self.sim.as_ref().map_or(self.rows.len(), Simulation::len);
                    ui.label(format!("countries: {count}"));
                    if ui.button("Reload data").clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Re-run layout").clicked() {
                        self.reseed();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(sim) = &self.sim {
                            if sim.is_idle() {
                                ui.label("layout: settled");
                            } else {
                                ui.label(format!("layout: settling ({:.3})", sim.energy()));
                            }
                        }
                    });
                });
                ui.horizontal(|ui| {
                    ui.label("continents:");
                    for (name, color) in self.colors.entries() {
                        let (dot, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::HOVER);
                        ui.painter().circle_filled(dot.center(), 5.0, color);
                        ui.label(name);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_chart(ui));
    }

    fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, BACKGROUND);

        let sim = self.sim.get_or_insert_with(|| {
            Simulation::seed(
                &self.rows,
                &self.colors,
                &self.sizes,
                rect.width(),
                rect.height(),
            )
        });

        if sim.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!(
                    "No countries above {} inhabitants.",
                    format_population(MIN_POPULATION)
                ),
                egui::FontId::proportional(16.0),
                ui.visuals().text_color(),
            );
            return;
        }

        let origin = rect.min;
        let hover_pos = ui.input(|input| input.pointer.hover_pos());
        let hovered = hovered_index(sim.nodes(), origin, hover_pos);

        // Gesture wiring: hit-test against last frame's positions, then
        // let the simulation relax around the pinned bubble.
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some((index, _)) = hovered
        {
            self.drag.drag_started(sim, index, pointer - origin);
            self.drag_index = Some(index);
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(index) = self.drag_index
        {
            self.drag.drag_moved(sim, index, pointer - origin);
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && let Some(index) = self.drag_index.take()
        {
            self.drag.drag_ended(sim, index);
        }

        let moving = sim.step();
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        // Insertion order doubles as z-order, matching the dataset order.
        for node in sim.nodes() {
            painter.circle_filled(origin + node.position, node.radius, with_fill_alpha(node.fill));
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if let Some((index, _)) = hovered {
            let node = &sim.nodes()[index];
            let label = node.label.clone();
            let inhabitants = format_population(node.value);
            response.on_hover_ui(|ui| {
                ui.strong(label);
                ui.label(format!("{inhabitants} inhabitants"));
            });
        }
    }
}
