use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::data::{self, CountryRow};

mod drag;
mod encode;
mod sim;
mod view;

use drag::DragController;
use encode::{ColorScale, SizeScale};
use sim::Simulation;

pub struct BubbleApp {
    csv_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<Vec<CountryRow>, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<CountryRow>, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    rows: Vec<CountryRow>,
    colors: ColorScale,
    sizes: SizeScale,
    /// Seeded on the first frame, once the chart rect is known.
    sim: Option<Simulation>,
    drag: DragController,
    drag_index: Option<usize>,
}

impl ViewModel {
    fn new(rows: Vec<CountryRow>) -> Self {
        Self {
            rows,
            colors: ColorScale::world(),
            sizes: SizeScale::population(),
            sim: None,
            drag: DragController::new(),
            drag_index: None,
        }
    }

    fn reseed(&mut self) {
        self.sim = None;
        self.drag = DragController::new();
        self.drag_index = None;
    }
}

impl BubbleApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, csv_path: String) -> Self {
        let state = Self::start_load(csv_path.clone());
        Self {
            csv_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(csv_path: String) -> Receiver<Result<Vec<CountryRow>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = data::load_rows(&csv_path)
                .map(data::filter_rows)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(csv_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(csv_path),
        }
    }
}

impl eframe::App for BubbleApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(rows) => AppState::Ready(Box::new(ViewModel::new(rows))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading population dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load population dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.csv_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                model.show(ctx, &self.csv_path, &mut reload_requested);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.csv_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(rows) => AppState::Ready(Box::new(ViewModel::new(rows))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
