use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use freeflyer_sim::dynamics::kinematics;
use freeflyer_sim::sim::{self, SimOutcome};
use freeflyer_sim::types::{Scenario, SimConfig};
use freeflyer_sim::vehicle::presets;

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let scenario = presets::reach_target();
    let config = SimConfig::default();
    let outcome = match sim::simulate(&scenario, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let app = SimViz { outcome, scenario };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Free-Flyer Manipulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    outcome: SimOutcome,
    scenario: Scenario,
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let history = &self.outcome.history;
        let arm = self.scenario.spacecraft.arm;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.scenario.name));
            ui.label(format!(
                "Status: {}  |  Steps: {}  |  Final error: {:.4} m  |  Best error: {:.4} m",
                self.outcome.termination.label(),
                self.outcome.steps,
                self.outcome.final_error().unwrap_or(f64::NAN),
                self.outcome.min_error().unwrap_or(f64::NAN),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Tip error vs Time
                ui.vertical(|ui| {
                    ui.label("End-effector error (m)");
                    let points: PlotPoints = history.iter()
                        .map(|r| [r.time, r.end_effector_error.norm()])
                        .collect();
                    Plot::new("error")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Error", points));
                        });
                });

                // Joint angles vs Time
                ui.vertical(|ui| {
                    ui.label("Joint angles (deg)");
                    let q1: PlotPoints = history.iter()
                        .map(|r| [r.time, r.state.q.x.to_degrees()])
                        .collect();
                    let q2: PlotPoints = history.iter()
                        .map(|r| [r.time, r.state.q.y.to_degrees()])
                        .collect();
                    Plot::new("joints")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("q1", q1));
                            plot_ui.line(Line::new("q2", q2));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Base attitude vs Time
                ui.vertical(|ui| {
                    ui.label("Base attitude (deg)");
                    let points: PlotPoints = history.iter()
                        .map(|r| [r.time, r.state.phi.to_degrees()])
                        .collect();
                    Plot::new("attitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("phi", points));
                        });
                });

                // Base and tip paths
                ui.vertical(|ui| {
                    ui.label("Paths (m)");
                    let base: PlotPoints = history.iter()
                        .map(|r| [r.state.pos.x, r.state.pos.y])
                        .collect();
                    let tip: PlotPoints = history.iter()
                        .map(|r| {
                            let s = &r.state;
                            let p = kinematics::forward(&s.pos, s.phi, &s.q, &arm).end_effector;
                            [p.x, p.y]
                        })
                        .collect();
                    let target = [self.scenario.target.x, self.scenario.target.y];
                    Plot::new("paths")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("x (m)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Base", base));
                            plot_ui.line(Line::new("End-effector", tip));
                            plot_ui.points(Points::new("Target", vec![target]).radius(4.0));
                        });
                });
            });
        });
    }
}
