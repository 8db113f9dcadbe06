use std::time::Instant;

use eframe::egui::{self, Color32, RichText};

use crate::chart;
use crate::samples::SampleStrip;
use crate::simulation::{EntropySource, TickTimer, TrainingSimulation};
use crate::types::{Dataset, Hyperparams, RunStatus};

/// Blurbs for the architecture explainer, one per pipeline stage:
/// (title, description, technical note).
const COMPONENT_NOTES: [(&str, &str, &str); 5] = [
    (
        "Random Noise Vector (z)",
        "A random vector sampled from a latent space, usually a Gaussian \
         distribution. This noise is the generator's only input and determines \
         which image gets created. Its dimension typically ranges from 50 to 200.",
        "z ~ N(0, 1) where z \u{2208} R\u{207f}, n is the noise dimension",
    ),
    (
        "Generator Network (G)",
        "A deep network that learns to map noise vectors to realistic images, \
         upsampling with transposed convolutions from low-dimensional noise to \
         high-dimensional images.",
        "G: Z \u{2192} X. Architecture: Dense \u{2192} Reshape \u{2192} Conv2DTranspose layers",
    ),
    (
        "Generated (Fake) Image",
        "The generator's output. It starts as random noise and grows \
         increasingly realistic as training progresses, aiming to fool the \
         discriminator.",
        "G(z) produces images in [-1, 1] (tanh activation)",
    ),
    (
        "Discriminator Network (D)",
        "A binary classifier that distinguishes real dataset images from \
         generated ones, acting as the critic whose feedback improves the \
         generator.",
        "D: X \u{2192} [0, 1], probability of the input being real. Binary cross-entropy loss.",
    ),
    (
        "Classification Output",
        "The discriminator's prediction between 0 (definitely fake) and 1 \
         (definitely real). The generator pushes this up for its images while \
         the discriminator pushes it toward the truth.",
        "Real images: D(x) \u{2192} 1. Fake images: D(G(z)) \u{2192} 0",
    ),
];

pub struct GanLabApp {
    sim: TrainingSimulation<EntropySource>,
    params: Hyperparams,
    dataset: Dataset,
    samples: SampleStrip,
    timer: TickTimer,
    sample_source: EntropySource,
}

impl GanLabApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            sim: TrainingSimulation::new(EntropySource::new()),
            params: Hyperparams::default(),
            dataset: Dataset::Digits,
            samples: SampleStrip::default(),
            timer: TickTimer::default(),
            sample_source: EntropySource::new(),
        }
    }

    fn toggle_training(&mut self) {
        match self.sim.status() {
            RunStatus::Training => {
                self.timer.clear();
                self.sim.pause();
            }
            RunStatus::Ready | RunStatus::Paused => {
                self.sim.start();
                self.timer.arm(Instant::now());
            }
            RunStatus::Complete => {}
        }
    }

    fn reset_run(&mut self) {
        self.timer.clear();
        self.sim.reset();
        self.samples.clear();
    }

    fn generate_sample(&mut self) {
        let quality = self.sim.quality_fraction();
        self.samples
            .generate(self.dataset, quality, &mut self.sample_source);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (space, reset, generate) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::G),
            )
        });
        if space {
            self.toggle_training();
        }
        if reset {
            self.reset_run();
        }
        if generate {
            self.generate_sample();
        }
    }

    fn status_color(status: RunStatus) -> Color32 {
        match status {
            RunStatus::Ready => Color32::from_rgb(0x05, 0x96, 0x69),
            RunStatus::Training => Color32::from_rgb(0xdc, 0x26, 0x26),
            RunStatus::Paused => Color32::from_rgb(0xd9, 0x77, 0x06),
            RunStatus::Complete => Color32::from_rgb(0x05, 0x96, 0x69),
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Training Controls");

        let previous_dataset = self.dataset;
        egui::ComboBox::from_label("dataset")
            .selected_text(self.dataset.label())
            .show_ui(ui, |ui| {
                for dataset in [Dataset::Digits, Dataset::Fashion] {
                    ui.selectable_value(&mut self.dataset, dataset, dataset.label());
                }
            });
        if self.dataset != previous_dataset {
            // Switching datasets mid-run would splice unrelated curves.
            self.reset_run();
        }

        ui.add(
            egui::Slider::new(&mut self.params.learning_rate, 0.00005..=0.001)
                .logarithmic(true)
                .custom_formatter(|v, _| format!("{v:.5}"))
                .text("learning rate"),
        );
        ui.add(egui::Slider::new(&mut self.params.noise_dimension, 50..=200).text("noise dimension"));

        ui.separator();

        let toggle_label = match self.sim.status() {
            RunStatus::Ready => "Start training",
            RunStatus::Training => "Pause training",
            RunStatus::Paused => "Resume training",
            RunStatus::Complete => "Training complete \u{2713}",
        };
        let toggle_enabled = self.sim.status() != RunStatus::Complete;

        ui.horizontal(|ui| {
            if ui
                .add_enabled(toggle_enabled, egui::Button::new(toggle_label))
                .clicked()
            {
                self.toggle_training();
            }
            if ui.button("Reset").clicked() {
                self.reset_run();
            }
        });
        if ui.button("Generate sample").clicked() {
            self.generate_sample();
        }

        ui.add_space(4.0);
        ui.small("Space: start/pause   R: reset   G: generate sample");

        ui.separator();
        ui.heading("How a GAN Fits Together");
        for (title, description, technical) in COMPONENT_NOTES {
            egui::CollapsingHeader::new(title).show(ui, |ui| {
                ui.label(description);
                ui.add_space(2.0);
                ui.label(RichText::new(technical).monospace().size(11.0));
            });
        }
    }

    fn draw_metrics(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.colored_label(
                Self::status_color(self.sim.status()),
                format!("\u{25cf} {}", self.sim.status().label()),
            );
            ui.separator();
            ui.label(format!("epoch: {}", self.sim.epoch()));
            ui.separator();
            ui.label(format!("G loss: {:.2}", self.sim.generator_loss()));
            ui.separator();
            ui.label(format!("D loss: {:.2}", self.sim.discriminator_loss()));
            ui.separator();
            ui.label(format!("quality: {}%", self.sim.quality_score()));
        });
    }

    fn draw_chart(&self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), chart::CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        chart::draw(&painter, response.rect, self.sim.history());
    }

    fn draw_samples(&self, ui: &mut egui::Ui) {
        ui.heading("Generated Samples");
        if self.samples.is_empty() {
            ui.label(
                RichText::new("Samples appear every five epochs once training starts")
                    .color(Color32::from_rgb(0x9c, 0xa3, 0xaf))
                    .italics(),
            );
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for glyph in self.samples.glyphs() {
                ui.label(RichText::new(glyph).size(32.0));
            }
        });
    }
}

impl eframe::App for GanLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        if self.sim.is_training() && self.timer.due(Instant::now()) {
            let outcome = self.sim.tick(&self.params);
            if outcome.sample_due {
                self.generate_sample();
            }
            if outcome.completed {
                self.timer.clear();
            }
        }

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.draw_controls(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_metrics(ui);
            ui.separator();
            self.draw_chart(ui);
            ui.separator();
            self.draw_samples(ui);
        });

        if self.sim.is_training() {
            ctx.request_repaint_after(self.timer.remaining(Instant::now()));
        }
    }
}
