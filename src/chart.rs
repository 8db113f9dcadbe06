use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::simulation::LossHistory;

/// Logical surface height; width follows the host container.
pub const CHART_HEIGHT: f32 = 250.0;
/// Border between the surface edge and the plot area, all four sides.
pub const PADDING: f32 = 40.0;
/// The vertical axis never zooms in past this, so small early losses do not
/// fill the whole plot.
pub const LOSS_AXIS_FLOOR: f64 = 3.0;

const BACKGROUND: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb);
const AXIS: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const LABEL: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
const PLACEHOLDER: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
pub const GENERATOR_COLOR: Color32 = Color32::from_rgb(0x8b, 0x5c, 0xf6);
pub const DISCRIMINATOR_COLOR: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);

/// Largest loss across both series, floored at [`LOSS_AXIS_FLOOR`].
pub fn loss_axis_max(history: &LossHistory) -> f64 {
    history
        .generator
        .iter()
        .chain(history.discriminator.iter())
        .fold(LOSS_AXIS_FLOOR, |acc, &v| acc.max(v))
}

/// Maps one series into surface coordinates: index spreads across the plot
/// width, value scales against `max_loss` from the bottom edge. A series with
/// fewer than two points maps to nothing, one sample cannot be connected.
pub fn series_points(values: &[f64], max_loss: f64, rect: Rect) -> Vec<Pos2> {
    if values.len() < 2 {
        return Vec::new();
    }

    let plot_width = rect.width() - 2.0 * PADDING;
    let plot_height = rect.height() - 2.0 * PADDING;
    let bottom = rect.bottom() - PADDING;
    let step = plot_width / (values.len() - 1) as f32;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = rect.left() + PADDING + i as f32 * step;
            let y = bottom - (value / max_loss) as f32 * plot_height;
            Pos2::new(x, y)
        })
        .collect()
}

/// What fills the plot area once the axes are down: the "no data yet"
/// message, or the stroke-ready polylines (a series with fewer than two
/// points contributes none).
#[derive(Clone, Debug, PartialEq)]
pub enum PlotBody {
    Placeholder,
    Lines(Vec<(Vec<Pos2>, Color32)>),
}

pub fn plot_body(history: &LossHistory, rect: Rect) -> PlotBody {
    if history.is_empty() {
        return PlotBody::Placeholder;
    }

    let max_loss = loss_axis_max(history);
    let mut lines = Vec::new();
    for (values, color) in [
        (&history.generator, GENERATOR_COLOR),
        (&history.discriminator, DISCRIMINATOR_COLOR),
    ] {
        let points = series_points(values, max_loss, rect);
        if !points.is_empty() {
            lines.push((points, color));
        }
    }
    PlotBody::Lines(lines)
}

/// Full stateless redraw: background, axes, then either the placeholder (no
/// data yet) or both loss polylines plus the legend.
pub fn draw(painter: &Painter, rect: Rect, history: &LossHistory) {
    painter.rect_filled(rect, 4.0, BACKGROUND);

    let origin = Pos2::new(rect.left() + PADDING, rect.bottom() - PADDING);
    let axis_stroke = Stroke::new(2.0, AXIS);
    painter.line_segment(
        [Pos2::new(rect.left() + PADDING, rect.top() + PADDING), origin],
        axis_stroke,
    );
    painter.line_segment(
        [origin, Pos2::new(rect.right() - PADDING, rect.bottom() - PADDING)],
        axis_stroke,
    );

    let label_font = FontId::proportional(12.0);
    painter.text(
        Pos2::new(rect.left() + 5.0, rect.top() + 14.0),
        Align2::LEFT_CENTER,
        "Loss",
        label_font.clone(),
        LABEL,
    );
    painter.text(
        Pos2::new(rect.right() - 50.0, rect.bottom() - 10.0),
        Align2::LEFT_CENTER,
        "Epoch",
        label_font,
        LABEL,
    );

    match plot_body(history, rect) {
        PlotBody::Placeholder => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Start training to see loss curves",
                FontId::proportional(14.0),
                PLACEHOLDER,
            );
        }
        PlotBody::Lines(lines) => {
            for (points, color) in lines {
                painter.add(Shape::line(points, Stroke::new(3.0, color)));
            }
            draw_legend(painter, rect);
        }
    }
}

fn draw_legend(painter: &Painter, rect: Rect) {
    let font = FontId::proportional(11.0);
    for (row, (color, label)) in [
        (GENERATOR_COLOR, "Generator Loss"),
        (DISCRIMINATOR_COLOR, "Discriminator Loss"),
    ]
    .into_iter()
    .enumerate()
    {
        let top = rect.top() + 15.0 + row as f32 * 20.0;
        let swatch = Rect::from_min_size(
            Pos2::new(rect.right() - 180.0, top),
            eframe::egui::vec2(15.0, 15.0),
        );
        painter.rect_filled(swatch, 2.0, color);
        painter.text(
            Pos2::new(rect.right() - 160.0, top + 7.5),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            LABEL,
        );
    }
}
