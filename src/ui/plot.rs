use std::collections::BTreeMap;

use eframe::egui::{self, Align, FontId, Layout, RichText, Stroke, TextStyle, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Corner, GridMark, Legend, MarkerShape, Plot,
    PlotPoints, Points,
};

use crate::charts::{BoxSpec, ChartKind, ChartSpec, ScatterSpec, StackedBarSpec};
use crate::style::{ChartLayout, LayoutTemplate, TitleAlign};

/// Hover distance (in data units) for the scatter tooltip.
const HOVER_RADIUS: f64 = 0.02;

// ---------------------------------------------------------------------------
// Chart frame (central panel)
// ---------------------------------------------------------------------------

/// Draw one chart spec: styled frame, title, legend title and plot.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    let layout = &spec.layout;
    let t = &layout.template;

    egui::Frame::default()
        .fill(t.paper_background)
        .inner_margin(egui::Margin {
            left: t.margins.left as _,
            right: t.margins.right as _,
            top: t.margins.top as _,
            bottom: t.margins.bottom as _,
        })
        .show(ui, |ui: &mut Ui| {
            apply_template(ui, t);
            title(ui, layout);

            ui.horizontal(|ui: &mut Ui| {
                if spec.is_empty() {
                    ui.label("No tracks match the current selection.");
                }
                if let Some(legend_title) = &layout.legend_title {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                        ui.strong(legend_title);
                    });
                }
            });

            let plot = base_plot(layout);
            match &spec.kind {
                ChartKind::StackedBar(bars) => stacked_bars(ui, plot, bars),
                ChartKind::Box(boxes) => box_plot(ui, plot, boxes),
                ChartKind::Scatter(scatter) => scatter_plot(ui, plot, scatter),
            }
        });
}

fn apply_template(ui: &mut Ui, t: &LayoutTemplate) {
    let style = ui.style_mut();
    for text_style in [TextStyle::Body, TextStyle::Button] {
        style
            .text_styles
            .insert(text_style, FontId::proportional(t.font_size));
    }
    style.visuals.override_text_color = Some(t.font_color);
    style.visuals.extreme_bg_color = t.plot_background;
}

fn title(ui: &mut Ui, layout: &ChartLayout) {
    let t = &layout.template;
    let text = RichText::new(&layout.title)
        .size(t.title_size)
        .color(t.title_color)
        .strong();
    match layout.title_align {
        TitleAlign::Center => {
            ui.vertical_centered(|ui: &mut Ui| ui.label(text));
        }
        TitleAlign::Left(inset) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.add_space(ui.available_width() * inset);
                ui.label(text);
            });
        }
    }
}

fn base_plot<'a>(layout: &ChartLayout) -> Plot<'a> {
    Plot::new(layout.title.as_str())
        .legend(
            Legend::default()
                .position(Corner::RightTop)
                .text_style(TextStyle::Body),
        )
        .x_axis_label(layout.x_title.as_str())
        .y_axis_label(layout.y_title.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

/// Axis formatter for categorical x values placed at 0, 1, 2, ...
fn category_label(labels: &[String], mark: GridMark) -> String {
    let idx = mark.value.round();
    if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Per-kind rendering
// ---------------------------------------------------------------------------

fn stacked_bars(ui: &mut Ui, plot: Plot<'_>, spec: &StackedBarSpec) {
    let mut layers: Vec<BarChart> = Vec::with_capacity(spec.series.len());
    for series in &spec.series {
        let bars: Vec<Bar> = series
            .values
            .iter()
            .zip(&spec.categories)
            .enumerate()
            .map(|(i, (&count, genre))| {
                Bar::new(i as f64, count)
                    .name(format!("{genre} · {}", series.sentiment))
                    .fill(series.color)
            })
            .collect();
        let below: Vec<&BarChart> = layers.iter().collect();
        let layer = BarChart::new(bars)
            .name(series.sentiment.label())
            .color(series.color)
            .width(0.7)
            .stack_on(&below);
        layers.push(layer);
    }

    let categories = spec.categories.clone();
    plot.x_axis_formatter(move |mark, _range| category_label(&categories, mark))
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(spec.categories.len() as f64 - 0.5)
        .show(ui, |plot_ui| {
            for layer in layers {
                plot_ui.bar_chart(layer);
            }
        });
}

fn box_plot(ui: &mut Ui, plot: Plot<'_>, spec: &BoxSpec) {
    let labels: Vec<String> = spec
        .groups
        .iter()
        .map(|g| g.sentiment.label().to_string())
        .collect();
    let feature = spec.feature.title();

    plot.x_axis_formatter(move |mark, _range| category_label(&labels, mark))
        .label_formatter(move |name, value| format!("{name}\n{feature}: {:.3}", value.y))
        .include_x(-0.5)
        .include_x(spec.groups.len() as f64 - 0.5)
        .show(ui, |plot_ui| {
            for (i, group) in spec.groups.iter().enumerate() {
                let x = i as f64;
                let s = &group.stats;
                let label = group.sentiment.label();
                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(format!("{label} · n={}", s.count))
                .fill(group.fill)
                .stroke(Stroke::new(1.5, group.color))
                .box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label).color(group.color));

                if !s.outliers.is_empty() {
                    let points: PlotPoints = s.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(label)
                            .color(group.color)
                            .shape(MarkerShape::Circle)
                            .radius(2.5),
                    );
                }
            }
        });
}

fn scatter_plot<'a>(ui: &mut Ui, plot: Plot<'a>, spec: &'a ScatterSpec) {
    let x_title = spec.x_feature.title();
    let y_title = spec.y_feature.title();

    plot.label_formatter(move |name, value| match spec.nearest(value.x, value.y, HOVER_RADIUS) {
        Some(p) => format!(
            "{}\n{}\n{x_title}: {:.3}\n{y_title}: {:.3}\nPopularity: {}",
            p.track_name, p.artists, p.x, p.y, p.popularity
        ),
        None if name.is_empty() => format!("{x_title}: {:.3}\n{y_title}: {:.3}", value.x, value.y),
        None => format!("{name}\n{x_title}: {:.3}\n{y_title}: {:.3}", value.x, value.y),
    })
    .show(ui, |plot_ui| {
        for series in &spec.series {
            // One Points item per marker size; egui_plot radius is per item.
            let mut by_size: BTreeMap<u32, Vec<[f64; 2]>> = BTreeMap::new();
            for p in &series.points {
                let key = (p.radius * 2.0).round() as u32;
                by_size.entry(key).or_default().push([p.x, p.y]);
            }
            for (key, coords) in by_size {
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(series.sentiment.label())
                        .color(series.color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(key as f32 / 2.0),
                );
            }
        }
    });
}
