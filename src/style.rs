use std::str::FromStr;
use std::sync::OnceLock;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

use crate::data::model::Sentiment;

// ---------------------------------------------------------------------------
// Hex → Color32
// ---------------------------------------------------------------------------

/// Parse `#rrggbb`, falling back to `fallback` on malformed input.
pub fn hex_color(hex: &str, fallback: Color32) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour {hex:?}: {e}");
            fallback
        }
    }
}

/// A lighter shade of `color`, used for box fills.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb: Srgb = Srgb::new(color.r(), color.g(), color.b()).into_format();
    let hsl: Hsl = rgb.into_color();
    let rgb: Srgb = hsl.lighten(amount).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Layout template shared by every chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Fonts, colours and spacing applied to every chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTemplate {
    pub title_size: f32,
    pub title_color: Color32,
    pub font_size: f32,
    pub font_color: Color32,
    pub plot_background: Color32,
    pub paper_background: Color32,
    pub margins: Margins,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TitleAlign {
    Center,
    /// Inset from the left edge as a fraction of the chart width.
    Left(f32),
}

/// Styled layout of one chart: the template plus that chart's text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub title_align: TitleAlign,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: Option<String>,
    pub template: LayoutTemplate,
}

impl ChartLayout {
    pub fn left_aligned(mut self, inset: f32) -> Self {
        self.title_align = TitleAlign::Left(inset);
        self
    }

    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }
}

// ---------------------------------------------------------------------------
// ChartStyle – sentiment palette + template
// ---------------------------------------------------------------------------

/// Process-wide chart styling. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    positive: Color32,
    neutral: Color32,
    negative: Color32,
    /// Colour for sentiment labels outside the known three.
    pub fallback: Color32,
    pub template: LayoutTemplate,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            positive: hex_color("#00CC96", Color32::GREEN),
            neutral: hex_color("#636EFA", Color32::BLUE),
            negative: hex_color("#EF553B", Color32::RED),
            fallback: hex_color("#A0A0A0", Color32::GRAY),
            template: LayoutTemplate {
                title_size: 24.0,
                title_color: hex_color("#2E86C1", Color32::BLUE),
                font_size: 16.0,
                font_color: Color32::BLACK,
                plot_background: Color32::WHITE,
                paper_background: Color32::WHITE,
                margins: Margins {
                    left: 80.0,
                    right: 20.0,
                    top: 60.0,
                    bottom: 40.0,
                },
            },
        }
    }
}

impl ChartStyle {
    /// The shared instance handed to every chart builder.
    pub fn shared() -> &'static ChartStyle {
        static STYLE: OnceLock<ChartStyle> = OnceLock::new();
        STYLE.get_or_init(ChartStyle::default)
    }

    pub fn color_for(&self, sentiment: &Sentiment) -> Color32 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
            Sentiment::Other(_) => self.fallback,
        }
    }

    pub fn fill_for(&self, sentiment: &Sentiment) -> Color32 {
        lighten(self.color_for(sentiment), 0.25)
    }

    /// The one styling entry point: a centred layout carrying the template.
    pub fn layout(
        &self,
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> ChartLayout {
        ChartLayout {
            title: title.into(),
            title_align: TitleAlign::Center,
            x_title: x_title.into(),
            y_title: y_title.into(),
            legend_title: None,
            template: self.template,
        }
    }
}
