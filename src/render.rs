use super::compare::highest_point;
use super::error::{CompareError, Result};
use super::palette::Ink;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

pub const DPI: f64 = 300.;

/// pixel size of a figure given in inches
pub fn figure_size(width_in: f64, height_in: f64) -> (u32, u32) {
    ((width_in * DPI).round() as u32, (height_in * DPI).round() as u32)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// center of the bar on the tick axis, ticks sit at 0, 1, 2, ...
    pub x: f64,
    pub width: f64,
    pub value: f64,
    pub ink: Ink,
}

/// Bars drawn together, with an optional legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub legend: Option<(String, Ink)>,
    pub bars: Vec<Bar>,
}

/// Text centered horizontally on x, sitting on y.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub ink: Ink,
    pub font_px: u32,
}

/// Everything that ends up on the image, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub ticks: Vec<String>,
    pub size: (u32, u32),
    pub series: Vec<BarSeries>,
    pub annotations: Vec<Annotation>,
}

impl ChartLayout {
    pub fn legend_entries(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter_map(|s| s.legend.as_ref().map(|(name, _)| name.as_str()))
            .collect()
    }

    pub fn x_range(&self) -> (f64, f64) {
        (-0.5, self.ticks.len() as f64 - 0.5)
    }

    /// top of the y axis with some headroom over the tallest bar or text
    pub fn y_upper(&self) -> f64 {
        let top = highest_point(self);
        if top > 0. {
            top * 1.12
        } else {
            1.
        }
    }

    /// name of the tick at x, empty between the ticks
    pub fn tick_label(&self, x: f64) -> String {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0. {
            return String::new();
        }
        self.ticks.get(i as usize).cloned().unwrap_or_default()
    }

    /// Draws the chart to png, overwriting the file if present.
    /// Non-finite bars or labels are refused before the file is touched.
    pub fn draw_png(&self, fout: &Path) -> Result<()> {
        let finite = self
            .series
            .iter()
            .flat_map(|s| s.bars.iter().map(|b| b.value))
            .chain(self.annotations.iter().map(|a| a.y))
            .all(f64::is_finite);
        if !finite {
            return Err(CompareError::Render(format!(
                "non-finite value in '{}'",
                self.title
            )));
        }
        if let Some(dir) = fout.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let (xmin, xmax) = self.x_range();
        let ymax = self.y_upper();
        let root = BitMapBackend::new(fout, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 52))
            .margin(20)
            .x_label_area_size(120)
            .y_label_area_size(170)
            .build_cartesian_2d(xmin..xmax, 0f64..ymax)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .set_all_tick_mark_size(8)
            .label_style(("sans-serif", 40))
            .axis_desc_style(("sans-serif", 44))
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .x_labels(self.ticks.len())
            .y_labels(8)
            .x_label_formatter(&|x: &f64| self.tick_label(*x))
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .draw()?;

        for series in self.series.iter() {
            let rects = series.bars.iter().map(|b| {
                let half = b.width / 2.;
                Rectangle::new(
                    [(b.x - half, 0.), (b.x + half, b.value)],
                    b.ink.rgb().filled(),
                )
            });
            let anno = chart.draw_series(rects)?;
            if let Some((name, ink)) = &series.legend {
                let color = ink.rgb();
                anno.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 14), (x + 40, y + 14)], color.filled())
                });
            }
        }

        for a in self.annotations.iter() {
            let style = ("sans-serif", a.font_px)
                .into_font()
                .style(FontStyle::Bold)
                .color(&a.ink.rgb())
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(std::iter::once(Text::new(a.text.clone(), (a.x, a.y), style)))?;
        }

        if !self.legend_entries().is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", 40))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        root.present()?;
        info!("drew {} to {}", self.title, fout.display());
        Ok(())
    }
}
