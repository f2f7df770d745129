//! Turns the measurements of the two builds into the bars, colors and
//! annotation strings of a chart. Nothing here touches the filesystem, so the
//! same rows always give the same chart content.

use super::error::{CompareError, Result};
use super::palette::Ink;
use super::render::{figure_size, Annotation, Bar, BarSeries, ChartLayout};
use super::table::MeasurementTable;
use super::{min_and_max, Label, Metric};
use tracing::debug;

pub const SCALAR_BAR_WIDTH: f64 = 0.4;
pub const CATEGORY_BAR_WIDTH: f64 = 0.3;
/// gap between a bar top and its value, in ms
pub const SCALAR_TEXT_OFFSET: f64 = 10.;
pub const CATEGORY_TEXT_OFFSET: f64 = 5.;

// 12 and 10 points at 300 dpi
const SCALAR_FONT_PX: u32 = 50;
const CATEGORY_FONT_PX: u32 = 42;

/// A build and its start time in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    pub label: Label,
    pub ms: f64,
}

/// One aggregate start time per build, baseline drawn left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarComparison {
    pub baseline: Measure,
    pub candidate: Measure,
}

impl ScalarComparison {
    pub fn new(baseline: Measure, candidate: Measure) -> ScalarComparison {
        ScalarComparison {
            baseline,
            candidate,
        }
    }

    /// Validates the columns and labels, then reads `column` for both builds.
    pub fn from_table(
        table: &MeasurementTable,
        labels: [Label; 2],
        column: &str,
    ) -> Result<ScalarComparison> {
        table.require_columns(&[column])?;
        table.require_labels(&labels)?;
        let baseline = Measure {
            label: labels[0],
            ms: table.value(labels[0], column)?,
        };
        let candidate = Measure {
            label: labels[1],
            ms: table.value(labels[1], column)?,
        };
        debug!("{:?} vs {:?}", baseline, candidate);
        Ok(ScalarComparison::new(baseline, candidate))
    }

    /// candidate minus baseline, negative when the candidate got faster
    pub fn difference(&self) -> f64 {
        self.candidate.ms - self.baseline.ms
    }

    /// Bar colors, baseline first: the strictly smaller value is the faster.
    pub fn bar_inks(&self) -> [Ink; 2] {
        let (b, c) = (self.baseline.ms, self.candidate.ms);
        if b < c {
            [Ink::Faster, Ink::Slower]
        } else if c < b {
            [Ink::Slower, Ink::Faster]
        } else {
            [Ink::Even, Ink::Even]
        }
    }

    /// Green when the candidate got faster, red otherwise (ties included).
    pub fn delta_ink(&self) -> Ink {
        if self.difference() < 0. {
            Ink::Faster
        } else {
            Ink::Slower
        }
    }

    pub fn delta_text(&self) -> String {
        format!("Difference: {:+.1} ms", self.difference())
    }

    /// midway between the bars, half the gap above the shorter one
    pub fn delta_anchor(&self) -> (f64, f64) {
        let lower = self.baseline.ms.min(self.candidate.ms);
        (0.5, lower + self.difference().abs() / 2.)
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        let mut annotations: Vec<Annotation> = [self.baseline, self.candidate]
            .iter()
            .enumerate()
            .map(|(i, m)| Annotation {
                text: format!("{:.1} ms", m.ms),
                x: i as f64,
                y: m.ms + SCALAR_TEXT_OFFSET,
                ink: Ink::Text,
                font_px: SCALAR_FONT_PX,
            })
            .collect();
        let (x, y) = self.delta_anchor();
        annotations.push(Annotation {
            text: self.delta_text(),
            x,
            y,
            ink: self.delta_ink(),
            font_px: SCALAR_FONT_PX,
        });
        annotations
    }

    pub fn layout(&self) -> ChartLayout {
        let inks = self.bar_inks();
        let bars = [self.baseline, self.candidate]
            .iter()
            .zip(inks.iter())
            .enumerate()
            .map(|(i, (m, &ink))| Bar {
                x: i as f64,
                width: SCALAR_BAR_WIDTH,
                value: m.ms,
                ink,
            })
            .collect();
        ChartLayout {
            title: format!(
                "Comparison of {} vs {} App Start Time",
                self.baseline.label, self.candidate.label
            ),
            x_desc: "Version".to_string(),
            y_desc: "Average App Start Time (ms)".to_string(),
            ticks: vec![
                self.baseline.label.to_string(),
                self.candidate.label.to_string(),
            ],
            size: figure_size(6., 4.),
            series: vec![BarSeries { legend: None, bars }],
            annotations: self.annotations(),
        }
    }
}

/// The start times of one build across the categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Label,
    pub values: Vec<f64>,
}

/// Several sub-phase start times per build, drawn side by side without a delta.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalComparison {
    pub categories: Vec<String>,
    pub baseline: Series,
    pub candidate: Series,
}

impl CategoricalComparison {
    /// Both series must have one value per category.
    pub fn new(
        categories: Vec<String>,
        baseline: Series,
        candidate: Series,
    ) -> Result<CategoricalComparison> {
        for series in [&baseline, &candidate].iter() {
            if series.values.len() != categories.len() {
                return Err(CompareError::SeriesLength {
                    label: series.label.to_string(),
                    expected: categories.len(),
                    found: series.values.len(),
                });
            }
        }
        Ok(CategoricalComparison {
            categories,
            baseline,
            candidate,
        })
    }

    /// Validates the category headers and the labels, then reads the values
    /// by header name in the order of `metrics`.
    pub fn from_table(
        table: &MeasurementTable,
        labels: [Label; 2],
        metrics: &[Metric],
    ) -> Result<CategoricalComparison> {
        let columns: Vec<&str> = metrics.iter().map(|m| m.column.as_str()).collect();
        let categories = metrics.iter().map(|m| m.name.clone()).collect();
        table.require_columns(&columns)?;
        table.require_labels(&labels)?;
        let baseline = Series {
            label: labels[0],
            values: table.values(labels[0], &columns)?,
        };
        let candidate = Series {
            label: labels[1],
            values: table.values(labels[1], &columns)?,
        };
        debug!("{:?} vs {:?}", baseline, candidate);
        CategoricalComparison::new(categories, baseline, candidate)
    }

    /// baseline bars left of the tick, candidate bars right of it
    fn series_bars(&self, series: &Series, shift: f64) -> Vec<Bar> {
        series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar {
                x: i as f64 + shift,
                width: CATEGORY_BAR_WIDTH,
                value: v,
                ink: Ink::Build(series.label),
            })
            .collect()
    }

    /// Value labels, all the baseline bars first, then the candidate ones.
    pub fn annotations(&self) -> Vec<Annotation> {
        let half = CATEGORY_BAR_WIDTH / 2.;
        [(&self.baseline, -half), (&self.candidate, half)]
            .iter()
            .flat_map(|(series, shift)| self.series_bars(series, *shift))
            .map(|bar| Annotation {
                text: format!("{:.1}", bar.value),
                x: bar.x,
                y: bar.value + CATEGORY_TEXT_OFFSET,
                ink: Ink::Text,
                font_px: CATEGORY_FONT_PX,
            })
            .collect()
    }

    pub fn layout(&self) -> ChartLayout {
        let half = CATEGORY_BAR_WIDTH / 2.;
        let series = [(&self.baseline, -half), (&self.candidate, half)]
            .iter()
            .map(|(s, shift)| BarSeries {
                legend: Some((s.label.to_string(), Ink::Build(s.label))),
                bars: self.series_bars(s, *shift),
            })
            .collect();
        ChartLayout {
            title: format!(
                "Comparison of App Start Time: {} vs {}",
                self.baseline.label, self.candidate.label
            ),
            x_desc: "Activity Type".to_string(),
            y_desc: "App Start Time (ms)".to_string(),
            ticks: self.categories.clone(),
            size: figure_size(8., 5.),
            series,
            annotations: self.annotations(),
        }
    }
}

/// largest bar or annotation height, used to size the y axis
pub fn highest_point(layout: &ChartLayout) -> f64 {
    let tops: Vec<f64> = layout
        .series
        .iter()
        .flat_map(|s| s.bars.iter().map(|b| b.value))
        .chain(layout.annotations.iter().map(|a| a.y))
        .collect();
    min_and_max(&tops).map(|(_, max)| max).unwrap_or(0.)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(playstore: f64, release: f64) -> ScalarComparison {
        ScalarComparison::new(
            Measure {
                label: Label::Playstore,
                ms: playstore,
            },
            Measure {
                label: Label::Release,
                ms: release,
            },
        )
    }

    #[test]
    fn faster_release() {
        let c = scalar(3000., 2500.);
        assert_eq!(c.difference(), -500.);
        assert_eq!(c.bar_inks(), [Ink::Slower, Ink::Faster]);
        assert_eq!(c.bar_inks()[0].name(), "red");
        assert_eq!(c.bar_inks()[1].name(), "green");
        assert_eq!(c.delta_text(), "Difference: -500.0 ms");
        assert_eq!(c.delta_ink().name(), "green");
    }

    #[test]
    fn slower_release() {
        let c = scalar(2000., 2600.);
        assert_eq!(c.difference(), 600.);
        assert_eq!(c.bar_inks()[0].name(), "green");
        assert_eq!(c.bar_inks()[1].name(), "red");
        assert_eq!(c.delta_text(), "Difference: +600.0 ms");
        assert_eq!(c.delta_ink().name(), "red");
    }

    #[test]
    fn tie_colors_both_bars_even() {
        let c = scalar(2000., 2000.);
        assert_eq!(c.bar_inks(), [Ink::Even, Ink::Even]);
        assert_eq!(c.delta_text(), "Difference: +0.0 ms");
        assert_eq!(c.delta_ink(), Ink::Slower);
    }

    #[test]
    fn delta_sits_between_the_bars() {
        let c = scalar(3000., 2500.);
        assert_eq!(c.delta_anchor(), (0.5, 2750.));
        let c = scalar(2000., 2600.);
        assert_eq!(c.delta_anchor(), (0.5, 2300.));
    }

    #[test]
    fn scalar_annotations() {
        let a = scalar(3000., 2500.34).annotations();
        let texts: Vec<&str> = a.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["3000.0 ms", "2500.3 ms", "Difference: -499.7 ms"]);
        assert_eq!((a[0].x, a[0].y), (0., 3010.));
        assert_eq!(a[1].x, 1.);
        assert!((a[1].y - 2510.34).abs() < 1e-9);
    }

    #[test]
    fn scalar_layout_is_deterministic() {
        let c = scalar(3000., 2500.);
        assert_eq!(c.layout(), c.layout());
        let layout = c.layout();
        assert_eq!(layout.ticks, vec!["Playstore", "Release"]);
        assert_eq!(layout.size, (1800, 1200));
        assert!(layout.legend_entries().is_empty());
        let bars = &layout.series[0].bars;
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.width == SCALAR_BAR_WIDTH));
    }

    fn categorical() -> CategoricalComparison {
        CategoricalComparison::new(
            vec!["Splash".into(), "Onboarding".into(), "Home".into()],
            Series {
                label: Label::Playstore,
                values: vec![100., 200., 300.],
            },
            Series {
                label: Label::Release,
                values: vec![90., 210., 280.],
            },
        )
        .unwrap()
    }

    #[test]
    fn mismatched_series_are_rejected() {
        let categories: Vec<String> = vec!["Splash".into(), "Onboarding".into(), "Home".into()];
        let result = CategoricalComparison::new(
            categories,
            Series {
                label: Label::Playstore,
                values: vec![100., 200., 300.],
            },
            Series {
                label: Label::Release,
                values: vec![90., 210.],
            },
        );
        match result {
            Err(CompareError::SeriesLength {
                label,
                expected,
                found,
            }) => {
                assert_eq!(label, "Release");
                assert_eq!((expected, found), (3, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn six_annotated_bars_in_positional_order() {
        let c = categorical();
        let texts: Vec<String> = c.annotations().into_iter().map(|a| a.text).collect();
        assert_eq!(
            texts,
            vec!["100.0", "200.0", "300.0", "90.0", "210.0", "280.0"]
        );
        let layout = c.layout();
        assert_eq!(layout.series.iter().map(|s| s.bars.len()).sum::<usize>(), 6);
        assert_eq!(layout.legend_entries(), vec!["Playstore", "Release"]);
        assert_eq!(layout.size, (2400, 1500));
    }

    #[test]
    fn grouped_bars_straddle_the_ticks() {
        let layout = categorical().layout();
        let close = |bars: &[Bar], expected: &[f64]| {
            bars.len() == expected.len()
                && bars.iter().zip(expected).all(|(b, e)| (b.x - e).abs() < 1e-9)
        };
        assert!(close(&layout.series[0].bars, &[-0.15, 0.85, 1.85]));
        assert!(close(&layout.series[1].bars, &[0.15, 1.15, 2.15]));
        assert_eq!(layout.series[0].bars[0].ink.name(), "blue");
        assert_eq!(layout.series[1].bars[0].ink.name(), "green");
    }

    #[test]
    fn highest_point_includes_the_labels() {
        let layout = scalar(3000., 2500.).layout();
        assert_eq!(highest_point(&layout), 3010.);
    }
}
