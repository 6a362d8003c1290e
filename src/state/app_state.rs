use thiserror::Error;

use crate::data::parser::{self, ParseError};
use crate::processing::statistics::{BoxExtents, DomainError, SummaryStats};
use crate::render::plot_interaction::PlotViewState;
use crate::state::annotation::StatsAnnotation;
use crate::state::dataset::{color_for_index, Dataset};
use crate::state::theme::Theme;

pub const VERSION: &str = "0.1.0";

/// A failure of the "generate plot" action, surfaced to the user as a
/// message rather than a crash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlotError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Dataset `{name}`: {source}")]
    Domain {
        name: String,
        #[source]
        source: DomainError,
    },
}

/// Everything produced by one successful generate action: the datasets,
/// their summaries and box extents, the annotation overlays and the plot
/// view. Replaced wholesale by the next generate.
#[derive(Debug, Clone)]
pub struct PlotModel {
    pub datasets: Vec<Dataset>,
    /// Parallel to `datasets`.
    pub summaries: Vec<SummaryStats>,
    /// Parallel to `datasets`.
    pub extents: Vec<BoxExtents>,
    pub annotations: Vec<StatsAnnotation>,
    pub view: PlotViewState,
    /// Dataset id of the annotation currently being dragged, if any.
    pub active_drag: Option<u64>,
    /// Screen rect of the plot panel last frame (for screenshot cropping).
    pub last_frame_rect: Option<egui::Rect>,
}

impl PlotModel {
    /// Parse `input` and compute statistics for every dataset it names.
    ///
    /// This is the whole core pipeline behind the Generate button: a pure
    /// function from the input text to either a ready-to-render model or a
    /// typed, user-readable failure.
    pub fn from_input(input: &str) -> Result<Self, PlotError> {
        let raw = parser::parse_datasets(input)?;

        let mut datasets = Vec::with_capacity(raw.len());
        let mut summaries = Vec::with_capacity(raw.len());
        let mut extents = Vec::with_capacity(raw.len());
        let mut annotations = Vec::with_capacity(raw.len());

        for (index, raw) in raw.into_iter().enumerate() {
            let stats =
                SummaryStats::compute(&raw.values).map_err(|source| PlotError::Domain {
                    name: raw.name.clone(),
                    source,
                })?;
            let dataset = Dataset::new(raw.name, raw.values, color_for_index(index));

            extents.push(BoxExtents::compute(&dataset.values, &stats));
            annotations.push(StatsAnnotation::stacked(
                dataset.id,
                stats.report(&dataset.name),
                index,
            ));
            summaries.push(stats);
            datasets.push(dataset);
        }

        let mut view = PlotViewState::new();
        view.fit_to_datasets(&datasets);

        Ok(Self {
            datasets,
            summaries,
            extents,
            annotations,
            view,
            active_drag: None,
            last_frame_rect: None,
        })
    }

    /// Box width in slot units: narrower as more datasets share the plot,
    /// never below half a slot.
    pub fn box_width(&self) -> f64 {
        let n = self.datasets.len();
        (0.8 - 0.1 * (n.saturating_sub(1)) as f64).max(0.5)
    }

}

/// All mutable state of one application session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub input_text: String,
    pub x_label: String,
    pub y_label: String,
    pub plot: Option<PlotModel>,
    pub theme: Theme,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            plot: None,
            theme: Theme::default(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_builds_parallel_collections() {
        let plot = PlotModel::from_input("salary=[10,20,30,40], age=[15,25,35,45]").unwrap();
        assert_eq!(plot.datasets.len(), 2);
        assert_eq!(plot.summaries.len(), 2);
        assert_eq!(plot.extents.len(), 2);
        assert_eq!(plot.annotations.len(), 2);
        assert_eq!(plot.datasets[0].name, "salary");
        assert_eq!(plot.datasets[1].name, "age");
    }

    #[test]
    fn test_summaries_are_independent_per_dataset() {
        let plot = PlotModel::from_input("salary=[10,20,30,40], age=[15,25,35,45]").unwrap();
        assert!((plot.summaries[0].mean - 25.0).abs() < 1e-9);
        assert!((plot.summaries[1].mean - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_annotations_carry_dataset_reports() {
        let plot = PlotModel::from_input("salary=[10,20,30,40]").unwrap();
        let text = &plot.annotations[0].text;
        assert!(text.starts_with("salary\n"));
        assert!(text.contains("Mean: 25.00"));
        assert_eq!(plot.annotations[0].dataset_id, plot.datasets[0].id);
    }

    #[test]
    fn test_parse_failure_maps_to_plot_error() {
        let err = PlotModel::from_input("nothing here").unwrap_err();
        assert_eq!(err, PlotError::Parse(ParseError::NoDatasets));
    }

    #[test]
    fn test_datasets_get_distinct_palette_colors() {
        let plot = PlotModel::from_input("a=[1,2], b=[3,4]").unwrap();
        assert_ne!(plot.datasets[0].color, plot.datasets[1].color);
    }

    #[test]
    fn test_view_is_fitted_on_generate() {
        let plot = PlotModel::from_input("a=[1,2], b=[3,4]").unwrap();
        assert!(plot.view.initialized);
        assert!((plot.view.x_max - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_box_width_narrows_with_dataset_count() {
        let one = PlotModel::from_input("a=[1,2]").unwrap();
        assert!((one.box_width() - 0.8).abs() < 1e-9);
        let four = PlotModel::from_input("a=[1], b=[2], c=[3], d=[4]").unwrap();
        assert!((four.box_width() - 0.5).abs() < 1e-9);
        let many = PlotModel::from_input("a=[1], b=[2], c=[3], d=[4], e=[5], f=[6]").unwrap();
        assert!((many.box_width() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_dataset_generates() {
        let plot = PlotModel::from_input("x=[7]").unwrap();
        assert!(plot.summaries[0].std_dev.is_nan());
        assert!(plot.annotations[0].text.contains("STD: n/a"));
    }
}
