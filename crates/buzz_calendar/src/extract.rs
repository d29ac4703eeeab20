use buzz_config::{MarkerConfig, VenueConfig};
use scraper::Selector;
use std::fmt;
use tracing::{debug, warn};

use crate::dom::{compile_selector, Document, Element};
use crate::error::CalendarError;
use crate::models::{AvailabilityGrid, SlotStatus, StudioId, TimeSlot};

/// Number of markup characters logged when the table is missing.
const MARKUP_PREVIEW_CHARS: usize = 1000;

/// Non-fatal findings of one extraction run.
///
/// Row and column numbers are 1-based; columns count from the first studio
/// column, rows from the first row after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    TableNotFound,
    HeaderNotFound,
    HeaderLabelMissing { column: usize },
    NoStudioColumns,
    EmptyRow { row: usize },
    MissingTimeLabel { row: usize },
    ShortRow { row: usize, cells: usize, studios: usize },
    ExtraCell { row: usize, column: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TableNotFound => write!(f, "availability table not found"),
            Diagnostic::HeaderNotFound => write!(f, "table has no header row"),
            Diagnostic::HeaderLabelMissing { column } => {
                write!(f, "header column {} has no studio label", column)
            }
            Diagnostic::NoStudioColumns => write!(f, "no studio columns found"),
            Diagnostic::EmptyRow { row } => write!(f, "row {} has no cells", row),
            Diagnostic::MissingTimeLabel { row } => write!(f, "row {} has no time label", row),
            Diagnostic::ShortRow {
                row,
                cells,
                studios,
            } => write!(
                f,
                "row {} has {} studio cells for {} studios; missing cells default to available",
                row, cells, studios
            ),
            Diagnostic::ExtraCell { row, column } => {
                write!(f, "row {} column {} has no studio; ignored", row, column)
            }
        }
    }
}

/// Output of [`TableExtractor::extract`].
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub grid: AvailabilityGrid,
    pub diagnostics: Vec<Diagnostic>,
}

struct Markers {
    table: Selector,
    header_row: Selector,
    row: Selector,
    studio_label: Selector,
    closed: Selector,
    reserve_link: Selector,
}

impl Markers {
    fn compile(config: &MarkerConfig) -> Result<Self, CalendarError> {
        Ok(Self {
            table: compile_selector("table", &config.table)?,
            header_row: compile_selector("header_row", &config.header_row)?,
            row: compile_selector("row", "tr")?,
            studio_label: compile_selector("studio_label", &config.studio_label)?,
            closed: compile_selector("closed", &config.closed)?,
            reserve_link: compile_selector("reserve_link", &config.reserve_link)?,
        })
    }
}

/// Turns calendar markup into an [`AvailabilityGrid`].
///
/// Missing structure never fails the extraction; it yields a partial or
/// empty grid plus [`Diagnostic`]s. Deciding whether an empty grid is fatal
/// is up to the caller.
pub struct TableExtractor {
    markers: Markers,
    studio_suffix: String,
}

impl TableExtractor {
    /// Compiles the venue's marker selectors.
    pub fn new(venue: &VenueConfig) -> Result<Self, CalendarError> {
        Ok(Self {
            markers: Markers::compile(&venue.markers)?,
            studio_suffix: venue.studio_suffix.clone(),
        })
    }

    /// Extracts the grid and discards the diagnostics (they are still logged).
    pub fn extract_grid(&self, markup: &str) -> AvailabilityGrid {
        self.extract(markup).grid
    }

    pub fn extract(&self, markup: &str) -> Extraction {
        let document = Document::parse(markup);
        let mut diagnostics = Vec::new();

        let grid = match document.select_first(&self.markers.table) {
            Some(table) => self.extract_table(table, &mut diagnostics),
            None => {
                let preview: String = markup.chars().take(MARKUP_PREVIEW_CHARS).collect();
                debug!("Markup preview: {}", preview);
                diagnostics.push(Diagnostic::TableNotFound);
                AvailabilityGrid::default()
            }
        };

        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::TableNotFound | Diagnostic::NoStudioColumns => {
                    warn!("{}", diagnostic)
                }
                _ => debug!("{}", diagnostic),
            }
        }
        debug!(
            "Extracted {} studios x {} slots",
            grid.studios().len(),
            grid.slots().len()
        );

        Extraction { grid, diagnostics }
    }

    fn extract_table(&self, table: Element<'_>, diagnostics: &mut Vec<Diagnostic>) -> AvailabilityGrid {
        let Some(header) = table.select_first(&self.markers.header_row) else {
            diagnostics.push(Diagnostic::HeaderNotFound);
            return AvailabilityGrid::default();
        };

        let columns = self.studio_columns(header, diagnostics);
        if columns.is_empty() {
            diagnostics.push(Diagnostic::NoStudioColumns);
            return AvailabilityGrid::default();
        }

        let mut grid = AvailabilityGrid::new(columns.iter().cloned());
        let body_rows = table
            .select(&self.markers.row)
            .skip_while(|row| *row != header)
            .skip(1);

        for (index, row) in body_rows.enumerate() {
            let row_number = index + 1;
            let cells = row.cells();
            let Some((time_cell, studio_cells)) = cells.split_first() else {
                diagnostics.push(Diagnostic::EmptyRow { row: row_number });
                continue;
            };

            let label = time_cell.text();
            if label.is_empty() {
                diagnostics.push(Diagnostic::MissingTimeLabel { row: row_number });
                continue;
            }

            if studio_cells.len() < columns.len() {
                diagnostics.push(Diagnostic::ShortRow {
                    row: row_number,
                    cells: studio_cells.len(),
                    studios: columns.len(),
                });
            }
            for column in columns.len()..studio_cells.len() {
                diagnostics.push(Diagnostic::ExtraCell {
                    row: row_number,
                    column: column + 1,
                });
            }

            let statuses = studio_cells
                .iter()
                .zip(columns.iter())
                .map(|(cell, studio)| (studio.clone(), self.cell_status(cell)));
            grid.insert_row(TimeSlot::normalized(&label), statuses);
        }

        grid
    }

    /// Studio ids from the header, skipping the time column.
    ///
    /// Header cells without a label are dropped without leaving a gap, so
    /// the n-th data cell of a row belongs to the n-th labelled studio.
    fn studio_columns(&self, header: Element<'_>, diagnostics: &mut Vec<Diagnostic>) -> Vec<StudioId> {
        let mut columns = Vec::new();
        for (index, cell) in header.cells().iter().enumerate().skip(1) {
            let label = cell
                .select_first(&self.markers.studio_label)
                .map(|label| label.text())
                .filter(|text| !text.is_empty());
            match label {
                Some(text) => columns.push(StudioId::new(&text, &self.studio_suffix)),
                None => diagnostics.push(Diagnostic::HeaderLabelMissing { column: index }),
            }
        }
        columns
    }

    fn cell_status(&self, cell: &Element<'_>) -> SlotStatus {
        let closed = cell.has(&self.markers.closed);
        let bookable = cell.has(&self.markers.reserve_link);
        match (closed, bookable) {
            (true, _) => SlotStatus::Reserved,
            (false, true) => SlotStatus::Available,
            // Neither control rendered: assume open.
            (false, false) => SlotStatus::Available,
        }
    }
}
