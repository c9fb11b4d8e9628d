// Box grid geometry for the forecast sheet
//
// All positions are in millimetres measured from the top-left corner of the
// page. The renderer flips them into PDF's bottom-left coordinates.

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

// ============================================================================
// Constants
// ============================================================================

/// A4 dimensions in mm
pub const A4_SHORT_MM: f32 = 210.0;
pub const A4_LONG_MM: f32 = 297.0;

/// Default boxes per row when the width is derived from the page
pub const DEFAULT_COLUMNS: usize = 5;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// (width, height) in mm
    pub fn page_size(self) -> (f32, f32) {
        match self {
            Orientation::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Orientation::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        }
    }
}

/// How boxes fill a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridMode {
    /// Fixed number of boxes per row; box width stretches to the page
    Columns(usize),
    /// Fixed box width; as many per row as fit
    BoxWidth(f32),
}

/// `[layout]` section of the configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    pub margin: f32,
    pub gap: f32,
    pub box_height: f32,
    /// Top of the first row on the first page
    pub top_offset: f32,
    /// Inset of the icon from the box's top-left corner
    pub inset: f32,
    /// Distance from the icon's bottom edge to the first text baseline
    pub text_lead: f32,
    pub line_spacing: f32,
    pub columns: Option<usize>,
    pub box_width: Option<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            orientation: Orientation::Landscape,
            margin: 10.0,
            gap: 10.0,
            box_height: 80.0,
            top_offset: 40.0,
            inset: 5.0,
            text_lead: 5.0,
            line_spacing: 10.0,
            columns: None,
            box_width: None,
        }
    }
}

impl LayoutConfig {
    pub fn grid_mode(&self) -> Result<GridMode, AppError> {
        match (self.columns, self.box_width) {
            (Some(_), Some(_)) => Err(AppError::Layout(
                "set either columns or box_width, not both".to_string(),
            )),
            (_, Some(width)) => Ok(GridMode::BoxWidth(width)),
            (columns, None) => Ok(GridMode::Columns(columns.unwrap_or(DEFAULT_COLUMNS))),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Resolved dimensions shared by every box of a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub gap: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub boxes_per_row: usize,
    pub top_offset: f32,
    pub inset: f32,
    pub text_lead: f32,
    pub line_spacing: f32,
    /// Rows that fit on the first page, below the title
    pub rows_first_page: usize,
    /// Rows that fit on each continuation page
    pub rows_per_page: usize,
}

impl Geometry {
    pub fn from_config(config: &LayoutConfig) -> Result<Geometry, AppError> {
        let (page_width, page_height) = config.orientation.page_size();

        for (name, value) in [
            ("margin", config.margin),
            ("gap", config.gap),
            ("top_offset", config.top_offset),
            ("inset", config.inset),
            ("text_lead", config.text_lead),
            ("line_spacing", config.line_spacing),
        ] {
            if !is_non_negative(value) {
                return Err(AppError::Layout(format!("{} must not be negative", name)));
            }
        }
        if !is_positive(config.box_height) {
            return Err(AppError::Layout("box_height must be positive".to_string()));
        }

        let usable_width = page_width - 2.0 * config.margin;
        let (box_width, boxes_per_row) = match config.grid_mode()? {
            GridMode::Columns(0) => {
                return Err(AppError::Layout("columns must be at least 1".to_string()));
            }
            GridMode::Columns(columns) => {
                let width = (usable_width - (columns as f32 - 1.0) * config.gap) / columns as f32;
                (width, columns)
            }
            GridMode::BoxWidth(width) => {
                if !is_positive(width) {
                    return Err(AppError::Layout("box_width must be positive".to_string()));
                }
                let fit = ((usable_width + config.gap) / (width + config.gap)).floor();
                if fit < 1.0 {
                    return Err(AppError::Layout(format!(
                        "a {}mm box does not fit in {}mm of usable width",
                        width, usable_width
                    )));
                }
                (width, fit as usize)
            }
        };
        if !is_positive(box_width) {
            return Err(AppError::Layout(format!(
                "{} columns leave no room for boxes",
                boxes_per_row
            )));
        }

        let pitch = config.box_height + config.gap;
        let rows_first_page = ((page_height - config.top_offset + config.gap) / pitch).floor();
        if rows_first_page < 1.0 {
            return Err(AppError::Layout(format!(
                "a {}mm box starting at {}mm runs off the page",
                config.box_height, config.top_offset
            )));
        }
        let rows_per_page = ((page_height - config.margin + config.gap) / pitch).floor();
        if rows_per_page < 1.0 {
            return Err(AppError::Layout(format!(
                "a {}mm box below a {}mm margin runs off continuation pages",
                config.box_height, config.margin
            )));
        }

        let geometry = Geometry {
            page_width,
            page_height,
            margin: config.margin,
            gap: config.gap,
            box_width,
            box_height: config.box_height,
            boxes_per_row,
            top_offset: config.top_offset,
            inset: config.inset,
            text_lead: config.text_lead,
            line_spacing: config.line_spacing,
            rows_first_page: rows_first_page as usize,
            rows_per_page: rows_per_page as usize,
        };

        if !is_positive(geometry.icon_size()) {
            return Err(AppError::Layout(
                "boxes are too small to hold an icon and three lines of text".to_string(),
            ));
        }

        Ok(geometry)
    }

    /// Side of the square the icon is fitted into
    pub fn icon_size(&self) -> f32 {
        let by_width = self.box_width - 2.0 * self.inset;
        let by_height = self.box_height - 2.0 * self.inset - self.text_block_height();
        by_width.min(by_height)
    }

    fn text_block_height(&self) -> f32 {
        self.text_lead + 2.0 * self.line_spacing
    }

    /// Baseline of text line `line` (0..3) inside a box, from the page top
    pub fn text_baseline(&self, placement: &Placement, line: usize) -> f32 {
        placement.y + self.inset + self.icon_size() + self.text_lead + line as f32 * self.line_spacing
    }

    pub fn place(&self, index: usize) -> Placement {
        let row = index / self.boxes_per_row;
        let column = index % self.boxes_per_row;
        let pitch = self.box_height + self.gap;

        let (page, y) = if row < self.rows_first_page {
            (0, self.top_offset + row as f32 * pitch)
        } else {
            let rest = row - self.rows_first_page;
            (
                1 + rest / self.rows_per_page,
                self.margin + (rest % self.rows_per_page) as f32 * pitch,
            )
        };

        Placement {
            index,
            page,
            row,
            column,
            x: self.margin + column as f32 * (self.box_width + self.gap),
            y,
            width: self.box_width,
            height: self.box_height,
        }
    }

    /// Pages needed for `count` boxes
    pub fn page_count(&self, count: usize) -> usize {
        if count == 0 {
            return 1;
        }
        self.place(count - 1).page + 1
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Where one day's box goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub page: usize,
    /// Row counted across the whole document
    pub row: usize,
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.page == other.page
            && self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Place `count` boxes in order
pub fn layout(count: usize, geometry: &Geometry) -> Vec<Placement> {
    let placements: Vec<Placement> = (0..count).map(|i| geometry.place(i)).collect();
    debug!(
        count,
        boxes_per_row = geometry.boxes_per_row,
        box_width = geometry.box_width,
        pages = geometry.page_count(count),
        "laid out forecast boxes"
    );
    placements
}

// NaN fails both checks
fn is_non_negative(value: f32) -> bool {
    !value.is_nan() && value >= 0.0
}

fn is_positive(value: f32) -> bool {
    !value.is_nan() && value > 0.0
}
