// forecast-pdf: Render a week of weather readings as a PDF forecast sheet
//
// Pipeline: edit the form, submit (parse + unit conversion), lay out the
// boxes, draw the PDF, save it.

pub mod config;
pub mod error;
pub mod form;
pub mod icons;
pub mod layout;
pub mod model;
pub mod render;
pub mod summary;
pub mod units;

pub use error::AppError;
pub use form::{convert, FormState, Template};
pub use layout::{layout, Geometry, LayoutConfig, Placement};
pub use model::{DayRecord, Field, ForecastSet, IconKey, Snapshot, SubmittedDay};
pub use render::{render, RenderOptions, RenderedDocument};
