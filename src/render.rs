// PDF rendering of a submitted forecast

use std::fs;
use std::path::{Path, PathBuf};

use ::image::{DynamicImage, Rgba, RgbImage};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use tracing::{debug, info, warn};

use crate::config::Theme;
use crate::error::AppError;
use crate::icons::IconSet;
use crate::layout::{layout, Geometry, Placement};
use crate::model::{Snapshot, SubmittedDay};
use crate::units::TemperatureDisplay;

// ============================================================================
// Constants
// ============================================================================

/// Title anchor, from the page's top-left corner
const TITLE_X_MM: f32 = 20.0;
const TITLE_Y_MM: f32 = 20.0;

/// Text inset from the box's left edge
const TEXT_INSET_MM: f32 = 5.0;

const DEFAULT_FILENAME: &str = "weekly_forecast.pdf";

// ============================================================================
// Options and output
// ============================================================================

/// Everything the renderer needs besides the data itself
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub geometry: Geometry,
    pub theme: Theme,
    pub display: TemperatureDisplay,
}

/// A finished document, held in memory until saved
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub placements: Vec<Placement>,
    /// Indices of days whose icon could not be drawn
    pub missing_icons: Vec<usize>,
}

impl RenderedDocument {
    /// Write the PDF into `dir` under its computed filename
    pub fn save(&self, dir: &Path) -> Result<PathBuf, AppError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), pages = self.pages, "saved forecast");
        Ok(path)
    }
}

/// `weekly_forecast.pdf`, or `{title}_weather_forecast.pdf` when titled
pub fn output_filename(title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => {
            let safe: String = title
                .chars()
                .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
                .collect();
            format!("{}_weather_forecast.pdf", safe)
        }
        None => DEFAULT_FILENAME.to_string(),
    }
}

pub fn document_title(title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("Weather forecast for: {}", title),
        None => "Weekly Weather Forecast".to_string(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Lay out and draw every day of the snapshot. A day whose icon is not in
/// `icons` is drawn without an image.
pub fn render(
    snapshot: &Snapshot,
    title: Option<&str>,
    options: &RenderOptions,
    icons: &IconSet,
) -> Result<RenderedDocument, AppError> {
    let geometry = &options.geometry;
    let heading = document_title(title);

    let (doc, page1, layer1) = PdfDocument::new(
        heading.as_str(),
        Mm(geometry.page_width),
        Mm(geometry.page_height),
        "Layer 1",
    );

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    let mut layers = vec![doc.get_page(page1).get_layer(layer1)];

    layers[0].set_fill_color(rgb_color(options.theme.text));
    layers[0].use_text(
        heading.as_str(),
        options.theme.title_font_size,
        Mm(TITLE_X_MM),
        Mm(geometry.page_height - TITLE_Y_MM),
        &font_bold,
    );

    let placements = layout(snapshot.len(), geometry);
    let mut missing_icons = Vec::new();

    for (placement, day) in placements.iter().zip(snapshot.iter()) {
        while layers.len() <= placement.page {
            let (page, layer) = doc.add_page(
                Mm(geometry.page_width),
                Mm(geometry.page_height),
                "Layer 1",
            );
            layers.push(doc.get_page(page).get_layer(layer));
        }
        let layer = &layers[placement.page];

        draw_box(layer, &options.theme, geometry, placement);

        let drawn = match icons.get(day.icon) {
            Some(image) => embed_icon(layer, image, &options.theme, geometry, placement),
            None => {
                warn!(day = %day.day, icon = %day.icon, "no image for icon, drawing text only");
                false
            }
        };
        if !drawn {
            missing_icons.push(placement.index);
        }

        draw_day_text(layer, &font_regular, options, placement, day);
        debug!(
            index = placement.index,
            page = placement.page,
            row = placement.row,
            column = placement.column,
            "drew forecast box"
        );
    }

    let pages = layers.len();
    drop(layers);

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok(RenderedDocument {
        filename: output_filename(title),
        bytes,
        pages,
        placements,
        missing_icons,
    })
}

fn draw_box(layer: &PdfLayerReference, theme: &Theme, geometry: &Geometry, placement: &Placement) {
    let left = placement.x;
    let right = placement.x + placement.width;
    let top = geometry.page_height - placement.y;
    let bottom = top - placement.height;

    let corners = vec![
        (Point::new(Mm(left), Mm(bottom)), false),
        (Point::new(Mm(right), Mm(bottom)), false),
        (Point::new(Mm(right), Mm(top)), false),
        (Point::new(Mm(left), Mm(top)), false),
    ];

    // Background
    layer.set_fill_color(rgb_color(theme.box_fill));
    layer.add_polygon(Polygon {
        rings: vec![corners.clone()],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });

    // Border
    layer.set_outline_color(rgb_color(theme.border));
    layer.set_outline_thickness(theme.border_thickness);
    layer.add_line(Line {
        points: corners,
        is_closed: true,
    });
}

fn draw_day_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    options: &RenderOptions,
    placement: &Placement,
    day: &SubmittedDay,
) {
    let geometry = &options.geometry;
    layer.set_fill_color(rgb_color(options.theme.text));

    for (line, text) in day.lines(options.display).iter().enumerate() {
        let baseline = geometry.text_baseline(placement, line);
        layer.use_text(
            text.as_str(),
            options.theme.text_font_size,
            Mm(placement.x + TEXT_INSET_MM),
            Mm(geometry.page_height - baseline),
            font,
        );
    }
}

/// Draw the icon in the square below the box's top-left inset, keeping its
/// aspect ratio. Transparent pixels take the box's fill colour.
///
/// Returns `false` when the image has no pixels and nothing was drawn.
fn embed_icon(
    layer: &PdfLayerReference,
    icon: &DynamicImage,
    theme: &Theme,
    geometry: &Geometry,
    placement: &Placement,
) -> bool {
    let rgb_image = flatten_onto(icon, theme.box_fill);
    let (width_px, height_px) = rgb_image.dimensions();
    if width_px == 0 || height_px == 0 {
        warn!(width_px, height_px, index = placement.index, "icon image is empty, drawing text only");
        return false;
    }

    let (width_mm, height_mm) = fit_within(width_px, height_px, geometry.icon_size());

    // Centred horizontally in the icon square, top-aligned
    let square = geometry.icon_size();
    let x = placement.x + geometry.inset + (square - width_mm) / 2.0;
    let top = placement.y + geometry.inset;
    let y = geometry.page_height - top - height_mm;

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb_image.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI = pixels / (mm / 25.4)
    let dpi = (width_px as f32) / (width_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    true
}

/// Largest (width, height) in mm with the image's aspect ratio inside a
/// `side` x `side` square
pub fn fit_within(width_px: u32, height_px: u32, side: f32) -> (f32, f32) {
    let aspect_ratio = width_px as f32 / height_px as f32;
    if aspect_ratio >= 1.0 {
        (side, side / aspect_ratio)
    } else {
        (side * aspect_ratio, side)
    }
}

/// Composite an RGBA image against a solid background
fn flatten_onto(image: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba_image = image.to_rgba8();
    let (width, height) = rgba_image.dimensions();
    let mut rgb_image = RgbImage::new(width, height);

    for (x, y, pixel) in rgba_image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8, bg: u8| (c as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        rgb_image.put_pixel(
            x,
            y,
            ::image::Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ]),
        );
    }

    rgb_image
}

fn rgb_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}
