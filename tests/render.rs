use std::fs;
use std::path::Path;

use chrono::Weekday;
use forecast_pdf::config::{IconConfig, Theme};
use forecast_pdf::form::{FormState, Template};
use forecast_pdf::icons::{IconSet, IconTable};
use forecast_pdf::render::{document_title, output_filename};
use forecast_pdf::units::TemperatureDisplay;
use forecast_pdf::{render, Field, Geometry, IconKey, LayoutConfig, RenderOptions, Snapshot};
use image::{DynamicImage, Rgba, RgbaImage};
use printpdf::lopdf;

fn options() -> RenderOptions {
    RenderOptions {
        geometry: Geometry::from_config(&LayoutConfig::default()).unwrap(),
        theme: Theme::default(),
        display: TemperatureDisplay::Fahrenheit,
    }
}

fn filled_week() -> Snapshot {
    let mut form = FormState::from_template(Template::Week, Weekday::Mon);
    for i in 0..7 {
        form.set_field(i, Field::Temperature, &format!("{}", 10 + i)).unwrap();
        form.set_field(i, Field::Precipitation, &format!("{}", i * 10)).unwrap();
    }
    form.submit()
}

fn all_icons() -> IconSet {
    let mut icons = IconSet::default();
    for key in IconKey::ALL {
        let image = RgbaImage::from_pixel(8, 8, Rgba([30, 120, 200, 255]));
        icons.insert(key, DynamicImage::ImageRgba8(image));
    }
    icons
}

fn pdf_text(bytes: &[u8]) -> String {
    let pdf = lopdf::Document::load_mem(bytes).expect("rendered bytes should parse as a PDF");
    let pages: Vec<u32> = pdf.get_pages().keys().cloned().collect();
    pdf.extract_text(&pages).expect("text should be extractable")
}

#[test]
fn default_filename_and_title() {
    assert_eq!(output_filename(None), "weekly_forecast.pdf");
    assert_eq!(output_filename(Some("  ")), "weekly_forecast.pdf");
    assert_eq!(document_title(None), "Weekly Weather Forecast");
}

#[test]
fn titled_filename_keeps_spaces() {
    assert_eq!(output_filename(Some("Monaco GP")), "Monaco GP_weather_forecast.pdf");
    assert_eq!(document_title(Some("Monaco GP")), "Weather forecast for: Monaco GP");
}

#[test]
fn path_separators_in_title_are_replaced() {
    assert_eq!(output_filename(Some("a/b\\c")), "a_b_c_weather_forecast.pdf");
}

#[test]
fn renders_a_pdf_with_every_icon() {
    let doc = render(&filled_week(), None, &options(), &all_icons()).unwrap();

    assert!(doc.bytes.starts_with(b"%PDF"));
    assert_eq!(doc.filename, "weekly_forecast.pdf");
    assert_eq!(doc.pages, 1);
    assert_eq!(doc.placements.len(), 7);
    assert!(doc.missing_icons.is_empty());
}

#[test]
fn missing_icon_skips_only_that_image() {
    let full = all_icons();
    let mut icons = IconSet::default();
    for key in IconKey::ALL {
        if key != IconKey::Rain {
            icons.insert(key, full.get(key).unwrap().clone());
        }
    }

    let doc = render(&filled_week(), Some("Monaco GP"), &options(), &icons).unwrap();

    // Wednesday carries the rain icon in the week template
    assert_eq!(doc.missing_icons, vec![2]);
    assert_eq!(doc.placements.len(), 7);
    assert_eq!(doc.filename, "Monaco GP_weather_forecast.pdf");
    assert!(doc.bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_text_lists_every_day_in_order() {
    let mut form = FormState::from_template(Template::Week, Weekday::Mon);
    form.set_field(0, Field::Temperature, "20").unwrap();
    form.set_field(0, Field::Precipitation, "40").unwrap();
    // Tuesday stays blank
    for i in 2..7 {
        form.set_field(i, Field::Temperature, "10").unwrap();
        form.set_field(i, Field::Precipitation, "5").unwrap();
    }

    let full = all_icons();
    let mut icons = IconSet::default();
    for key in IconKey::ALL {
        if key != IconKey::Rain {
            icons.insert(key, full.get(key).unwrap().clone());
        }
    }

    let doc = render(&form.submit(), None, &options(), &icons).unwrap();
    assert_eq!(doc.missing_icons, vec![2]);

    let text = pdf_text(&doc.bytes);
    assert!(text.contains("Weekly Weather Forecast"), "{}", text);
    assert!(text.contains("Temp: 68"), "{}", text);
    assert!(text.contains("Precip: 40%"), "{}", text);
    assert!(text.contains("Temp: N/A"), "{}", text);
    assert!(text.contains("Precip: N/A"), "{}", text);
    assert!(text.contains("Temp: 50"), "{}", text);
    assert!(!text.contains("NaN"), "{}", text);

    // Days after the one without an icon are still drawn, in form order
    let days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];
    let mut from = 0;
    for day in days {
        let at = text[from..]
            .find(day)
            .unwrap_or_else(|| panic!("{} missing or out of order in {}", day, text));
        from += at + day.len();
    }
}

#[test]
fn pdf_text_carries_the_title() {
    let doc = render(&filled_week(), Some("Monaco GP"), &options(), &all_icons()).unwrap();
    let text = pdf_text(&doc.bytes);
    assert!(text.contains("Weather forecast for: Monaco GP"), "{}", text);
}

#[test]
fn continuation_pages_carry_their_days() {
    let mut opts = options();
    opts.geometry = Geometry::from_config(&LayoutConfig {
        columns: Some(2),
        ..LayoutConfig::default()
    })
    .unwrap();

    let doc = render(&filled_week(), None, &opts, &all_icons()).unwrap();
    let pdf = lopdf::Document::load_mem(&doc.bytes).unwrap();
    let pages: Vec<u32> = pdf.get_pages().keys().cloned().collect();
    assert_eq!(pages.len(), 2);

    let second = pdf.extract_text(&pages[1..]).unwrap();
    assert!(second.contains("Friday"), "{}", second);
    assert!(second.contains("Sunday"), "{}", second);
    assert!(!second.contains("Monday"), "{}", second);
}

#[test]
fn empty_icon_image_is_reported_missing() {
    let mut icons = all_icons();
    icons.insert(IconKey::Snow, DynamicImage::ImageRgba8(RgbaImage::new(0, 0)));

    let doc = render(&filled_week(), None, &options(), &icons).unwrap();

    // Friday carries the snow icon in the week template
    assert_eq!(doc.missing_icons, vec![4]);
    assert!(pdf_text(&doc.bytes).contains("Friday"));
}

#[test]
fn renders_without_any_icons() {
    let doc = render(&filled_week(), None, &options(), &IconSet::default()).unwrap();
    assert_eq!(doc.missing_icons, (0..7).collect::<Vec<_>>());
    assert!(doc.bytes.starts_with(b"%PDF"));
}

#[test]
fn long_forecasts_paginate() {
    let mut opts = options();
    opts.geometry = Geometry::from_config(&LayoutConfig {
        columns: Some(2),
        ..LayoutConfig::default()
    })
    .unwrap();

    let doc = render(&filled_week(), None, &opts, &all_icons()).unwrap();
    // 2 per row, 2 rows on the first page, 2 rows per continuation page
    assert_eq!(doc.pages, 2);
    assert_eq!(doc.placements[4].page, 1);
}

#[test]
fn repeated_renders_are_independent() {
    let snapshot = filled_week();
    let a = render(&snapshot, None, &options(), &all_icons()).unwrap();
    let b = render(&snapshot, None, &options(), &all_icons()).unwrap();
    assert_eq!(a.placements, b.placements);
    assert_eq!(a.filename, b.filename);
}

#[test]
fn save_writes_into_directory() {
    let dir = Path::new("tests/output/render");
    let doc = render(&filled_week(), Some("Save Test"), &options(), &all_icons()).unwrap();

    let path = doc.save(dir).unwrap();

    assert_eq!(path, dir.join("Save Test_weather_forecast.pdf"));
    let written = fs::read(&path).unwrap();
    assert_eq!(written, doc.bytes);
    fs::remove_file(&path).ok();
}

#[test]
fn icon_set_loads_files_and_skips_missing_ones() {
    let dir = Path::new("tests/output/icons");
    fs::create_dir_all(dir).unwrap();
    RgbaImage::from_pixel(4, 4, Rgba([255, 200, 0, 255]))
        .save(dir.join("sun.png"))
        .unwrap();

    let mut table = IconTable::empty();
    table.insert(IconKey::Sunny, dir.join("sun.png"));
    table.insert(IconKey::Fog, dir.join("does-not-exist.png"));

    let icons = IconSet::load(&table);
    assert!(icons.get(IconKey::Sunny).is_some());
    assert!(icons.get(IconKey::Fog).is_none());
    assert!(icons.get(IconKey::Rain).is_none());
    assert_eq!(icons.len(), 1);
}

#[test]
fn icon_table_defaults_and_overrides() {
    let table = IconTable::with_defaults(Path::new("images"));
    assert_eq!(table.path(IconKey::Sunny), Some(Path::new("images/sun.png")));
    assert_eq!(table.path(IconKey::PartlyCloudy), Some(Path::new("images/cloudy.png")));

    let mut config = IconConfig::default();
    config.dir = Some("assets".into());
    config.files.insert("partlyCloudy".to_string(), "partly.png".into());
    let table = IconTable::from_config(&config, Path::new("images")).unwrap();
    assert_eq!(table.path(IconKey::PartlyCloudy), Some(Path::new("assets/partly.png")));
    assert_eq!(table.path(IconKey::Rain), Some(Path::new("assets/heavy-rain.png")));

    config.files.insert("hail".to_string(), "hail.png".into());
    assert!(IconTable::from_config(&config, Path::new("images")).is_err());
}
