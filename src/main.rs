// forecast-pdf: Render a week of weather readings as a PDF forecast sheet

use std::path::{Path, PathBuf};

use chrono::Weekday;
use clap::Parser;
use tracing::info;

use forecast_pdf::config::{load_config, Config};
use forecast_pdf::form::{load_form_file, FormState, Template};
use forecast_pdf::icons::{IconSet, IconTable, DEFAULT_ICON_DIR};
use forecast_pdf::layout::Geometry;
use forecast_pdf::render::{render, RenderOptions};
use forecast_pdf::summary::render_grid;
use forecast_pdf::units::{TemperatureDisplay, TemperatureUnit};
use forecast_pdf::AppError;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a weekly weather forecast as a PDF sheet")]
struct Args {
    /// Form preset: days, input unit and temperature display
    #[arg(long, value_enum, default_value = "week")]
    template: Template,

    /// First day of the week template (e.g. monday, thu)
    #[arg(long, default_value = "monday")]
    start_day: String,

    /// Title; also names the output file
    #[arg(short, long)]
    title: Option<String>,

    /// JSON form file with the day entries
    #[arg(short, long)]
    form: Option<PathBuf>,

    /// Field edit, INDEX.FIELD=VALUE (repeatable, applied after --form)
    #[arg(short, long = "set", value_name = "EDIT")]
    set: Vec<String>,

    /// Unit temperatures are typed in, overriding the template's
    #[arg(long, value_enum)]
    input_unit: Option<TemperatureUnit>,

    /// Temperature display, overriding the template's
    #[arg(long, value_enum)]
    display: Option<TemperatureDisplay>,

    /// TOML configuration file (layout, theme, icons)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the icon images
    #[arg(long)]
    icon_dir: Option<PathBuf>,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip the text summary on stdout
    #[arg(long)]
    no_summary: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let geometry = Geometry::from_config(&config.layout)?;

    // Fill in the form
    let start_day = parse_weekday(&args.start_day)?;
    let mut form = FormState::from_template(args.template, start_day);
    if let Some(unit) = args.input_unit {
        form.set_input_unit(unit);
    }
    if let Some(path) = &args.form {
        form.apply_form(load_form_file(path)?)?;
    }
    for edit in &args.set {
        form.apply_edit(edit)?;
    }
    if let Some(title) = &args.title {
        form.set_title(title);
    }

    // Submit
    let snapshot = form.submit();
    let display = args.display.unwrap_or(args.template.display());

    if !args.no_summary {
        print!("{}", render_grid(&snapshot, geometry.boxes_per_row, display));
    }

    // Render and save
    if let Some(dir) = &args.icon_dir {
        config.icons.dir = Some(dir.clone());
    }
    let table = IconTable::from_config(&config.icons, Path::new(DEFAULT_ICON_DIR))?;
    let icons = IconSet::load(&table);
    info!(loaded = icons.len(), "icons ready");

    let options = RenderOptions {
        geometry,
        theme: config.theme,
        display,
    };
    let document = render(&snapshot, form.title(), &options, &icons)?;
    let path = document.save(&args.output_dir)?;

    println!("✓ Generated: {}", path.display());
    println!("  Days: {}", snapshot.len());
    println!("  Pages: {}", document.pages);
    if !document.missing_icons.is_empty() {
        println!("  Missing icons: {}", document.missing_icons.len());
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_weekday(s: &str) -> Result<Weekday, AppError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::StartDay(s.to_string()))
}
