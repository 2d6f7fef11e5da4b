use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formgrid::config::{Config, LayoutMode};
use formgrid::layout::render::{render_column_rows, render_sector_grid};
use formgrid::layout::{resolve_drop_target, Point, Rect};
use formgrid::model::{FieldType, FormBuilder};
use tracing_subscriber::EnvFilter;

/// Lay out, validate and export form builder documents
#[derive(Parser, Debug)]
#[command(name = "formgrid", version, about)]
struct Args {
    /// Configuration file (JSON)
    #[arg(long, global = true, default_value = "formgrid.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the grid selected by the configuration
    Layout { file: PathBuf },
    /// Print the twelve-column display rows
    Rows { file: PathBuf },
    /// Print the four-sector grid
    Sectors { file: PathBuf },
    /// Print the JSON schema of the form
    Export {
        file: PathBuf,
        /// Schema title, overriding the configured one
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the initial form-data map
    Data { file: PathBuf },
    /// Report problems; exits non-zero if any are found
    Validate { file: PathBuf },
    /// Append a new field and write the document back
    Add {
        file: PathBuf,
        /// Field type; defaults to the configured quick-add type
        #[arg(long = "type")]
        field_type: Option<FieldType>,
    },
    /// Show which drop zone a pointer over a field would activate
    Zone {
        file: PathBuf,
        /// Position of the field in the list
        index: usize,
        /// Pointer offset from the field's left edge
        offset: f64,
        /// Rendered width of the field
        #[arg(long, default_value_t = 300.0)]
        width: f64,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(file: &Path) -> Result<FormBuilder> {
    FormBuilder::load(file).with_context(|| format!("loading form {}", file.display()))
}

fn print_layout(form: &FormBuilder, mode: LayoutMode) {
    match mode {
        LayoutMode::Sectors => print!("{}", render_sector_grid(&form.sectors())),
        LayoutMode::Columns => print!("{}", render_column_rows(&form.rows())),
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = Config::load(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;

    match args.command {
        Command::Layout { file } => print_layout(&load(&file)?, config.layout),
        Command::Rows { file } => print_layout(&load(&file)?, LayoutMode::Columns),
        Command::Sectors { file } => print_layout(&load(&file)?, LayoutMode::Sectors),
        Command::Export { file, title } => {
            let form = load(&file)?;
            let title = title.or(config.schema_title);
            let schema = form.export_schema(title.as_deref());
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Data { file } => {
            let form = load(&file)?;
            println!("{}", serde_json::to_string_pretty(&form.default_form_data())?);
        }
        Command::Validate { file } => {
            let form = load(&file)?;
            let issues = form.validate();
            for issue in &issues {
                println!("{}", issue);
            }
            if !issues.is_empty() {
                anyhow::bail!("{} problem(s) found in {}", issues.len(), file.display());
            }
            println!("{}: ok", file.display());
        }
        Command::Add { file, field_type } => {
            let mut form = load(&file)?;
            let id = form.add_field(field_type.unwrap_or(config.default_field_type));
            form.save(&file).with_context(|| format!("saving form {}", file.display()))?;
            println!("added {}", id);
        }
        Command::Zone {
            file,
            index,
            offset,
            width,
        } => {
            let form = load(&file)?;
            let field = form
                .fields()
                .get(index)
                .with_context(|| format!("no field at position {index}"))?;
            let rect = Rect::new(0.0, 0.0, width, 1.0);
            let point = Point::new(offset, 0.5);
            match resolve_drop_target(rect, field.id, index, point, config.edge_zone_ratio) {
                Some(target) => println!("{:?}", target),
                None => println!("outside {}", field.id),
            }
        }
    }
    Ok(())
}
