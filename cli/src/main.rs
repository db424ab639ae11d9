//! docgen CLI - render and validate the built-in sample document

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docgen::render::{creator_for, DocumentCreator};
use docgen::{
    BodySectionOptions, DocumentBuilder, DocumentContent, DocumentContentInfoProvider,
    DocumentCreateOptions, FontDefaults, FontSettingsFactory, Justification, NumberingType,
    OutputFormat, PdfFontSettingsFactory, PlainFontSettingsFactory, RenderOptions,
    SectionEnricher, SectionValidator, TableCell, TablesRow, WordFontSettingsFactory,
};

#[derive(Parser)]
#[command(name = "docgen")]
#[command(version)]
#[command(about = "Render structured documents to Markdown, HTML and text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, validate and render the sample document
    Sample {
        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render in landscape orientation
        #[arg(long)]
        landscape: bool,

        /// Background image path (HTML only)
        #[arg(long, value_name = "FILE")]
        background: Option<PathBuf>,

        /// JSON file with default font settings
        #[arg(long, value_name = "FILE", env = "DOCGEN_FONT_CONFIG")]
        font_config: Option<PathBuf>,

        /// Font settings backend used while building
        #[arg(long, value_enum, default_value = "plain")]
        backend: BackendArg,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Omit section numbers from headings
        #[arg(long)]
        no_numbers: bool,
    },

    /// Validate the sample document and print the results
    ValidateSample,

    /// Show rendering statistics for the sample document
    Info {
        /// Output format to collect statistics for
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: FormatArg,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Markdown with pipe tables
    Markdown,
    /// Standalone HTML page
    Html,
    /// Plain text
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// No particular output library
    Plain,
    /// PDF font defaults
    Pdf,
    /// Word font defaults
    Word,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Sample {
            format,
            output,
            landscape,
            background,
            font_config,
            backend,
            max_heading,
            no_numbers,
        }) => {
            let mut create_options = DocumentCreateOptions::new().with_landscape(landscape);
            if let Some(path) = background {
                create_options = create_options.with_background_image(path);
            }
            let render_options = RenderOptions::new()
                .with_max_heading(max_heading)
                .with_heading_numbers(!no_numbers);
            cmd_sample(
                format.into(),
                output.as_deref(),
                font_config.as_deref(),
                backend,
                &create_options,
                render_options,
            )
        }
        Some(Commands::ValidateSample) => cmd_validate_sample(),
        Some(Commands::Info { format, json }) => cmd_info(format.into(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docgen sample [--format markdown|html|text]".yellow());
            println!("       docgen --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_defaults(font_config: Option<&Path>) -> docgen::Result<FontDefaults> {
    match font_config {
        Some(path) => {
            log::info!("Loading font defaults from {}", path.display());
            Ok(FontDefaults::from_json_file(path)?.sanitized())
        }
        None => Ok(FontDefaults::new()
            .with_color("#001133")
            .with_size(12.0)
            .with_justification(Justification::Left)),
    }
}

fn build_for_backend(backend: BackendArg, defaults: FontDefaults) -> DocumentContent {
    match backend {
        BackendArg::Plain => sample_document(PlainFontSettingsFactory::new(defaults)),
        BackendArg::Pdf => sample_document(PdfFontSettingsFactory::new(defaults)),
        BackendArg::Word => sample_document(WordFontSettingsFactory::new(defaults)),
    }
}

/// The sample: a two-column header, two body sections, a footer stamped with
/// today's date and a two-column signature block.
fn sample_document<F: FontSettingsFactory>(factory: F) -> DocumentContent {
    let logo_font = factory
        .create_font_settings()
        .with_color("#AA0000")
        .with_size(10.0)
        .with_bold(true);
    let caption_font = factory
        .create_font_settings()
        .with_color("#222222")
        .with_size(10.0)
        .with_justification(Justification::Right);
    let signature_font = factory
        .create_font_settings()
        .with_size(11.0)
        .with_bold(true)
        .with_justification(Justification::Center);

    let mut builder = DocumentBuilder::new(factory);
    builder
        .header(|h| {
            h.add_row(
                TablesRow::with_cells(vec![
                    TableCell::styled_text("Company Logo", logo_font),
                    TableCell::styled_text("Page Header Text", caption_font),
                ])
                .widths([40, 60]),
            )
        })
        .body_section_with_options(
            "Introduction",
            "This is **bold** text, and this is _italic_ text. \n Second line.",
            BodySectionOptions::new()
                .with_section_notes(["Footnote or short explanation."])
                .with_numbering(NumberingType::Numeric),
        )
        .body_section_with_options(
            "Detailed Information",
            "Here is an __underlined__ example.\nAnother paragraph.",
            BodySectionOptions::new()
                .with_level(2)
                .with_section_notes(["Additional notes..."]),
        )
        .signature(|s| {
            s.add_row(
                TablesRow::with_cells(vec![
                    TableCell::styled_text("Prepared by\n(Signature)", signature_font.clone()),
                    TableCell::styled_text("Checked by\n(Signature)", signature_font),
                ])
                .widths([50, 50]),
            )
        })
        .place_signature_at_bottom(true);

    let doc = builder.build();
    let provider = DocumentContentInfoProvider::new(&doc);
    SectionEnricher::new(&provider, builder.factory()).stamp_footer_today();
    doc
}

fn cmd_sample(
    format: OutputFormat,
    output: Option<&Path>,
    font_config: Option<&Path>,
    backend: BackendArg,
    create_options: &DocumentCreateOptions,
    render_options: RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = build_for_backend(backend, load_defaults(font_config)?);
    SectionValidator::new().validate_all(doc.body()).into_result()?;

    let creator = creator_for(format, render_options);

    if let Some(path) = output {
        creator.write_to_path(&doc, create_options, path)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        let rendered = creator.create_document_with_options(&doc, create_options)?;
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_validate_sample() -> Result<(), Box<dyn std::error::Error>> {
    let doc = build_for_backend(BackendArg::Plain, load_defaults(None)?);
    let result = SectionValidator::new().validate_all(doc.body());

    println!("{}", "Sample Validation".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Body sections".bold(), doc.body().total_sections());

    if result.is_valid() {
        println!("{}", "All sections are valid".green());
        return Ok(());
    }

    for failure in &result.failures {
        println!("  {} {}", "✗".red(), failure);
    }
    Err(format!("{} validation failure(s)", result.failures.len()).into())
}

fn cmd_info(format: OutputFormat, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = load_defaults(None)?;
    let factory = PlainFontSettingsFactory::new(defaults.clone());
    let doc = build_for_backend(BackendArg::Plain, defaults);
    let result = creator_for(format, RenderOptions::default())
        .render(&doc, &DocumentCreateOptions::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "MIME type".bold(), result.mime_type);
    println!("{}: {}", "Bytes".bold(), result.content_len());

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let provider = DocumentContentInfoProvider::new(&doc);
    for summary in SectionEnricher::new(&provider, &factory).section_summaries() {
        println!("  {}", summary);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let stats = &result.stats;
    println!("{}: {}", "Header rows".bold(), stats.header_rows);
    println!("{}: {}", "Body sections".bold(), stats.body_sections);
    println!("{}: {}", "Footer rows".bold(), stats.footer_rows);
    println!("{}: {}", "Signature rows".bold(), stats.signature_rows);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docgen".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structured document generation tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_document_is_valid() {
        for backend in [BackendArg::Plain, BackendArg::Pdf, BackendArg::Word] {
            let doc = build_for_backend(backend, load_defaults(None).unwrap());
            assert!(SectionValidator::new().validate_all(doc.body()).is_valid());
            assert_eq!(doc.header().rows.len(), 1);
            assert_eq!(doc.footer().rows.len(), 1);
            assert_eq!(doc.signature().rows.len(), 1);
        }
    }

    #[test]
    fn test_font_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.json");
        std::fs::write(&path, r##"{"color": "#336699", "size": 14.0}"##).unwrap();

        let defaults = load_defaults(Some(path.as_path())).unwrap();
        assert_eq!(defaults.color, "#336699");
        assert_eq!(defaults.size, 14.0);
    }

    #[test]
    fn test_sample_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.md");

        cmd_sample(
            OutputFormat::Markdown,
            Some(path.as_path()),
            None,
            BackendArg::Plain,
            &DocumentCreateOptions::default(),
            RenderOptions::default(),
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("| Company Logo | Page Header Text |"));
        assert!(written.contains("# 1 Introduction"));
        assert!(written.contains("# 2 Detailed Information"));
    }
}
