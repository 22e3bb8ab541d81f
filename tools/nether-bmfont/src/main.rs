//! nether-bmfont - BMFont to C header converter
//!
//! Parses a BMFont text descriptor and emits a C header holding the font
//! metadata, glyph buckets, kerning pairs and page images as constant arrays.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nether_bmfont::{manifest, parse_descriptor, Diagnostics, EmitOptions};

#[derive(Parser)]
#[command(name = "nether-bmfont")]
#[command(about = "BMFont to C header converter")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single font descriptor
    Convert {
        /// Input BMFont text descriptor (.fnt)
        input: PathBuf,

        /// Output header file or directory (default: <font name>.h in the current directory)
        output: Option<PathBuf>,

        /// Symbol prefix for generated tables
        #[arg(long, default_value = "BMFONT")]
        prefix: String,

        /// Byte literals per line in page arrays
        #[arg(long, default_value_t = 16)]
        bytes_per_line: usize,

        /// Alignment of page arrays in bytes (0 to omit)
        #[arg(long, default_value_t = 16)]
        alignment: u32,

        /// Omit character comments on glyph and kerning rows
        #[arg(long)]
        no_comments: bool,
    },

    /// Convert every font listed in a manifest
    Build {
        /// Path to fonts.toml manifest
        #[arg(default_value = "fonts.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed layout of a descriptor without writing anything
    Inspect {
        /// Input BMFont text descriptor (.fnt)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            prefix,
            bytes_per_line,
            alignment,
            no_comments,
        } => {
            let options = EmitOptions {
                prefix,
                bytes_per_line,
                page_alignment: alignment,
                glyph_comments: !no_comments,
                ..Default::default()
            };
            let conversion = nether_bmfont::convert_font(&input, output.as_deref(), &options)?;
            tracing::info!("Wrote {:?}", conversion.output);
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building fonts from {:?}", manifest);
            manifest::build_all(&manifest, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Inspect { input } => {
            inspect(&input)?;
        }
    }

    Ok(())
}

fn inspect(input: &std::path::Path) -> Result<()> {
    let mut diagnostics = Diagnostics::new();
    let font = parse_descriptor(input, &mut diagnostics)?;

    tracing::info!(
        "Font '{}' size={} lineHeight={} base={}",
        font.name,
        font.size,
        font.line_height,
        font.base
    );
    tracing::info!(
        "Atlas {}x{} packed={} channels a={} r={} g={} b={}",
        font.scale_w,
        font.scale_h,
        font.packed,
        font.alpha_channel.c_name(),
        font.red_channel.c_name(),
        font.green_channel.c_name(),
        font.blue_channel.c_name()
    );

    tracing::info!("Buckets:");
    for (i, bucket) in font.buckets().iter().enumerate() {
        let kerned = bucket.glyphs().iter().filter(|g| g.has_kernings()).count();
        tracing::info!(
            "  [{}] {}..={}: {} glyphs, {} with kerning",
            i,
            bucket.start_char(),
            bucket.end_char(),
            bucket.glyphs().len(),
            kerned
        );
    }

    tracing::info!("Pages:");
    for (i, page) in font.pages().iter().enumerate() {
        tracing::info!("  [{}] {:?}: {} bytes", i, page.path(), page.size());
    }

    tracing::info!(
        "{} glyphs, {} kerning pairs, {} diagnostics",
        font.glyph_count(),
        font.kerning_count(),
        diagnostics.len()
    );

    Ok(())
}
