//! `Songpress` - convert a SongPro songbook to LaTeX.
//!
//! Usage:
//!   songpress [--template FILE] [--output FILE] [--warnings] [--json] INPUT
//!   songpress [--template FILE] --batch DIR OUTDIR
//!   songpress --version
//!
//! `INPUT` may be `-` to read from stdin.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use songpress::config::Config;
use songpress::services::batch::convert_directory;
use songpress::template::{fill_template, load_template};
use songpress::{convert, Conversion};

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    warnings: bool,
    json: bool,
    version: bool,
    batch: Option<(PathBuf, PathBuf)>,
    input: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--template" => {
                    let path = args.next().context("--template needs a file")?;
                    parsed.template = Some(PathBuf::from(path));
                }
                "--output" | "-o" => {
                    let path = args.next().context("--output needs a file")?;
                    parsed.output = Some(PathBuf::from(path));
                }
                "--warnings" => parsed.warnings = true,
                "--json" => parsed.json = true,
                "--version" | "-V" => parsed.version = true,
                "--batch" => {
                    let dir = args.next().context("--batch needs DIR and OUTDIR")?;
                    let out = args.next().context("--batch needs DIR and OUTDIR")?;
                    parsed.batch = Some((PathBuf::from(dir), PathBuf::from(out)));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                other if parsed.input.is_none() => parsed.input = Some(other.to_string()),
                other => bail!("unexpected argument {other}"),
            }
        }
        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("usage: songpress [--template FILE] [--output FILE] [--warnings] [--json] INPUT");
    eprintln!("       songpress [--template FILE] --batch DIR OUTDIR");
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
        Ok(text)
    } else {
        fs_err::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn report_warnings(conversion: &Conversion) {
    for warning in &conversion.warnings {
        eprintln!("warning: {warning}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("songpress=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = Config::load()?;
    if args.version {
        println!("{} {}", config.app_name(), config.app_version());
        return Ok(());
    }
    tracing::debug!("{} {} starting", config.app_name(), config.app_version());
    let options = config.options();

    let template = match args.template.as_ref().or(config.template_path.as_ref()) {
        Some(path) => Some(load_template(path)?),
        None => None,
    };

    if let Some((dir, out_dir)) = &args.batch {
        let report = convert_directory(dir, out_dir, &config.extensions, &options, template.as_deref());
        for outcome in &report.converted {
            println!("{} -> {}", outcome.source.display(), outcome.output.display());
        }
        if !report.failed.is_empty() {
            bail!("{} file(s) failed to convert", report.failed.len());
        }
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        print_usage();
        bail!("no input given");
    };

    let source = read_input(input)?;
    let conversion = convert(&source, &options);

    if args.warnings {
        report_warnings(&conversion);
    }

    let rendered = if args.json {
        serde_json::to_string_pretty(&conversion)?
    } else if let Some(template) = &template {
        fill_template(template, &conversion.fragment)?
    } else {
        conversion.fragment
    };

    match &args.output {
        Some(path) => fs_err::write(path, rendered)?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}
