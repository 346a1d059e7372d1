//! dumpfields - List the AcroForm fields of PDF files
//!
//! Prints every registered form field with the buffer lines its name and
//! values live on, optionally followed by document metadata and the
//! cross-reference anchors an incremental writer needs.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use indexmap::IndexMap;
use pdffields_core::api::parse_file;
use pdffields_core::{AcroField, CrossReference, MetaValue, PdfLines};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A command line tool for listing PDF form fields.
#[derive(Parser, Debug)]
#[command(name = "dumpfields")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to PDF files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit JSON instead of text
    #[arg(short = 'j', long, action = ArgAction::SetTrue)]
    json: bool,

    /// Include document metadata
    #[arg(short = 'm', long, action = ArgAction::SetTrue)]
    meta: bool,

    /// Include the xref/startxref anchors
    #[arg(short = 'x', long, action = ArgAction::SetTrue)]
    xref: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    file: String,
    fields: &'a IndexMap<String, AcroField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a IndexMap<String, MetaValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xref: Option<&'a CrossReference>,
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_meta<W: Write>(out: &mut W, meta: &IndexMap<String, MetaValue>) -> io::Result<()> {
    writeln!(out, "metadata:")?;
    for (key, value) in meta {
        match value {
            MetaValue::Text(text) => writeln!(out, "  {key}: {text}")?,
            MetaValue::Int(n) => writeln!(out, "  {key}: {n}")?,
            MetaValue::Pair(a, b) => writeln!(out, "  {key}: <{a}> <{b}>")?,
            MetaValue::Reference(num, generation) => {
                writeln!(out, "  {key}: {num} {generation} R")?
            }
        }
    }
    Ok(())
}

fn write_xref<W: Write>(out: &mut W, xref: &CrossReference) -> io::Result<()> {
    writeln!(out, "xref:")?;
    writeln!(out, "  line: {}", xref.line)?;
    writeln!(out, "  start pointer: {}", xref.start_pointer)?;
    writeln!(out, "  entries: {}", xref.count)?;
    writeln!(
        out,
        "  startxref: {} (line {})",
        xref.start_value, xref.start_line
    )?;
    Ok(())
}

fn write_field<W: Write>(out: &mut W, key: &str, field: &AcroField) -> io::Result<()> {
    let kind = field
        .field_type
        .as_ref()
        .map_or("-", |kind| kind.as_pdf_name());
    writeln!(out, "{key} [{kind}] obj {}", field.id)?;
    if field.full_name != field.name {
        writeln!(out, "  full name: {}", field.full_name)?;
    }
    if let Some(line) = field.current_value_line {
        writeln!(out, "  value line: {line}")?;
    }
    if let Some(line) = field.default_value_line {
        writeln!(out, "  default line: {line}")?;
    }
    if let Some(line) = field.tooltip_line {
        writeln!(out, "  tooltip line: {line}")?;
    }
    if field.flags != 0 {
        writeln!(out, "  flags: {:#x}", field.flags)?;
    }
    if field.max_len != 0 {
        writeln!(out, "  max length: {}", field.max_len)?;
    }
    if let Some(options) = &field.options {
        for (export, display) in options {
            writeln!(out, "  option: {export} => {display}")?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, path: &Path, doc: &PdfLines, args: &Args) -> io::Result<()> {
    writeln!(out, "# {}", path.display())?;
    for (key, field) in doc.fields() {
        write_field(out, key, field)?;
    }
    if args.meta {
        write_meta(out, doc.meta())?;
    }
    if args.xref
        && let Some(xref) = doc.cross_reference()
    {
        write_xref(out, xref)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let mut output = BufWriter::new(io::stdout());

    for path in &args.files {
        let doc = parse_file(path).with_context(|| format!("parsing {}", path.display()))?;
        debug!(file = %path.display(), fields = doc.fields().len(), "parsed");

        if args.json {
            let report = Report {
                file: path.display().to_string(),
                fields: doc.fields(),
                meta: args.meta.then(|| doc.meta()),
                xref: if args.xref { doc.cross_reference() } else { None },
            };
            serde_json::to_writer_pretty(&mut output, &report)?;
            writeln!(output)?;
        } else {
            write_text(&mut output, path, &doc, &args)?;
        }
    }

    output.flush()?;
    Ok(())
}
