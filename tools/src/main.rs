use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use block::{Decoder, Limits};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use snapdec_tools::{format_report_pretty, inspect_block, BlockReport};

#[derive(Parser)]
#[command(
    name = "snapdec",
    version,
    about = "Snappy block decompression and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decompress a raw Snappy block.
    Decompress {
        /// Path to the compressed block.
        input: PathBuf,
        /// Output path (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Maximum accepted uncompressed length in bytes.
        #[arg(long)]
        max_len: Option<usize>,
    },
    /// Inspect block structure and element statistics.
    Inspect {
        /// Path to a block, or a directory of blocks.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected blocks.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected blocks (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// List every element.
        #[arg(long)]
        elements: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Pretty)]
        format: ReportFormat,
        /// Maximum accepted uncompressed length in bytes.
        #[arg(long)]
        max_len: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Decompress {
            input,
            output,
            max_len,
        } => {
            let bytes =
                fs::read(&input).with_context(|| format!("read block {}", input.display()))?;
            let decoder = Decoder::with_limits(limits(max_len));
            let decoded = decoder
                .decompress(&bytes)
                .with_context(|| format!("decompress {}", input.display()))?;
            match output {
                Some(path) => fs::write(&path, &decoded)
                    .with_context(|| format!("write output {}", path.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&decoded).context("write stdout")?;
                    stdout.flush().context("flush stdout")?;
                }
            }
        }
        Command::Inspect {
            path,
            glob,
            sort,
            limit,
            elements,
            format,
            max_len,
        } => {
            let limits = limits(max_len);
            if path.is_dir() {
                let entries = collect_block_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let report = inspect_path(&entry.path, &limits, elements)?;
                    if matches!(format, ReportFormat::Pretty) {
                        println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    }
                    print_report(&report, format)?;
                }
            } else {
                let report = inspect_path(&path, &limits, elements)?;
                print_report(&report, format)?;
            }
        }
    }
    Ok(())
}

fn limits(max_len: Option<usize>) -> Limits {
    match max_len {
        Some(max) => Limits::default().with_max_uncompressed_len(max),
        None => Limits::default(),
    }
}

fn inspect_path(path: &Path, limits: &Limits, elements: bool) -> Result<BlockReport> {
    let bytes = fs::read(path).with_context(|| format!("read block {}", path.display()))?;
    inspect_block(&bytes, limits, elements).with_context(|| format!("inspect {}", path.display()))
}

fn print_report(report: &BlockReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        ReportFormat::Pretty => {
            print!("{}", format_report_pretty(report));
        }
    }
    Ok(())
}

struct BlockEntry {
    path: PathBuf,
    size: u64,
}

fn collect_block_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<BlockEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(BlockEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<BlockEntry>, sort: Option<InspectSort>) -> Vec<BlockEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
