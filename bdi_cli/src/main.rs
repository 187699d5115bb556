mod input;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bdi_core::format::{DEFAULT_BLOCK_LEN, DEFAULT_ELEMENT_WIDTH};
use bdi_core::{Codec, CompressedOutput, Tag};

use input::{load_table, parse_hex, parse_int, read_values, to_hex};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "bdi",
    about = "Base-Delta-Immediate cache-line compression: compress integer blocks and decode single values",
    version
)]
struct Cli {
    /// JSON config table to use instead of the standard one
    #[arg(long, global = true)]
    table: Option<PathBuf>,
    /// Element width in bytes: 1, 2, 4, or 8
    #[arg(short, long, global = true, default_value_t = DEFAULT_ELEMENT_WIDTH)]
    width: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a list of integers, one per line, block by block
    Compress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Elements per block (one cache line of 8-byte words by default)
        #[arg(short = 'n', long, default_value_t = DEFAULT_BLOCK_LEN)]
        block_len: usize,
        /// Print the compressed blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode one value from compressed bytes and its tag
    Decompress {
        /// Compressed block as a hex string
        #[arg(long)]
        hex: String,
        /// Element tag, decimal or 0x-prefixed hex
        #[arg(long)]
        tag: String,
    },
    /// Show how every scheme in the table fares on each block
    Inspect {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Elements per block
        #[arg(short = 'n', long, default_value_t = DEFAULT_BLOCK_LEN)]
        block_len: usize,
    },
    /// Print the active config table
    Table {
        /// Print as JSON (loadable with --table)
        #[arg(long)]
        json: bool,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BDI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_blocks(input: &Path, block_len: usize) -> anyhow::Result<Vec<Vec<u64>>> {
    if block_len == 0 {
        anyhow::bail!("block length must be at least 1");
    }
    let values = read_values(input)?;
    let blocks: Vec<Vec<u64>> = values.chunks(block_len).map(|c| c.to_vec()).collect();
    info!(values = values.len(), blocks = blocks.len(), "loaded input");
    Ok(blocks)
}

fn print_block(index: usize, block: &[u64], out: &CompressedOutput, bytes: &[u8]) {
    let how = if out.is_compressed() { "compressed with " } else { "" };
    println!("=== block {} ({}{}, encoding 0b{:04b}) ===", index, how, out.name, out.encoding);
    println!("  bytes : {}", to_hex(bytes));
    println!("  size  : {} -> {} bytes", out.original_size, out.size);
    if out.uses_stored_base() {
        println!("  base  : 0x{:x}", out.base);
    }
    for (i, (element, original)) in out.elements.iter().zip(block).enumerate() {
        print!(
            "  [{}] 0x{:x} is stored as 0x{:x} with tag 0x{:x}",
            i, original, element.value, element.tag
        );
        if let Some(base) = element.base {
            print!(" and the base 0x{:x}", base.value);
        }
        println!();
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(codec: &Codec, input: PathBuf, block_len: usize, json: bool) -> anyhow::Result<()> {
    let blocks = load_blocks(&input, block_len)?;

    let mut raw_total = 0u64;
    let mut compressed_total = 0u64;
    let mut reports = Vec::with_capacity(blocks.len());

    for (i, block) in blocks.iter().enumerate() {
        let out = codec
            .compress(block)
            .with_context(|| format!("compressing block {}", i))?;
        let bytes = out.to_bytes()?;
        raw_total += out.original_size as u64;
        compressed_total += out.size as u64;

        if json {
            reports.push(serde_json::json!({
                "block": i,
                "bytes": to_hex(&bytes),
                "output": out,
            }));
        } else {
            print_block(i, block, &out, &bytes);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    for line in summary(codec.element_width(), blocks.len(), raw_total, compressed_total) {
        eprintln!("{}", line);
    }
    Ok(())
}

/// Totals printed after `compress`, in plain bytes.
fn summary(width: u8, blocks: usize, raw_total: u64, compressed_total: u64) -> Vec<String> {
    let mut lines = vec![
        format!("  element width : {} bytes", width),
        format!("  blocks        : {}", blocks),
        format!("  input size    : {} bytes", raw_total),
        format!("  compressed    : {} bytes", compressed_total),
        format!("  saved         : {} bytes", raw_total as i64 - compressed_total as i64),
    ];
    if compressed_total > 0 {
        lines.push(format!(
            "  ratio         : {:.2}x",
            raw_total as f64 / compressed_total as f64
        ));
    }
    lines
}

fn run_decompress(codec: &Codec, hex_text: &str, tag: &str) -> anyhow::Result<()> {
    let bytes = parse_hex(hex_text).context("parsing --hex")?;
    let tag = Tag(parse_int(tag).context("parsing --tag")?);
    let fields = tag.parse();
    info!(
        encoding = fields.encoding,
        index = fields.index,
        zero_base = fields.is_zero_base,
        "decoding"
    );

    let value = codec.decompress(&bytes, tag)?;
    println!("0x{:x}", value);
    Ok(())
}

fn run_inspect(codec: &Codec, input: PathBuf, block_len: usize) -> anyhow::Result<()> {
    let blocks = load_blocks(&input, block_len)?;

    for (i, block) in blocks.iter().enumerate() {
        let chosen = codec.compress(block)?;
        let candidates = codec.candidates(block)?;

        println!("=== block {} ({} elements) ===", i, block.len());
        for config in codec.table().configs() {
            match candidates.iter().find(|c| c.encoding == config.encoding) {
                Some(c) => println!("  {:>14}  {:>4} bytes", config.name, c.size),
                None => println!("  {:>14}  does not fit", config.name),
            }
        }
        println!(
            "  chosen: {} ({} of {} bytes)",
            chosen.name, chosen.size, chosen.original_size
        );
    }
    Ok(())
}

fn run_table(codec: &Codec, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(codec.table())?);
        return Ok(());
    }

    println!(
        "  {:>14}  {:>8}  {:>4}  {:>5}  {}",
        "scheme", "encoding", "base", "delta", "bases"
    );
    println!("  {}", "-".repeat(50));
    for config in codec.table().configs() {
        let steps: Vec<String> = config
            .bases
            .iter()
            .map(|b| match b.immediate {
                Some(v) => format!("imm({})", v),
                None => format!("search({}B)", b.base_size),
            })
            .collect();
        println!(
            "  {:>14}  {:>8}  {:>4}  {:>5}  {}",
            config.name,
            format!("0b{:04b}", config.encoding),
            config.base_size(),
            config.delta_size(),
            steps.join(" -> ")
        );
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = load_table(cli.table.as_deref())?;
    let codec = Codec::new(table, cli.width)?;

    match cli.command {
        Commands::Compress {
            input,
            block_len,
            json,
        } => run_compress(&codec, input, block_len, json),
        Commands::Decompress { hex, tag } => run_decompress(&codec, &hex, &tag),
        Commands::Inspect { input, block_len } => run_inspect(&codec, input, block_len),
        Commands::Table { json } => run_table(&codec, json),
    }
}
