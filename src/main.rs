#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{error, info, warn};
use structopt::StructOpt;

use puffstore::{decompress, stored_size, Config, Framing, StoredError};

#[derive(StructOpt, Debug)]
#[structopt(about = "Decode a single DEFLATE stored block")]
struct Opts {
    /// Verbosity, repeat for more.
    #[structopt(short = "v", parse(from_occurrences))]
    verbose: usize,

    /// Input starts with LEN/NLEN instead of the block header bits.
    #[structopt(long)]
    raw: bool,

    /// Only print how many bytes the block decodes to.
    #[structopt(long)]
    dry_run: bool,

    /// Fixed output buffer size in bytes.
    #[structopt(long)]
    capacity: Option<usize>,

    /// Input file, stdin when omitted.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn run(opts: &Opts) -> Result<()> {
    let config = Config {
        framing: if opts.raw {
            Framing::Raw
        } else {
            Framing::BlockHeader
        },
        capacity: opts.capacity,
    };
    let mut input = open_input(opts.input.as_ref())?;
    let stdout = io::stdout();

    if opts.dry_run {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        let size = stored_size(&data, config.framing)?;
        writeln!(stdout.lock(), "{}", size)?;
        return Ok(());
    }

    let size = decompress(input, BufWriter::new(stdout.lock()), &config)?;
    info!("wrote {} bytes", size);
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::from_args();
    stderrlog::new()
        .verbosity(opts.verbose)
        .init()
        .context("failed to initialize logging")?;

    let result = run(&opts);
    if let Err(err) = &result {
        match err.downcast_ref::<StoredError>() {
            Some(StoredError::OutputFull) => {
                warn!("output buffer too small, rerun with --dry-run to get the required size")
            }
            Some(err) if err.is_corrupt() => error!("input is corrupt"),
            _ => {}
        }
    }
    result
}
