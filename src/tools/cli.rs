use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "A Huffman coding file compressor",
    long_about = None)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Show the frequency and code table of each compressed file
    #[clap(short = 'T', long = "table")]
    table: bool,

    /// Only report errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Sets verbosity. -v shows debug output, -vv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Every user settable option that controls the driver.
#[derive(Debug)]
pub struct HzOpts {
    /// Names of files to read for input
    pub files: Vec<String>,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Report the frequency/code table after compressing
    pub show_table: bool,
    /// Log level
    pub verbosity: LevelFilter,
}

impl HzOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            op_mode: Mode::Zip,
            output: Output::File,
            keep_input_files: false,
            force_overwrite: false,
            show_table: false,
            verbosity: LevelFilter::Info,
        }
    }
}

impl Default for HzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy command line stuff into our internal structure. When several modes are given the last
/// one checked wins: test over decompress over compress.
impl From<Args> for HzOpts {
    fn from(args: Args) -> Self {
        let mut opts = HzOpts::new();
        opts.files = args.files;
        if args.compress {
            opts.op_mode = Mode::Zip
        };
        if args.decompress {
            opts.op_mode = Mode::Unzip
        };
        if args.test {
            opts.op_mode = Mode::Test
        };
        if args.stdout {
            opts.output = Output::Stdout;
            // Nothing on disk replaces the input, so it stays
            opts.keep_input_files = true;
        };
        opts.keep_input_files |= args.keep;
        opts.force_overwrite = args.force;
        opts.show_table = args.table;
        opts.verbosity = match (args.quiet, args.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        opts
    }
}

/// Parse the command line.
pub fn hzopts_init() -> HzOpts {
    HzOpts::from(Args::parse())
}

/// Report the settings in effect. Call once logging is up.
pub fn log_opts(opts: &HzOpts) {
    info!("Verbosity set to {}", opts.verbosity);
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output goes to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
}
