//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use huffzip::compression::compress::compress;
use huffzip::compression::decompress::{decompress, test_file};
use huffzip::tools::cli::{hzopts_init, log_opts, Mode};

use log::{error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let options = hzopts_init();

    // Available log levels are Error, Warn, Info, Debug, Trace. Stdout may carry data (-c).
    if let Err(e) = TermLogger::init(
        options.verbosity,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("huffzip: could not start logging: {}", e);
    }
    log_opts(&options);

    if options.files.is_empty() {
        warn!("No input files given. Try --help.");
        return ExitCode::FAILURE;
    }

    //----- Figure how what we need to do and go do it, one file at a time
    let mut failures = 0;
    for fname in &options.files {
        let result = match options.op_mode {
            Mode::Zip => compress(&options, fname),
            Mode::Unzip => decompress(&options, fname),
            Mode::Test => test_file(fname),
        };
        if let Err(e) = result {
            error!("{}: {}", fname, e);
            failures += 1;
        }
    }

    info!("Done.");
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
