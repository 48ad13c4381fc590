use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};

use log::{debug, info, warn};

use super::codec::encode;
use super::container::write_container;
use crate::error::{CodecError, Result};
use crate::tools::cli::{HzOpts, Output};
use crate::tools::report::{report_sizes, report_table};

/// Suffix added to compressed files.
pub const SUFFIX: &str = ".huf";

/// Name of the compressed file for `fname`.
pub fn compressed_name(fname: &str) -> String {
    format!("{}{}", fname, SUFFIX)
}

/// Open an output file, refusing to replace an existing one unless forced.
pub(crate) fn create_output(fname: &str, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(fname).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => CodecError::OutputExists(fname.to_string()),
        _ => CodecError::Io(e),
    })
}

/// Send `write` either to a new file or to stdout. Returns the bytes written.
pub(crate) fn write_output<F>(opts: &HzOpts, out_name: &str, write: F) -> Result<usize>
where
    F: FnOnce(&mut dyn Write) -> Result<usize>,
{
    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)
        }
        Output::File => {
            let mut f_out = BufWriter::new(create_output(out_name, opts.force_overwrite)?);
            let result = write(&mut f_out).and_then(|written| {
                f_out.flush()?;
                Ok(written)
            });
            drop(f_out);
            match result {
                Ok(written) => {
                    info!("Wrote {}.", out_name);
                    Ok(written)
                }
                Err(e) => {
                    // Don't leave a partial file behind to block the next attempt
                    if let Err(rm) = fs::remove_file(out_name) {
                        warn!("Could not remove partial output {}: {}", out_name, rm);
                    }
                    Err(e)
                }
            }
        }
    }
}

/// Compress the file `fname` as set up in opts <HzOpts>.
pub fn compress(opts: &HzOpts, fname: &str) -> Result<()> {
    if fname.ends_with(SUFFIX) {
        warn!("{} already has the {} suffix, skipping it.", fname, SUFFIX);
        return Ok(());
    }

    // Read the whole message. The code needs every frequency before the first bit goes out.
    let data = fs::read(fname)?;
    debug!("Read {} bytes from {}.", data.len(), fname);

    let encoded = encode(&data)?;
    if opts.show_table {
        report_table(&encoded.freqs, &encoded.table);
    }

    let out_name = compressed_name(fname);
    let written = write_output(opts, &out_name, |w| {
        write_container(w, &encoded.table, &encoded.bits)
    })?;
    report_sizes(fname, data.len(), written);

    if !opts.keep_input_files {
        fs::remove_file(fname)?;
        debug!("Removed {}.", fname);
    }
    Ok(())
}
