use std::fs;

use log::{debug, info};

use super::codec::decode_message;
use super::compress::{write_output, SUFFIX};
use super::container::read_container;
use crate::error::Result;
use crate::tools::cli::HzOpts;
use crate::tools::report::report_sizes;

/// Name of the restored file for `fname`: the suffix comes off, or ".out" goes on.
pub fn restored_name(fname: &str) -> String {
    match fname.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", fname),
    }
}

/// Read and decode a container file fully in memory.
fn restore(fname: &str) -> Result<(usize, Vec<u8>)> {
    let data = fs::read(fname)?;
    let (table, bits) = read_container(&data)?;
    debug!(
        "{}: {} table entries, {} payload bits.",
        fname,
        table.len(),
        bits.len()
    );
    Ok((data.len(), decode_message(&table, &bits)?))
}

/// Decompress the file `fname` as set up in opts (HzOpts).
pub fn decompress(opts: &HzOpts, fname: &str) -> Result<()> {
    let (compressed_len, restored) = restore(fname)?;

    let out_name = restored_name(fname);
    write_output(opts, &out_name, |w| {
        w.write_all(&restored)?;
        Ok(restored.len())
    })?;
    report_sizes(fname, compressed_len, restored.len());

    if !opts.keep_input_files {
        fs::remove_file(fname)?;
        debug!("Removed {}.", fname);
    }
    Ok(())
}

/// Check that `fname` decodes cleanly. Writes nothing.
pub fn test_file(fname: &str) -> Result<()> {
    let (compressed_len, restored) = restore(fname)?;
    info!(
        "{}: ok ({} bytes decode to {}).",
        fname,
        compressed_len,
        restored.len()
    );
    Ok(())
}
