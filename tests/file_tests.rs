mod common;

use std::fs;
use std::path::Path;

use huffzip::compression::compress::{compress, compressed_name};
use huffzip::compression::container::read_container;
use huffzip::compression::decompress::{decompress, restored_name, test_file};
use huffzip::tools::cli::HzOpts;
use huffzip::{decode_message, CodecError};
use tempfile::TempDir;

use crate::common::*;

fn write_input(dir: &TempDir, name: &str, data: &[u8]) -> String {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn compress_then_decompress_restores_the_file() {
    let dir = TempDir::new().unwrap();
    let data = skewed_bytes(41, MESSAGE_LENGTH, 26);
    let input = write_input(&dir, "message.txt", &data);
    let opts = HzOpts::new();

    compress(&opts, &input).unwrap();
    let packed = compressed_name(&input);
    assert!(!Path::new(&input).exists());
    assert!(fs::metadata(&packed).unwrap().len() < data.len() as u64);

    test_file(&packed).unwrap();
    decompress(&opts, &packed).unwrap();
    assert!(!Path::new(&packed).exists());
    assert_eq!(restored_name(&packed), input);
    assert_eq!(fs::read(&input).unwrap(), data);
}

#[test]
fn compressed_file_is_a_container() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "abra.txt", b"abracadabra");
    let mut opts = HzOpts::new();
    opts.keep_input_files = true;

    compress(&opts, &input).unwrap();
    assert!(Path::new(&input).exists());

    let (table, bits) = read_container(&fs::read(compressed_name(&input)).unwrap()).unwrap();
    assert_eq!(bits.len(), 23);
    assert_eq!(decode_message(&table, &bits).unwrap(), b"abracadabra");
}

#[test]
fn empty_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "empty", b"");
    let opts = HzOpts::new();

    compress(&opts, &input).unwrap();
    decompress(&opts, &compressed_name(&input)).unwrap();
    assert!(fs::read(&input).unwrap().is_empty());
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "keep.txt", b"to be or not to be");
    let packed = write_input(&dir, "keep.txt.huf", b"already here");
    let mut opts = HzOpts::new();
    opts.keep_input_files = true;

    assert!(matches!(
        compress(&opts, &input),
        Err(CodecError::OutputExists(_))
    ));
    assert_eq!(fs::read(&packed).unwrap(), b"already here");

    opts.force_overwrite = true;
    compress(&opts, &input).unwrap();
    test_file(&packed).unwrap();
}

#[test]
fn damaged_files_are_rejected() {
    let dir = TempDir::new().unwrap();
    let junk = write_input(&dir, "junk.huf", b"definitely not huffman");
    assert!(matches!(
        test_file(&junk),
        Err(CodecError::InvalidContainer(_))
    ));

    let input = write_input(&dir, "short.txt", &uniform_bytes(43, 1_000));
    let mut opts = HzOpts::new();
    opts.keep_input_files = true;
    compress(&opts, &input).unwrap();
    let packed = compressed_name(&input);
    let mut bytes = fs::read(&packed).unwrap();
    bytes.truncate(bytes.len() / 2);
    fs::write(&packed, &bytes).unwrap();
    assert!(test_file(&packed).is_err());
}
