use std::ascii::escape_default;

use log::info;

use super::freq_count::FrequencyTable;
use crate::huffman_coding::code_table::CodeTable;

/// Printable form of a byte: the character itself, or an escape such as `\n` or `\x00`.
pub fn show_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        _ => escape_default(symbol).to_string(),
    }
}

/// Rows of the table report, shortest codes first: (symbol, weight, code).
pub fn table_rows(freqs: &FrequencyTable, table: &CodeTable) -> Vec<String> {
    table
        .serial_order()
        .into_iter()
        .map(|(symbol, code)| {
            format!(
                "{:<8}{:>12}    {}",
                show_symbol(symbol),
                freqs.get(symbol),
                code
            )
        })
        .collect()
}

/// Logs the frequency and code table of one message.
pub fn report_table(freqs: &FrequencyTable, table: &CodeTable) {
    info!("{:<8}{:>12}    {}", "Symbol", "Weight", "Huffman code");
    table_rows(freqs, table).iter().for_each(|row| info!("{}", row));
}

/// Logs a before/after size line.
pub fn report_sizes(name: &str, before: usize, after: usize) {
    let ratio = if before == 0 {
        0.0
    } else {
        after as f64 * 100.0 / before as f64
    };
    info!("{}: {} -> {} bytes ({:.1}%)", name, before, after, ratio);
}
