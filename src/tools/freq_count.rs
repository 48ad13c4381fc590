use rustc_hash::FxHashMap;

/// Symbol to occurrence count. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: FxHashMap<u8, u64>,
}

impl FrequencyTable {
    /// Build a table from explicit counts. Zero counts are dropped; repeated symbols add up.
    pub fn from_counts<I: IntoIterator<Item = (u8, u64)>>(counts: I) -> Self {
        let mut table = FrequencyTable::default();
        for (symbol, count) in counts.into_iter().filter(|&(_, count)| count > 0) {
            *table.counts.entry(symbol).or_insert(0) += count;
        }
        table
    }

    /// Count for `symbol`, 0 if it never occurred.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the message.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (symbol, count) pairs ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> {
        let mut pairs: Vec<(u8, u64)> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}

/// Returns a frequency count of the input data.
pub fn analyze(data: &[u8]) -> FrequencyTable {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    FrequencyTable::from_counts((0..=255_u8).map(|symbol| (symbol, freqs[symbol as usize])))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_every_occurrence() {
        let table = analyze(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = analyze(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn no_zero_counts_are_stored() {
        let table = FrequencyTable::from_counts(vec![(1, 0), (2, 3), (2, 1)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(2, 4)]);
    }

    #[test]
    fn iteration_is_ordered_by_symbol() {
        let table = analyze(&[255, 0, 7, 0]);
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![0, 7, 255]);
    }
}
