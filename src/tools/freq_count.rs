/// Number of distinct symbols a byte can take.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count of every byte value in one input. Built once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Returns a frequency count of the input data.
    pub fn compute(data: &[u8]) -> Self {
        let mut counts = [0_u64; ALPHABET_SIZE];
        data.iter().for_each(|&el| counts[el as usize] += 1);
        Self { counts }
    }

    /// How many times the symbol occurred.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols that occurred at least once, with their counts, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(sym, &count)| (sym as u8, count))
    }

    /// Count of symbols that occurred at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
