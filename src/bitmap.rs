/// Fixed-size presence set over a contiguous range of sequence offsets.
#[derive(Clone)]
pub struct Bitmap {
    words: Vec<u64>,
    bits: usize,
}

impl Bitmap {
    /// Bitmap with `bits` positions, all cleared.
    pub fn with_capacity(bits: usize) -> Self {
        Bitmap {
            words: vec![0; bits.div_ceil(64)],
            bits,
        }
    }

    /// Panics if `offset` is outside the bitmap; the caller sizes it to the
    /// observed range up front.
    pub fn insert(&mut self, offset: usize) {
        assert!(offset < self.bits, "offset {} outside bitmap of {}", offset, self.bits);
        self.words[offset / 64] |= 1 << (offset % 64);
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset < self.bits && self.words[offset / 64] & (1 << (offset % 64)) != 0
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Offsets not yet inserted, ascending.
    pub fn iter_unset(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.bits).filter(move |&i| !self.contains(i))
    }
}
