/// Fixed-width bitset recording which edges cross a given edge.
///
/// One mask is kept (lazily) per edge, with bit `i` set iff edge `i`
/// crosses the owning edge in both interiors. The width is fixed to
/// the number of edges in the graph at construction; the edge set
/// never changes, so masks are indexed directly and invalidated by
/// dropping the whole mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    blocks: Vec<u64>,
    n_bits: usize,
}

const BLOCK_BITS: usize = 64;

impl EdgeMask {
    /// An all-zeros mask of width `n_bits`.
    pub fn new(n_bits: usize) -> Self {
        EdgeMask {
            blocks: vec![0; (n_bits + BLOCK_BITS - 1) / BLOCK_BITS],
            n_bits,
        }
    }

    /// Number of bits the mask holds.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_bits == 0
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.n_bits);
        self.blocks[bit / BLOCK_BITS] |= 1 << (bit % BLOCK_BITS);
    }

    #[inline]
    pub fn get(&self, bit: usize) -> bool {
        debug_assert!(bit < self.n_bits);
        self.blocks[bit / BLOCK_BITS] & (1 << (bit % BLOCK_BITS)) != 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterator over the indices of set bits, in increasing order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(i, &block)| BlockOnes {
                block,
                base: i * BLOCK_BITS,
            })
    }

    /// Iterator over the indices where `self` and `other` disagree
    /// (the symmetric difference), in increasing order.
    ///
    /// Both masks must have the same width.
    pub fn flipped<'a>(&'a self, other: &'a EdgeMask) -> impl Iterator<Item = usize> + 'a {
        assert_eq!(
            self.n_bits, other.n_bits,
            "cannot diff masks of different widths"
        );
        self.blocks
            .iter()
            .zip(other.blocks.iter())
            .enumerate()
            .flat_map(|(i, (&a, &b))| BlockOnes {
                block: a ^ b,
                base: i * BLOCK_BITS,
            })
    }
}

/// Walks the set bits of a single block via trailing-zeros.
struct BlockOnes {
    block: u64,
    base: usize,
}

impl Iterator for BlockOnes {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.block == 0 {
            None
        } else {
            let tz = self.block.trailing_zeros() as usize;
            self.block &= self.block - 1;
            Some(self.base + tz)
        }
    }
}
