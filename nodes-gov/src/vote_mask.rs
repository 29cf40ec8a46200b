multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Number of proposers a mask can hold; one bit per proposer slot.
pub const MASK_BITS: usize = 256;

const WORD_BITS: usize = 64;
const WORDS: usize = MASK_BITS / WORD_BITS;

// ============================================================
// VoteMask: fixed-width 256-bit approval set.
// Bit `i` belongs to the proposer at position `i` of the
// proposer set the proposal was created under.
// ============================================================

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug, Default,
)]
pub struct VoteMask {
    words: [u64; WORDS],
}

impl VoteMask {
    pub fn single(bit: usize) -> Self {
        let mut mask = VoteMask::default();
        mask.set(bit, true);
        mask
    }

    pub fn set(&mut self, bit: usize, approve: bool) {
        let flag = 1u64 << (bit % WORD_BITS);
        let word = &mut self.words[bit / WORD_BITS];
        if approve {
            *word |= flag;
        } else {
            *word &= !flag;
        }
    }

    pub fn contains(&self, bit: usize) -> bool {
        bit < MASK_BITS && self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0
    }

    /// Population count.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Strict majority of `voters`.
    pub fn is_majority_of(&self, voters: usize) -> bool {
        self.count() * 2 > voters
    }
}
