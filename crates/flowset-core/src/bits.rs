use std::marker::PhantomData;

use crate::{Idx, WordCountMismatch};

pub type Word = usize;

/// Bits per storage word.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of words needed to store `bits` bits.
#[inline]
pub const fn num_words(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

#[inline]
const fn word_index_and_mask(bit: usize) -> (usize, Word) {
    (bit / WORD_BITS, 1 << (bit % WORD_BITS))
}

/// A fixed-size packed bitset over typed dense indices.
///
/// Unlike a growable bitset, the number of words is fixed at construction from the domain size,
/// so two buffers over the same domain can always be combined word-by-word. Bits at positions
/// `>= domain_size` in the last word are kept at zero by every operation.
pub struct PackedBits<I> {
    words: Vec<Word>,
    domain_size: usize,
    _marker: PhantomData<I>,
}

impl<I: Idx> PackedBits<I> {
    /// Creates an all-zero buffer able to hold indices `0..domain_size`.
    pub fn new_empty(domain_size: usize) -> Self {
        Self { words: vec![0; num_words(domain_size)], domain_size, _marker: PhantomData }
    }

    #[inline]
    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Zeroes every word, retaining the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Population count across all words.
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if the bit for `i` is set. Indices outside the domain are never set.
    #[inline]
    pub fn contains(&self, i: I) -> bool {
        let bit = i.idx();
        if bit >= self.domain_size {
            return false;
        }
        let (word, mask) = word_index_and_mask(bit);
        self.words[word] & mask != 0
    }

    /// Sets the bit for `i`.
    ///
    /// Returns `true` if the bit was previously clear.
    pub fn insert(&mut self, i: I) -> bool {
        let bit = i.idx();
        assert!(bit < self.domain_size, "index {bit} outside domain of size {}", self.domain_size);
        let (word, mask) = word_index_and_mask(bit);
        let word = &mut self.words[word];
        let added = *word & mask == 0;
        *word |= mask;
        added
    }

    /// Clears the bit for `i`.
    ///
    /// Returns `true` if the bit was previously set.
    pub fn remove(&mut self, i: I) -> bool {
        let bit = i.idx();
        if bit >= self.domain_size {
            return false;
        }
        let (word, mask) = word_index_and_mask(bit);
        let word = &mut self.words[word];
        let removed = *word & mask != 0;
        *word &= !mask;
        removed
    }

    /// Clears every bit at a position `>= bit`.
    pub fn clear_from(&mut self, bit: usize) {
        if bit >= self.words.len() * WORD_BITS {
            return;
        }
        let (word, mask) = word_index_and_mask(bit);
        self.words[word] &= mask - 1;
        self.words[word + 1..].fill(0);
    }

    fn check_word_count(&self, other: &Self) -> Result<(), WordCountMismatch> {
        if self.words.len() != other.words.len() {
            return Err(WordCountMismatch {
                expected: self.words.len(),
                found: other.words.len(),
            });
        }
        Ok(())
    }

    fn combine(
        &mut self,
        a: &Self,
        b: &Self,
        op: impl Fn(Word, Word) -> Word,
    ) -> Result<(), WordCountMismatch> {
        self.check_word_count(a)?;
        self.check_word_count(b)?;
        for ((out, &a), &b) in self.words.iter_mut().zip(&a.words).zip(&b.words) {
            *out = op(a, b);
        }
        Ok(())
    }

    /// `self = a | b`
    pub fn union_of(&mut self, a: &Self, b: &Self) -> Result<(), WordCountMismatch> {
        self.combine(a, b, |a, b| a | b)
    }

    /// `self = a & b`
    pub fn intersection_of(&mut self, a: &Self, b: &Self) -> Result<(), WordCountMismatch> {
        self.combine(a, b, |a, b| a & b)
    }

    /// `self = a & !b`
    pub fn difference_of(&mut self, a: &Self, b: &Self) -> Result<(), WordCountMismatch> {
        self.combine(a, b, |a, b| a & !b)
    }

    /// `self = !a`, keeping only the first `valid_bits` bits.
    pub fn complement_of(&mut self, a: &Self, valid_bits: usize) -> Result<(), WordCountMismatch> {
        self.check_word_count(a)?;
        for (out, &a) in self.words.iter_mut().zip(&a.words) {
            *out = !a;
        }
        self.clear_from(valid_bits.min(self.domain_size));
        Ok(())
    }

    /// Inverts every bit in place, keeping only the first `valid_bits` bits.
    pub fn complement_in_place(&mut self, valid_bits: usize) {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
        self.clear_from(valid_bits.min(self.domain_size));
    }

    /// Overwrites `self` word-for-word with `src`.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), WordCountMismatch> {
        self.check_word_count(src)?;
        self.words.copy_from_slice(&src.words);
        Ok(())
    }

    /// Applies `op` word-by-word against `other`, returning whether any bit changed.
    fn update(
        &mut self,
        other: &Self,
        op: impl Fn(Word, Word) -> Word,
    ) -> Result<bool, WordCountMismatch> {
        self.check_word_count(other)?;
        let mut changed = 0;
        for (word, &other) in self.words.iter_mut().zip(&other.words) {
            let new = op(*word, other);
            changed |= *word ^ new;
            *word = new;
        }
        Ok(changed != 0)
    }

    pub fn union_with(&mut self, other: &Self) -> Result<bool, WordCountMismatch> {
        self.update(other, |a, b| a | b)
    }

    pub fn intersect_with(&mut self, other: &Self) -> Result<bool, WordCountMismatch> {
        self.update(other, |a, b| a & b)
    }

    pub fn subtract_with(&mut self, other: &Self) -> Result<bool, WordCountMismatch> {
        self.update(other, |a, b| a & !b)
    }

    /// Iterates over the set indices in ascending order.
    #[inline]
    pub fn iter(&self) -> BitIter<'_, I> {
        BitIter::new(&self.words, 0, self.domain_size)
    }

    /// Iterates over the set indices in `low..=high`, ascending. `high` is clamped to the domain.
    pub fn iter_range(&self, low: usize, high: usize) -> BitIter<'_, I> {
        let end = high.saturating_add(1).min(self.domain_size);
        BitIter::new(&self.words, low, end)
    }

    /// Returns the first set index at or after `bit`.
    pub fn next_set_from(&self, bit: usize) -> Option<I> {
        BitIter::new(&self.words, bit, self.domain_size).next()
    }
}

impl<I> Clone for PackedBits<I> {
    fn clone(&self) -> Self {
        Self { words: self.words.clone(), domain_size: self.domain_size, _marker: PhantomData }
    }

    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
        self.domain_size = source.domain_size;
    }
}

impl<I> PartialEq for PackedBits<I> {
    fn eq(&self, other: &Self) -> bool {
        self.domain_size == other.domain_size && self.words == other.words
    }
}

impl<I> Eq for PackedBits<I> {}

impl<I> std::fmt::Debug for PackedBits<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedBits")
            .field("domain_size", &self.domain_size)
            .field("words", &self.words)
            .finish()
    }
}

/// Ascending iterator over the set bits of a word slice, bounded to `[start, end)`.
pub struct BitIter<'a, I> {
    words: &'a [Word],
    /// Bits of the current word not yet yielded.
    word: Word,
    /// Bit position of the current word's least significant bit.
    offset: usize,
    end: usize,
    _marker: PhantomData<I>,
}

impl<'a, I: Idx> BitIter<'a, I> {
    fn new(words: &'a [Word], start: usize, end: usize) -> Self {
        if start >= end {
            return Self { words: &[], word: 0, offset: 0, end: 0, _marker: PhantomData };
        }
        let first = start / WORD_BITS;
        let word = words[first] & (Word::MAX << (start % WORD_BITS));
        Self {
            words: &words[first + 1..],
            word,
            offset: first * WORD_BITS,
            end,
            _marker: PhantomData,
        }
    }
}

impl<I: Idx> Iterator for BitIter<'_, I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        loop {
            if self.word != 0 {
                let bit = self.offset + self.word.trailing_zeros() as usize;
                if bit >= self.end {
                    self.word = 0;
                    self.words = &[];
                    return None;
                }
                self.word &= self.word - 1;
                return Some(I::from_usize(bit));
            }
            let (&next, rest) = self.words.split_first()?;
            self.word = next;
            self.words = rest;
            self.offset += WORD_BITS;
        }
    }
}

impl<I: Idx> std::iter::FusedIterator for BitIter<'_, I> {}
