
//! Decode the symbols of a whole block.
//! A block carries several Huffman tables,
//! and a selector for each group of symbols chooses the table to decode that group with.

use smallvec::SmallVec;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTree;
use crate::io::BitSource;
use crate::symbol::{Symbol, check_alphabet_size};

/// Number of symbols decoded with the same table.
pub const GROUP_SIZE: usize = 50;

/// A block contains at least this many tables.
pub const MIN_TABLES: usize = 2;

/// A block contains at most this many tables.
pub const MAX_TABLES: usize = 6;


/// The Huffman tables of a single block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTables {
    trees: SmallVec<[HuffmanTree; MAX_TABLES]>,
    alphabet_size: usize,
}

/// Decodes the symbols of a block, one group of symbols per selector.
/// Yields the end of the block as the last symbol.
/// Stops after the first error.
#[derive(Debug)]
pub struct SymbolStream<'t, S> {
    tables: &'t HuffmanTables,
    selectors: &'t [u8],
    source: &'t mut S,

    /// Number of symbols decoded so far.
    decoded: usize,

    finished: bool,
}


impl HuffmanTables {

    /// Build one tree per list of code lengths.
    /// Each list must contain exactly one length per symbol of the alphabet.
    pub fn new(alphabet_size: usize, code_lengths: &[impl AsRef<[u8]>]) -> Result<Self> {
        check_alphabet_size(alphabet_size)?;

        if code_lengths.len() < MIN_TABLES || code_lengths.len() > MAX_TABLES {
            return Err(Error::invalid("number of huffman tables"));
        }

        let trees = code_lengths.iter()
            .map(|lengths| {
                let lengths = lengths.as_ref();

                if lengths.len() != alphabet_size {
                    return Err(Error::invalid("code length count does not match alphabet size"));
                }

                HuffmanTree::new(lengths)
            })
            .collect::<Result<SmallVec<[HuffmanTree; MAX_TABLES]>>>()?;

        Ok(HuffmanTables { trees, alphabet_size })
    }

    /// Number of symbols in the alphabet of this block.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// The tree at the specified index, if any.
    pub fn tree(&self, index: usize) -> Option<&HuffmanTree> {
        self.trees.get(index)
    }

    /// Decode symbols lazily. The table for the `n`-th group of `GROUP_SIZE` symbols is `selectors[n]`.
    pub fn symbols<'t, S: BitSource>(&'t self, selectors: &'t [u8], source: &'t mut S) -> SymbolStream<'t, S> {
        SymbolStream { tables: self, selectors, source, decoded: 0, finished: false }
    }

    /// Decode all symbols up to and including the end of the block.
    pub fn decode_all(&self, selectors: &[u8], source: &mut impl BitSource) -> Result<Vec<Symbol>> {
        self.symbols(selectors, source).collect()
    }
}


impl<'t, S: BitSource> SymbolStream<'t, S> {

    fn next_symbol(&mut self) -> Result<Symbol> {
        let group = self.decoded / GROUP_SIZE;

        let selector = *self.selectors.get(group)
            .ok_or_else(|| Error::invalid("insufficient selectors for number of symbols"))?;

        let tables = self.tables;
        let tree = tables.tree(usize::from(selector))
            .ok_or_else(|| Error::invalid("selector refers to missing huffman table"))?;

        let value = tree.decode(&mut *self.source)?;
        self.decoded += 1;

        Symbol::from_value(value, tables.alphabet_size)
    }
}

impl<'t, S: BitSource> Iterator for SymbolStream<'t, S> {
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_symbol();
        self.finished = !matches!(result, Ok(symbol) if symbol != Symbol::EndOfBlock);
        Some(result)
    }
}

impl<'t, S: BitSource> std::iter::FusedIterator for SymbolStream<'t, S> {}
