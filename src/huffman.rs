//! Canonical Huffman trees as used by bzip2 blocks.
//! The tree is rebuilt for every block from nothing but the code length of each symbol.
// see https://sourceware.org/bzip2/ for the format

use crate::error::{Error, Result};
use crate::io::BitSource;
use bit_field::BitField;

const EMPTY_TREE: &'static str = "empty huffman tree";
const EQUAL_SYMBOLS: &'static str = "equal symbols in huffman tree";
const INVALID_CODE_LENGTH: &'static str = "huffman code length exceeds 32 bits";

/// Codes are packed into the most significant end of this many bits.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Marks a child that is a leaf, whose symbol is stored inline in the parent.
/// Can never be a node index, as a tree has fewer nodes than symbols.
const LEAF: u16 = u16::MAX;


/// A binary tree which is navigated bit by bit to reach a symbol.
/// Symbols are `u16` because the bzip2 alphabet holds the two run-length symbols
/// and the end-of-block symbol in addition to all move-to-front ranks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {

    /// All non-leaf nodes. `nodes[0]` is the root.
    nodes: Vec<HuffmanNode>,
}

/// A non-leaf node. Leaves have no node of their own:
/// if a child index is `LEAF`, the symbol of that child is stored in the value on the same side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct HuffmanNode {

    /// Followed on a 1 bit.
    left: u16,

    /// Followed on a 0 bit.
    right: u16,

    left_value: u16,
    right_value: u16,
}

/// The code of a symbol, left-justified.
/// Its length is implied by the partition and not stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HuffmanCode {
    code: u32,
    symbol: u16,
}

/// Fills the pre-allocated nodes of a tree, in the order of the recursive partition.
struct TreeBuilder {
    nodes: Vec<HuffmanNode>,
    next_node: usize,
}


impl HuffmanTree {

    /// Build the canonical tree for the code length of each symbol,
    /// where the index of a length is its symbol.
    /// Lengths may range from 0 to 32 bits.
    ///
    /// Panics if fewer than two lengths are given,
    /// as every bzip2 alphabet contains at least two symbols.
    pub fn new(lengths: &[u8]) -> Result<Self> {
        assert!(lengths.len() >= 2, "huffman tree needs at least two symbols");
        assert!(lengths.len() <= usize::from(LEAF), "too many symbols for a huffman tree");

        if lengths.iter().any(|&length| length > MAX_CODE_LENGTH) {
            return Err(Error::invalid(INVALID_CODE_LENGTH));
        }

        let codes = canonical_codes(lengths);

        // a tree with n leaves has exactly n - 1 inner nodes
        let mut builder = TreeBuilder {
            nodes: vec![HuffmanNode::default(); codes.len() - 1],
            next_node: 0,
        };

        builder.build_node(&codes, 0)?;
        Ok(HuffmanTree { nodes: builder.nodes })
    }

    /// Read bits from the source and walk the tree until a symbol is found.
    /// Returns `Error::Truncated` if the source ends before a leaf is reached.
    #[inline]
    pub fn decode(&self, source: &mut impl BitSource) -> Result<u16> {
        let mut node_index = 0_usize; // node 0 is the root

        loop {
            let node = &self.nodes[node_index];

            let bit = source.read_bit()?;

            // load both sides unconditionally, so that selecting one does not require a branch
            let children = [node.right, node.left];
            let values = [node.right_value, node.left_value];
            let side = usize::from(bit & 1);

            let child = children[side];
            if child == LEAF {
                return Ok(values[side]);
            }

            node_index = usize::from(child);
        }
    }

    /// Number of non-leaf nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}


/// Assign each symbol its code, sorted by code.
///
/// Symbols are ordered by length, ties broken by symbol value,
/// so the codes can be reconstructed from the lengths alone.
/// Codes are counted up starting at the longest code,
/// so a shorter code has a numerically higher value.
/// The tree stores these codes complemented, which yields the usual
/// canonical bit strings, with the first symbol of the shortest length at all zeroes.
fn canonical_codes(lengths: &[u8]) -> Vec<HuffmanCode> {
    let mut pairs: Vec<(u8, u16)> = lengths.iter()
        .enumerate()
        .map(|(symbol, &length)| (length, symbol as u16)) // symbol count was checked by the caller
        .collect();

    pairs.sort_by_key(|&(length, symbol)| (length, symbol));

    let mut code = 0_u32;
    let mut length = MAX_CODE_LENGTH;

    let mut codes: Vec<HuffmanCode> = pairs.iter().rev()
        .map(|&(pair_length, symbol)| {
            length = length.min(pair_length);
            let entry = HuffmanCode { code, symbol };

            // increment the code as if it was a number with `length` bits,
            // wrapping like a register, so that over-subscribed lengths produce equal codes
            let increment = 1_u32.checked_shl(u32::from(MAX_CODE_LENGTH - length)).unwrap_or(0);
            code = code.wrapping_add(increment);

            entry
        })
        .collect();

    // group codes with a common prefix, recursively
    codes.sort_by_key(|entry| entry.code);
    codes
}


impl TreeBuilder {

    /// Build the node covering the code-sorted `codes`, looking at the bit at `level`, counted from the most significant bit.
    /// Returns the index of the new node.
    fn build_node(&mut self, codes: &[HuffmanCode], level: u32) -> Result<u16> {
        // distinct codes always differ within 32 bits
        if level >= u32::from(MAX_CODE_LENGTH) {
            return Err(Error::invalid(EQUAL_SYMBOLS));
        }

        let bit_index = (31 - level) as usize;
        let split = codes.iter()
            .position(|entry| entry.code.get_bit(bit_index))
            .unwrap_or(codes.len());

        let (zeroes, ones) = codes.split_at(split);

        if zeroes.is_empty() || ones.is_empty() {
            // this level is superfluous, which is a bug in some encoders.
            // as it has been observed in real files, skip the level instead of rejecting the tree

            if codes.len() < 2 {
                return Err(Error::invalid(EMPTY_TREE));
            }

            return self.build_node(codes, level + 1);
        }

        let node_index = self.next_node;
        self.next_node += 1;

        let (left, left_value) = self.build_child(zeroes, level)?;
        let (right, right_value) = self.build_child(ones, level)?;

        self.nodes[node_index] = HuffmanNode { left, right, left_value, right_value };
        Ok(node_index as u16) // less than the symbol count
    }

    /// A single code becomes a leaf, anything else a new node.
    fn build_child(&mut self, codes: &[HuffmanCode], level: u32) -> Result<(u16, u16)> {
        if let [single] = codes {
            Ok((LEAF, single.symbol))
        }
        else {
            Ok((self.build_node(codes, level + 1)?, 0))
        }
    }
}
