#[macro_use]
extern crate bencher;

extern crate bzip2_huffman;
use bzip2_huffman::prelude::*;

use bencher::Bencher;

/// A complete code for the largest alphabet:
/// 254 symbols of 8 bits and 4 symbols of 9 bits.
fn full_alphabet_lengths() -> Vec<u8> {
    let mut lengths = vec![8_u8; 258];
    lengths[254 ..].iter_mut().for_each(|length| *length = 9);
    lengths
}

/// Bytes which are the codes of the eight bit symbols, one symbol per byte.
fn eight_bit_codes() -> Vec<u8> {
    (0 .. 64 * 1024).map(|index| (index % 254) as u8).collect()
}

/// Rebuild the tree, as done for every table of every block
fn build_full_alphabet(bench: &mut Bencher) {
    let lengths = full_alphabet_lengths();

    bench.iter(||{
        let tree = HuffmanTree::new(&lengths).unwrap();
        bencher::black_box(tree);
    })
}

/// Decode with buffered bits
fn decode_full_alphabet(bench: &mut Bencher) {
    let tree = HuffmanTree::new(&full_alphabet_lengths()).unwrap();
    let bytes = eight_bit_codes();

    bench.iter(||{
        let mut reader = BitReader::new(bytes.as_slice());
        let mut checksum = 0_u64;

        for _ in 0 .. bytes.len() {
            checksum += u64::from(tree.decode(&mut reader).unwrap());
        }

        bencher::black_box(checksum);
    })
}

benchmark_group!(huffman,
    build_full_alphabet,
    decode_full_alphabet
);

benchmark_main!(huffman);
