use bdi_core::format::*;
use bdi_core::{limit_for, Codec};
use proptest::prelude::*;

/// Blocks of 1..=16 elements at a random width, mixing zeros, small values,
/// values clustered around a shared base, and arbitrary values.
fn arb_block() -> impl Strategy<Value = (u8, Vec<u64>)> {
    (prop_oneof![Just(1u8), Just(2), Just(4), Just(8)], 1usize..=16, any::<u64>()).prop_flat_map(
        |(width, len, seed)| {
            let limit = limit_for(width).unwrap();
            let base = seed & limit;
            let value = prop_oneof![
                Just(0u64),
                0..=0xffu64,
                (0..=0x1ffu64).prop_map(move |d| base.saturating_add(d).min(limit)),
                (0..=0x1_ffffu64).prop_map(move |d| base.saturating_add(d).min(limit)),
                0..=limit,
            ];
            (Just(width), proptest::collection::vec(value, len))
        },
    )
}

/// Independent size model of one standard scheme: an implicit zero base,
/// then the first remaining value that fits `base_size` bytes.
fn reference_size(block: &[u64], base_size: u8, delta_size: u8) -> Option<usize> {
    let delta_limit = limit_for(delta_size).unwrap();
    let base_limit = limit_for(base_size).unwrap();
    let size = base_size as usize + block.len() * delta_size as usize;

    let rest: Vec<u64> = block.iter().copied().filter(|&v| v > delta_limit).collect();
    if rest.is_empty() {
        return Some(size);
    }
    let base = *rest.iter().find(|&&v| v <= base_limit)?;
    rest.iter()
        .all(|&v| v >= base && v - base <= delta_limit)
        .then_some(size)
}

fn is_special(block: &[u64]) -> bool {
    block.iter().all(|&v| v == block[0])
}

proptest! {
    #[test]
    fn every_index_decodes_to_its_input((width, block) in arb_block()) {
        let codec = Codec::with_width(width).unwrap();
        let out = codec.compress(&block).unwrap();
        let bytes = out.to_bytes().unwrap();
        for (i, element) in out.elements.iter().enumerate() {
            prop_assert_eq!(element.tag.parse().index, i as u64);
            prop_assert_eq!(codec.decompress(&bytes, element.tag).unwrap(), block[i]);
        }
    }

    #[test]
    fn serialized_length_matches_declared_size((width, block) in arb_block()) {
        let codec = Codec::with_width(width).unwrap();
        let out = codec.compress(&block).unwrap();
        let declared = out.base_size as usize + out.elements.iter().map(|e| e.size as usize).sum::<usize>();
        prop_assert_eq!(out.size, declared);
        prop_assert_eq!(out.to_bytes().unwrap().len(), out.size);
        for candidate in codec.candidates(&block).unwrap() {
            prop_assert_eq!(candidate.to_bytes().unwrap().len(), candidate.size);
        }
    }

    #[test]
    fn no_scheme_in_the_table_beats_the_choice((width, block) in arb_block()) {
        prop_assume!(!is_special(&block));
        let codec = Codec::with_width(width).unwrap();
        let out = codec.compress(&block).unwrap();

        let expected = codec
            .table()
            .configs()
            .iter()
            .filter_map(|c| reference_size(&block, c.base_size(), c.delta_size()))
            .min()
            .unwrap_or(block.len() * width as usize);
        prop_assert_eq!(out.size, expected, "chose {}", out.name);

        let candidates = codec.candidates(&block).unwrap();
        prop_assert!(candidates.iter().all(|c| c.size >= out.size));
        if candidates.is_empty() {
            prop_assert_eq!(out.encoding, ENCODING_UNCOMPRESSED);
        }
    }

    #[test]
    fn repeated_blocks_cost_one_element(value in 1u64.., len in 1usize..=16) {
        let out = Codec::default().compress(&vec![value; len]).unwrap();
        prop_assert_eq!(out.encoding, ENCODING_REPEATED);
        prop_assert_eq!(out.size, 8);
        prop_assert_eq!(out.base, value);
    }

    #[test]
    fn uncompressed_array_is_the_input((width, block) in arb_block()) {
        let codec = Codec::with_width(width).unwrap();
        let out = codec.compress(&block).unwrap();
        if out.encoding == ENCODING_UNCOMPRESSED {
            prop_assert_eq!(out.to_array(), block);
        } else {
            prop_assert_eq!(out.to_array().len(), block.len() + out.uses_stored_base() as usize);
        }
    }
}
