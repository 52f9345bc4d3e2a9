//! Property-based tests for the codec layers.
//!
//! 1. Field: multiplication and division are inverse
//! 2. Reed-Solomon: up to ecc/2 codeword errors are always repaired
//! 3. Layout: placement then extraction is the identity
//! 4. Masking: every mask is an involution
//! 5. Round trip: decode(encode(s)) == s within capacity

use proptest::prelude::*;
use rust_qr_codec::codec::Codec;
use rust_qr_codec::codec::bitstream::{extract_bits, place_bits};
use rust_qr_codec::codec::mask::apply_mask;
use rust_qr_codec::codec::reed_solomon::ReedSolomon;
use rust_qr_codec::{MaskPattern, Version, decode, encode};
use std::collections::BTreeMap;

fn version() -> impl Strategy<Value = Version> {
    prop::sample::select(Version::ALL.to_vec())
}

fn mask() -> impl Strategy<Value = MaskPattern> {
    prop::sample::select(MaskPattern::ALL.to_vec())
}

/// Version plus a random fill of exactly its data modules
fn filled_layout() -> impl Strategy<Value = (Version, Vec<bool>)> {
    version().prop_flat_map(|v| {
        let count = Codec::shared().reserved(v).data_modules_count();
        (Just(v), prop::collection::vec(any::<bool>(), count))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_field_div_inverts_mul(a in 1u8..=255, b in any::<u8>()) {
        let field = Codec::shared().field();
        prop_assert_eq!(field.div(field.mul(a, b), a).unwrap(), b);
        prop_assert_eq!(field.mul(a, field.inverse(a).unwrap()), 1);
    }

    #[test]
    fn prop_rs_repairs_half_ecc(
        data in prop::collection::vec(any::<u8>(), 28),
        errors in prop::collection::btree_map(0usize..44, 1u8..=255, 0..=8),
    ) {
        let rs = ReedSolomon::new(Codec::shared().field(), 16).unwrap();
        let mut block = data.clone();
        block.extend(rs.encode(&data));
        let original = block.clone();

        let errors: BTreeMap<usize, u8> = errors;
        for (&pos, &value) in &errors {
            block[pos] ^= value;
        }
        prop_assert_eq!(rs.correct(&mut block).unwrap(), errors.len());
        prop_assert_eq!(block, original);
    }

    #[test]
    fn prop_layout_is_bijective((version, bits) in filled_layout()) {
        let reserved = Codec::shared().reserved(version);
        let mut matrix = reserved.function_matrix();
        place_bits(&mut matrix, reserved, &bits).unwrap();
        prop_assert!(matrix.ensure_complete().is_ok());
        prop_assert_eq!(extract_bits(&matrix, reserved).unwrap(), bits);
    }

    #[test]
    fn prop_mask_is_involution((version, bits) in filled_layout(), mask in mask()) {
        let reserved = Codec::shared().reserved(version);
        let mut matrix = reserved.function_matrix();
        place_bits(&mut matrix, reserved, &bits).unwrap();
        let original = matrix.clone();
        apply_mask(&mut matrix, reserved, mask).unwrap();
        apply_mask(&mut matrix, reserved, mask).unwrap();
        prop_assert_eq!(matrix, original);
    }

    #[test]
    fn prop_round_trip_ascii(text in "[ -~]{0,42}") {
        let code = encode(&text).unwrap();
        prop_assert_eq!(decode(&code.modules).unwrap().content, text);
    }

    #[test]
    fn prop_round_trip_digits(text in "[0-9]{0,100}") {
        let code = encode(&text).unwrap();
        let decoded = decode(&code.modules).unwrap();
        prop_assert_eq!(decoded.content, text);
        prop_assert_eq!(decoded.version, code.version);
    }
}
