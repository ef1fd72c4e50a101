use image::RgbImage;
use lsb_steg::processing::steganography::{capacity_bytes, embed, extract, required_bits};
use lsb_steg::StegError;
use proptest::prelude::*;

const SIDE: u32 = 64;

fn cover_from(raw: Vec<u8>) -> RgbImage {
    RgbImage::from_raw(SIDE, SIDE, raw).unwrap()
}

fn raw_pixels() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), (SIDE * SIDE * 3) as usize)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_payload_without_zero_bytes(
        raw in raw_pixels(),
        payload in prop::collection::vec(1u8..=255, 0..400),
    ) {
        let cover = cover_from(raw);
        let stego = embed(&cover, &payload).unwrap();
        prop_assert_eq!(extract(&stego).unwrap(), payload);
    }

    #[test]
    fn only_payload_lsbs_change(
        raw in raw_pixels(),
        payload in prop::collection::vec(any::<u8>(), 0..400),
    ) {
        let cover = cover_from(raw);
        let stego = embed(&cover, &payload).unwrap();
        let used = required_bits(payload.len());

        prop_assert_eq!(stego.dimensions(), cover.dimensions());
        for (i, (before, after)) in cover.pixels().zip(stego.pixels()).enumerate() {
            prop_assert_eq!(before[1], after[1]);
            prop_assert_eq!(before[2], after[2]);
            if i < used {
                prop_assert_eq!(before[0] & 0xFE, after[0] & 0xFE);
            } else {
                prop_assert_eq!(before[0], after[0]);
            }
        }
    }

    #[test]
    fn oversized_payload_is_rejected(raw in raw_pixels(), extra in 1usize..64) {
        let cover = cover_from(raw);
        let payload = vec![0x55u8; capacity_bytes(&cover) + extra];
        let is_capacity_error = matches!(
            embed(&cover, &payload),
            Err(StegError::CapacityExceeded { .. })
        );
        prop_assert!(is_capacity_error);
    }
}
