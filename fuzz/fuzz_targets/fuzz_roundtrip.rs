#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpgrid::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode and decode to the same planes
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = decoded
        .encode(enough::Unstoppable)
        .expect("decoded image failed to encode");
    let Ok(decoded2) = Image::from_bytes(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
