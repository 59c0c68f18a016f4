#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and decode must never panic
    let _ = bmpgrid::ImageInfo::from_bytes(data);

    let limits = bmpgrid::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let _ = bmpgrid::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);

    // Without limits, only the data length bounds the allocation.
    let _ = bmpgrid::Image::from_bytes(data);
});
