#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    // Decode, probe, draw and scale must never panic
    let _ = plainpnm::ImageInfo::from_text(text);
    let Ok(mut image) = plainpnm::decode(text, enough::Unstoppable) else {
        return;
    };
    let _ = image.to_rgba8();
    // Declared dimensions above i32::MAX are clamped; draw_line rejects them.
    let w = i32::try_from(image.width()).unwrap_or(i32::MAX);
    let h = i32::try_from(image.height()).unwrap_or(i32::MAX);
    let _ = image.draw_line((0, 0), (w.saturating_sub(1), h.saturating_sub(1)));
    if image.width() <= 64 && image.grid_height() <= 64 {
        let _ = image.scaled(2);
    }
});
