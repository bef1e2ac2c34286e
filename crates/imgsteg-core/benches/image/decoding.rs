use criterion::{criterion_group, criterion_main, Criterion};
use imgsteg_core::media::image::{DctCodec, DwtCodec, Hide, LsbCodec, Unveil};
use imgsteg_core::PixelBuffer;

fn carrier() -> PixelBuffer {
    PixelBuffer::from_fn(512, 512, 3, |x, y, c| ((x * 7 + y * 13 + c as u32 * 29) % 192 + 32) as u8)
}

pub fn image_decoding(c: &mut Criterion) {
    let carrier = carrier();
    let secret_message = b"Hello World!";

    c.bench_function("Image Decoding LSB", |b| {
        let codec = LsbCodec::default();
        let secret = codec.hide(&carrier, secret_message).expect("Cannot hide secret message");
        b.iter(|| codec.unveil(&secret, None).expect("Failed to unveil"))
    });
    c.bench_function("Image Decoding DCT", |b| {
        let codec = DctCodec::default();
        let secret = codec.hide(&carrier, secret_message).expect("Cannot hide secret message");
        b.iter(|| codec.unveil(&secret, None).expect("Failed to unveil"))
    });
    c.bench_function("Image Decoding DWT", |b| {
        let codec = DwtCodec::default();
        let secret = codec.hide(&carrier, secret_message).expect("Cannot hide secret message");
        b.iter(|| codec.unveil(&secret, Some(&carrier)).expect("Failed to unveil"))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
