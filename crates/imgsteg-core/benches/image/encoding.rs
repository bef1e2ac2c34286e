use criterion::{criterion_group, criterion_main, Criterion};
use imgsteg_core::media::image::{DctCodec, DwtCodec, Hide, LsbCodec};
use imgsteg_core::PixelBuffer;

fn carrier() -> PixelBuffer {
    PixelBuffer::from_fn(512, 512, 3, |x, y, c| ((x * 7 + y * 13 + c as u32 * 29) % 192 + 32) as u8)
}

pub fn image_encoding(c: &mut Criterion) {
    let carrier = carrier();
    let secret_message = b"Hello World!";

    c.bench_function("Image Encoding LSB", |b| {
        let codec = LsbCodec::default();
        b.iter(|| codec.hide(&carrier, secret_message).expect("Cannot hide secret message"))
    });
    c.bench_function("Image Encoding DCT", |b| {
        let codec = DctCodec::default();
        b.iter(|| codec.hide(&carrier, secret_message).expect("Cannot hide secret message"))
    });
    c.bench_function("Image Encoding DWT", |b| {
        let codec = DwtCodec::default();
        b.iter(|| codec.hide(&carrier, secret_message).expect("Cannot hide secret message"))
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
