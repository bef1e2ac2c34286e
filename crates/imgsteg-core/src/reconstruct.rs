//! Accuracy scoring and majority vote repair over several extracted copies.

/// Percentage of positions where `extracted` equals `original`.
///
/// Only the first `min(original.len(), extracted.len())` positions are compared
/// but the score is relative to the length of `original`, so a truncated
/// extraction scores lower. An empty `original` scores `0.0`.
pub fn similarity(original: &[u8], extracted: &[u8]) -> f32 {
    if original.is_empty() {
        return 0.0;
    }

    let hits = original
        .iter()
        .zip(extracted)
        .filter(|(a, b)| a == b)
        .count();

    hits as f32 / original.len() as f32 * 100.0
}

/// Rebuilds one byte string out of several damaged copies.
///
/// Position `i` takes the byte value that occurs most often at `i` among the
/// candidates that are longer than `i`. Ties go to the smallest byte value.
/// The result is as long as the longest candidate.
pub fn repair<C: AsRef<[u8]>>(candidates: &[C]) -> Vec<u8> {
    let longest = candidates
        .iter()
        .map(|c| c.as_ref().len())
        .max()
        .unwrap_or(0);

    (0..longest)
        .map(|i| {
            let mut freq = [0usize; 256];
            for candidate in candidates {
                if let Some(b) = candidate.as_ref().get(i) {
                    freq[*b as usize] += 1;
                }
            }

            // max_by_key keeps the last maximum, walking backwards makes it the smallest byte
            freq.iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, count)| **count)
                .map(|(b, _)| b as u8)
                .unwrap_or(0)
        })
        .collect()
}
