//! Single level 2D Haar wavelet transform.
//!
//! Each 2x2 quad `[p00 p01; p10 p11]` of a plane turns into one coefficient
//! per subband. An odd last row or column has no quad and is left as it is.

/// The four subbands of a plane, each `width x height` and row-major
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Subbands {
    pub width: usize,
    pub height: usize,
    pub approximation: Vec<f32>,
    pub horizontal: Vec<f32>,
    pub vertical: Vec<f32>,
    pub diagonal: Vec<f32>,
}

/// number of quads of a `width x height` plane
pub(crate) fn quad_count(width: usize, height: usize) -> usize {
    (width / 2) * (height / 2)
}

pub(crate) fn decompose(plane: &[f32], width: usize, height: usize) -> Subbands {
    let (w, h) = (width / 2, height / 2);
    let mut bands = Subbands {
        width: w,
        height: h,
        approximation: Vec::with_capacity(w * h),
        horizontal: Vec::with_capacity(w * h),
        vertical: Vec::with_capacity(w * h),
        diagonal: Vec::with_capacity(w * h),
    };

    for y in 0..h {
        for x in 0..w {
            let top = 2 * y * width + 2 * x;
            let bottom = top + width;
            let (p00, p01) = (plane[top], plane[top + 1]);
            let (p10, p11) = (plane[bottom], plane[bottom + 1]);

            bands.approximation.push((p00 + p01 + p10 + p11) / 2.0);
            bands.horizontal.push((p00 + p10 - p01 - p11) / 2.0);
            bands.vertical.push((p00 + p01 - p10 - p11) / 2.0);
            bands.diagonal.push((p00 - p01 - p10 + p11) / 2.0);
        }
    }

    bands
}

/// writes the quads of `bands` back into `plane`, which has a row length of `width`
pub(crate) fn reconstruct(bands: &Subbands, plane: &mut [f32], width: usize) {
    for y in 0..bands.height {
        for x in 0..bands.width {
            let i = y * bands.width + x;
            let (c, dh, dv, dd) = (
                bands.approximation[i],
                bands.horizontal[i],
                bands.vertical[i],
                bands.diagonal[i],
            );

            let top = 2 * y * width + 2 * x;
            let bottom = top + width;
            plane[top] = 0.5 * (c + dh + dv + dd);
            plane[top + 1] = 0.5 * (c - dh + dv - dd);
            plane[bottom] = 0.5 * (c + dh - dv - dd);
            plane[bottom + 1] = 0.5 * (c - dh - dv + dd);
        }
    }
}
