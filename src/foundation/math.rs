use crate::foundation::core::{Affine, Point};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Scale every channel of a premultiplied RGBA8 buffer by `gain` in [0, 1].
///
/// Because the buffer is premultiplied, scaling all four channels uniformly is
/// exactly an opacity multiply.
pub(crate) fn scale_premul_rgba8_in_place(data: &mut [u8], gain: f64) {
    let g = (gain.clamp(0.0, 1.0) * 255.0).round() as u16;
    if g >= 255 {
        return;
    }
    if g == 0 {
        data.fill(0);
        return;
    }
    for b in data.iter_mut() {
        *b = mul_div255_u8(u16::from(*b), g);
    }
}

/// Fill `dst` (dw x dh premultiplied RGBA8) by mapping each destination pixel
/// center through `dst_to_src` and bilinearly sampling `src` (sw x sh).
///
/// Source coordinates are clamped to the edge; callers keep their sampling
/// windows inside the source, so clamping only absorbs float boundary error.
pub(crate) fn resample_affine_rgba8(
    src: &[u8],
    sw: u32,
    sh: u32,
    dst: &mut [u8],
    dw: u32,
    dh: u32,
    dst_to_src: Affine,
) {
    debug_assert_eq!(src.len(), (sw as usize) * (sh as usize) * 4);
    debug_assert_eq!(dst.len(), (dw as usize) * (dh as usize) * 4);
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        return;
    }

    let max_x = (sw - 1) as i64;
    let max_y = (sh - 1) as i64;

    for dy in 0..dh {
        for dx in 0..dw {
            let p = dst_to_src * Point::new(f64::from(dx) + 0.5, f64::from(dy) + 0.5);
            // Continuous -> texel space; the 0.5 offset centers samples.
            let sx = p.x - 0.5;
            let sy = p.y - 0.5;

            let x0 = sx.floor();
            let y0 = sy.floor();
            let fx = (sx - x0) as f32;
            let fy = (sy - y0) as f32;

            let xi0 = (x0 as i64).clamp(0, max_x) as usize;
            let xi1 = ((x0 as i64) + 1).clamp(0, max_x) as usize;
            let yi0 = (y0 as i64).clamp(0, max_y) as usize;
            let yi1 = ((y0 as i64) + 1).clamp(0, max_y) as usize;

            let row0 = yi0 * sw as usize;
            let row1 = yi1 * sw as usize;
            let i00 = (row0 + xi0) * 4;
            let i10 = (row0 + xi1) * 4;
            let i01 = (row1 + xi0) * 4;
            let i11 = (row1 + xi1) * 4;

            let out = ((dy as usize) * dw as usize + dx as usize) * 4;
            for c in 0..4 {
                let v00 = f32::from(src[i00 + c]);
                let v10 = f32::from(src[i10 + c]);
                let v01 = f32::from(src[i01 + c]);
                let v11 = f32::from(src[i11 + c]);
                let top = v00 + (v10 - v00) * fx;
                let bottom = v01 + (v11 - v01) * fx;
                let v = top + (bottom - top) * fy;
                dst[out + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
