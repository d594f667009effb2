use topview_blocks::Rgb;

/// Brightness change applied when the terrain steps up or down.
pub const SHADE_STEP: i32 = 30;

/// Relief shading against the previous column of the same row: brighter when
/// terrain rises into this column, darker when it falls, unchanged on flat
/// ground or for the first column of a row.
#[inline]
pub fn shade(base: Rgb, prev: Option<i32>, curr: i32) -> Rgb {
    let delta = match prev {
        Some(p) if p < curr => SHADE_STEP,
        Some(p) if p > curr => -SHADE_STEP,
        _ => 0,
    };
    base.offset(delta)
}
