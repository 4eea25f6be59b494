//! Encoded polyline (Google algorithm) with a configurable multiplier.

use crate::types::PathPoint;

/// Encodes points as `lat, lon[, ele * 100]` deltas.
///
/// Missing elevations encode as zero when `with_elevation` is set.
pub fn encode_polyline(points: &[PathPoint], with_elevation: bool, multiplier: f64) -> String {
    let mut out = String::with_capacity(points.len() * if with_elevation { 12 } else { 8 });
    let (mut prev_lat, mut prev_lon, mut prev_ele) = (0i64, 0i64, 0i64);
    for p in points {
        let lat = (p.lat * multiplier).floor() as i64;
        let lon = (p.lon * multiplier).floor() as i64;
        encode_number(&mut out, lat.wrapping_sub(prev_lat));
        encode_number(&mut out, lon.wrapping_sub(prev_lon));
        prev_lat = lat;
        prev_lon = lon;
        if with_elevation {
            let ele = (p.ele.unwrap_or(0.0) * 100.0).floor() as i64;
            encode_number(&mut out, ele.wrapping_sub(prev_ele));
            prev_ele = ele;
        }
    }
    out
}

/// Zigzag then 5-bit chunks; every chunk stays within printable ASCII.
fn encode_number(out: &mut String, value: i64) {
    let mut num = (value.wrapping_shl(1) ^ (value >> 63)) as u64;
    while num >= 0x20 {
        out.push(char::from(((num & 0x1f) as u8 | 0x20) + 63));
        num >>= 5;
    }
    out.push(char::from(num as u8 + 63));
}
