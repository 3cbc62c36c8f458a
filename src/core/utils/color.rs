//! Colour helpers.
//!
//! Colours are packed ABGR (`0xAABBGGRR`), the byte order a little-endian
//! `Uint32Array` view needs for a direct `ImageData` copy.

use super::random::Rng;

/// RGB(10,10,10) with alpha=255
pub const BG_COLOR: u32 = 0xFF0A_0A0A;

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[inline]
pub const fn channels(color: u32) -> (u8, u8, u8) {
    (
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
    )
}

/// Shift each channel by the same random amount in `-amount..=amount`
pub fn vary(color: u32, amount: i32, rng: &mut Rng) -> u32 {
    if amount <= 0 {
        return color;
    }
    let shift = rng.range(-amount, amount);
    let (r, g, b) = channels(color);
    let adj = |c: u8| (c as i32 + shift).clamp(0, 255) as u8;
    rgb(adj(r), adj(g), adj(b))
}

/// Linear blend, `t = 0` keeps `a`
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/// Scale brightness, `factor = 1` is identity
pub fn scale(color: u32, factor: f32) -> u32 {
    let (r, g, b) = channels(color);
    let s = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    rgb(s(r), s(g), s(b))
}

pub fn to_hex(color: u32) -> String {
    let (r, g, b) = channels(color);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r,g,b)` or `rgba(r,g,b,a)`
pub fn parse(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    let inner = text
        .strip_prefix("rgba(")
        .or_else(|| text.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<f32>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    let c = |v: f32| v.clamp(0.0, 255.0) as u8;
    Some(rgb(c(r), c(g), c(b)))
}

fn parse_hex(hex: &str) -> Option<u32> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    match hex.len() {
        3 => {
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Some(rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            Some(rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = rgb(0xc2, 0xb2, 0x80);
        assert_eq!(to_hex(c), "#c2b280");
        assert_eq!(parse("#c2b280"), Some(c));
    }

    #[test]
    fn parses_short_hex_and_rgb_functions() {
        assert_eq!(parse("#fff"), Some(rgb(255, 255, 255)));
        assert_eq!(parse("rgb(10, 20, 30)"), Some(rgb(10, 20, 30)));
        assert_eq!(parse("rgba(10,20,30,0.5)"), Some(rgb(10, 20, 30)));
        assert_eq!(parse("hsl(1,2,3)"), None);
        assert_eq!(parse("#12"), None);
    }

    #[test]
    fn abgr_layout() {
        assert_eq!(rgb(0x11, 0x22, 0x33), 0xFF33_2211);
    }
}
