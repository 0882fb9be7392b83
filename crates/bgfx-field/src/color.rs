//! Resolution of CSS-style color strings.

use bgfx_core::{FALLBACK_RGB, Rgb};

/// Resolve a color string into an RGB triple.
///
/// Accepts `#rgb`, `#rrggbb` and `rgb(...)`/`rgba(...)` (alpha ignored).
/// Anything else, including the empty string, resolves to the amber
/// fallback. This never fails.
pub fn parse_color(raw: &str) -> Rgb {
    let s = raw.trim();
    if s.is_empty() {
        return FALLBACK_RGB;
    }

    if let Some(rgb) = s.strip_prefix('#').and_then(parse_hex) {
        return rgb;
    }

    parse_rgb_function(s).unwrap_or(FALLBACK_RGB)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Read the first three components of the first `rgb(...)` or
/// `rgba(...)` group with a non-empty body. Later groups are never
/// consulted, even when the first one holds garbage.
fn parse_rgb_function(s: &str) -> Option<Rgb> {
    let lower = s.to_ascii_lowercase();

    let body = lower.match_indices("rgb").find_map(|(start, _)| {
        let rest = &lower[start + 3..];
        let rest = rest.strip_prefix('a').unwrap_or(rest);
        let body = rest.strip_prefix('(')?;
        let end = body.find(')')?;
        Some(&body[..end]).filter(|b| !b.is_empty())
    })?;

    let mut parts = body.split(',').map(str::trim);
    let r = parts.next().and_then(leading_number)?;
    let g = parts.next().and_then(leading_number)?;
    let b = parts.next().and_then(leading_number)?;
    Some(Rgb::new(to_channel(r), to_channel(g), to_channel(b)))
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Parse the longest numeric prefix of `s`, so `"12px"` reads as 12.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
