/// Format an RGBA color as a CSS string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

/// `color` at `alpha`; unparseable colors pass through unchanged.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => rgba_css(r, g, b, alpha.clamp(0.0, 1.0)),
        None => color.to_owned(),
    }
}
