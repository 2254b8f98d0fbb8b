use imperil_shared::{HexSize, OverlayConfig};
use tracing::Level;

pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

fn parse_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse::<Level>().ok()
}

fn parse_size(value: &str) -> Option<HexSize> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "extra-large" | "extralarge" => Some(HexSize::ExtraLarge),
        other => HexSize::from_key(other),
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

/// `?log=debug`
pub fn log_level() -> Level {
    query_param("log")
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// `?hexes=on`
pub fn show_hexes_on_start() -> bool {
    query_param("hexes")
        .as_deref()
        .and_then(parse_flag)
        .unwrap_or(false)
}

/// `?size=large`
pub fn initial_hex_size() -> HexSize {
    query_param("size")
        .as_deref()
        .and_then(parse_size)
        .unwrap_or_default()
}

/// `?territory=Brazil`
pub fn initial_territory() -> Option<String> {
    query_param("territory")
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// `?max_hexes=300`
pub fn overlay_config() -> OverlayConfig {
    let mut config = OverlayConfig::default();
    if let Some(max_hexes) = query_param("max_hexes").as_deref().and_then(parse_positive) {
        config.max_hexes = max_hexes;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn sizes_use_selector_keys() {
        assert_eq!(parse_size("large"), Some(HexSize::Large));
        assert_eq!(parse_size("XL"), Some(HexSize::ExtraLarge));
        assert_eq!(parse_size("extra-large"), Some(HexSize::ExtraLarge));
        assert_eq!(parse_size("huge"), None);
    }

    #[test]
    fn non_positive_counts_are_rejected() {
        assert_eq!(parse_positive("300"), Some(300));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-4"), None);
        assert_eq!(parse_positive("lots"), None);
    }
}
