use serde::{Deserialize, Serialize};
use tracing::warn;

/// Display transform for value-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickFormat {
    /// Raw value.
    #[default]
    Plain,
    /// Value / 1e3, rounded, suffixed with `K`.
    Thousands,
    /// Value / 1e6, rounded, suffixed with `M`.
    Millions,
}

impl TickFormat {
    /// Parses the `yTickFormat` setting (`""`, `"K"` or `"M"`).
    #[must_use]
    pub fn from_setting(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::Plain),
            "K" => Some(Self::Thousands),
            "M" => Some(Self::Millions),
            _ => None,
        }
    }

    /// Like `from_setting`, but unknown formats fall back to `Plain`.
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        Self::from_setting(value).unwrap_or_else(|| {
            warn!(format = value, "unknown y tick format; showing raw values");
            Self::Plain
        })
    }

    #[must_use]
    pub fn as_setting(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Thousands => "K",
            Self::Millions => "M",
        }
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Plain => format_raw(value),
            Self::Thousands => format_scaled(value / 1e3, "K"),
            Self::Millions => format_scaled(value / 1e6, "M"),
        }
    }
}

/// Formats a value-axis tick according to the raw `yTickFormat` setting.
#[must_use]
pub fn format_value_tick(value: f64, format: &str) -> String {
    TickFormat::resolve(format).format(value)
}

fn format_raw(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

fn format_scaled(scaled: f64, suffix: &str) -> String {
    // Half-way cases round away from zero.
    let rounded = scaled.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::{TickFormat, format_value_tick};

    #[test]
    fn thousands_round_half_up() {
        assert_eq!(format_value_tick(4500.0, "K"), "5K");
        assert_eq!(format_value_tick(4499.0, "K"), "4K");
        assert_eq!(format_value_tick(-4500.0, "K"), "-5K");
    }

    #[test]
    fn millions_drop_fraction() {
        assert_eq!(format_value_tick(2_400_000.0, "M"), "2M");
        assert_eq!(format_value_tick(0.0, "M"), "0M");
        assert_eq!(format_value_tick(-100.0, "M"), "0M");
    }

    #[test]
    fn plain_format_keeps_value() {
        assert_eq!(format_value_tick(4500.0, ""), "4500");
        assert_eq!(format_value_tick(0.25, ""), "0.25");
        assert_eq!(format_value_tick(-0.0, ""), "0");
    }

    #[test]
    fn unknown_format_falls_back_to_raw() {
        assert_eq!(TickFormat::from_setting("B"), None);
        assert_eq!(format_value_tick(4500.0, "B"), "4500");
    }

    #[test]
    fn setting_names_round_trip() {
        for format in [TickFormat::Plain, TickFormat::Thousands, TickFormat::Millions] {
            assert_eq!(TickFormat::from_setting(format.as_setting()), Some(format));
        }
    }
}
