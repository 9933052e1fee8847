use std::fmt;
use std::str::FromStr;

type Speed = f64;

const KMH_PER_MPH: f64 = 1.609344;
const KMH_PER_KNOT: f64 = 1.852;

/// A parsed `maxspeed` tag value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedValue {
    /// Speed in kilometers per hour
    Kmh(Speed),
    /// Speed in miles per hour (Multiply by 1.609344)
    Mph(Speed),
    /// Speed in knots (Multiply by 1.852)
    Knots(Speed),
    /// No speed limit (typically represented as "none" in OSM)
    None,
    /// Variable speed limit (electronic signs, etc.)
    Variable,
    /// Walk speed (typically 5-6 km/h)
    Walk,
    /// Missing, `Unknown`, or otherwise unreadable
    Unknown,
}

impl SpeedValue {
    /// Shows the speed as represented in Kilometers per Hour.
    pub fn in_kmh(&self) -> Option<Speed> {
        match self {
            SpeedValue::Kmh(speed) => Some(*speed),
            SpeedValue::Mph(speed) => Some(*speed * KMH_PER_MPH),
            SpeedValue::Knots(speed) => Some(*speed * KMH_PER_KNOT),
            // Non-transformative
            _ => None,
        }
    }
}

impl FromStr for SpeedValue {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let numeric = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0);

        let parsed = match value.to_ascii_lowercase().as_str() {
            "none" => SpeedValue::None,
            "signals" | "variable" => SpeedValue::Variable,
            "walk" => SpeedValue::Walk,
            lower => {
                if let Some(speed) = lower.strip_suffix("mph").and_then(numeric) {
                    SpeedValue::Mph(speed)
                } else if let Some(speed) = lower.strip_suffix("knots").and_then(numeric) {
                    SpeedValue::Knots(speed)
                } else if let Some(speed) = lower.strip_suffix("km/h").and_then(numeric) {
                    SpeedValue::Kmh(speed)
                } else if let Some(speed) = numeric(lower) {
                    SpeedValue::Kmh(speed)
                } else {
                    SpeedValue::Unknown
                }
            }
        };

        Ok(parsed)
    }
}

impl fmt::Display for SpeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedValue::Kmh(speed) => write!(f, "{}", speed),
            SpeedValue::Mph(speed) => write!(f, "{} mph", speed),
            SpeedValue::Knots(speed) => write!(f, "{} knots", speed),
            SpeedValue::None => write!(f, "none"),
            SpeedValue::Variable => write!(f, "variable"),
            SpeedValue::Walk => write!(f, "walk"),
            SpeedValue::Unknown => write!(f, "Unknown"),
        }
    }
}
