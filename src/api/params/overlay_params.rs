use serde::Deserialize;

use crate::core::OverlaySpec;

/// Query string of `/img`. Numbers that are missing or do not parse read as 0.
#[derive(Deserialize, Debug, Default)]
pub struct ImgParams {
    #[serde(default)]
    pub id: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub s: Option<String>,
    pub n: Option<String>,
}

impl ImgParams {
    pub fn overlay(&self) -> OverlaySpec {
        OverlaySpec {
            x: parse_or_zero(self.x.as_deref()),
            y: parse_or_zero(self.y.as_deref()),
            size: parse_or_zero(self.s.as_deref()),
        }
    }

    /// Any non-empty `n` asks for the painted image to replace the stored one.
    pub fn save(&self) -> bool {
        self.n.as_deref().is_some_and(|n| !n.is_empty())
    }
}

fn parse_or_zero<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}
