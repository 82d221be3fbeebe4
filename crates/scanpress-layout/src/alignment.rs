//! Content placement policy within the output page

use serde::{Deserialize, Serialize};

/// Horizontal anchor for content placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
    /// Anchor chosen per page by the output stage
    Auto,
}

impl std::fmt::Display for HAlign {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Center => "hcenter",
            Self::Right => "right",
            Self::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for HAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "hcenter" | "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "auto" => Ok(Self::Auto),
            _ => Err(format!("unknown horizontal alignment: '{s}'")),
        }
    }
}

/// Vertical anchor for content placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
    /// Anchor chosen per page by the output stage
    Auto,
}

impl std::fmt::Display for VAlign {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Top => "top",
            Self::Center => "vcenter",
            Self::Bottom => "bottom",
            Self::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "vcenter" | "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "auto" => Ok(Self::Auto),
            _ => Err(format!("unknown vertical alignment: '{s}'")),
        }
    }
}

/// Combined placement anchors for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl Alignment {
    #[inline]
    #[must_use]
    pub const fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_strings_round_trip() {
        for h in [HAlign::Left, HAlign::Center, HAlign::Right, HAlign::Auto] {
            assert_eq!(h.to_string().parse::<HAlign>().unwrap(), h);
        }
        for v in [VAlign::Top, VAlign::Center, VAlign::Bottom, VAlign::Auto] {
            assert_eq!(v.to_string().parse::<VAlign>().unwrap(), v);
        }
    }

    #[test]
    fn unknown_anchor_is_an_error() {
        assert!("sideways".parse::<HAlign>().is_err());
        assert!("sideways".parse::<VAlign>().is_err());
    }
}
