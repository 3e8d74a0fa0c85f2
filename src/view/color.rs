use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// Straight-alpha RGBA8 color parsed from a CSS color string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CssColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl CssColor {
    /// Opaque color from RGB bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`, `hsla()`, or a
    /// named color.
    pub fn parse(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = func_args(&lower, "rgba").or_else(|| func_args(&lower, "rgb")) {
            return parse_rgb_args(args);
        }
        if let Some(args) = func_args(&lower, "hsla").or_else(|| func_args(&lower, "hsl")) {
            return parse_hsl_args(args);
        }
        named(&lower).ok_or_else(|| ReelError::validation(format!("unrecognized color \"{s}\"")))
    }

    /// Premultiplied RGBA8 bytes.
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Straight-alpha RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for CssColor {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn func_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_args(args: &str) -> Vec<&str> {
    // Accept both `rgb(1, 2, 3)` and `rgb(1 2 3 / 0.5)`.
    args.split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_hex(hex: &str) -> ReelResult<CssColor> {
    fn nibble(c: u8) -> ReelResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| ReelError::validation(format!("invalid hex digit '{}'", c as char)))
    }

    let bytes = hex.as_bytes();
    let digits = bytes
        .iter()
        .map(|&c| nibble(c))
        .collect::<ReelResult<Vec<u8>>>()?;
    let (r, g, b, a) = match digits.as_slice() {
        [r, g, b] => (r * 17, g * 17, b * 17, 255),
        [r, g, b, a] => (r * 17, g * 17, b * 17, a * 17),
        [r1, r0, g1, g0, b1, b0] => (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0)
        }
        _ => {
            return Err(ReelError::validation(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
            ));
        }
    };
    Ok(CssColor { r, g, b, a })
}

fn parse_channel(s: &str) -> ReelResult<u8> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        parse_f64(pct)? / 100.0 * 255.0
    } else {
        parse_f64(s)?
    };
    Ok(v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> ReelResult<u8> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        parse_f64(pct)? / 100.0
    } else {
        parse_f64(s)?
    };
    Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_f64(s: &str) -> ReelResult<f64> {
    let v: f64 = s
        .parse()
        .map_err(|_| ReelError::validation(format!("invalid color component \"{s}\"")))?;
    if !v.is_finite() {
        return Err(ReelError::validation("color components must be finite"));
    }
    Ok(v)
}

fn parse_rgb_args(args: &str) -> ReelResult<CssColor> {
    let parts = split_args(args);
    let (rgb, a) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 255),
        [r, g, b, a] => ([*r, *g, *b], parse_alpha(a)?),
        _ => {
            return Err(ReelError::validation(
                "rgb()/rgba() expects 3 or 4 components",
            ));
        }
    };
    Ok(CssColor {
        r: parse_channel(rgb[0])?,
        g: parse_channel(rgb[1])?,
        b: parse_channel(rgb[2])?,
        a,
    })
}

fn parse_hsl_args(args: &str) -> ReelResult<CssColor> {
    let parts = split_args(args);
    let (h, s, l, a) = match parts.as_slice() {
        [h, s, l] => (*h, *s, *l, 255),
        [h, s, l, a] => (*h, *s, *l, parse_alpha(a)?),
        _ => {
            return Err(ReelError::validation(
                "hsl()/hsla() expects 3 or 4 components",
            ));
        }
    };
    let h = parse_f64(h.trim_end_matches("deg"))?;
    let s = parse_f64(s.trim_end_matches('%'))? / 100.0;
    let l = parse_f64(l.trim_end_matches('%'))? / 100.0;
    let [r, g, b] = hsl_to_rgb(h, s, l);
    Ok(CssColor { r, g, b, a })
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    // Standard HSL -> RGB conversion (sRGB space).
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        return [to_u8(l); 3];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    [
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

fn named(name: &str) -> Option<CssColor> {
    let c = match name {
        "transparent" => CssColor {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        "black" => CssColor::rgb(0, 0, 0),
        "white" => CssColor::rgb(255, 255, 255),
        "gray" | "grey" => CssColor::rgb(128, 128, 128),
        "silver" => CssColor::rgb(192, 192, 192),
        "red" => CssColor::rgb(255, 0, 0),
        "maroon" => CssColor::rgb(128, 0, 0),
        "orange" => CssColor::rgb(255, 165, 0),
        "yellow" => CssColor::rgb(255, 255, 0),
        "olive" => CssColor::rgb(128, 128, 0),
        "lime" => CssColor::rgb(0, 255, 0),
        "green" => CssColor::rgb(0, 128, 0),
        "aqua" | "cyan" => CssColor::rgb(0, 255, 255),
        "teal" => CssColor::rgb(0, 128, 128),
        "blue" => CssColor::rgb(0, 0, 255),
        "navy" => CssColor::rgb(0, 0, 128),
        "fuchsia" | "magenta" => CssColor::rgb(255, 0, 255),
        "purple" => CssColor::rgb(128, 0, 128),
        "pink" => CssColor::rgb(255, 192, 203),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/view/color.rs"]
mod tests;
