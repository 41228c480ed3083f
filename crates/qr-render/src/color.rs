//! Color string parsing.
//!
//! Accepts CSS color names, `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
//! `rgb(r, g, b)`, `rgb(r%, g%, b%)`, `rgba(r, g, b, a)` and
//! `hsl(h, s%, l%)`. Matching is case-insensitive.

use std::collections::HashMap;
use std::sync::LazyLock;

use image::Rgba;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color specifier: '{0}'")]
pub struct ColorParseError(pub String);

static RE_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$").unwrap());
static RE_RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").unwrap()
});
static RE_RGB_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d*\.?\d+)\s*%\s*,\s*(\d*\.?\d+)\s*%\s*,\s*(\d*\.?\d+)\s*%\s*\)$")
        .unwrap()
});
static RE_RGBA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").unwrap()
});
static RE_HSL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsl\(\s*(\d*\.?\d+)\s*,\s*(\d*\.?\d+)\s*%\s*,\s*(\d*\.?\d+)\s*%\s*\)$").unwrap()
});

static NAMED_COLORS: LazyLock<HashMap<&'static str, [u8; 3]>> =
    LazyLock::new(|| CSS_COLORS.iter().copied().collect());

/// Parse a color string into an RGBA pixel (alpha 255 unless given).
pub fn parse_color(input: &str) -> Result<Rgba<u8>, ColorParseError> {
    let normalized = input.trim().to_ascii_lowercase();
    let err = || ColorParseError(input.to_string());

    if let Some(&[r, g, b]) = NAMED_COLORS.get(normalized.as_str()) {
        return Ok(Rgba([r, g, b, 255]));
    }

    if let Some(caps) = RE_HEX.captures(&normalized) {
        return Ok(parse_hex(&caps[1]));
    }

    if let Some(caps) = RE_RGB.captures(&normalized) {
        let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| err());
        return Ok(Rgba([channel(1)?, channel(2)?, channel(3)?, 255]));
    }

    if let Some(caps) = RE_RGB_PERCENT.captures(&normalized) {
        let channel = |i: usize| -> Result<u8, ColorParseError> {
            let pct: f64 = caps[i].parse().map_err(|_| err())?;
            if pct > 100.0 {
                return Err(err());
            }
            Ok((pct * 255.0 / 100.0 + 0.5) as u8)
        };
        return Ok(Rgba([channel(1)?, channel(2)?, channel(3)?, 255]));
    }

    if let Some(caps) = RE_RGBA.captures(&normalized) {
        let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| err());
        return Ok(Rgba([channel(1)?, channel(2)?, channel(3)?, channel(4)?]));
    }

    if let Some(caps) = RE_HSL.captures(&normalized) {
        let number = |i: usize| caps[i].parse::<f64>().map_err(|_| err());
        let (h, s, l) = (number(1)?, number(2)?, number(3)?);
        if s > 100.0 || l > 100.0 {
            return Err(err());
        }
        let [r, g, b] = hsl_to_rgb((h % 360.0) / 360.0, s / 100.0, l / 100.0);
        return Ok(Rgba([r, g, b, 255]));
    }

    Err(err())
}

fn parse_hex(digits: &str) -> Rgba<u8> {
    let nibble = |c: u8| -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            _ => c - b'a' + 10,
        }
    };
    let bytes = digits.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (slot, &c) in out.iter_mut().zip(bytes) {
                *slot = nibble(c) * 17;
            }
            Rgba(out)
        }
        _ => {
            let mut out = [255u8; 4];
            for (slot, pair) in out.iter_mut().zip(bytes.chunks(2)) {
                *slot = nibble(pair[0]) * 16 + nibble(pair[1]);
            }
            Rgba(out)
        }
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let to_byte = |v: f64| (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
    if s == 0.0 {
        let v = to_byte(l);
        return [v, v, v];
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    [
        to_byte(hue_channel(m1, m2, h + 1.0 / 3.0)),
        to_byte(hue_channel(m1, m2, h)),
        to_byte(hue_channel(m1, m2, h - 1.0 / 3.0)),
    ]
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

const CSS_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgreen", [144, 238, 144]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("black"), Ok(Rgba([0, 0, 0, 255])));
        assert_eq!(parse_color("White"), Ok(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_color("rebeccapurple"), Ok(Rgba([102, 51, 153, 255])));
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#FF0000"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#f00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#f008"), Ok(Rgba([255, 0, 0, 136])));
        assert_eq!(parse_color("#12345678"), Ok(Rgba([0x12, 0x34, 0x56, 0x78])));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#ggg").is_err());
    }

    #[test]
    fn functional_forms() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Ok(Rgba([10, 20, 30, 255])));
        assert_eq!(parse_color("RGB(10,20,30)"), Ok(Rgba([10, 20, 30, 255])));
        assert_eq!(parse_color("rgb(100%, 0%, 50%)"), Ok(Rgba([255, 0, 128, 255])));
        assert_eq!(parse_color("rgba(1, 2, 3, 4)"), Ok(Rgba([1, 2, 3, 4])));
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("hsl(120, 100%, 25%)"), Ok(Rgba([0, 128, 0, 255])));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["not-a-color", "", "rgb(256, 0, 0)", "rgb(1,2)", "hsl(0, 120%, 50%)"] {
            let err = parse_color(bad).unwrap_err();
            assert_eq!(err.0, bad);
        }
    }
}
