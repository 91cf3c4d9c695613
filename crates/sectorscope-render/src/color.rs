//! Color palettes and scales.

use sectorscope_core::ColorDomain;

/// Fill used when a value cannot be mapped to a color.
pub const UNKNOWN_FILL: &str = "#ccc";

/// Categorical palette for line series, assigned in selection order.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Red → yellow → green control points of the diverging interpolator.
const RD_YL_GN: [Rgb; 11] = [
    Rgb::new(0xa5, 0x00, 0x26),
    Rgb::new(0xd7, 0x30, 0x27),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x8b),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xd9, 0xef, 0x8b),
    Rgb::new(0xa6, 0xd9, 0x6a),
    Rgb::new(0x66, 0xbd, 0x63),
    Rgb::new(0x1a, 0x98, 0x50),
    Rgb::new(0x00, 0x68, 0x37),
];

pub fn categorical(index: usize) -> &'static str {
    TABLEAU10[index % TABLEAU10.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness on a 0–255 scale.
    pub fn brightness(self) -> f64 {
        f64::from(self.r) * 0.299 + f64::from(self.g) * 0.587 + f64::from(self.b) * 0.114
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrasting_text(self) -> &'static str {
        if self.brightness() > 150.0 {
            "#000"
        } else {
            "#fff"
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Sample the red-yellow-green ramp at `t` in `[0, 1]` using a uniform cubic
/// B-spline through the control points.
pub fn interpolate_rd_yl_gn(t: f64) -> Rgb {
    let channel = |pick: fn(Rgb) -> u8| {
        let values: Vec<f64> = RD_YL_GN.iter().map(|c| f64::from(pick(*c))).collect();
        to_channel(basis_spline(&values, t))
    };

    Rgb::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b))
}

fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Maps `[min, mid, max]` onto `[0, 0.5, 1]` piecewise-linearly, then through
/// the red-yellow-green ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScale {
    domain: ColorDomain,
}

impl DivergingScale {
    pub fn new(domain: ColorDomain) -> Self {
        Self { domain }
    }

    /// Position of `value` along the ramp. A collapsed half of the domain maps
    /// to the midpoint.
    pub fn position(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }

        let ColorDomain { min, mid, max } = self.domain;
        let lower = if min == mid { 0.0 } else { 0.5 / (mid - min) };
        let upper = if mid == max { 0.0 } else { 0.5 / (max - mid) };
        let sign = if mid < min { -1.0 } else { 1.0 };
        let k = if sign * value < sign * mid { lower } else { upper };

        Some((0.5 + (value - mid) * k).clamp(0.0, 1.0))
    }

    pub fn color(&self, value: f64) -> Option<Rgb> {
        self.position(value).map(interpolate_rd_yl_gn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_and_midpoint() {
        assert_eq!(interpolate_rd_yl_gn(0.0), Rgb::new(0xa5, 0x00, 0x26));
        assert_eq!(interpolate_rd_yl_gn(1.0), Rgb::new(0x00, 0x68, 0x37));

        let mid = interpolate_rd_yl_gn(0.5);
        assert!(mid.r > 240 && mid.g > 240, "midpoint should be pale yellow: {mid:?}");
    }

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|value| (value - expected).abs() < 1e-9)
    }

    #[test]
    fn diverging_positions() {
        let scale = DivergingScale::new(ColorDomain {
            min: -0.04,
            mid: 0.0,
            max: 0.1,
        });

        assert!(approx(scale.position(-0.04), 0.0));
        assert_eq!(scale.position(0.0), Some(0.5));
        assert!(approx(scale.position(0.1), 1.0));
        assert!(approx(scale.position(-0.02), 0.25));
        assert_eq!(scale.position(f64::NAN), None);
    }

    #[test]
    fn collapsed_lower_half_maps_to_midpoint() {
        let scale = DivergingScale::new(ColorDomain {
            min: 0.0,
            mid: 0.0,
            max: 0.2,
        });
        assert_eq!(scale.position(-1.0), Some(0.5));
        assert!(approx(scale.position(0.1), 0.75));
    }

    #[test]
    fn losers_are_red_and_winners_green() {
        let scale = DivergingScale::new(ColorDomain {
            min: -0.1,
            mid: 0.0,
            max: 0.1,
        });
        let loser = scale.color(-0.1).expect("finite");
        let winner = scale.color(0.1).expect("finite");
        assert!(loser.r > loser.g);
        assert!(winner.g > winner.r);
    }

    #[test]
    fn text_contrast_follows_brightness() {
        assert_eq!(Rgb::new(255, 255, 191).contrasting_text(), "#000");
        assert_eq!(Rgb::new(0, 104, 55).contrasting_text(), "#fff");
    }

    #[test]
    fn categorical_palette_wraps() {
        assert_eq!(categorical(0), "#4e79a7");
        assert_eq!(categorical(10), categorical(0));
    }
}
