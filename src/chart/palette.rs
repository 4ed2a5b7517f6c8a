use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Series palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            to_rgb(hsl.into_color())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging colormap for correlation cells
// ---------------------------------------------------------------------------

/// Map a correlation in `[-1, 1]` to a diverging blue→white→red colour.
/// NaN (undefined correlation) gets a neutral gray.
pub fn correlation_color(r: f64) -> RGBColor {
    if !r.is_finite() {
        return RGBColor(200, 200, 200);
    }
    let t = (r.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;

    let cold = Srgb::new(0.23, 0.30, 0.75);
    let white = Srgb::new(0.96, 0.96, 0.96);
    let warm = Srgb::new(0.71, 0.02, 0.15);

    let rgb = if t < 0.5 {
        lerp(cold, white, t * 2.0)
    } else {
        lerp(white, warm, (t - 0.5) * 2.0)
    };
    to_rgb(rgb)
}

fn lerp(a: Srgb, b: Srgb, t: f32) -> Srgb {
    Srgb::new(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}

fn to_rgb(rgb: Srgb) -> RGBColor {
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(
                    (colors[i].0, colors[i].1, colors[i].2),
                    (colors[j].0, colors[j].1, colors[j].2)
                );
            }
        }
    }

    #[test]
    fn correlation_endpoints_are_cold_white_warm() {
        let cold = correlation_color(-1.0);
        let mid = correlation_color(0.0);
        let warm = correlation_color(1.0);
        assert!(cold.2 > cold.0); // blue-dominant
        assert!(warm.0 > warm.2); // red-dominant
        assert!(mid.0 > 230 && mid.1 > 230 && mid.2 > 230); // near white
    }

    #[test]
    fn undefined_correlation_is_neutral() {
        let c = correlation_color(f64::NAN);
        assert_eq!((c.0, c.1, c.2), (200, 200, 200));
    }
}
