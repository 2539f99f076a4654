use crate::errors::{Error, Result};

// Computes the target size from the original size and the requested `w`/`h`
// strings. `w` selects the mode for both axes: a trailing `%` scales the
// original proportionally, a bare number is absolute pixels. In percentage
// mode `h` may carry the `%` or not; in absolute mode it must be a bare
// number. A missing `h` preserves the original aspect ratio.
pub fn compute(
    original_width: u32,
    original_height: u32,
    w: &str,
    h: Option<&str>,
) -> Result<(u32, u32)> {
    if original_width == 0 || original_height == 0 {
        return Err(Error::DegenerateImage);
    }

    let (new_width, new_height) = if let Some(ratio_w) = w.strip_suffix('%') {
        let ratio_w = parse_positive("w", ratio_w, w)?;
        let ratio_h = match h {
            Some(h) => parse_positive("h", h.strip_suffix('%').unwrap_or(h), h)?,
            None => ratio_w,
        };

        (
            f64::from(original_width) * ratio_w / 100.0,
            f64::from(original_height) * ratio_h / 100.0,
        )
    } else {
        let new_width = parse_positive("w", w, w)?;
        let new_height = match h {
            Some(h) => parse_positive("h", h, h)?,
            None => f64::from(original_height) * new_width / f64::from(original_width),
        };

        (new_width, new_height)
    };

    Ok((round_dimension(new_width), round_dimension(new_height)))
}

fn parse_positive(field: &str, numeric: &str, raw: &str) -> Result<f64> {
    let invalid = || Error::InvalidSizeParam {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let value: f64 = numeric.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }

    Ok(value)
}

// Positive inputs can still round down to zero (e.g. 0.1% of a tiny image)
fn round_dimension(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_width_preserves_aspect_ratio() {
        assert_eq!(compute(800, 600, "300", None).unwrap(), (300, 225));
        assert_eq!(compute(1920, 1080, "960", None).unwrap(), (960, 540));
    }

    #[test]
    fn absolute_pair_ignores_original_size() {
        assert_eq!(compute(800, 600, "300", Some("150")).unwrap(), (300, 150));
        assert_eq!(compute(10, 10, "300", Some("150")).unwrap(), (300, 150));
    }

    #[test]
    fn percentage_without_height_scales_both_axes() {
        assert_eq!(compute(400, 300, "50%", None).unwrap(), (200, 150));
    }

    #[test]
    fn mixed_percentages() {
        assert_eq!(compute(100, 200, "200%", Some("50%")).unwrap(), (200, 100));
    }

    #[test]
    fn percentage_height_accepts_bare_number() {
        // Height in percentage mode works with or without the suffix
        assert_eq!(compute(100, 200, "200%", Some("50")).unwrap(), (200, 100));
    }

    #[test]
    fn fractional_results_round() {
        assert_eq!(compute(99, 99, "33.4%", None).unwrap(), (33, 33));
    }

    #[test]
    fn tiny_results_clamp_to_one_pixel() {
        assert_eq!(compute(10, 10, "1%", None).unwrap(), (1, 1));
    }

    #[test]
    fn rejects_non_numeric_width() {
        assert!(matches!(
            compute(100, 100, "wide", None),
            Err(Error::InvalidSizeParam { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(compute(100, 100, "0", None).is_err());
        assert!(compute(100, 100, "-50", None).is_err());
        assert!(compute(100, 100, "0%", None).is_err());
        assert!(compute(100, 100, "50%", Some("-1")).is_err());
    }

    #[test]
    fn rejects_percent_height_in_absolute_mode() {
        assert!(matches!(
            compute(100, 100, "300", Some("150%")),
            Err(Error::InvalidSizeParam { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_original() {
        assert!(matches!(
            compute(0, 100, "50%", None),
            Err(Error::DegenerateImage)
        ));
    }
}
