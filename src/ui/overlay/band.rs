//! Band styling.
//!
//! The band is a fixed, full-width strip with a vertical gradient fill that
//! fades to transparent at its top and bottom edges, a half-opaque border
//! on both edges and a soft glow, all derived from the ruler colour.

use crate::model::constants::*;
use crate::model::RulerColor;
use crate::surface::NodeSpec;

/// Parameters that shape the band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandParams<'a> {
    pub color: &'a RulerColor,
    pub opacity: f64,
    pub height_px: f64,
}

/// Format a pixel length (`487.5px`, `-100px`).
pub fn px(v: f64) -> String {
    format!("{v}px")
}

/// Gradient fill with colour stops at 20% and 80%.
pub fn gradient(color: &RulerColor, opacity: f64) -> String {
    let stop = color.with_opacity(opacity);
    format!(
        "linear-gradient(to bottom, transparent 0%, {stop} 20%, {stop} 80%, transparent 100%)"
    )
}

/// The colour-dependent style properties, in application order.
pub fn color_styles(color: &RulerColor, opacity: f64) -> [(&'static str, String); 4] {
    let border = format!("1px solid {}", color.with_alpha_hex(BORDER_ALPHA_HEX));
    [
        ("background", gradient(color, opacity)),
        ("border-top", border.clone()),
        ("border-bottom", border),
        ("box-shadow", format!("0 0 10px {}", color.with_alpha_hex(GLOW_ALPHA_HEX))),
    ]
}

/// Full node description for a freshly created band, parked off-screen.
pub fn band_spec(params: &BandParams<'_>) -> NodeSpec {
    let mut spec = NodeSpec::new("div")
        .with_dom_id(BAND_DOM_ID)
        .with_style("position", "fixed")
        .with_style("left", "0")
        .with_style("right", "0")
        .with_style("height", px(params.height_px))
        .with_style("pointer-events", "none")
        .with_style("z-index", BAND_Z_INDEX)
        .with_style("top", px(OFFSCREEN_TOP_PX))
        .with_style("transition", BAND_TRANSITION);
    for (property, value) in color_styles(params.color, params.opacity) {
        spec = spec.with_style(property, value);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::alpha_hex;

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(487.5), "487.5px");
        assert_eq!(px(500.0), "500px");
        assert_eq!(px(-100.0), "-100px");
    }

    #[test]
    fn test_gradient_uses_opacity_alpha() {
        let c = RulerColor::default();
        let expected_stop = format!("#ffeb3b{}", alpha_hex(0.3));
        let g = gradient(&c, 0.3);
        assert!(g.starts_with("linear-gradient(to bottom, transparent 0%"));
        assert!(g.contains(&format!("{expected_stop} 20%")));
        assert!(g.contains(&format!("{expected_stop} 80%")));
        assert!(g.ends_with("transparent 100%)"));
    }

    #[test]
    fn test_color_styles_border_and_glow() {
        let c = RulerColor::parse("#4caf50").unwrap();
        let styles = color_styles(&c, 0.3);
        assert_eq!(styles[1], ("border-top", "1px solid #4caf5080".to_string()));
        assert_eq!(styles[2], ("border-bottom", "1px solid #4caf5080".to_string()));
        assert_eq!(styles[3], ("box-shadow", "0 0 10px #4caf5040".to_string()));
    }

    #[test]
    fn test_band_spec_starts_offscreen() {
        let c = RulerColor::default();
        let spec = band_spec(&BandParams {
            color: &c,
            opacity: 0.3,
            height_px: 25.0,
        });
        assert_eq!(spec.dom_id.as_deref(), Some(BAND_DOM_ID));
        assert_eq!(spec.style("top"), Some("-100px"));
        assert_eq!(spec.style("height"), Some("25px"));
        assert_eq!(spec.style("pointer-events"), Some("none"));
        assert_eq!(spec.style("transition"), Some("top 0.1s ease"));
        assert_eq!(spec.style("box-shadow"), Some("0 0 10px #ffeb3b40"));
    }
}
