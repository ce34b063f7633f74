use gradient_synth::{
    GradientDocument, GradientPreset, GradientSpec, GradientSynthesizer, NoiseSpec, Pattern,
};
use serde_json::json;

fn preset(name: &str, angle: f64, pattern: Pattern) -> GradientSpec {
    let mut spec = GradientSpec {
        angle_degrees: angle,
        pattern,
        ..GradientSpec::default()
    };
    GradientPreset::find(name).unwrap().apply_to(&mut spec);
    spec
}

#[test]
fn css_text_for_every_pattern() {
    let s = GradientSynthesizer::new();
    let off = NoiseSpec::disabled();
    let cases = [
        (
            preset("ocean", 0.0, Pattern::Linear),
            "background: linear-gradient(90deg, #0ea5e9 0%, #2563eb 100%);",
        ),
        (
            preset("sunset", 90.0, Pattern::Radial),
            "background: radial-gradient(circle at center, #f43f5e 0%, #7c3aed 100%);",
        ),
        (
            preset("forest", 180.0, Pattern::Conic),
            "background: conic-gradient(from 270deg at center, #059669 0%, #10b981 100%);",
        ),
        (
            preset("dawn", 270.0, Pattern::Wave),
            concat!(
                "background: repeating-linear-gradient(45deg, transparent 0px, transparent 10px, ",
                "rgba(255,255,255,0.1) 10px, rgba(255,255,255,0.1) 20px), ",
                "linear-gradient(0deg, #d946ef 0%, #ec4899 100%);"
            ),
        ),
    ];
    for (spec, expected) in cases {
        assert_eq!(s.css(&spec, &off).unwrap(), expected, "{}", spec.pattern);
    }
}

#[test]
fn preview_and_raster_share_layers() {
    let s = GradientSynthesizer::new();
    let spec = preset("midnight", 60.0, Pattern::Wave);
    let d = s.render_preview(&spec, &NoiseSpec::disabled()).unwrap();
    assert_eq!(d.pattern, Pattern::Wave);
    assert_eq!(d.base.stops.len(), 2);
    assert_eq!(d.stripes.unwrap().angle_degrees, 105.0);
    assert!(d.overlay.is_none());
}

#[test]
fn noise_overlay_embeds_turbulence_svg() {
    let s = GradientSynthesizer::new();
    let mut noise = NoiseSpec::enabled(0.5);
    noise.scale = 30;
    let d = s
        .render_preview(&preset("midnight", 0.0, Pattern::Linear), &noise)
        .unwrap();
    let tile = d.overlay.unwrap();
    assert_eq!(tile.size, 30);
    assert_eq!(tile.octaves, 4);
    assert!((tile.base_frequency - 0.005).abs() < 1e-12);
    assert!(tile.to_svg().contains(r#"type="fractalNoise""#));
    let css = d.to_css();
    assert!(css.starts_with("url(\"data:image/svg+xml,%3Csvg"));
    let uri_end = css.find("\")").unwrap();
    assert!(!css[..uri_end].contains(' '));
}

#[test]
fn document_json_loads_with_default_noise() {
    let doc = GradientDocument::from_json_str(
        &json!({
            "gradient": {
                "colors": ["#1F2937", "#9CA3AF", [255, 0, 0]],
                "angle_degrees": 45.0,
                "pattern": "conic"
            },
            "target": { "width": 640, "height": 360, "format": "jpeg" }
        })
        .to_string(),
    )
    .unwrap();
    assert_eq!(doc.gradient.colors.len(), 3);
    assert_eq!(doc.gradient.pattern, Pattern::Conic);
    assert!(!doc.noise.enabled);
    assert_eq!(doc.target.format.file_name(), "gradient.jpeg");
}

#[test]
fn document_json_rejects_bad_values() {
    let too_many = json!({
        "gradient": {
            "colors": ["#000", "#111", "#222", "#333", "#444", "#555"],
            "angle_degrees": 0.0,
            "pattern": "linear"
        },
        "target": { "width": 10, "height": 10, "format": "png" }
    });
    assert!(GradientDocument::from_json_str(&too_many.to_string()).is_err());

    let bad_color = json!({
        "gradient": { "colors": ["#zzzzzz", "#000000"], "angle_degrees": 0.0, "pattern": "linear" },
        "target": { "width": 10, "height": 10, "format": "png" }
    });
    assert!(GradientDocument::from_json_str(&bad_color.to_string()).is_err());
}
