use crate::{
    foundation::{
        core::{Point, Rgb8, Vec2},
        error::{GradientError, GradientResult},
    },
    synth::{
        layer::{BaseLayer, Geometry, GradientLayers, StripeLayer},
        ramp::ColorRamp,
    },
};

/// Line through the surface center along `angle_degrees`.
///
/// `offset` measures distance from the start of the gradient line, where the line enters the
/// box spanned by the pixel centers. The line length is `(w-1)·|cos θ| + (h-1)·|sin θ|`, the
/// same construction CSS uses for linear gradients.
#[derive(Clone, Copy, Debug)]
struct Axis {
    center: Point,
    dir: Vec2,
    half: f64,
}

impl Axis {
    fn new(angle_degrees: f64, center: Point) -> Self {
        let dir = Vec2::from_angle(angle_degrees.to_radians());
        // Snap axis-aligned angles so that e.g. 90° has no stray horizontal component.
        let dir = Vec2::new(snap_unit(dir.x), snap_unit(dir.y));
        let half = center.x * dir.x.abs() + center.y * dir.y.abs();
        Self { center, dir, half }
    }

    fn offset(&self, p: Point) -> f64 {
        (p - self.center).dot(self.dir) + self.half
    }

    fn param(&self, p: Point) -> f64 {
        if self.half <= 0.0 {
            return 0.0;
        }
        (self.offset(p) / (2.0 * self.half)).clamp(0.0, 1.0)
    }
}

const CONIC_WRAP_EPS_DEG: f64 = 1e-9;

fn snap_unit(v: f64) -> f64 {
    if v.abs() < 1e-12 { 0.0 } else { v }
}

#[derive(Clone, Copy, Debug)]
enum Mapping {
    Linear(Axis),
    Radial { center: Point, max_dist: f64 },
    Conic { center: Point, from_degrees: f64 },
}

impl Mapping {
    fn param(&self, p: Point) -> f64 {
        match *self {
            Mapping::Linear(axis) => axis.param(p),
            Mapping::Radial { center, max_dist } => {
                if max_dist <= 0.0 {
                    return 0.0;
                }
                ((p - center).hypot() / max_dist).clamp(0.0, 1.0)
            }
            Mapping::Conic {
                center,
                from_degrees,
            } => {
                let d = p - center;
                if d.x == 0.0 && d.y == 0.0 {
                    return 0.0;
                }
                // y grows downward, so atan2 already measures clockwise on screen.
                let sweep = (d.atan2().to_degrees() - from_degrees).rem_euclid(360.0);
                // Round-off can land a hair below a full turn for rays exactly on the start angle.
                if 360.0 - sweep < CONIC_WRAP_EPS_DEG {
                    0.0
                } else {
                    sweep / 360.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Hatching {
    axis: Axis,
    band_px: f64,
    color: Rgb8,
    alpha: f64,
}

impl Hatching {
    fn covers(&self, p: Point) -> bool {
        let band = (self.axis.offset(p) / self.band_px).floor() as i64;
        band.rem_euclid(2) == 1
    }

    fn blend(&self, base: Rgb8) -> Rgb8 {
        let mix = |c: u8, o: u8| -> u8 {
            (f64::from(c) * (1.0 - self.alpha) + f64::from(o) * self.alpha)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb8::new(
            mix(base.r, self.color.r),
            mix(base.g, self.color.g),
            mix(base.b, self.color.b),
        )
    }
}

/// Color of a gradient at every pixel of a `width × height` surface.
///
/// This is the single definition of "what color does pattern P produce here"; the raster
/// renderer samples it per pixel and the preview descriptor is built from the same
/// [`GradientLayers`]. Pixel `(x, y)` is addressed by its integer coordinates and the surface
/// center is `((width - 1) / 2, (height - 1) / 2)`, which makes the first and last column of
/// a 0° linear gradient land exactly on the first and last stop.
#[derive(Clone, Debug)]
pub struct GradientField {
    mapping: Mapping,
    ramp: ColorRamp,
    hatching: Option<Hatching>,
}

impl GradientField {
    /// Prepare a field for `layers` on a `width × height` surface.
    pub fn new(layers: &GradientLayers, width: u32, height: u32) -> GradientResult<Self> {
        if width == 0 || height == 0 {
            return Err(GradientError::invalid_target(format!(
                "field surface must be non-empty, got {width}x{height}"
            )));
        }
        let center = Point::new(
            f64::from(width - 1) / 2.0,
            f64::from(height - 1) / 2.0,
        );
        Ok(Self {
            mapping: mapping_for(&layers.base, center),
            ramp: ramp_for(&layers.base)?,
            hatching: layers.stripes.as_ref().map(|s| hatching_for(s, center)),
        })
    }

    /// Gradient parameter `t` at pixel `(x, y)`.
    pub fn param_at(&self, x: u32, y: u32) -> f64 {
        self.mapping.param(pixel(x, y))
    }

    /// Base gradient color at `(x, y)`, without hatching.
    pub fn base_color_at(&self, x: u32, y: u32) -> Rgb8 {
        self.ramp.sample(self.param_at(x, y))
    }

    /// Whether the Wave hatching covers `(x, y)`. Always `false` for other patterns.
    pub fn stripe_at(&self, x: u32, y: u32) -> bool {
        self.hatching.is_some_and(|h| h.covers(pixel(x, y)))
    }

    /// Final pre-noise color at `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> Rgb8 {
        let p = pixel(x, y);
        let base = self.ramp.sample(self.mapping.param(p));
        match self.hatching {
            Some(h) if h.covers(p) => h.blend(base),
            _ => base,
        }
    }
}

fn pixel(x: u32, y: u32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

fn mapping_for(base: &BaseLayer, center: Point) -> Mapping {
    match base.geometry {
        Geometry::Linear { angle_degrees } => Mapping::Linear(Axis::new(angle_degrees, center)),
        Geometry::Radial => Mapping::Radial {
            center,
            max_dist: center.to_vec2().hypot(),
        },
        Geometry::Conic { from_degrees } => Mapping::Conic {
            center,
            from_degrees,
        },
    }
}

fn ramp_for(base: &BaseLayer) -> GradientResult<ColorRamp> {
    let colors: Vec<Rgb8> = base.stops.iter().map(|s| s.color).collect();
    ColorRamp::new(&colors)
}

fn hatching_for(stripes: &StripeLayer, center: Point) -> Hatching {
    Hatching {
        axis: Axis::new(stripes.angle_degrees, center),
        band_px: stripes.band_px,
        color: stripes.color,
        alpha: stripes.alpha,
    }
}
