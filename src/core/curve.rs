use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Number of line segments used to approximate one cubic span.
pub const CURVE_SEGMENT_SAMPLES: usize = 12;

type Point = (f64, f64);

/// Interpolation style applied between consecutive series points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveType {
    #[default]
    Linear,
    Monotone,
    #[serde(rename = "monotoneX")]
    MonotoneX,
    #[serde(rename = "monotoneY")]
    MonotoneY,
    Natural,
    Basis,
    BasisClosed,
    BasisOpen,
    Bump,
    #[serde(rename = "bumpX")]
    BumpX,
    #[serde(rename = "bumpY")]
    BumpY,
    Step,
    StepBefore,
    StepAfter,
    LinearClosed,
}

impl CurveType {
    /// Every style, in the order offered by the line-style picker.
    pub const ALL: [CurveType; 15] = [
        CurveType::Linear,
        CurveType::Monotone,
        CurveType::MonotoneX,
        CurveType::MonotoneY,
        CurveType::Natural,
        CurveType::Basis,
        CurveType::BasisClosed,
        CurveType::BasisOpen,
        CurveType::Bump,
        CurveType::BumpX,
        CurveType::BumpY,
        CurveType::Step,
        CurveType::StepBefore,
        CurveType::StepAfter,
        CurveType::LinearClosed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CurveType::Linear => "linear",
            CurveType::Monotone => "monotone",
            CurveType::MonotoneX => "monotoneX",
            CurveType::MonotoneY => "monotoneY",
            CurveType::Natural => "natural",
            CurveType::Basis => "basis",
            CurveType::BasisClosed => "basisClosed",
            CurveType::BasisOpen => "basisOpen",
            CurveType::Bump => "bump",
            CurveType::BumpX => "bumpX",
            CurveType::BumpY => "bumpY",
            CurveType::Step => "step",
            CurveType::StepBefore => "stepBefore",
            CurveType::StepAfter => "stepAfter",
            CurveType::LinearClosed => "linearClosed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CurveType::Linear => "Linear",
            CurveType::Monotone => "Smooth (Monotone)",
            CurveType::MonotoneX => "Monotone X",
            CurveType::MonotoneY => "Monotone Y",
            CurveType::Natural => "Natural",
            CurveType::Basis => "Basis",
            CurveType::BasisClosed => "Basis Closed",
            CurveType::BasisOpen => "Basis Open",
            CurveType::Bump => "Bump",
            CurveType::BumpX => "Bump X",
            CurveType::BumpY => "Bump Y",
            CurveType::Step => "Step",
            CurveType::StepBefore => "Step Before",
            CurveType::StepAfter => "Step After",
            CurveType::LinearClosed => "Linear Closed",
        }
    }

    pub fn parse(value: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.as_str() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown line style `{value}`")))
    }

    /// Flattens pixel-space points into the polyline drawn for this style.
    #[must_use]
    pub fn flatten(self, points: &[Point]) -> Vec<Point> {
        if points.len() < 2 {
            return points.to_vec();
        }

        match self {
            CurveType::Linear => points.to_vec(),
            CurveType::LinearClosed => close(points.to_vec()),
            CurveType::Step => step(points, 0.5),
            CurveType::StepBefore => step(points, 0.0),
            CurveType::StepAfter => step(points, 1.0),
            CurveType::Bump | CurveType::BumpX => bump(points, false),
            CurveType::BumpY => bump(points, true),
            CurveType::Monotone | CurveType::MonotoneX => monotone(points),
            CurveType::MonotoneY => swap_axes(&monotone(&swap_axes(points))),
            CurveType::Natural => natural(points),
            CurveType::Basis => basis(points),
            CurveType::BasisOpen => basis_open(points),
            CurveType::BasisClosed => basis_closed(points),
        }
    }
}

fn close(mut polyline: Vec<Point>) -> Vec<Point> {
    if let Some(first) = polyline.first().copied() {
        polyline.push(first);
    }
    polyline
}

fn swap_axes(points: &[Point]) -> Vec<Point> {
    points.iter().map(|&(x, y)| (y, x)).collect()
}

/// `t` places the vertical riser: 0 at the start, 1 at the end, 0.5 midway.
fn step(points: &[Point], t: f64) -> Vec<Point> {
    let mut out = vec![points[0]];
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let riser_x = x0 + (x1 - x0) * t;
        out.push((riser_x, y0));
        out.push((riser_x, y1));
        out.push((x1, y1));
    }
    out
}

fn cubic_bezier(out: &mut Vec<Point>, p0: Point, c1: Point, c2: Point, p3: Point) {
    for sample in 1..=CURVE_SEGMENT_SAMPLES {
        let t = sample as f64 / CURVE_SEGMENT_SAMPLES as f64;
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        out.push((
            a * p0.0 + b * c1.0 + c * c2.0 + d * p3.0,
            a * p0.1 + b * c1.1 + c * c2.1 + d * p3.1,
        ));
    }
}

fn bump(points: &[Point], vertical: bool) -> Vec<Point> {
    let mut out = vec![points[0]];
    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let (c1, c2) = if vertical {
            let mid = (p0.1 + p1.1) / 2.0;
            ((p0.0, mid), (p1.0, mid))
        } else {
            let mid = (p0.0 + p1.0) / 2.0;
            ((mid, p0.1), (mid, p1.1))
        };
        cubic_bezier(&mut out, p0, c1, c2, p1);
    }
    out
}

/// Monotone cubic Hermite interpolation along x (Fritsch-Carlson slopes).
fn monotone(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let secants: Vec<f64> = points
        .windows(2)
        .map(|pair| {
            let h = pair[1].0 - pair[0].0;
            if h == 0.0 { 0.0 } else { (pair[1].1 - pair[0].1) / h }
        })
        .collect();

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let (s0, s1) = (secants[i - 1], secants[i]);
        let h0 = points[i].0 - points[i - 1].0;
        let h1 = points[i + 1].0 - points[i].0;
        let weighted = if h0 + h1 == 0.0 {
            0.0
        } else {
            (s0 * h1 + s1 * h0) / (h0 + h1)
        };
        tangents[i] = (s0.signum() + s1.signum())
            * s0.abs().min(s1.abs()).min(0.5 * weighted.abs());
        if s0 == 0.0 || s1 == 0.0 {
            tangents[i] = 0.0;
        }
    }
    tangents[0] = endpoint_tangent(secants[0], tangents.get(1).copied().filter(|_| n > 2));
    tangents[n - 1] = endpoint_tangent(
        secants[n - 2],
        tangents.get(n - 2).copied().filter(|_| n > 2),
    );

    let mut out = vec![points[0]];
    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        let dx = (p1.0 - p0.0) / 3.0;
        cubic_bezier(
            &mut out,
            p0,
            (p0.0 + dx, p0.1 + dx * tangents[i]),
            (p1.0 - dx, p1.1 - dx * tangents[i + 1]),
            p1,
        );
    }
    out
}

fn endpoint_tangent(secant: f64, neighbor: Option<f64>) -> f64 {
    match neighbor {
        Some(neighbor) => (3.0 * secant - neighbor) / 2.0,
        None => secant,
    }
}

/// Natural cubic spline through every point, parametrized by index.
fn natural(points: &[Point]) -> Vec<Point> {
    if points.len() == 2 {
        return points.to_vec();
    }
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (ax, bx) = natural_control_points(&xs);
    let (ay, by) = natural_control_points(&ys);

    let mut out = vec![points[0]];
    for i in 0..points.len() - 1 {
        cubic_bezier(
            &mut out,
            points[i],
            (ax[i], ay[i]),
            (bx[i], by[i]),
            points[i + 1],
        );
    }
    out
}

/// Solves the tridiagonal system for the Bezier controls of a natural spline.
fn natural_control_points(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    b[0] = 2.0;
    r[0] = values[0] + 2.0 * values[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * values[i] + 2.0 * values[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * values[n - 1] + values[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }
    b[n - 1] = (values[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * values[i + 1] - a[i + 1];
    }
    (a, b)
}

fn bspline_span(out: &mut Vec<Point>, controls: [Point; 4]) {
    let [p0, p1, p2, p3] = controls;
    for sample in 1..=CURVE_SEGMENT_SAMPLES {
        let t = sample as f64 / CURVE_SEGMENT_SAMPLES as f64;
        let t2 = t * t;
        let t3 = t2 * t;
        let w0 = (1.0 - t).powi(3);
        let w1 = 3.0 * t3 - 6.0 * t2 + 4.0;
        let w2 = -3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0;
        let w3 = t3;
        out.push((
            (w0 * p0.0 + w1 * p1.0 + w2 * p2.0 + w3 * p3.0) / 6.0,
            (w0 * p0.1 + w1 * p1.1 + w2 * p2.1 + w3 * p3.1) / 6.0,
        ));
    }
}

fn bspline_start(controls: [Point; 3]) -> Point {
    let [p0, p1, p2] = controls;
    (
        (p0.0 + 4.0 * p1.0 + p2.0) / 6.0,
        (p0.1 + 4.0 * p1.1 + p2.1) / 6.0,
    )
}

fn bspline(controls: &[Point]) -> Vec<Point> {
    let mut out = vec![bspline_start([controls[0], controls[1], controls[2]])];
    for window in controls.windows(4) {
        bspline_span(&mut out, [window[0], window[1], window[2], window[3]]);
    }
    out
}

/// Uniform B-spline clamped to the first and last points.
fn basis(points: &[Point]) -> Vec<Point> {
    let first = points[0];
    let last = points[points.len() - 1];
    let mut controls = vec![first, first];
    controls.extend_from_slice(points);
    controls.extend([last, last]);
    bspline(&controls)
}

fn basis_open(points: &[Point]) -> Vec<Point> {
    if points.len() < 4 {
        return points.to_vec();
    }
    bspline(points)
}

fn basis_closed(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return close(points.to_vec());
    }
    let mut controls = points.to_vec();
    controls.extend_from_slice(&points[..3]);
    bspline(&controls)
}
