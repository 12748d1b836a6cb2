use conversion_chart::core::CurveType;
use proptest::prelude::*;

fn polyline(ys: &[f64]) -> Vec<(f64, f64)> {
    ys.iter()
        .enumerate()
        .map(|(i, y)| (40.0 + i as f64 * 25.0, *y))
        .collect()
}

const INTERPOLATING: [CurveType; 11] = [
    CurveType::Linear,
    CurveType::Monotone,
    CurveType::MonotoneX,
    CurveType::MonotoneY,
    CurveType::Natural,
    CurveType::Basis,
    CurveType::Bump,
    CurveType::BumpX,
    CurveType::Step,
    CurveType::StepBefore,
    CurveType::StepAfter,
];

proptest! {
    #[test]
    fn open_curves_start_and_end_on_data(
        ys in prop::collection::vec(0.0f64..500.0, 2..30)
    ) {
        let points = polyline(&ys);
        let first = points[0];
        let last = points[points.len() - 1];
        for curve in INTERPOLATING {
            let flat = curve.flatten(&points);
            let (start, end) = (flat[0], flat[flat.len() - 1]);
            prop_assert!((start.0 - first.0).abs() <= 1e-6 && (start.1 - first.1).abs() <= 1e-6,
                "{} start {:?}", curve.as_str(), start);
            prop_assert!((end.0 - last.0).abs() <= 1e-6 && (end.1 - last.1).abs() <= 1e-6,
                "{} end {:?}", curve.as_str(), end);
        }
    }

    #[test]
    fn monotone_and_bump_never_overshoot(
        ys in prop::collection::vec(0.0f64..500.0, 2..30)
    ) {
        let points = polyline(&ys);
        let min = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for curve in [CurveType::MonotoneX, CurveType::BumpX] {
            for (_, y) in curve.flatten(&points) {
                prop_assert!(y >= min - 1e-6 && y <= max + 1e-6, "{} overshoot {}", curve.as_str(), y);
            }
        }
    }

    #[test]
    fn closed_curves_return_to_start(
        ys in prop::collection::vec(0.0f64..500.0, 3..20)
    ) {
        let points = polyline(&ys);
        for curve in [CurveType::LinearClosed, CurveType::BasisClosed] {
            let flat = curve.flatten(&points);
            let (start, end) = (flat[0], flat[flat.len() - 1]);
            prop_assert!((start.0 - end.0).abs() <= 1e-6 && (start.1 - end.1).abs() <= 1e-6,
                "{} not closed", curve.as_str());
        }
    }
}
