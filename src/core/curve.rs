use std::ops::RangeInclusive;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{Error, Result, linear::line_through},
    quantity::{current::Amperes, rotation::Rpm},
};

/// Tabulated motor current at a given shaft speed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MotorSpecPoint {
    pub rpm: Rpm,
    pub current: Amperes,
}

/// Piecewise-linear current-versus-RPM curve of a motor.
///
/// Points are kept sorted by RPM. Lookups outside of the tabulated range fail,
/// the curve is never extrapolated.
#[must_use]
#[derive(Clone, Debug)]
pub struct MotorCurve {
    points: Vec<MotorSpecPoint>,
}

impl MotorCurve {
    pub fn new(points: impl IntoIterator<Item = MotorSpecPoint>) -> Result<Self> {
        let points = points.into_iter().sorted_by_key(|point| point.rpm).collect_vec();
        if points.is_empty() {
            return Err(Error::InvalidConfiguration("motor curve has no points".to_string()));
        }
        if let Some(point) = points
            .iter()
            .find(|point| !point.rpm.is_finite() || point.rpm <= Rpm::ZERO)
        {
            return Err(Error::InvalidConfiguration(format!(
                "motor curve RPM must be positive, got {:?}",
                point.rpm,
            )));
        }
        if let Some(point) = points
            .iter()
            .find(|point| !point.current.is_finite() || point.current < Amperes::ZERO)
        {
            return Err(Error::InvalidConfiguration(format!(
                "motor curve current must be non-negative, got {:?}",
                point.current,
            )));
        }
        if let Some((point, _)) = points.iter().tuple_windows().find(|(lo, hi)| lo.rpm == hi.rpm) {
            return Err(Error::InvalidConfiguration(format!(
                "duplicate motor curve RPM {:?}",
                point.rpm,
            )));
        }
        Ok(Self { points })
    }

    /// Base RPM of the curve, the lowest tabulated one.
    #[must_use]
    pub fn rated_rpm(&self) -> Rpm {
        self.points[0].rpm
    }

    #[must_use]
    pub fn range(&self) -> RangeInclusive<Rpm> {
        self.points[0].rpm..=self.points[self.points.len() - 1].rpm
    }

    /// Current draw at the target RPM.
    ///
    /// An exactly tabulated RPM returns the tabulated current as is.
    pub fn current_at(&self, rpm: Rpm) -> Result<Amperes> {
        if let Some(point) = self.points.iter().find(|point| point.rpm == rpm) {
            return Ok(point.current);
        }
        self.points
            .iter()
            .tuple_windows()
            .find(|(lo, hi)| lo.rpm < rpm && rpm < hi.rpm)
            .map(|(lo, hi)| {
                Amperes(line_through(
                    (lo.rpm.0, lo.current.0),
                    (hi.rpm.0, hi.current.0),
                    rpm.0,
                ))
            })
            .ok_or_else(|| {
                let range = self.range();
                Error::OutOfInterpolationRange { rpm, min: *range.start(), max: *range.end() }
            })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn point(rpm: f64, current: f64) -> MotorSpecPoint {
        MotorSpecPoint { rpm: Rpm(rpm), current: Amperes(current) }
    }

    fn dead_slow_ahead() -> Result<MotorCurve> {
        MotorCurve::new([point(140.0, 600.0), point(180.0, 750.0)])
    }

    #[test]
    fn test_exact_match() -> Result {
        let curve = dead_slow_ahead()?;
        assert_eq!(curve.current_at(Rpm(140.0))?, Amperes(600.0));
        assert_eq!(curve.current_at(Rpm(180.0))?, Amperes(750.0));
        Ok(())
    }

    #[test]
    fn test_interpolation() -> Result {
        let curve = dead_slow_ahead()?;
        assert_abs_diff_eq!(curve.current_at(Rpm(170.0))?.0, 712.5);
        assert_abs_diff_eq!(curve.current_at(Rpm(160.0))?.0, 675.0);
        Ok(())
    }

    #[test]
    fn test_out_of_range() -> Result {
        let curve = dead_slow_ahead()?;
        let expected = |rpm| Error::OutOfInterpolationRange {
            rpm: Rpm(rpm),
            min: Rpm(140.0),
            max: Rpm(180.0),
        };
        assert_eq!(curve.current_at(Rpm(100.0)), Err(expected(100.0)));
        assert_eq!(curve.current_at(Rpm(200.0)), Err(expected(200.0)));
        assert!(curve.current_at(Rpm(f64::NAN)).is_err());
        Ok(())
    }

    #[test]
    fn test_unsorted_points_are_sorted() -> Result {
        let curve =
            MotorCurve::new([point(300.0, 1800.0), point(260.0, 1600.0), point(280.0, 1650.0)])?;
        assert_eq!(curve.rated_rpm(), Rpm(260.0));
        assert_abs_diff_eq!(curve.current_at(Rpm(270.0))?.0, 1625.0);
        assert_abs_diff_eq!(curve.current_at(Rpm(290.0))?.0, 1725.0);
        Ok(())
    }

    #[test]
    fn test_monotonic_between_points() -> Result {
        let curve = MotorCurve::new([point(200.0, 1400.0), point(250.0, 1600.0)])?;
        let currents = (200..=250)
            .map(|rpm| curve.current_at(Rpm(f64::from(rpm))))
            .collect::<Result<Vec<_>>>()?;
        assert!(currents.iter().tuple_windows().all(|(lo, hi)| lo <= hi));
        assert!(currents.iter().all(|current| (1400.0..=1600.0).contains(&current.0)));
        Ok(())
    }

    #[test]
    fn test_single_point() -> Result {
        let curve = MotorCurve::new([point(150.0, 650.0)])?;
        assert_eq!(curve.current_at(Rpm(150.0))?, Amperes(650.0));
        assert!(curve.current_at(Rpm(151.0)).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_points() {
        assert!(MotorCurve::new(Vec::new()).is_err());
        assert!(MotorCurve::new([point(140.0, 600.0), point(140.0, 650.0)]).is_err());
        assert!(MotorCurve::new([point(0.0, 600.0)]).is_err());
        assert!(MotorCurve::new([point(140.0, -1.0)]).is_err());
    }
}
