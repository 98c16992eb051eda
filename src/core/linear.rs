/// Value at `x` of the straight line through `(x0, y0)` and `(x1, y1)`.
///
/// Works for both interpolation and extrapolation, `x0` and `x1` must differ.
#[must_use]
pub fn line_through((x0, y0): (f64, f64), (x1, y1): (f64, f64), x: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
