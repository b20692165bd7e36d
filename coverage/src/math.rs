/// Returns `start, start + step, ...` for every value strictly below
/// `stop`, with the length rounded up like a half-open float range.
///
/// Because the length is computed from `(stop - start) / step`, the
/// final value may land a fraction of `step` past where a caller
/// expects.
pub fn arange(start: f64, stop: f64, step: f64) -> impl Iterator<Item = f64> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let len = ((stop - start) / step).ceil().max(0.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    (0..len).map(move |n| start + n as f64 * step)
}
