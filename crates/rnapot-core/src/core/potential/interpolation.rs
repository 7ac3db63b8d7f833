use super::profile::PotentialProfile;

/// Straight-line interpolation through `(x0, y0)` and `(x1, y1)`.
///
/// Returns `y0` when the two abscissae coincide.
#[inline]
pub fn linear_interpolation(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Evaluates a profile at a continuous distance.
///
/// The knots are the bin centers. Between the largest center `<= distance` and the smallest
/// center `> distance` the value is interpolated linearly. Below the first center the first
/// score is returned, at or beyond the last center the last score; there is no extrapolation.
/// An empty profile evaluates to zero.
pub fn interpolate(profile: &PotentialProfile, distance: f64) -> f64 {
    let scores = profile.scores();
    let Some((&first, &last)) = scores.first().zip(scores.last()) else {
        return 0.0;
    };

    let last_index = scores.len() - 1;
    if distance < profile.bin_center(0) {
        return first;
    }
    if distance >= profile.bin_center(last_index) || distance.is_nan() {
        return last;
    }

    let lower = bracketing_lower_index(profile, distance, last_index);
    let (x0, y0) = (profile.bin_center(lower), scores[lower]);
    let (x1, y1) = (profile.bin_center(lower + 1), scores[lower + 1]);
    linear_interpolation(x0, y0, x1, y1, distance)
}

// Index `k` with `center(k) <= distance < center(k + 1)`, for a distance strictly inside the
// knot range. The arithmetic estimate is corrected against the actual centers so that a
// distance equal to a center always selects that center as the lower knot.
fn bracketing_lower_index(profile: &PotentialProfile, distance: f64, last_index: usize) -> usize {
    let estimate = (distance / profile.bin_width() - 0.5).floor();
    let mut k = if estimate <= 0.0 {
        0
    } else {
        (estimate as usize).min(last_index - 1)
    };

    while k > 0 && profile.bin_center(k) > distance {
        k -= 1;
    }
    while k + 1 < last_index && profile.bin_center(k + 1) <= distance {
        k += 1;
    }
    k
}
