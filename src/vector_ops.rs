use crate::config::Number;
use wide::f32x8;

/// Compute the Euclidean distance between two vectors using SIMD operations.
///
/// Preconditions are checked, not assumed: both slices must be non-empty and
/// of equal length, and the accumulated distance must come out finite. Any
/// violation returns `Number::INFINITY`, a sentinel that ranks the pair last
/// so callers can filter invalid entries uniformly instead of branching on
/// errors.
pub fn euclidean_distance(a: &[Number], b: &[Number]) -> Number {
    if a.is_empty() || a.len() != b.len() {
        return Number::INFINITY;
    }

    let mut sum = f32x8::splat(0.0);

    let len = a.len();
    let simd_len = len - (len % 8);

    // SIMD loop
    for i in (0..simd_len).step_by(8) {
        let va = f32x8::new([
            a[i],
            a[i + 1],
            a[i + 2],
            a[i + 3],
            a[i + 4],
            a[i + 5],
            a[i + 6],
            a[i + 7],
        ]);
        let vb = f32x8::new([
            b[i],
            b[i + 1],
            b[i + 2],
            b[i + 3],
            b[i + 4],
            b[i + 5],
            b[i + 6],
            b[i + 7],
        ]);
        let diff = va - vb;
        sum += diff * diff;
    }

    let mut sum_of_squares = sum.reduce_add();

    // Handle remaining elements
    for i in simd_len..len {
        let diff = a[i] - b[i];
        sum_of_squares += diff * diff;
    }

    let distance = sum_of_squares.sqrt();
    // Non-finite elements (or overflow) poison the accumulation; collapse
    // every such case onto the same sentinel.
    if distance.is_finite() {
        distance
    } else {
        Number::INFINITY
    }
}
