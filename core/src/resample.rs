//! Polyline resampling and normalization used by whole-stroke similarity.

use crate::geometry::{bounds, Point};

/// Number of points both paths are resampled to before comparison.
pub const RESAMPLE_POINTS: usize = 64;

/// Scale substitute when a path's bounding box has zero extent.
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// Resample `path` to `n` points spaced at equal arc length.
///
/// The first and last output points coincide with the path endpoints. A
/// path with zero total length (a single point, or repeated points)
/// yields its first point replicated `n` times. An empty path stays empty.
pub fn resample(path: &[Point], n: usize) -> Vec<Point> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total == 0.0 || n == 1 {
        return vec![first; n];
    }

    let step = total / (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    out.push(first);

    // Walk the segments once, carrying the travelled distance at the start
    // of the current segment.
    let mut seg = 0;
    let mut seg_start = 0.0;
    let mut seg_len = path[0].distance(path[1]);
    for k in 1..n - 1 {
        let target = step * k as f64;
        while seg_start + seg_len < target && seg + 2 < path.len() {
            seg_start += seg_len;
            seg += 1;
            seg_len = path[seg].distance(path[seg + 1]);
        }
        let t = if seg_len > 0.0 {
            ((target - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(path[seg].lerp(path[seg + 1], t));
    }

    out.push(*path.last().unwrap_or(&first));
    out
}

/// Translate `path` so its bounding-box minimum sits at the origin and scale
/// it uniformly by `1 / max(width, height)`.
///
/// A degenerate box (all points equal) is scaled by `1 / epsilon`, which keeps
/// the translated points at the origin.
pub fn normalize(path: &[Point], epsilon: f64) -> Vec<Point> {
    let Some((lo, hi)) = bounds(path) else {
        return Vec::new();
    };
    let extent = (hi.x - lo.x).max(hi.y - lo.y);
    let scale = if extent > 0.0 { extent } else { epsilon };
    path.iter()
        .map(|p| Point::new((p.x - lo.x) / scale, (p.y - lo.y) / scale))
        .collect()
}

/// Mean Euclidean distance between index-aligned points.
///
/// Only the common prefix is compared. Returns `None` if either side is empty.
pub fn mean_distance(a: &[Point], b: &[Point]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n == 0 {
        return None;
    }
    let sum: f64 = a.iter().zip(b).map(|(p, q)| p.distance(*q)).sum();
    Some(sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path_length;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn resample_produces_exact_count_and_endpoints() {
        let path = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 2.0)];
        let out = resample(&path, RESAMPLE_POINTS);
        assert_eq!(out.len(), RESAMPLE_POINTS);
        assert_eq!(out[0], path[0]);
        assert_eq!(*out.last().unwrap(), path[2]);
    }

    #[test]
    fn resample_spacing_is_uniform_on_straight_line() {
        let out = resample(&[Point::new(0.0, 0.0), Point::new(63.0, 0.0)], 64);
        for (i, p) in out.iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-9, "point {} at {}", i, p.x);
        }
    }

    #[test]
    fn resample_zero_length_replicates_point() {
        let p = Point::new(0.3, 0.7);
        assert_eq!(resample(&[p], 64), vec![p; 64]);
        assert_eq!(resample(&[p, p, p], 8), vec![p; 8]);
        assert!(resample(&[], 64).is_empty());
    }

    #[test]
    fn resample_handles_repeated_vertices() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
        ];
        let out = resample(&path, 5);
        assert_eq!(out.len(), 5);
        assert!((out[2].x - 2.0).abs() < 1e-9 && out[2].y.abs() < 1e-9);
        assert!((path_length(&out) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_fits_unit_box() {
        let out = normalize(&[Point::new(2.0, 3.0), Point::new(6.0, 5.0)], NORMALIZE_EPSILON);
        assert_eq!(out[0], Point::new(0.0, 0.0));
        assert_eq!(out[1], Point::new(1.0, 0.5));
    }

    #[test]
    fn normalize_degenerate_box_stays_at_origin() {
        let out = normalize(&line(1).repeat(4), NORMALIZE_EPSILON);
        assert!(out.iter().all(|p| *p == Point::new(0.0, 0.0)));
    }

    #[test]
    fn mean_distance_of_identical_paths_is_zero() {
        let a = line(10);
        assert_eq!(mean_distance(&a, &a), Some(0.0));
        assert_eq!(mean_distance(&a, &[]), None);
    }
}
