//! Continuous live tracking of a stroke being drawn.
//!
//! Every frame the pointer is projected onto the current template polyline.
//! While the pointer is pressed and within the snap tolerance, a smoothed
//! point is appended to the drawn path and its length counts towards the
//! stroke's progress. A stroke completes once progress reaches the done
//! threshold *and* the pointer has been released.
//!
//! Tracking runs in pixel space: template points are normalized and are
//! scaled by the [`Viewport`], pointer positions are already in pixels.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::{Point, Viewport};

/// Weight given to the new target when smoothing the drawn path.
pub const SMOOTHING: f64 = 0.35;

/// Closest point on a polyline to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest point on the polyline.
    pub point: Point,
    /// Distance from the query to `point`.
    pub distance: f64,
    /// Arc length from the polyline start to `point`.
    pub arc_position: f64,
    /// Total arc length of the polyline.
    pub total_length: f64,
}

/// Project `p` onto the polyline `poly` (both in the same space).
///
/// Each segment uses the clamped scalar projection
/// `t = clamp((P-A)·(B-A) / |B-A|², 0, 1)`. Ties keep the earliest segment.
/// A single-point polyline projects onto that point; an empty one yields
/// `None`.
pub fn project_to_polyline(p: Point, poly: &[Point]) -> Option<Projection> {
    let first = *poly.first()?;
    let mut best = Projection {
        point: first,
        distance: p.distance(first),
        arc_position: 0.0,
        total_length: 0.0,
    };

    let mut acc = 0.0;
    for w in poly.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (vx, vy) = (b.x - a.x, b.y - a.y);
        let len_sq = vx * vx + vy * vy;
        let seg_len = len_sq.sqrt();
        let t = if len_sq > 0.0 {
            (((p.x - a.x) * vx + (p.y - a.y) * vy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let q = Point::new(a.x + vx * t, a.y + vy * t);
        let d = p.distance(q);
        if d < best.distance {
            best.point = q;
            best.distance = d;
            best.arc_position = acc + seg_len * t;
        }
        acc += seg_len;
    }
    best.total_length = acc;
    Some(best)
}

/// Pointer sample delivered once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer position in pixels.
    pub position: Point,
    /// Whether the pointer is currently pressed.
    pub down: bool,
}

impl PointerInput {
    pub fn pressed(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            down: true,
        }
    }

    pub fn released(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            down: false,
        }
    }
}

/// Accumulated drawing for the current stroke attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackState {
    /// Accepted (snapped and smoothed) drawing points, in pixels.
    pub path: Vec<Point>,
    /// Cumulative length of `path`.
    pub length: f64,
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.length = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Outcome of one tracking frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFrame {
    /// Where the live cursor should be drawn: the snapped projection when on
    /// the line, the raw pointer otherwise.
    pub cursor: Point,
    /// The smoothed point for this frame (appended to the path only when
    /// snapped and pressed).
    pub render_point: Point,
    /// Whether the pointer is within the snap tolerance.
    pub snapped: bool,
    /// Drawn length over template length, clamped to `[0, 1]`.
    pub progress: f64,
    /// The stroke finished on this frame. The returned state is cleared.
    pub stroke_complete: bool,
    /// The drawn path of a stroke that finished on this frame; empty otherwise.
    pub completed_path: Vec<Point>,
    /// Running state to feed into the next frame.
    pub state: TrackState,
}

/// Parameters for live tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveTracker {
    pub viewport: Viewport,
    /// Maximum pixel distance from the template that still counts as on-line.
    pub snap_tolerance: f64,
    /// Progress fraction at which a released stroke counts as complete.
    pub done_threshold: f64,
    /// Weight of the new target in the drawn-path smoothing.
    pub smoothing: f64,
}

impl LiveTracker {
    pub fn new(viewport: Viewport, snap_tolerance: f64, done_threshold: f64) -> Self {
        Self {
            viewport,
            snap_tolerance,
            done_threshold,
            smoothing: SMOOTHING,
        }
    }

    /// Advance `state` by one frame for the normalized `template` stroke.
    pub fn track(&self, input: PointerInput, template: &[Point], mut state: TrackState) -> TrackFrame {
        let poly: Vec<Point> = template.iter().map(|&p| self.viewport.to_pixels(p)).collect();
        let proj = project_to_polyline(input.position, &poly);

        let snapped = proj.is_some_and(|pr| pr.distance <= self.snap_tolerance);
        let cursor = match proj {
            Some(pr) if snapped => pr.point,
            _ => input.position,
        };
        let render_point = match state.path.last() {
            Some(&last) => last.lerp(cursor, self.smoothing),
            None => cursor,
        };

        if input.down && snapped {
            if let Some(&last) = state.path.last() {
                state.length += last.distance(render_point);
            }
            state.path.push(render_point);
        }

        let total = proj.map_or(0.0, |pr| pr.total_length);
        let progress = if total > 0.0 {
            (state.length / total).min(1.0)
        } else if state.is_empty() {
            0.0
        } else {
            // A point-like template is done as soon as anything lands on it.
            1.0
        };

        let stroke_complete = progress >= self.done_threshold && !input.down;
        let mut completed_path = Vec::new();
        if stroke_complete {
            debug!(progress, "live stroke complete");
            completed_path = std::mem::take(&mut state.path);
            state.clear();
        } else {
            trace!(progress, snapped, down = input.down, "tracking frame");
        }

        TrackFrame {
            cursor,
            render_point,
            snapped,
            progress,
            stroke_complete,
            completed_path,
            state,
        }
    }
}

/// Track one frame with explicit parameters.
pub fn track_frame(
    input: PointerInput,
    template: &[Point],
    viewport: Viewport,
    snap_tolerance: f64,
    done_threshold: f64,
    state: TrackState,
) -> TrackFrame {
    LiveTracker::new(viewport, snap_tolerance, done_threshold).track(input, template, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(100.0, 100.0);

    #[test]
    fn projection_clamps_to_segment_ends() {
        let poly = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let before = project_to_polyline(Point::new(-5.0, 0.0), &poly).unwrap();
        assert_eq!(before.point, Point::new(0.0, 0.0));
        assert_eq!(before.distance, 5.0);
        let above = project_to_polyline(Point::new(4.0, 3.0), &poly).unwrap();
        assert_eq!(above.point, Point::new(4.0, 0.0));
        assert_eq!(above.arc_position, 4.0);
        assert_eq!(above.total_length, 10.0);
    }

    #[test]
    fn projection_tracks_arc_position_across_segments() {
        let poly = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let pr = project_to_polyline(Point::new(12.0, 6.0), &poly).unwrap();
        assert_eq!(pr.point, Point::new(10.0, 6.0));
        assert_eq!(pr.arc_position, 16.0);
        assert_eq!(pr.total_length, 20.0);
        assert!(project_to_polyline(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn unsnapped_pointer_is_shown_but_not_drawn() {
        let template = [Point::new(0.1, 0.1), Point::new(0.9, 0.1)];
        let frame = track_frame(
            PointerInput::pressed(50.0, 60.0),
            &template,
            VIEW,
            16.0,
            0.86,
            TrackState::new(),
        );
        assert!(!frame.snapped);
        assert_eq!(frame.cursor, Point::new(50.0, 60.0));
        assert!(frame.state.is_empty());
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn snapped_points_are_smoothed() {
        let template = [Point::new(0.0, 0.5), Point::new(1.0, 0.5)];
        let tracker = LiveTracker::new(VIEW, 16.0, 0.86);
        let first = tracker.track(PointerInput::pressed(0.0, 52.0), &template, TrackState::new());
        assert!(first.snapped);
        assert_eq!(first.render_point, Point::new(0.0, 50.0));
        let second = tracker.track(PointerInput::pressed(20.0, 50.0), &template, first.state);
        assert!((second.render_point.x - 7.0).abs() < 1e-9);
        assert!((second.state.length - 7.0).abs() < 1e-9);
        assert!((second.progress - 0.07).abs() < 1e-9);
    }

    #[test]
    fn point_template_completes_after_touch_and_release() {
        let template = [Point::new(0.5, 0.5)];
        let tracker = LiveTracker::new(VIEW, 16.0, 0.86);
        let touched = tracker.track(PointerInput::pressed(52.0, 50.0), &template, TrackState::new());
        assert!(touched.snapped);
        assert!(!touched.stroke_complete);
        let released = tracker.track(PointerInput::released(52.0, 50.0), &template, touched.state);
        assert!(released.stroke_complete);
        assert_eq!(released.completed_path, vec![Point::new(50.0, 50.0)]);
        assert!(released.state.is_empty());
    }

    #[test]
    fn completed_path_is_empty_until_completion() {
        let template = [Point::new(0.0, 0.5), Point::new(1.0, 0.5)];
        let tracker = LiveTracker::new(VIEW, 16.0, 0.86);
        let frame = tracker.track(PointerInput::pressed(10.0, 50.0), &template, TrackState::new());
        assert!(!frame.stroke_complete);
        assert!(frame.completed_path.is_empty());
        assert_eq!(frame.state.path.len(), 1);
    }
}
