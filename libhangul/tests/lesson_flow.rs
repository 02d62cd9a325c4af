// libhangul/tests/lesson_flow.rs
//
// Tracing whole stages through a lesson in both evaluation modes.

use libhangul::{Difficulty, EvaluationMode, HangulConfig, Lesson, StrokeOutcome};
use libstroke_core::{Point, Stroke, Viewport};

fn densify(points: &[Point], per_segment: usize) -> Vec<Point> {
    let mut out = vec![points[0]];
    for w in points.windows(2) {
        for i in 1..=per_segment {
            out.push(w[0].lerp(w[1], i as f64 / per_segment as f64));
        }
    }
    out
}

/// Draw `stroke` exactly, in pixels, and release.
fn draw(lesson: &mut Lesson, stroke: &Stroke, viewport: Viewport) -> Option<StrokeOutcome> {
    let path: Vec<Point> = densify(&stroke.points, 10)
        .into_iter()
        .map(|p| viewport.to_pixels(p))
        .collect();
    lesson.pointer_down(path[0]);
    for &p in &path[1..] {
        lesson.pointer_move(p);
    }
    lesson.pointer_up()
}

fn trace_current_guide(lesson: &mut Lesson) -> Vec<StrokeOutcome> {
    let viewport = lesson.session().viewport();
    let strokes = lesson.session().guide().strokes.clone();
    strokes
        .iter()
        .filter_map(|s| draw(lesson, s, viewport))
        .collect()
}

#[test]
fn exact_strokes_finish_the_first_stage() {
    let mut lesson = Lesson::with_default_stages(EvaluationMode::Discrete(Difficulty::Strict));
    let outcomes = trace_current_guide(&mut lesson);
    assert!(outcomes.iter().all(StrokeOutcome::is_accepted), "{:?}", outcomes);
    assert!(matches!(outcomes.last(), Some(StrokeOutcome::GuideComplete { .. })));
    assert!(lesson.is_stage_complete());
}

#[test]
fn lesson_moves_through_syllables_of_a_stage() {
    let mut lesson = Lesson::with_default_stages(EvaluationMode::default());
    lesson.next_stage();
    lesson.next_stage();
    assert_eq!(lesson.stage().label, "강아");
    assert_eq!(lesson.current_text(), Some("강"));

    trace_current_guide(&mut lesson);
    assert_eq!(lesson.guide_index(), 1);
    assert_eq!(lesson.current_text(), Some("아"));
    assert!(!lesson.is_stage_complete());
    assert_eq!(lesson.session().stroke_index(), 0);

    trace_current_guide(&mut lesson);
    assert!(lesson.is_stage_complete());
}

#[test]
fn wrong_stroke_is_rejected_and_can_be_retried() {
    let mut lesson = Lesson::with_default_stages(EvaluationMode::default());
    let viewport = lesson.session().viewport();
    let guide = lesson.session().guide().clone();
    assert!(guide.len() >= 2);

    // Draw the second stroke first.
    let outcome = draw(&mut lesson, &guide.strokes[1], viewport).unwrap();
    assert!(matches!(outcome, StrokeOutcome::Rejected { index: 0, .. }));
    assert_eq!(lesson.session().stroke_index(), 0);

    let outcome = draw(&mut lesson, &guide.strokes[0], viewport).unwrap();
    assert!(matches!(outcome, StrokeOutcome::Accepted { index: 0, .. }));
    assert!(outcome.similarity() > 0.9);
}

#[test]
fn changing_stage_restarts_progress() {
    let mut lesson = Lesson::with_default_stages(EvaluationMode::default());
    let viewport = lesson.session().viewport();
    let first = lesson.session().guide().strokes[0].clone();
    draw(&mut lesson, &first, viewport);
    assert_eq!(lesson.session().stroke_index(), 1);

    lesson.next_stage();
    assert_eq!(lesson.session().stroke_index(), 0);
    lesson.prev_stage();
    assert_eq!(lesson.stage().label, "가");
    assert_eq!(lesson.session().stroke_index(), 0);
    assert!(lesson.session().accepted_strokes().is_empty());
}

#[test]
fn live_mode_completes_strokes_on_release() {
    let mut lesson = Lesson::from_texts(&HangulConfig::default(), ["가"], EvaluationMode::Live);
    let viewport = lesson.session().viewport();
    let stroke = lesson.session().guide().strokes[0].clone();
    let path: Vec<Point> = densify(&stroke.points, 40)
        .into_iter()
        .map(|p| viewport.to_pixels(p))
        .collect();

    lesson.pointer_down(path[0]);
    for &p in &path {
        lesson.pointer_move(p);
        let frame = lesson.frame(lesson.ticket()).unwrap();
        assert!(!frame.stroke_complete);
    }
    let end = *path.last().unwrap();
    for _ in 0..20 {
        lesson.pointer_move(end);
        lesson.frame(lesson.ticket());
    }
    lesson.pointer_up();
    let frame = lesson.frame(lesson.ticket()).unwrap();
    assert!(frame.stroke_complete);
    assert_eq!(lesson.session().stroke_index(), 1);
}
