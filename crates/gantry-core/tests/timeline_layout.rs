use chrono::NaiveDate;
use gantry_core::{
    BarPosition, Engine, Language, Project, Span, ViewMode, bucket_span, project_position,
    resolve_span,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn buckets_cover_the_span_contiguously_in_every_mode() {
    let spans = [
        Span::new(d(2025, 1, 1), d(2025, 1, 10)),
        Span::new(d(2024, 2, 27), d(2024, 3, 2)),
        Span::new(d(2023, 12, 31), d(2025, 1, 1)),
    ];
    for span in spans {
        for view in ViewMode::ALL {
            let buckets = bucket_span(span, view);
            assert_eq!(buckets.first().map(|b| b.start), Some(span.min), "{view}");
            assert_eq!(buckets.last().map(|b| b.end), Some(span.max), "{view}");
            for pair in buckets.windows(2) {
                assert_eq!(pair[0].end.succ_opt(), Some(pair[1].start), "{view}");
            }
        }
    }
}

#[test]
fn ten_day_scenario_matches_expected_geometry() {
    let buckets = bucket_span(Span::new(d(2025, 1, 1), d(2025, 1, 10)), ViewMode::Day);
    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[0].label, "01/01");
    assert_eq!(buckets[9].label, "01/10");

    let project = Project::new(1, "Build").with_dates(Some(d(2025, 1, 3)), Some(d(2025, 1, 5)));
    let pos = project_position(&project, &buckets, ViewMode::Day);
    assert!(close(pos.left, 20.0), "{pos:?}");
    assert!(close(pos.width, 30.0), "{pos:?}");
}

#[test]
fn same_day_projects_are_visible() {
    for view in ViewMode::ALL {
        let span = Span::new(d(2025, 1, 1), d(2025, 3, 31));
        let buckets = bucket_span(span, view);
        let p = Project::new(1, "x").with_dates(Some(d(2025, 2, 14)), Some(d(2025, 2, 14)));
        assert!(project_position(&p, &buckets, view).width > 0.0, "{view}");
    }
}

#[test]
fn unplanned_placeholder_ignores_bucket_count() {
    let p = Project::new(1, "later");
    let one = bucket_span(Span::new(d(2025, 1, 1), d(2025, 1, 1)), ViewMode::Day);
    let thousand = bucket_span(Span::new(d(2025, 1, 1), d(2027, 9, 27)), ViewMode::Day);
    assert_eq!(one.len(), 1);
    assert_eq!(thousand.len(), 1000);
    assert_eq!(project_position(&p, &one, ViewMode::Day), BarPosition::UNPLANNED);
    assert_eq!(project_position(&p, &thousand, ViewMode::Day), BarPosition::UNPLANNED);
}

#[test]
fn empty_project_list_uses_the_ninety_day_window() {
    let today = d(2025, 6, 1);
    let span = resolve_span(&[], today);
    assert_eq!(span, Span::new(today, d(2025, 8, 30)));

    let months = bucket_span(span, ViewMode::Month);
    assert!((3..=4).contains(&months.len()), "{}", months.len());

    let engine = Engine::new().with_fixed_today(Some(today));
    let t = engine.layout(&[], ViewMode::Month);
    assert_eq!(t.span, span);
    assert_eq!(t.buckets, months);
}

#[test]
fn bucketing_twice_gives_identical_output() {
    let span = Span::new(d(2024, 10, 9), d(2025, 2, 2));
    for view in ViewMode::ALL {
        assert_eq!(bucket_span(span, view), bucket_span(span, view));
    }
}

#[test]
fn engine_layout_is_deterministic_and_localized() {
    let projects = vec![
        Project::new(1, "Design").with_dates(Some(d(2025, 1, 3)), Some(d(2025, 1, 20))),
        Project::new(2, "QA").with_dates(Some(d(2025, 1, 18)), None),
        Project::new(3, "Docs"),
    ];
    let engine = Engine::new()
        .with_fixed_today(Some(d(2025, 1, 1)))
        .with_language(Language::Zh);
    let a = engine.layout(&projects, ViewMode::Month);
    let b = engine.layout(&projects, ViewMode::Month);
    assert_eq!(a, b);
    assert_eq!(a.buckets[0].label, "2024年12月");
    assert_eq!(a.bars.len(), 3);
    assert!(a.bars.iter().all(|b| !b.position.clamped));
    assert!(close(a.bars[1].position.right(), 100.0));
}
