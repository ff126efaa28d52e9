use crate::LayoutOptions;
use crate::model::{BarLayout, ColumnLayout, RowLayout, TimelineLayout, column_width};
use chrono::NaiveDate;
use gantry_core::date::format_date;
use gantry_core::timeline::{Bucket, bucket_span_localized, project_position, resolve_span_with};
use gantry_core::{Language, Message, Project, ViewMode};

pub const LABEL_WIDTH: f64 = 192.0;
pub const TITLE_HEIGHT: f64 = 48.0;
pub const HEADER_HEIGHT: f64 = 40.0;
pub const ROW_HEIGHT: f64 = 72.0;
pub const BAR_HEIGHT: f64 = 24.0;
pub const FOOTER_HEIGHT: f64 = 36.0;
/// Body height reserved for the "no projects" message.
pub const EMPTY_BODY_HEIGHT: f64 = 160.0;

pub const UNPLANNED_MIN_BAR_WIDTH: f64 = 60.0;
pub const PLANNED_MIN_BAR_WIDTH: f64 = 10.0;

/// Lays out `projects` as one row each, in input order, under the timeline header.
pub fn layout_timeline(projects: &[Project], options: &LayoutOptions) -> TimelineLayout {
    let today = options.today.unwrap_or_else(gantry_core::time::today);
    let view = options.view_mode;
    let language = options.language;

    let span = resolve_span_with(projects, today, &options.span_options);
    let buckets = bucket_span_localized(span, view, language);
    let col_w = column_width(view, options.zoom);
    let track_width = buckets.len() as f64 * col_w;

    let columns: Vec<ColumnLayout> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| ColumnLayout {
            start: b.start,
            end: b.end,
            label: b.label.clone(),
            x: LABEL_WIDTH + i as f64 * col_w,
            width: col_w,
            is_current: is_current_period(b, view, today),
        })
        .collect();

    let body_y = TITLE_HEIGHT + HEADER_HEIGHT;
    let rows: Vec<RowLayout> = projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let y = body_y + i as f64 * ROW_HEIGHT;
            let position = project_position(p, &buckets, view);
            let unplanned = p.is_unplanned();
            let min_width = if unplanned {
                UNPLANNED_MIN_BAR_WIDTH
            } else {
                PLANNED_MIN_BAR_WIDTH
            };
            RowLayout {
                project_id: p.id,
                name: p.name.clone(),
                caption: row_caption(p, language),
                color: p.color.clone(),
                y,
                height: ROW_HEIGHT,
                bar: BarLayout {
                    x: LABEL_WIDTH + position.left / 100.0 * track_width,
                    y: y + (ROW_HEIGHT - BAR_HEIGHT) / 2.0,
                    width: (position.width / 100.0 * track_width).max(min_width),
                    height: BAR_HEIGHT,
                    position,
                    unplanned,
                    title: bar_title(p, language),
                },
            }
        })
        .collect();

    let body_height = if rows.is_empty() {
        EMPTY_BODY_HEIGHT
    } else {
        rows.len() as f64 * ROW_HEIGHT
    };

    tracing::debug!(
        view = %view,
        columns = columns.len(),
        rows = rows.len(),
        zoom = options.zoom.value(),
        "pixel layout"
    );

    TimelineLayout {
        view_mode: view,
        zoom: options.zoom,
        theme: options.theme,
        language,
        today,
        span,
        unit_summary: unit_summary(buckets.len(), view, language),
        column_width: col_w,
        label_width: LABEL_WIDTH,
        title_height: TITLE_HEIGHT,
        header_height: HEADER_HEIGHT,
        row_height: ROW_HEIGHT,
        footer_height: FOOTER_HEIGHT,
        width: LABEL_WIDTH + track_width,
        height: body_y + body_height + FOOTER_HEIGHT,
        columns,
        rows,
    }
}

/// Day columns highlight when they start today; wider columns when they contain today.
pub fn is_current_period(bucket: &Bucket, view: ViewMode, today: NaiveDate) -> bool {
    match view {
        ViewMode::Day => bucket.start == today,
        ViewMode::Week | ViewMode::Month => bucket.contains(today),
    }
}

pub fn row_caption(project: &Project, language: Language) -> String {
    let open = language.text(Message::Open);
    match (project.start_date, project.end_date) {
        (Some(s), Some(e)) => format!("{} - {}", format_date(s), format_date(e)),
        (Some(s), None) => format!("{} - {open}", format_date(s)),
        (None, Some(e)) => format!("{open} - {}", format_date(e)),
        (None, None) => language.text(Message::Unscheduled).to_string(),
    }
}

pub fn bar_title(project: &Project, language: Language) -> String {
    let start = project
        .start_date
        .map(format_date)
        .unwrap_or_else(|| language.text(Message::NoStart).to_string());
    let end = project
        .end_date
        .map(format_date)
        .unwrap_or_else(|| language.text(Message::NoEnd).to_string());
    format!("{}\n{start} - {end}", project.name)
}

fn unit_summary(count: usize, view: ViewMode, language: Language) -> String {
    let unit = match view {
        ViewMode::Day => Message::UnitDays,
        ViewMode::Week => Message::UnitWeeks,
        ViewMode::Month => Message::UnitMonths,
    };
    match language {
        Language::En => format!("{count} {}", language.text(unit)),
        Language::Zh => format!("{count}{}", language.text(unit)),
    }
}
