use crate::model::TimelineLayout;
use gantry_core::{Message, Palette};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes the accessible title id.
    pub diagram_id: Option<String>,
    /// When true, draw the title band (chart title, unit count and date range).
    pub include_title: bool,
    /// When true, draw the zoom readout under the chart.
    pub include_footer: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            include_title: true,
            include_footer: true,
        }
    }
}

const TEXT_INSET: f64 = 16.0;
const BAR_RADIUS: f64 = 6.0;

pub fn render_timeline_svg(layout: &TimelineLayout, options: &SvgRenderOptions) -> String {
    let palette = layout.theme.palette();
    let language = layout.language;
    let diagram_id = escape_attr(options.diagram_id.as_deref().unwrap_or("gantry"));

    let w = layout.width.max(1.0);
    let h = layout.height.max(1.0);
    let title = language.text(Message::ChartTitle);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="gantt-timeline" aria-labelledby="chart-title-{id}">"#,
        id = diagram_id,
        w = fmt(w),
        h = fmt(h),
    );
    let _ = write!(
        &mut out,
        r#"<title id="chart-title-{id}">{text}</title>"#,
        id = diagram_id,
        text = escape_xml(title),
    );
    let _ = write!(&mut out, "<style>{}</style>", timeline_css(&palette));
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{w}" height="{h}"/>"#,
        w = fmt(w),
        h = fmt(h),
    );

    if options.include_title {
        render_title_band(&mut out, layout, title, w);
    }
    render_header(&mut out, layout);

    if layout.is_empty() {
        render_empty_state(&mut out, layout, w);
    } else {
        render_grid(&mut out, layout);
        render_rows(&mut out, layout, w);
    }

    if options.include_footer {
        let zoom = format!(
            "{}: {}%",
            language.text(Message::Zoom),
            layout.zoom.percent()
        );
        let _ = write!(
            &mut out,
            r#"<text class="footer" x="{x}" y="{y}" text-anchor="middle">{text}</text>"#,
            x = fmt(w / 2.0),
            y = fmt(h - layout.footer_height / 2.0 + 4.0),
            text = escape_xml(&zoom),
        );
    }

    out.push_str("</svg>");
    out
}

fn render_title_band(out: &mut String, layout: &TimelineLayout, title: &str, w: f64) {
    let baseline = layout.title_height / 2.0 + 6.0;
    let range = format!(
        "{} · {} - {}",
        layout.unit_summary, layout.span.min, layout.span.max
    );
    let _ = write!(
        out,
        r#"<g class="title-band"><text class="title" x="{x}" y="{y}">{title}</text><text class="summary" x="{rx}" y="{y}" text-anchor="end">{range}</text></g>"#,
        x = fmt(TEXT_INSET),
        rx = fmt(w - TEXT_INSET),
        y = fmt(baseline),
        title = escape_xml(title),
        range = escape_xml(&range),
    );
}

fn render_header(out: &mut String, layout: &TimelineLayout) {
    let y = layout.header_y();
    let hh = layout.header_height;
    let baseline = y + hh / 2.0 + 4.0;

    out.push_str(r#"<g class="header">"#);
    let _ = write!(
        out,
        r#"<rect class="header-cell" x="0" y="{y}" width="{w}" height="{h}"/><text class="header-label" x="{tx}" y="{ty}">{text}</text>"#,
        y = fmt(y),
        w = fmt(layout.label_width),
        h = fmt(hh),
        tx = fmt(TEXT_INSET),
        ty = fmt(baseline),
        text = escape_xml(layout.language.text(Message::ProjectTimelineHeader)),
    );
    for col in &layout.columns {
        let current = if col.is_current { " current" } else { "" };
        let _ = write!(
            out,
            r#"<rect class="column{current}" x="{x}" y="{y}" width="{w}" height="{h}"/><text class="column-label{current}" x="{cx}" y="{ty}" text-anchor="middle">{label}</text>"#,
            x = fmt(col.x),
            y = fmt(y),
            w = fmt(col.width),
            h = fmt(hh),
            cx = fmt(col.x + col.width / 2.0),
            ty = fmt(baseline),
            label = escape_xml(&col.label),
        );
    }
    out.push_str("</g>");
}

fn render_grid(out: &mut String, layout: &TimelineLayout) {
    let top = layout.body_y();
    let bottom = top + layout.rows.len() as f64 * layout.row_height;
    out.push_str(r#"<g class="grid">"#);
    for col in &layout.columns {
        if col.is_current {
            let _ = write!(
                out,
                r#"<rect class="current-column" x="{x}" y="{y}" width="{w}" height="{h}"/>"#,
                x = fmt(col.x),
                y = fmt(top),
                w = fmt(col.width),
                h = fmt(bottom - top),
            );
        }
        let _ = write!(
            out,
            r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/>"#,
            x = fmt(col.x),
            y1 = fmt(top),
            y2 = fmt(bottom),
        );
    }
    out.push_str("</g>");
}

fn render_rows(out: &mut String, layout: &TimelineLayout, w: f64) {
    out.push_str(r#"<g class="rows">"#);
    for row in &layout.rows {
        let _ = write!(
            out,
            r#"<g class="row" data-project-id="{id}"><line class="row-divider" x1="0" y1="{y}" x2="{w}" y2="{y}"/>"#,
            id = row.project_id,
            y = fmt(row.y + row.height),
            w = fmt(w),
        );
        let _ = write!(
            out,
            r#"<text class="name" x="{x}" y="{y1}">{name}</text><text class="caption" x="{x}" y="{y2}">{caption}</text>"#,
            x = fmt(TEXT_INSET),
            y1 = fmt(row.y + row.height / 2.0 - 4.0),
            y2 = fmt(row.y + row.height / 2.0 + 14.0),
            name = escape_xml(&row.name),
            caption = escape_xml(&row.caption),
        );

        let bar = &row.bar;
        let class = if bar.unplanned { "bar unplanned" } else { "bar" };
        let style = match row.color.as_deref().filter(|c| !bar.unplanned && !c.is_empty()) {
            Some(c) => format!(r#" style="fill: {}""#, escape_attr(c)),
            None => String::new(),
        };
        let _ = write!(
            out,
            r#"<rect class="{class}" x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" ry="{r}"{style}><title>{title}</title></rect></g>"#,
            x = fmt(bar.x),
            y = fmt(bar.y),
            w = fmt(bar.width),
            h = fmt(bar.height),
            r = fmt(BAR_RADIUS),
            title = escape_xml(&bar.title),
        );
    }
    out.push_str("</g>");
}

fn render_empty_state(out: &mut String, layout: &TimelineLayout, w: f64) {
    let y = layout.body_y() + 70.0;
    let _ = write!(
        out,
        r#"<g class="empty"><text class="empty-title" x="{x}" y="{y1}" text-anchor="middle">{title}</text><text class="empty-subtitle" x="{x}" y="{y2}" text-anchor="middle">{subtitle}</text></g>"#,
        x = fmt(w / 2.0),
        y1 = fmt(y),
        y2 = fmt(y + 24.0),
        title = escape_xml(layout.language.text(Message::EmptyTitle)),
        subtitle = escape_xml(layout.language.text(Message::EmptySubtitle)),
    );
}

fn timeline_css(p: &Palette) -> String {
    let font = r#"font-family: "Inter", "Segoe UI", "PingFang SC", sans-serif;"#;
    let mut css = String::new();
    let _ = write!(css, "text{{{font}fill:{};}}", p.text);
    let _ = write!(css, ".background{{fill:{};}}", p.background);
    let _ = write!(css, ".title{{font-size:18px;font-weight:600;}}");
    let _ = write!(css, ".summary,.caption,.footer{{font-size:12px;fill:{};}}", p.text_light);
    let _ = write!(
        css,
        ".header-cell,.column{{fill:{};stroke:{};}}",
        p.surface, p.border
    );
    let _ = write!(css, ".header-label,.name{{font-size:14px;font-weight:500;}}");
    let _ = write!(css, ".column-label{{font-size:12px;fill:{};}}", p.text_light);
    let _ = write!(css, ".column.current{{fill:{};}}", p.primary_light);
    let _ = write!(
        css,
        ".column-label.current{{fill:{};font-weight:500;}}",
        p.primary
    );
    let _ = write!(css, ".current-column{{fill:{};opacity:0.4;}}", p.primary_light);
    let _ = write!(css, ".grid line,.row-divider{{stroke:{};stroke-width:1;}}", p.border);
    let _ = write!(css, ".bar{{fill:{};}}", p.primary);
    let _ = write!(
        css,
        ".bar.unplanned{{fill:{};stroke:{};stroke-width:2;stroke-dasharray:4 3;}}",
        p.border, p.text_light
    );
    let _ = write!(css, ".empty-title{{font-size:18px;font-weight:500;}}");
    let _ = write!(css, ".empty-subtitle{{font-size:14px;fill:{};}}", p.text_light);
    css
}

fn fmt(v: f64) -> String {
    // JS-style shortest round-trip form, without `-0` or float noise from our own arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
