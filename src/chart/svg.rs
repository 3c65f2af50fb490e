//! SVG serialization of a scene sampled at one instant.

use std::fmt::{self, Write};

use super::scene::{Scene, TextAnchor};

/// Length of axis tick marks.
const TICK_SIZE: f64 = 6.0;

/// Gap between a tick mark and its label.
const TICK_PADDING: f64 = 3.0;

/// Escapes text for use in SVG content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pixel value with at most three decimals and no trailing zeros.
fn px(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}

/// Renders `scene` as a standalone SVG document, with bars at their `now_ms` geometry.
pub fn render_svg(scene: &Scene, now_ms: u64) -> String {
    let mut out = String::new();
    // fmt::Write into a String cannot fail
    let _ = write_svg(&mut out, scene, now_ms);
    out
}

fn write_svg(out: &mut String, scene: &Scene, now_ms: u64) -> fmt::Result {
    let dims = &scene.dimensions;
    let style = &scene.style;
    let font = format!(
        r#"font-family="{}" font-weight="{}""#,
        escape_xml(&style.font_family),
        escape_xml(&style.font_weight)
    );

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        px(dims.outer_width),
        px(dims.outer_height)
    )?;
    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        px(dims.margin.left),
        px(dims.margin.top)
    )?;

    writeln!(
        out,
        r#"<g class="x-axis" transform="translate(0,{})" font-size="{}" {font}>"#,
        px(dims.height),
        escape_xml(&style.axis_tick_font_size)
    )?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" d="M0,{t}V0H{w}V{t}"/>"#,
        t = px(TICK_SIZE),
        w = px(dims.width)
    )?;
    for tick in &scene.x_axis {
        writeln!(
            out,
            r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{}"/><text fill="currentColor" y="{}" dy="0.71em" text-anchor="middle">{}</text></g>"#,
            px(tick.position),
            px(TICK_SIZE),
            px(TICK_SIZE + TICK_PADDING),
            escape_xml(&tick.label)
        )?;
    }
    out.push_str("</g>\n");

    writeln!(
        out,
        r#"<g class="y-axis" font-size="{}" {font}>"#,
        escape_xml(&style.axis_tick_font_size)
    )?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" d="M-{t},0H0V{h}H-{t}"/>"#,
        t = px(TICK_SIZE),
        h = px(dims.height)
    )?;
    for tick in &scene.y_axis {
        writeln!(
            out,
            r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{}"/><text fill="currentColor" x="-{}" dy="0.32em" text-anchor="end">{}</text></g>"#,
            px(tick.position),
            px(TICK_SIZE),
            px(TICK_SIZE + TICK_PADDING),
            escape_xml(&tick.label)
        )?;
    }
    out.push_str("</g>\n");

    if let Some(line) = &scene.center_line {
        writeln!(
            out,
            r#"<line class="center-line" x1="{x}" y1="{}" x2="{x}" y2="{}" style="stroke: {}; stroke-width: 1"/>"#,
            px(line.y1),
            px(line.y2),
            escape_xml(&style.center_line_color),
            x = px(line.x)
        )?;
    }

    for title in &scene.titles {
        let rotation = title
            .rotation
            .map(|degrees| format!(r#" transform="rotate({})""#, px(degrees)))
            .unwrap_or_default();
        writeln!(
            out,
            r#"<text class="{}" text-anchor="{}" x="{}" y="{}"{rotation} {font}>{}</text>"#,
            escape_xml(&title.class),
            TextAnchor::Middle.as_str(),
            px(title.x),
            px(title.y),
            escape_xml(&title.text)
        )?;
    }

    for bar in scene.bars.values() {
        let attrs = bar.attrs_at(now_ms);
        writeln!(
            out,
            r#"<rect class="bar" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            px(attrs.x),
            px(attrs.y),
            px(attrs.width.max(0.0)),
            px(attrs.height.max(0.0)),
            escape_xml(&bar.fill)
        )?;
    }

    for label in scene.labels.values() {
        writeln!(
            out,
            r#"<text class="bar-label" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" fill="black" font-size="{}" {font}>{}</text>"#,
            px(label.x),
            px(label.y),
            label.anchor.as_str(),
            escape_xml(&style.size_label_font_size),
            escape_xml(&label.text)
        )?;
    }

    out.push_str("</g>\n</svg>\n");
    Ok(())
}
