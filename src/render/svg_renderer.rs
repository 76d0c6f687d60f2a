use std::fmt::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisOrientation, AxisPrimitive, Color, LinePrimitive, PathPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

/// Element id of the root `<svg>`; hosts replace the element with this id on every update.
pub const SVG_ELEMENT_ID: &str = "chartsvg";

/// Renders frames into a standalone SVG document string.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    element_id: String,
    document: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_element_id(SVG_ELEMENT_ID)
    }

    #[must_use]
    pub fn with_element_id(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            document: String::new(),
        }
    }

    /// Document produced by the last successful `render`; empty before the first one.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(&self, out: &mut String, frame: &RenderFrame) -> std::fmt::Result {
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" id="{}">"#,
            frame.viewport.width,
            frame.viewport.height,
            escape(&self.element_id)
        )?;
        for path in &frame.series_paths {
            write_series_path(out, path)?;
        }
        for axis in &frame.axes {
            write_axis(out, axis)?;
        }
        out.push_str("</svg>");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut out = String::with_capacity(1024 + frame.series_paths.len() * 256);
        self.write_frame(&mut out, frame)
            .map_err(|e| ChartError::Render(format!("failed to write svg document: {e}")))?;
        self.document = out;
        Ok(())
    }
}

fn write_series_path(out: &mut String, path: &PathPrimitive) -> std::fmt::Result {
    out.push_str(r#"<g class="line"><path fill="none""#);
    write_stroke(out, path.color)?;
    write!(
        out,
        r#" stroke-linejoin="round" stroke-linecap="round" stroke-width="{}" d=""#,
        num(path.stroke_width)
    )?;
    for (index, (x, y)) in path.points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        write!(out, "{command}{},{}", num(*x), num(*y))?;
    }
    out.push_str(r#""/></g>"#);
    Ok(())
}

fn write_axis(out: &mut String, axis: &AxisPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<g class="{}" transform="translate({},{})" fill="transparent" stroke-width="{}""#,
        axis.orientation.class_name(),
        num(axis.offset_x),
        num(axis.offset_y),
        num(axis.stroke_width)
    )?;
    write_stroke(out, axis.stroke_color)?;
    out.push('>');

    for tick in &axis.ticks {
        let (tx, ty) = match axis.orientation {
            AxisOrientation::Bottom => (tick.position, 0.0),
            AxisOrientation::Left => (0.0, tick.position),
        };
        write!(
            out,
            r#"<g class="tick" transform="translate({},{})">"#,
            num(tx),
            num(ty)
        )?;
        write_line(out, tick.mark)?;
        write_text(out, &tick.label)?;
        out.push_str("</g>");
    }

    let domain = axis.domain_line;
    write!(
        out,
        r#"<path class="domain" d="M{},{}L{},{}"/>"#,
        num(domain.x1),
        num(domain.y1),
        num(domain.x2),
        num(domain.y2)
    )?;
    out.push_str("</g>");
    Ok(())
}

fn write_line(out: &mut String, line: LinePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2)
    )
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Start => "start",
        TextHAlign::Middle => "middle",
        TextHAlign::End => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" dy="{}em" style="text-anchor: {anchor}; font-size: {}em; fill: {}; stroke: transparent">{}</text>"#,
        num(text.x),
        num(text.y),
        num(text.dy_em),
        num(text.font_size_em),
        text.color.to_hex(),
        escape(&text.text)
    )
}

fn write_stroke(out: &mut String, color: Color) -> std::fmt::Result {
    write!(out, r#" stroke="{}""#, color.to_hex())?;
    if color.alpha < 1.0 {
        write!(out, r#" stroke-opacity="{}""#, num(color.alpha))?;
    }
    Ok(())
}

/// Coordinates rounded to 1/100 px; negative zero prints as `0`.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        rounded.to_string()
    }
}

fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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
