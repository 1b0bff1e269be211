//! CPU tessellation of shape primitives into colored triangles.
//!
//! Output is a flat triangle list in logical pixels; rotation is baked into the vertices
//! so a whole frame of shapes shares one vertex buffer and one draw call per run.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::draw::{DrawItem, Primitive, Rotation, Stroke};
use crate::paint::Color;

/// Miter length is capped at this multiple of the half width.
const MITER_LIMIT: f32 = 4.0;

/// Dash patterns shorter than this (in pixels per period) are drawn solid.
const MIN_DASH_PERIOD: f64 = 0.5;
/// Paths spanning more pattern periods than this are drawn solid.
const MAX_DASH_PERIODS: f64 = 16_384.0;

const MIN_ELLIPSE_SEGMENTS: usize = 16;
const MAX_ELLIPSE_SEGMENTS: usize = 128;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct ShapeVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// Appends triangles for `item` to `out`. Text items produce nothing.
///
/// Degenerate or non-finite geometry is skipped.
pub(crate) fn tessellate(item: &DrawItem, out: &mut Vec<ShapeVertex>) {
    let start = out.len();

    match &item.primitive {
        Primitive::Line { from, to, color, stroke } => {
            if from.is_finite() && to.is_finite() {
                stroke_path(&[*from, *to], false, *color, *stroke, out);
            }
        }
        Primitive::Rect { rect, color, stroke } => {
            let r = rect.normalized();
            if !r.is_empty() && r.origin.is_finite() && r.size.is_finite() {
                stroke_path(&r.corners(), true, *color, *stroke, out);
            }
        }
        Primitive::FillRect { rect, color } => {
            let r = rect.normalized();
            if !r.is_empty() && r.origin.is_finite() && r.size.is_finite() {
                fill_convex(&r.corners(), *color, out);
            }
        }
        Primitive::Ellipse { center, radii, color, stroke } => {
            if let Some(points) = ellipse_points(*center, *radii) {
                stroke_path(&points, true, *color, *stroke, out);
            }
        }
        Primitive::FillEllipse { center, radii, color } => {
            if let Some(points) = ellipse_points(*center, *radii) {
                fill_convex(&points, *color, out);
            }
        }
        Primitive::Text(_) => {}
    }

    if let Some(rotation) = item.rotation {
        rotate(&mut out[start..], rotation);
    }
}

/// Rotates vertices in place about the rotation's pivot (origin when unset).
pub(crate) fn rotate(vertices: &mut [ShapeVertex], rotation: Rotation) {
    if rotation.is_identity() {
        return;
    }
    let (sin, cos) = rotation.sin_cos();
    let pivot = rotation.pivot.unwrap_or_default();
    for v in vertices {
        let p = Vec2::new(v.pos[0], v.pos[1]).rotated_about(pivot, sin, cos);
        v.pos = [p.x, p.y];
    }
}

fn vertex(p: Vec2, color: [f32; 4]) -> ShapeVertex {
    ShapeVertex { pos: [p.x, p.y], color }
}

// ── fills ─────────────────────────────────────────────────────────────────

fn fill_convex(points: &[Vec2], color: Color, out: &mut Vec<ShapeVertex>) {
    let color = color.to_array();
    let Some((&first, rest)) = points.split_first() else { return };
    for pair in rest.windows(2) {
        out.push(vertex(first, color));
        out.push(vertex(pair[0], color));
        out.push(vertex(pair[1], color));
    }
}

fn ellipse_points(center: Vec2, radii: Vec2) -> Option<Vec<Vec2>> {
    let (rx, ry) = (radii.x.abs(), radii.y.abs());
    if !center.is_finite() || !rx.is_finite() || !ry.is_finite() || rx == 0.0 || ry == 0.0 {
        return None;
    }

    let n = segment_count(rx.max(ry));
    let step = std::f32::consts::TAU / n as f32;
    Some(
        (0..n)
            .map(|i| {
                let (s, c) = (i as f32 * step).sin_cos();
                Vec2::new(center.x + rx * c, center.y + ry * s)
            })
            .collect(),
    )
}

fn segment_count(radius: f32) -> usize {
    ((radius.sqrt() * 6.0) as usize).clamp(MIN_ELLIPSE_SEGMENTS, MAX_ELLIPSE_SEGMENTS)
}

// ── strokes ───────────────────────────────────────────────────────────────

fn stroke_path(points: &[Vec2], closed: bool, color: Color, stroke: Stroke, out: &mut Vec<ShapeVertex>) {
    if !stroke.is_visible() || points.len() < 2 {
        return;
    }
    let hw = stroke.width * 0.5;
    let color = color.to_array();
    let pattern = stroke.style.pattern();

    if pattern.is_empty() || !stroke_dashed(points, closed, hw, pattern, stroke.width, color, out) {
        stroke_solid(points, closed, hw, color, out);
    }
}

fn stroke_solid(points: &[Vec2], closed: bool, hw: f32, color: [f32; 4], out: &mut Vec<ShapeVertex>) {
    if closed {
        stroke_closed_solid(points, hw, color, out);
    } else {
        for pair in points.windows(2) {
            push_segment(pair[0], pair[1], hw, color, out);
        }
    }
}

/// Quad covering the segment `a..b` with flat caps.
fn push_segment(a: Vec2, b: Vec2, hw: f32, color: [f32; 4], out: &mut Vec<ShapeVertex>) {
    let Some(n) = unit_normal(a, b) else { return };
    let n = n * hw;
    push_quad([a + n, b + n, b - n, a - n], color, out);
}

fn push_quad(q: [Vec2; 4], color: [f32; 4], out: &mut Vec<ShapeVertex>) {
    out.extend_from_slice(&[
        vertex(q[0], color),
        vertex(q[1], color),
        vertex(q[2], color),
        vertex(q[0], color),
        vertex(q[2], color),
        vertex(q[3], color),
    ]);
}

fn unit_normal(a: Vec2, b: Vec2) -> Option<Vec2> {
    let d = b - a;
    let len = d.length();
    (len > f32::EPSILON).then(|| Vec2::new(-d.y / len, d.x / len))
}

/// Closed outline with mitered joins.
fn stroke_closed_solid(points: &[Vec2], hw: f32, color: [f32; 4], out: &mut Vec<ShapeVertex>) {
    let n = points.len();
    let offsets: Vec<Vec2> = (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let here = points[i];
            let next = points[(i + 1) % n];

            let n_in = unit_normal(prev, here);
            let n_out = unit_normal(here, next);
            match (n_in, n_out) {
                (Some(a), Some(b)) => {
                    let sum = a + b;
                    let len = sum.length();
                    if len <= f32::EPSILON {
                        return b * hw;
                    }
                    let m = sum / len;
                    let cos = (m.x * b.x + m.y * b.y).max(1.0 / MITER_LIMIT);
                    m * (hw / cos)
                }
                (Some(a), None) => a * hw,
                (None, Some(b)) => b * hw,
                (None, None) => Vec2::zero(),
            }
        })
        .collect();

    for i in 0..n {
        let j = (i + 1) % n;
        push_quad(
            [
                points[i] + offsets[i],
                points[j] + offsets[j],
                points[j] - offsets[j],
                points[i] - offsets[i],
            ],
            color,
            out,
        );
    }
}

/// Emits one quad per "on" run of the pattern; the phase carries across segments.
///
/// Dash positions are indexed by pattern period in `f64` path distance, so the work is
/// `path length / period` whatever the magnitudes involved. Returns `false` without
/// emitting anything when the pattern period is below [`MIN_DASH_PERIOD`] or the path
/// spans more than [`MAX_DASH_PERIODS`] periods; the caller draws it solid instead.
fn stroke_dashed(
    points: &[Vec2],
    closed: bool,
    hw: f32,
    pattern: &[f32],
    width: f32,
    color: [f32; 4],
    out: &mut Vec<ShapeVertex>,
) -> bool {
    let segments: Vec<(Vec2, Vec2)> = points
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(closed.then(|| (points[points.len() - 1], points[0])))
        .collect();

    let period = pattern.iter().map(|&p| f64::from(p)).sum::<f64>() * f64::from(width);
    let total: f64 = segments.iter().map(|&(a, b)| f64::from((b - a).length())).sum();
    if !period.is_finite() || period < MIN_DASH_PERIOD || total / period > MAX_DASH_PERIODS {
        return false;
    }

    // "on" runs as (start, end) offsets within one period.
    let mut on_runs = Vec::with_capacity(pattern.len() / 2);
    let mut offset = 0.0f64;
    for (i, &len) in pattern.iter().enumerate() {
        let len = f64::from(len) * f64::from(width);
        if i % 2 == 0 {
            on_runs.push((offset, offset + len));
        }
        offset += len;
    }

    let mut seg_start = 0.0f64;
    for (a, b) in segments {
        let d = b - a;
        let len = d.length();
        if len <= f32::EPSILON {
            continue;
        }
        let dir = d / len;
        let seg_end = seg_start + f64::from(len);

        let first = (seg_start / period).floor() as u64;
        let last = (seg_end / period).ceil() as u64;
        for k in first..last {
            let base = k as f64 * period;
            for &(on, off) in &on_runs {
                let s = (base + on).max(seg_start);
                let e = (base + off).min(seg_end);
                if e > s {
                    let from = a + dir * (s - seg_start) as f32;
                    let to = a + dir * (e - seg_start) as f32;
                    push_segment(from, to, hw, color, out);
                }
            }
        }

        seg_start = seg_end;
    }
    true
}
