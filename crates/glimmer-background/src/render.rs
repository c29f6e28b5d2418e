//! Rasterizing a composed frame onto terminal cells.

use glimmer_core::Vec2;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthChar;

use crate::ambient::ORBS;
use crate::chars::ORB_SHADES;
use crate::color::{blend, fade};
use crate::compositor::{ComposedFrame, GlyphInstance};
use crate::scheduler::PEAK_OPACITY;

/// Glyphs less visible than this (`opacity × scale`) are not drawn.
pub const MIN_VISIBILITY: f32 = 0.05;

/// Scaled font size (px) from which glyphs render bold.
pub const BOLD_SIZE_PX: f32 = 20.0;

/// Pixel size of one terminal cell, used to turn pixel offsets into cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f32,
    pub height_px: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

impl CellMetrics {
    /// Viewport size in pixels for an area of `width × height` cells.
    pub fn viewport_px(&self, width: u16, height: u16) -> Vec2 {
        Vec2::new(width as f32 * self.width_px, height as f32 * self.height_px)
    }

    /// Pixel position of the center of a cell.
    fn cell_center(&self, x: u16, y: u16) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.width_px,
            (y as f32 + 0.5) * self.height_px,
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct StyledCell {
    ch: char,
    style: Style,
}

/// Cell a glyph lands on, if it is inside the area.
pub fn glyph_cell(
    glyph: &GlyphInstance,
    width: u16,
    height: u16,
    metrics: CellMetrics,
) -> Option<(u16, u16)> {
    let viewport = metrics.viewport_px(width, height);
    let px = glyph.anchor / 100.0 * viewport + glyph.translation();
    let col = (px.x / metrics.width_px).floor();
    let row = (px.y / metrics.height_px).floor();
    if col < 0.0 || row < 0.0 || col >= width as f32 || row >= height as f32 {
        return None;
    }
    Some((col as u16, row as u16))
}

fn glyph_style(glyph: &GlyphInstance) -> Option<Style> {
    let local = glyph.local;
    if local.opacity * local.scale < MIN_VISIBILITY {
        return None;
    }
    let mut style = Style::new().fg(fade(glyph.color.rgb(), local.opacity / PEAK_OPACITY));
    if glyph.size * local.scale >= BOLD_SIZE_PX {
        style = style.add_modifier(Modifier::BOLD);
    }
    Some(style)
}

fn ambient_cell(
    frame: &ComposedFrame,
    x: u16,
    y: u16,
    viewport: Vec2,
    metrics: CellMetrics,
) -> Option<StyledCell> {
    let point = metrics.cell_center(x, y);
    let mut rgb = (0u8, 0u8, 0u8);
    let mut coverage = 0.0_f32;

    for orb in &ORBS {
        let alpha = orb.opacity_at(point, viewport, frame.ambient_translation, frame.time);
        if alpha > 0.0 {
            rgb = blend(rgb, orb.rgb, alpha);
            coverage = 1.0 - (1.0 - coverage) * (1.0 - alpha);
        }
    }

    let ch = if coverage < 0.04 {
        return None;
    } else if coverage < 0.12 {
        ORB_SHADES[0]
    } else if coverage < 0.22 {
        ORB_SHADES[1]
    } else {
        ORB_SHADES[2]
    };

    Some(StyledCell {
        ch,
        style: Style::new().fg(Color::Rgb(rgb.0, rgb.1, rgb.2)),
    })
}

/// Paint every cell of the frame, orbs first and glyphs on top in id order.
fn rasterize(
    frame: &ComposedFrame,
    width: u16,
    height: u16,
    metrics: CellMetrics,
    show_ambient: bool,
) -> Vec<Option<StyledCell>> {
    let mut cells: Vec<Option<StyledCell>> = vec![None; width as usize * height as usize];
    let index = |x: u16, y: u16| y as usize * width as usize + x as usize;

    if show_ambient {
        let viewport = metrics.viewport_px(width, height);
        for y in 0..height {
            for x in 0..width {
                cells[index(x, y)] = ambient_cell(frame, x, y, viewport, metrics);
            }
        }
    }

    for glyph in &frame.glyphs {
        let Some(style) = glyph_style(glyph) else {
            continue;
        };
        if let Some((x, y)) = glyph_cell(glyph, width, height, metrics) {
            cells[index(x, y)] = Some(StyledCell {
                ch: glyph.shape,
                style,
            });
        }
    }
    cells
}

/// Render the frame into `area` of `buf`, one composed cell per buffer cell.
///
/// A double-width glyph also covers the cell to its right, which is cleared.
/// One that would overflow the right edge is not drawn.
pub fn render_into(
    frame: &ComposedFrame,
    area: Rect,
    buf: &mut Buffer,
    metrics: CellMetrics,
    show_ambient: bool,
) {
    let (width, height) = (area.width, area.height);
    let cells = rasterize(frame, width, height, metrics, show_ambient);

    for y in 0..height {
        let row = &cells[y as usize * width as usize..(y as usize + 1) * width as usize];
        let mut x = 0;
        while x < width {
            let Some(target) = buf.cell_mut((area.x + x, area.y + y)) else {
                break;
            };
            target.reset();
            let Some(cell) = row[x as usize] else {
                x += 1;
                continue;
            };
            let span = cell.ch.width().unwrap_or(1).max(1) as u16;
            if x + span > width {
                x += 1;
                continue;
            }
            target.set_char(cell.ch).set_style(cell.style);
            for covered in 1..span {
                if let Some(target) = buf.cell_mut((area.x + x + covered, area.y + y)) {
                    target.reset();
                }
            }
            x += span;
        }
    }
}
