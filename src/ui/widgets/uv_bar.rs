//! UV index gradient bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Top of the UV scale; readings above it pin the marker to the end
pub const UV_SCALE_MAX: f64 = 11.0;

const BAR: char = '━';
const MARKER: char = '●';

/// A one-row bar fading green -> yellow -> purple, with a marker at the
/// current UV index
pub struct UvBar {
    /// Current UV index, if known
    uv: Option<f64>,
    marker_style: Style,
}

impl UvBar {
    pub fn new(uv: Option<f64>) -> Self {
        Self {
            uv,
            marker_style: Style::default().fg(Color::White),
        }
    }

    /// Column of the marker within a bar `width` cells wide
    fn marker_column(&self, width: u16) -> Option<u16> {
        let uv = self.uv?;
        if width == 0 {
            return None;
        }
        let normalized = (uv / UV_SCALE_MAX).clamp(0.0, 1.0);
        let column = (normalized * f64::from(width - 1)).round() as u16;
        Some(column.min(width - 1))
    }
}

/// Gradient colour at `t` in [0, 1]
fn gradient(t: f64) -> Color {
    // green (74, 222, 128) -> yellow (250, 204, 21) -> purple (192, 132, 252)
    let (from, to, local) = if t < 0.5 {
        ((74.0, 222.0, 128.0), (250.0, 204.0, 21.0), t * 2.0)
    } else {
        ((250.0, 204.0, 21.0), (192.0, 132.0, 252.0), (t - 0.5) * 2.0)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

impl Widget for UvBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width;
        let marker = self.marker_column(width);

        for i in 0..width {
            let t = if width > 1 {
                f64::from(i) / f64::from(width - 1)
            } else {
                0.0
            };
            let (symbol, style) = if marker == Some(i) {
                (MARKER, self.marker_style)
            } else {
                (BAR, Style::default().fg(gradient(t)))
            };

            if let Some(cell) = buf.cell_mut((area.x + i, area.y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}
