use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

/// Draws a one-column scrollbar for `state`: a `│` track with a `█` thumb sized to the visible
/// share of the content. When everything fits only the track is drawn.
pub fn render_scrollbar(
    area: Rect,
    buf: &mut Buffer,
    state: &ViewportState,
    track_style: Style,
    thumb_style: Style,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let h = u32::from(area.height);
    let visible = u32::from(state.viewport_h);
    let (top, len) = if state.content_h <= visible {
        (0, 0)
    } else {
        let len = (visible * h).div_ceil(state.content_h).clamp(1, h);
        let max_y = state.content_h - visible;
        // rounded, so the thumb reaches the bottom exactly at max_y
        let top = (state.y.min(max_y) * (h - len) + max_y / 2) / max_y;
        (top, len)
    };

    for dy in 0..area.height {
        let row = u32::from(dy);
        let (symbol, style) = if row >= top && row < top + len {
            ("█", thumb_style)
        } else {
            ("│", track_style)
        };
        buf.set_stringn(area.x, area.y + dy, symbol, 1, style);
    }
}

/// Writes `input` at `(x, y)`, never exceeding `max_cols` display columns.
///
/// Wide characters that would straddle the limit are dropped rather than split. Returns the
/// number of columns written.
pub fn render_str(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let max_cols = max_cols as usize;
    let mut dx = 0usize;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if dx + w > max_cols {
            break;
        }
        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx as u16, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx as u16 + 1, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        dx += w;
    }

    dx as u16
}

/// Like [`render_str`] for a styled [`Line`]. Unstyled spans take `fallback_style`.
pub fn render_line(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    line: &Line<'_>,
    fallback_style: Style,
) -> u16 {
    let base = fallback_style.patch(line.style);
    let mut written = 0u16;
    for span in &line.spans {
        if written >= max_cols {
            break;
        }
        let style = base.patch(span.style);
        written += render_str(
            x + written,
            y,
            max_cols - written,
            buf,
            span.content.as_ref(),
            style,
        );
    }
    written
}

/// Writes `input` horizontally centered within a one-row `area`.
pub fn render_str_centered(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = str_width(input).min(area.width as usize) as u16;
    let pad = (area.width - w) / 2;
    render_str(area.x + pad, area.y, area.width - pad, buf, input, style);
}

pub fn str_width(input: &str) -> usize {
    UnicodeWidthStr::width(input)
}

/// Returns the longest prefix of `input` that fits in `max_cols` display columns.
pub fn truncate_to_width(input: &str, max_cols: u16) -> String {
    let max_cols = max_cols as usize;
    let mut cols = 0usize;
    let mut out = String::new();
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > max_cols {
            break;
        }
        out.push(ch);
        cols += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrollbar(state: ViewportState, height: u16) -> String {
        let area = Rect::new(0, 0, 1, height);
        let mut buf = Buffer::empty(area);
        render_scrollbar(area, &mut buf, &state, Style::default(), Style::default());
        (0..height).map(|y| buf[(0, y)].symbol().to_string()).collect()
    }

    #[test]
    fn scrollbar_thumb_tracks_position() {
        let mut state = ViewportState {
            y: 0,
            viewport_h: 4,
            content_h: 8,
        };
        assert_eq!(scrollbar(state, 4), "██││");
        state.y = 4;
        assert_eq!(scrollbar(state, 4), "││██");
        state.content_h = 3;
        state.y = 0;
        assert_eq!(scrollbar(state, 4), "││││");
    }
    use ratatui::text::Span;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn render_str_stops_at_limit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let n = render_str(0, 0, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(n, 3);
        assert_eq!(row_text(&buf, 0), "abc   ");
    }

    #[test]
    fn render_str_drops_straddling_wide_char() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let n = render_str(0, 0, 3, &mut buf, "你好", Style::default());
        assert_eq!(n, 2);
    }

    #[test]
    fn render_line_concatenates_spans() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        let line = Line::from(vec![Span::raw("ab"), Span::raw("cd")]);
        render_line(1, 0, 7, &mut buf, &line, Style::default());
        assert_eq!(row_text(&buf, 0), " abcd   ");
    }

    #[test]
    fn centered_text_is_padded() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        render_str_centered(Rect::new(0, 0, 10, 1), &mut buf, "abcd", Style::default());
        assert_eq!(row_text(&buf, 0), "   abcd   ");
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("你好", 3), "你");
    }
}
