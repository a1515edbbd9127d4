/// Vertical scroll position of a list-like body, in rows.
///
/// The table keeps its cursor row visible by nudging `y`; the scrollbar renderer reads the
/// same state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub y: u32,
    pub viewport_h: u16,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, h: u16) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: u32) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    /// Scrolls the minimum distance needed for `row` to be inside the viewport.
    pub fn ensure_visible(&mut self, row: u32) {
        if row < self.y {
            self.y = row;
        } else if self.viewport_h > 0 && row >= self.y.saturating_add(self.viewport_h as u32) {
            self.y = row.saturating_sub(self.viewport_h.saturating_sub(1) as u32);
        }
        self.clamp();
    }

    /// The half-open range of content rows currently on screen.
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        let start = self.y as usize;
        let end = (self.y as usize + self.viewport_h as usize).min(self.content_h as usize);
        start..end.max(start)
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }
}
