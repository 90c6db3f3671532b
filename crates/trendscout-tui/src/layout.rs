// Pane geometry derived from the terminal size

/// Terminal size, updated only through `Message::Resize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub width: u16,
    pub height: u16,
}

impl PaneLayout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Repository list takes a third of the width
    pub fn list_width(&self) -> u16 {
        self.width / 3
    }

    /// Detail pane gets the other two thirds
    pub fn detail_width(&self) -> u16 {
        (self.width as u32 * 2 / 3) as u16
    }

    /// Both panes use five sixths of the height
    pub fn pane_height(&self) -> u16 {
        (self.height as u32 * 5 / 6) as u16
    }
}

impl Default for PaneLayout {
    fn default() -> Self {
        Self::new(120, 40)
    }
}
