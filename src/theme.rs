use ratatui::style::Color;

/// Dark/light palette shared by every screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    is_dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { is_dark: true }
    }
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn toggle(&mut self) {
        self.is_dark = !self.is_dark;
        log::debug!("theme switched to {}", if self.is_dark() { "dark" } else { "light" });
    }

    pub fn background(&self) -> Color {
        if self.is_dark { Color::Black } else { Color::White }
    }

    pub fn text(&self) -> Color {
        if self.is_dark { Color::White } else { Color::Black }
    }

    pub fn border(&self) -> Color {
        if self.is_dark { Color::White } else { Color::Black }
    }

    /// Accent used for the highlighted menu entry.
    pub fn accent(&self) -> Color {
        if self.is_dark { Color::Rgb(80, 220, 80) } else { Color::Rgb(20, 130, 20) }
    }
}
