use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::canvas::{Canvas, HEIGHT, WIDTH};

/// Logical viewport centered in `area`, clipped when the terminal is smaller.
pub fn viewport(area: Rect) -> Rect {
    let width = WIDTH.min(area.width);
    let height = HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = app.session.theme;
    frame.render_widget(Block::default().style(Style::default().bg(theme.background())), area);

    let viewport = viewport(area);
    // Frame the play area when there is room around it.
    if area.width >= WIDTH + 2 && area.height >= HEIGHT + 2 {
        let frame_area = Rect::new(viewport.x - 1, viewport.y - 1, viewport.width + 2, viewport.height + 2);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" {} ", app.suite.title()))
            .title_style(Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD));
        frame.render_widget(block, frame_area);
    }

    app.viewport = viewport;
    let mut canvas = Canvas::new(frame.buffer_mut(), viewport, theme);
    app.render(&mut canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::contains_text;
    use crate::games::Suite;
    use crate::screen::Session;
    use ratatui::backend::TestBackend;

    #[test]
    fn viewport_is_centered_and_clipped() {
        assert_eq!(viewport(Rect::new(0, 0, 100, 30)), Rect::new(10, 3, WIDTH, HEIGHT));
        assert_eq!(viewport(Rect::new(0, 0, 60, 20)), Rect::new(0, 0, 60, 20));
    }

    #[test]
    fn draws_menu_inside_titled_frame() -> anyhow::Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        let mut app = App::new(Suite::Cosmic, Session::seeded(0));
        terminal.draw(|frame| render(frame, &mut app))?;

        assert_eq!(app.viewport, Rect::new(10, 3, WIDTH, HEIGHT));
        let buf = terminal.backend().buffer();
        assert!(contains_text(buf, "Alien Code Breaker"));
        assert!(contains_text(buf, " Cosmic Quest Suite "));
        assert_eq!(buf[(9, 2)].symbol(), "╭");
        Ok(())
    }
}
