use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Tabs};

use crate::core::container::BlogContainer;
use crate::core::slot::SlotController;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{TabPage, TitleBar};

const HELP_TEXT: &str =
    " 1-4/Tab switch  ↑↓ move  Enter open  Backspace back  b blog  s settings  q quit ";

pub fn draw_ui(frame: &mut Frame, container: &mut BlogContainer<TabPage>, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, tabs_area, body_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        container.source().name.clone(),
        tui.device_name.clone(),
        tui.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    frame.render_widget(tab_bar(container), tabs_area);

    container.active_controller_mut().render(frame, body_area);

    frame.render_widget(
        Paragraph::new(Line::from(HELP_TEXT).centered())
            .style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(settings) = tui.settings.as_mut() {
        let overlay = centered_rect(60, 20, frame.area());
        frame.render_widget(Clear, overlay);
        let block = Block::bordered()
            .title(" Settings ")
            .title_bottom(Line::from(" ←→ adjust  Esc close ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);
        settings.render(frame, inner);
    }
}

/// Tab titles carry a depth marker when the tab has views pushed.
fn tab_bar(container: &BlogContainer<TabPage>) -> Tabs<'static> {
    let titles: Vec<String> = container
        .slots()
        .map(|(slot, page)| match page.current_navigation_depth() {
            0 => slot.label().to_string(),
            depth => format!("{} ›{}", slot.label(), depth),
        })
        .collect();
    Tabs::new(titles)
        .block(Block::bordered())
        .select(container.active_index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Min(5),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
