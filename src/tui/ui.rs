use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::render::SKELETON_BARS;
use crate::tui::app::App;
use crate::view::{Body, Page, SearchState, StoryCard};

const HELP: &str = " Type:Filter  \u{2191}\u{2193}:Select  Enter:Open  Esc:Clear/Quit ";

pub fn draw(frame: &mut Frame, app: &App, page: &Page) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let heading = Paragraph::new(Line::from(page.heading.as_str()).bold());
    frame.render_widget(heading, chunks[0]);

    draw_search_bar(frame, app, chunks[1]);

    match &page.body {
        Body::Skeleton(n) => draw_skeletons(frame, *n, chunks[2]),
        Body::Error(message) => draw_error(frame, message, chunks[2]),
        Body::Stories(cards) => draw_cards(frame, cards, app.selected, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);

    frame.set_cursor_position(Position::new(
        cursor_column(chunks[1], &app.search),
        chunks[1].y + 1,
    ));
}

/// Terminal column of the search cursor: border and one space of padding,
/// then the display width of the text before the cursor. Stays inside the
/// box however long the query gets.
fn cursor_column(area: Rect, search: &SearchState) -> u16 {
    let width = u16::try_from(search.before_cursor().width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(2)
        .saturating_add(width)
        .min(area.right().saturating_sub(2))
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search stories ");

    let paragraph = Paragraph::new(format!(" {}", app.search.query))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_skeletons(frame: &mut Frame, count: usize, area: Rect) {
    let width = area.width.saturating_sub(4) as f32;
    let bar_style = Style::default().fg(Color::DarkGray);

    let items: Vec<ListItem> = (0..count)
        .map(|_| {
            let mut lines: Vec<Line> = SKELETON_BARS
                .iter()
                .map(|w| {
                    let len = (width * w).round().max(1.0) as usize;
                    Line::from(Span::styled("\u{2591}".repeat(len), bar_style))
                })
                .collect();
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    frame.render_widget(List::new(items).block(cards_block()), area);
}

fn draw_error(frame: &mut Frame, message: &str, area: Rect) {
    let paragraph = Paragraph::new(Page::error_line(message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(cards_block());
    frame.render_widget(paragraph, area);
}

fn draw_cards(frame: &mut Frame, cards: &[StoryCard], selected: usize, area: Rect) {
    let items: Vec<ListItem> = cards.iter().map(card_item).collect();

    let list = List::new(items)
        .block(cards_block())
        .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)))
        .highlight_symbol("\u{258c}");

    let mut state = ListState::default();
    if !cards.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_item(card: &StoryCard) -> ListItem<'static> {
    let title_style = if card.link.is_some() {
        Style::default().bold().underlined()
    } else {
        Style::default().bold()
    };

    let mut lines = vec![
        Line::from(Span::styled(card.title.clone(), title_style)),
        Line::from(Span::styled(
            card.points_label(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(ref link) = card.link {
        lines.push(Line::from(Span::styled(
            format!("Read more: {}", link),
            Style::default().fg(Color::Blue),
        )));
    }
    lines.push(Line::default());

    ListItem::new(lines)
}

fn cards_block() -> Block<'static> {
    Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {}", app.status_message);

    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = HELP.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", HELP, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let paragraph = Paragraph::new(status_str)
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    frame.render_widget(paragraph, area);
}
