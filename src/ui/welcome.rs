use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::Category;

const PUMPKIN: Color = Color::Rgb(255, 122, 0);

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(20),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "HALLOWEEN QUIZ",
            Style::default().fg(PUMPKIN).bold(),
        )),
        Line::from("Pick a category & test your spooky smarts!".fg(Color::DarkGray)),
        Line::from(""),
    ];

    content.extend(Category::ALL.iter().map(|category| {
        let selected = *category == app.category();
        let style = if selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { ">" } else { " " };
        Line::from(Span::styled(format!("{} {}", marker, category.label()), style))
    }));

    content.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled("Questions: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("< {} >", app.count()),
                Style::default().fg(Color::Cyan).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ]);

    if let Some(message) = app.message() {
        content.push(Line::from(message.fg(Color::Red)));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title_bottom(Line::from(" j/k category  ·  h/l count  ·  q quit ").centered()),
    );

    frame.render_widget(widget, chunks[1]);
}
