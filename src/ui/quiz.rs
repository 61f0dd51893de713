use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::game::{AnswerFeedback, Lifeline};
use crate::models::Question;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];
const PUMPKIN: Color = Color::Rgb(255, 122, 0);

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], app);
    render_notice(frame, chunks[1], app);
    render_question_text(frame, chunks[2], question.prompt());
    render_options(frame, chunks[3], app, question);
    render_feedback(frame, chunks[4], app);
    render_status(frame, chunks[5], app);
    render_progress(frame, chunks[6], app);
    render_controls(frame, chunks[7], app);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let title = format!(
        "{} · Question {} of {}",
        session.category(),
        session.question_number(),
        session.total_questions()
    );
    let widget = Paragraph::new(title).fg(PUMPKIN).bold();
    frame.render_widget(widget, area);
}

fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(notice) = app.offline_notice() {
        let widget = Paragraph::new(notice).fg(Color::Yellow).italic();
        frame.render_widget(widget, area);
    }
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_style(app: &App, question: &Question, index: usize) -> Style {
    if !app.is_option_available(index) {
        return Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    if let Some(feedback) = app.feedback() {
        if index == question.correct_index() {
            return Style::default().fg(Color::Green).bold();
        }
        if index == feedback.selected {
            return Style::default().fg(Color::Red).bold();
        }
        return Style::default().fg(Color::DarkGray);
    }

    if index == app.selected_option() {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, option) in question.options().iter().enumerate() {
        let style = option_style(app, question, index);
        let marker = if index == app.selected_option() && app.feedback().is_none() {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn feedback_lines(feedback: &AnswerFeedback) -> Vec<Line<'_>> {
    let verdict = if feedback.correct {
        Line::from(vec![
            Span::styled("Correct! ", Style::default().fg(Color::Green).bold()),
            Span::raw(feedback.correct_option.as_str()),
        ])
    } else {
        Line::from(vec![
            Span::styled("Wrong. ", Style::default().fg(Color::Red).bold()),
            Span::raw("Correct: "),
            Span::raw(feedback.correct_option.as_str()),
        ])
    };

    let mut lines = vec![verdict];
    if let Some(explanation) = &feedback.explanation {
        lines.push(Line::from(Span::styled(
            explanation.as_str(),
            Style::default().fg(Color::Gray).italic(),
        )));
    }
    lines
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = app.feedback().map(feedback_lines).unwrap_or_default();
    if let Some(message) = app.message() {
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::LightBlue).bold(),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Score ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", app.score(), app.total_questions()),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled("   Lifelines ", Style::default().fg(Color::DarkGray)),
    ];

    for lifeline in Lifeline::ALL {
        let remaining = app.remaining_lifeline(lifeline);
        let color = if remaining > 0 {
            Color::Magenta
        } else {
            Color::DarkGray
        };
        spans.push(Span::styled(
            format!("{}:{} ", lifeline, remaining),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let ratio = app.progress().clamp(0.0, 1.0);
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(PUMPKIN).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let hint = if app.is_current_answered() {
        "enter next  ·  r restart  ·  q quit"
    } else {
        "j/k navigate  ·  enter answer  ·  5 50-50  ·  f flip  ·  p pass  ·  r restart  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
