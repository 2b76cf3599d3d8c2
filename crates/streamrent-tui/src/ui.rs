//! Screen layout.
//!
//! ```text
//! ┌ StreamRent ─────────────────────────────────────┐
//! │ Wallet: 0x…                                      │
//! ├ Status ─────────────────────────────────────────┤
//! │ message                                          │
//! │ link                                             │
//! ├ Owner ────────────────┬ Renter ─────────────────┤
//! │ name / price / create │ device / rent / return   │
//! ├ Command ──────────────┴──────────────────────────┤
//! │ > _                                              │
//! └──────────────────────────────────────────────────┘
//! ```

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use streamrent_app::{App, WalletState};
use streamrent_core::StatusKind;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let [header, status, body, command] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);
    draw_status(frame, app, status);

    let [owner, renter] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    draw_owner(frame, app, owner);
    draw_renter(frame, app, renter);

    draw_command(frame, app, command);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let wallet = match app.wallet() {
        WalletState::Checking => Span::raw("checking...").dim(),
        WalletState::Disconnected => Span::raw("not connected (/connect to retry)").red(),
        WalletState::Connected(address) => Span::raw(address.to_string()).green(),
    };
    let line = Line::from(vec![Span::raw("Wallet: "), wallet]);
    let block = Block::default().borders(Borders::ALL).title(" StreamRent: pay-as-you-go IoT rental ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status();
    let style = match status.kind {
        StatusKind::Idle => Style::default(),
        StatusKind::Loading => Style::default().fg(Color::Yellow),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red),
    };

    let mut lines = vec![Line::styled(status.message.clone(), style)];
    if let Some(link) = app.status_link() {
        lines.push(Line::from(vec![
            Span::raw("View on explorer: "),
            Span::styled(link, Style::default().add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    let block = Block::default().borders(Borders::ALL).title(" Status ");
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_owner(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let hint = match app.price_hint() {
        Some(per_hour) => format!("≈ {per_hour} IOTA/hour"),
        None => String::new(),
    };

    let lines = vec![
        field("Name", &form.name),
        field("Price (nanos/ms)", &form.price),
        Line::from(hint).dim(),
        Line::default(),
        Line::from("/create  Register device").bold(),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Owner: list a device ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_renter(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let lines = vec![
        field("Device ID", &form.device_id),
        Line::default(),
        Line::from(format!("/rent    {}", app.deposit_hint())).bold(),
        Line::from("/return  Refund Deposit").bold(),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Renter: use a device ");
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_command(frame: &mut Frame, app: &App, area: Rect) {
    let input = app.input();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" /connect /name /price /device /create /rent /return /quit ");
    frame.render_widget(Paragraph::new(format!("> {}", input.buffer())).block(block), area);

    let offset = u16::try_from(input.cursor()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(offset).min(area.right().saturating_sub(2));
    frame.set_cursor_position(Position::new(x, area.y + 1));
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    let value = if value.is_empty() { Span::raw("(empty)").dim() } else { Span::raw(value) };
    Line::from(vec![Span::raw(format!("{label}: ")), value])
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use streamrent_app::{AppEvent, KeyInput};
    use streamrent_core::{Completion, RentalConfig};
    use streamrent_proto::{ExecutionResponse, ObjectChange};

    use super::*;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        text(terminal.backend().buffer())
    }

    fn text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn enter(app: &mut App, line: &str, now: Instant) -> Vec<streamrent_app::AppAction> {
        for ch in line.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(ch)), now);
        }
        app.handle(AppEvent::Key(KeyInput::Enter), now)
    }

    #[test]
    fn idle_screen_shows_forms_and_hints() {
        let mut app = App::new(&RentalConfig::default());
        let now = Instant::now();
        enter(&mut app, "/name E-Bike", now);
        enter(&mut app, "/price 6", now);

        let screen = screen(&app);
        assert!(screen.contains("Wallet: checking..."));
        assert!(screen.contains("Name: E-Bike"));
        assert!(screen.contains("Price (nanos/ms): 6"));
        assert!(screen.contains("0.0216 IOTA/hour"));
        assert!(screen.contains("Deposit 2 IOTA"));
        assert!(screen.contains("Refund Deposit"));
        assert!(screen.contains("Device ID: (empty)"));
    }

    #[test]
    fn success_banner_shows_explorer_link() {
        let mut app = App::new(&RentalConfig::default());
        let now = Instant::now();
        app.handle(AppEvent::AccountChanged(Some("0xa11ce".parse().unwrap())), now);
        let actions = enter(&mut app, "/create E-Bike 6", now);
        let operation = actions
            .into_iter()
            .find_map(|action| match action {
                streamrent_app::AppAction::Submit(submission) => Some(submission.operation),
                _ => None,
            })
            .unwrap();

        let response = ExecutionResponse::new("Dg1".parse().unwrap())
            .with_object_changes(vec![ObjectChange::created("0xabc")]);
        app.handle(AppEvent::Completed(Completion { operation, result: Ok(response) }), now);

        let screen = screen(&app);
        assert!(screen.contains("created successfully!"));
        assert!(screen.contains("View on explorer: https://explorer.rebased.iota.org/object/0xabc?network=testnet"));
        assert!(screen.contains("Wallet: 0xa11ce"));
    }

    #[test]
    fn command_line_echoes_input() {
        let mut app = App::new(&RentalConfig::default());
        for ch in "/rent 0xde".chars() {
            app.handle(AppEvent::Key(KeyInput::Char(ch)), Instant::now());
        }
        assert!(screen(&app).contains("> /rent 0xde"));
    }
}
