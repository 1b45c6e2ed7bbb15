use crate::cards::{Card, Suit};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};
use super::prompt::Prompt;
use super::{SeatView, TableSnapshot};

pub(super) fn draw_table(f: &mut Frame, table: &TableSnapshot, prompt: Option<&Prompt>) {
    let size = f.area();
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // header
            Constraint::Min(6),                // seats
            Constraint::Length(7),             // log
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    let header_lines = vec![
        Line::from(format!("Pot: {}   Bet to match: {}", table.pot, table.bet_to_match)),
        Line::from(format!("Phase: {}   Players left: {}", table.phase, table.seats.len())),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("stud-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_seats(f, chunks[1], table);

    let log_lines: Vec<Line> = if table.log.is_empty() {
        vec![Line::from(Span::styled("Nothing yet.", Style::default().add_modifier(Modifier::DIM)))]
    } else {
        table.log.iter().map(|l| Line::from(l.as_str())).collect()
    };
    let log = Paragraph::new(log_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Table talk").borders(Borders::ALL));
    f.render_widget(log, chunks[2]);

    let status_area = chunks[3];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let mut status: Vec<Line> = Vec::with_capacity(3);
    match (prompt, table.acting_name()) {
        (Some(p), Some(name)) => {
            status.push(Line::from(format!("{name} to act. The current bet is {}.", table.bet_to_match)));
            if p.to_match() > 0 {
                status.push(Line::from(format!("You need {} more to stay in.", p.to_match())));
            }
            status.push(Line::from(vec![
                Span::styled("C check", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" • "),
                Span::styled("B bet", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" • "),
                Span::styled("F fold", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" • ? help • Q quit"),
            ]));
        }
        _ => status.push(Line::from("Press any key to continue, Q to quit.")),
    }
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), inner(status_area));

    if let Some(p) = prompt {
        if p.help_open() {
            draw_help(f);
        } else if p.amount_entry_active() {
            draw_amount_entry(f, p);
        }
    }
}

fn draw_seats(f: &mut Frame, seats_area: Rect, table: &TableSnapshot) {
    // two rows approximating a ring: top row left to right, bottom row right to left
    let rows = 2u16;
    let total = table.seats.len();
    let top_cols: u16 = total.div_ceil(2) as u16;
    let bottom_cols: u16 = (total as u16).saturating_sub(top_cols);
    let row_height = seats_area.height / rows;
    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Length(row_height)).collect::<Vec<_>>())
        .split(seats_area);
    for r in 0..rows as usize {
        let cols_this: u16 = if r == 0 { top_cols } else { bottom_cols };
        if cols_this == 0 {
            continue;
        }
        let col_width = seats_area.width / cols_this.max(1);
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..cols_this).map(|_| Constraint::Length(col_width)).collect::<Vec<_>>())
            .split(row_chunks[r]);
        for c in 0..cols_this as usize {
            let idx = if r == 0 { c } else { total.saturating_sub(1) - c };
            if let Some(seat) = table.seats.get(idx) {
                render_seat(f, col_chunks[c], seat);
            }
        }
    }
}

fn render_seat(f: &mut Frame, seat_area: Rect, seat: &SeatView) {
    let mut title = format!("{} (seat {})", seat.name, seat.seat + 1);
    if seat.acting {
        title.push_str(" [Act]");
    }
    if seat.winner {
        title.push_str(" [Win]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if seat.folded {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if seat.winner {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if seat.acting {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut lines: Vec<Line> = Vec::with_capacity(4);
    lines.push(Line::from(format!("Chips: {}", seat.chips)));
    lines.push(Line::from(format!("Bet: {}", seat.bet)));
    lines.push(Line::from(if seat.folded { "Folded" } else { "In" }));
    match seat.rank_label {
        Some(label) => lines.push(Line::from(format!("Hand: {label}"))),
        None if seat.cards.is_empty() => lines.push(Line::from(Span::styled(
            format!("Cards: {} face down", seat.card_count),
            dim,
        ))),
        None => {}
    }

    f.render_widget(block, seat_area);
    let seat_inner = inner(seat_area);
    let mut text_area = seat_inner;
    let mut cards_area: Option<Rect> = None;
    if !seat.cards.is_empty() && seat_inner.height > 3 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(seat_inner);
        text_area = split[0];
        cards_area = Some(split[1]);
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    if let Some(area) = cards_area {
        let n = seat.cards.len() as u16;
        let cw = area.width / n.max(1);
        let card_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..n).map(|_| Constraint::Length(cw)).collect::<Vec<_>>())
            .split(area);
        for (i, card) in seat.cards.iter().enumerate() {
            render_card_widget(f, card_chunks[i], *card, Color::Cyan);
        }
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Your turn:", bold)),
        Line::from("- C: check (only when you already match the bet)"),
        Line::from("- B: bet; the amount is added to what you have in"),
        Line::from("- F: fold"),
        Line::from("- Q: fold and leave the table"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9: edit amount"),
        Line::from("- Backspace: delete digit"),
        Line::from("- + / -: adjust by one bet unit"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_amount_entry(f: &mut Frame, prompt: &Prompt) {
    let area = centered_rect(50, 30, f.area());
    let current = prompt.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Amount: {current}")),
        Line::from(format!("To match: {}", prompt.to_match())),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- to step, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Bet Amount").borders(Borders::ALL);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = prompt.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn suit_style(s: Suit) -> Style {
    if s.is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Card, border: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(border));
    let inner = inner(area);
    f.render_widget(block, area);
    let content = Line::from(Span::styled(card.to_string(), suit_style(card.suit())));
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
