pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use letter_twins::{
    celebration::Celebration,
    layout::{board_areas, board_slots},
    session::MAX_STARS,
    Difficulty, Phase,
};

use crate::App;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const CELEBRATION_COLORS: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

fn tier_blurb(tier: Difficulty) -> String {
    let settings = tier.settings();
    let case = if settings.use_lowercase_variants() {
        ", big and small"
    } else {
        ""
    };
    format!("{} letters{}", settings.letters_per_circle(), case)
}

fn capitalized(tier: Difficulty) -> String {
    let name = tier.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => name,
    }
}

/// Write `text` only if it starts inside the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    let area = buf.area;
    if x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom() {
        buf.set_stringn(x, y, text, (area.right() - x) as usize, style);
    }
}

fn vertically_centered(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}

pub fn render_menu(_app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let title_style = bold_style.fg(Color::LightMagenta);
    let key_style = bold_style.fg(Color::Yellow);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let labels: Vec<(Difficulty, String)> = Difficulty::ALL
        .iter()
        .map(|tier| (*tier, capitalized(*tier)))
        .collect();
    let label_width = labels.iter().map(|(_, l)| l.width()).max().unwrap_or(0);

    let mut lines = vec![
        Line::from(Span::styled("Letter Twins", title_style)),
        Line::from(""),
        Line::from("Find the letter that hides in both circles."),
        Line::from(""),
    ];
    for (tier, label) in &labels {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", tier.hotkey()), key_style),
            Span::styled(format!("{label:<label_width$}  "), bold_style),
            Span::raw(tier_blurb(*tier)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("q to quit", dim_style)));

    let height = lines.len() as u16;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(vertically_centered(area, height), buf);
}

pub fn render_loading(app: &App, area: Rect, buf: &mut Buffer) {
    let frame = SPINNER[app.spinner_frame % SPINNER.len()];
    let tier = app
        .controller
        .session()
        .difficulty()
        .map(capitalized)
        .unwrap_or_default();

    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{frame} Getting letters ready {frame}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tier,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .render(vertically_centered(area, 2), buf);
}

pub fn render_board(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.controller.session();
    let Some(round) = session.round() else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let resolved = session.phase() == Phase::RoundResolvedCorrect;
    let areas = board_areas(area);

    // header
    let mut spans = vec![
        Span::styled("Find the letter in both circles!", bold_style),
        Span::raw("   "),
        Span::styled(
            format!("Score: {}", session.score()),
            bold_style.fg(Color::Yellow),
        ),
    ];
    if let Some(tier) = session.difficulty() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(capitalized(tier), dim_style));
    }
    if app.show_hints {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Look for: {}", round.target()),
            bold_style.fg(Color::Cyan),
        ));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM))
        .render(areas.header, buf);

    // circles
    let border_style = if session.is_wrong_pulse_active() {
        bold_style.fg(Color::Red)
    } else {
        dim_style
    };
    for rect in areas.circles {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .render(rect, buf);
    }

    let per_circle = round.letters_per_circle();
    for slot in board_slots(area, round) {
        let color = app
            .glyph_colors
            .get(slot.circle * per_circle + slot.index)
            .copied()
            .unwrap_or(Color::White);
        let style = match (resolved, round.is_target(slot.letter)) {
            (true, true) => bold_style.fg(Color::Black).bg(Color::LightGreen),
            (true, false) => dim_style,
            (false, _) => bold_style.fg(color),
        };
        put(buf, slot.x, slot.y, &slot.letter.to_string(), style);
    }

    // footer
    let footer = if resolved {
        let stars = session.stars();
        let earned = "★".repeat(stars as usize);
        let missed = "☆".repeat(MAX_STARS.saturating_sub(stars) as usize);
        Line::from(vec![
            Span::styled(earned, bold_style.fg(Color::Yellow)),
            Span::styled(missed, dim_style),
        ])
    } else {
        let misses = session.wrong_guesses();
        let mut spans = vec![Span::styled(
            "type or click a letter · 1/2/3 change level · Esc menu",
            dim_style,
        )];
        if misses > 0 {
            spans.push(Span::styled(
                format!("   tries: {misses}"),
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    };
    Paragraph::new(footer)
        .alignment(Alignment::Center)
        .render(areas.footer, buf);

    if resolved {
        render_celebration(&app.celebration, area, buf);
    }
}

pub fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    if !celebration.is_active {
        return;
    }

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = area.x.saturating_add(particle.x.round() as u16);
        let y = area.y.saturating_add(particle.y.round() as u16);
        let color = CELEBRATION_COLORS[particle.color_index % CELEBRATION_COLORS.len()];
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        put(buf, x, y, &particle.symbol.to_string(), style);
    }
}
