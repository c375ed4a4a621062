mod app;

use std::io;
use std::time::Duration;

use app::{format_average, truncate, AppState, ConnectionStatus, MAX_COUNT, MIN_COUNT};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    // Upstream pages are fetched on demand, so a full 200-record request can take a while.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);

    // Initial fetch before rendering
    app.refresh(&client).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut table_state = TableState::default();
    table_state.select(None);

    let result = run_loop(&mut terminal, &mut app, &client, &mut table_state).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
    table_state: &mut TableState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app, table_state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                refetch(terminal, app, client, table_state).await?;
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                if app.increase_count() {
                    refetch(terminal, app, client, table_state).await?;
                }
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if app.decrease_count() {
                    refetch(terminal, app, client, table_state).await?;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = app.records.len().saturating_sub(1);
                let next = table_state.selected().map_or(0, |i| (i + 1).min(max));
                table_state.select(Some(next));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = table_state.selected().map_or(0, |i| i.saturating_sub(1));
                table_state.select(Some(prev));
            }
            _ => {}
        }
    }
}

/// Show the "fetching" state, then run the whole pipeline again.
async fn refetch(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
    table_state: &mut TableState,
) -> io::Result<()> {
    app.status = ConnectionStatus::Connecting;
    terminal.draw(|f| render(f, app, table_state))?;
    app.refresh(client).await;
    table_state.select(None);
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState, table_state: &mut TableState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_records_table(f, app, table_state, chunks[1]);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● loaded".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ fetching".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 60)), Color::Red),
    };

    let title_spans = vec![
        Span::styled(
            " T20I Batting Records  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("{} requested ({MIN_COUNT}-{MAX_COUNT})", app.count),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{} rows", app.records.len()),
            Style::default().fg(Color::White),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}

fn render_records_table(f: &mut Frame, app: &AppState, state: &mut TableState, area: Rect) {
    let header_cells = [
        "#", "Player", "Span", "Mat", "Inns", "NO", "Runs", "HS", "Ave", "BF", "SR", "100", "50",
        "0", "4s", "6s",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let avg_color = if r.average.is_some() { Color::White } else { Color::DarkGray };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(&r.player, 28)),
                Cell::from(r.span.clone()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(r.matches.clone()),
                Cell::from(r.innings.clone()),
                Cell::from(r.not_outs.clone()),
                Cell::from(r.runs.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(r.high_score.clone()),
                Cell::from(format_average(r.average)).style(Style::default().fg(avg_color)),
                Cell::from(r.balls_faced.clone()),
                Cell::from(r.strike_rate.clone()).style(Style::default().fg(Color::Green)),
                Cell::from(r.hundreds.clone()),
                Cell::from(r.fifties.clone()),
                Cell::from(r.ducks.clone()),
                Cell::from(r.fours.clone()),
                Cell::from(r.sixes.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " PLAYER BATTING STATISTICS ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refetch  "),
        Span::styled("[+/-] ", Style::default().fg(Color::Yellow)),
        Span::raw("records ±10  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("scroll"),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
