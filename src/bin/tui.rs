mod tui_app;

use std::io;
use std::time::Duration;

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
use tokio::sync::mpsc;
use tui_app::{
    format_change, format_price, trend_arrow, truncate, ApiClient, AppState, ConnectionStatus,
    FetchResult, Mode, Prefs, FORM_LABELS,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let user_id = std::env::var("API_USER_ID").ok().filter(|v| !v.trim().is_empty());
    let auth_header = std::env::var("AUTH_HEADER").unwrap_or_else(|_| "x-user-id".to_string());

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;
    let api = ApiClient { http, base_url, auth_header, user_id };

    let prefs_path = Prefs::default_path();
    let prefs = prefs_path
        .as_deref()
        .map(Prefs::load_from)
        .unwrap_or_default()
        .with_overrides(|k| std::env::var(k).ok());
    let mut app = AppState::new(prefs, prefs_path);

    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    app.request_refresh(&api, &tx);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut stats_table_state = TableState::default();

    let result = run_loop(&mut terminal, &mut app, &api, &tx, &mut rx, &mut stats_table_state).await;

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
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<FetchResult>,
    rx: &mut mpsc::UnboundedReceiver<FetchResult>,
    stats_state: &mut TableState,
) -> io::Result<()> {
    let refresh_interval = Duration::from_secs(15);
    let poll_interval = Duration::from_millis(200);
    let mut last_tick = std::time::Instant::now();

    loop {
        while let Ok(fetched) = rx.try_recv() {
            app.apply(fetched);
        }

        terminal.draw(|f| render(f, app, stats_state))?;

        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.mode {
                    Mode::Dashboard => {
                        let mut refetch = true;
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('r') | KeyCode::Char('R') => {}
                            KeyCode::Char('t') => app.filters.preset = app.filters.preset.next(),
                            KeyCode::Char('d') => app.cycle_district(),
                            KeyCode::Char('u') => app.cycle_upazilla(),
                            KeyCode::Char('p') => app.cycle_product(),
                            KeyCode::Char('c') => app.clear_filters(),
                            KeyCode::Char('n') => {
                                app.mode = Mode::Form;
                                app.message = None;
                                refetch = false;
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                let max = app.data.stats.len().saturating_sub(1);
                                let next = stats_state.selected().map_or(0, |i| (i + 1).min(max));
                                stats_state.select(Some(next));
                                refetch = false;
                            }
                            KeyCode::Up | KeyCode::Char('k') => {
                                let prev = stats_state.selected().map_or(0, |i| i.saturating_sub(1));
                                stats_state.select(Some(prev));
                                refetch = false;
                            }
                            _ => refetch = false,
                        }
                        if refetch {
                            app.request_refresh(api, tx);
                            last_tick = std::time::Instant::now();
                        }
                    }
                    Mode::Form => match key.code {
                        KeyCode::Esc => app.mode = Mode::Dashboard,
                        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
                        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
                        KeyCode::Backspace => app.form.backspace(),
                        KeyCode::Char(c) => app.form.input(c),
                        KeyCode::Enter => submit_form(app, api, tx).await,
                        _ => {}
                    },
                }
            }
        }

        if last_tick.elapsed() >= refresh_interval {
            app.request_refresh(api, tx);
            last_tick = std::time::Instant::now();
        }
    }
}

async fn submit_form(app: &mut AppState, api: &ApiClient, tx: &mpsc::UnboundedSender<FetchResult>) {
    let body = match app.form.body() {
        Ok(b) => b,
        Err(e) => {
            app.message = Some(e);
            return;
        }
    };
    match api.submit(&body).await {
        Ok(saved) => {
            app.message = Some(format!(
                "saved #{}: {} {} in {}",
                saved.id,
                saved.product_name,
                format_price(saved.price),
                saved.district
            ));
            app.remember_reporter();
            app.mode = Mode::Dashboard;
            app.request_refresh(api, tx);
        }
        Err(e) => app.message = Some(e),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState, stats_state: &mut TableState) {
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
    match app.mode {
        Mode::Dashboard => render_body(f, app, stats_state, chunks[1]),
        Mode::Form => render_form(f, app, chunks[1]),
    }
    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● connected".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 40)), Color::Red),
    };
    let entries: u64 = app.data.stats.iter().map(|s| s.total_entries).sum();

    let title_spans = vec![
        Span::styled(
            " Bazar Dor  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(app.filters.describe(), Style::default().fg(Color::White)),
        Span::raw("  │  "),
        Span::styled(
            format!("{entries} entries"),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("updated {}s ago", app.last_refresh.elapsed().as_secs()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(Color::DarkGray),
        ));

    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, app: &AppState, stats_state: &mut TableState, area: Rect) {
    // stats on top, regional | trends below
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_stats_table(f, app, stats_state, rows[0]);
    render_regional_table(f, app, halves[0]);
    render_trends_table(f, app, halves[1]);
}

fn header_row(cells: &[&'static str]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
    )
    .height(1)
}

fn titled(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn trend_color(direction: Option<&str>) -> Color {
    match direction {
        Some("up") | Some("increasing") => Color::Red,
        Some("down") | Some("decreasing") => Color::Green,
        _ => Color::White,
    }
}

fn render_stats_table(f: &mut Frame, app: &AppState, state: &mut TableState, area: Rect) {
    let rows: Vec<Row> = app
        .data
        .stats
        .iter()
        .map(|s| {
            let direction = s.trend_direction.as_deref();
            Row::new(vec![
                Cell::from(truncate(&s.product_name, 18)),
                Cell::from(format_price(s.avg_price)),
                Cell::from(format_price(s.median_price)),
                Cell::from(format!("{} – {}", format_price(s.min_price), format_price(s.max_price)))
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(s.unit.clone()),
                Cell::from(s.total_entries.to_string()).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{} {}", trend_arrow(direction), format_change(s.price_change)))
                    .style(Style::default().fg(trend_color(direction))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(22),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Product", "Avg", "Median", "Range", "Unit", "Entries", "Trend"]))
    .block(titled(" PRICE STATS "))
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn render_regional_table(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .data
        .regional
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(&r.district, 16)),
                Cell::from(format_price(r.avg_price)),
                Cell::from(r.sample_size.to_string()).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let title = if app.filters.product.is_some() { " BY DISTRICT " } else { " BY DISTRICT (all products) " };
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header_row(&["#", "District", "Avg", "n"]))
    .block(titled(title));

    f.render_widget(table, area);
}

fn render_trends_table(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .data
        .trends
        .iter()
        .map(|t| {
            let direction = Some(t.overall_trend.as_str());
            Row::new(vec![
                Cell::from(truncate(&t.product_name, 18)),
                Cell::from(format!("{} {}", trend_arrow(direction), t.overall_trend))
                    .style(Style::default().fg(trend_color(direction))),
                Cell::from(format_change(Some(t.percentage_change))),
                Cell::from(format!("{:.2}", t.volatility)),
                Cell::from(if t.seasonal_patterns { "yes" } else { "—" })
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(13),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["Product", "Trend", "Change", "Vol", "Seasonal"]))
    .block(titled(" TRENDS "));

    f.render_widget(table, area);
}

fn render_form(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines: Vec<Line> = FORM_LABELS
        .iter()
        .zip(app.form.values.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let focused = i == app.form.focus;
            let marker = if focused { "▸ " } else { "  " };
            let value_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{label:<12}"), Style::default().fg(Color::Yellow)),
                Span::styled(value.clone(), value_style),
            ])
        })
        .collect();

    if let Some(msg) = &app.message {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))));
    }

    let paragraph = Paragraph::new(lines).block(titled(" NEW PRICE ENTRY "));
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut spans = match app.mode {
        Mode::Dashboard => vec![
            key(" [q] "),
            Span::raw("quit  "),
            key("[r] "),
            Span::raw("refresh  "),
            key("[t] "),
            Span::raw("range  "),
            key("[d/u] "),
            Span::raw("district/upazilla  "),
            key("[p] "),
            Span::raw("product  "),
            key("[c] "),
            Span::raw("clear  "),
            key("[n] "),
            Span::raw("new entry  "),
        ],
        Mode::Form => vec![
            key(" [Tab/↑↓] "),
            Span::raw("field  "),
            key("[Enter] "),
            Span::raw("submit  "),
            key("[Esc] "),
            Span::raw("back  "),
        ],
    };
    if let (Mode::Dashboard, Some(msg)) = (app.mode, &app.message) {
        spans.push(Span::styled(truncate(msg, 50), Style::default().fg(Color::Green)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
