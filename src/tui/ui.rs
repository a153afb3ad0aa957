//! UI rendering for the session screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap,
    },
    Frame,
};

use crate::features::breathing::{breathing_frame, BreathFrame};
use crate::features::meditation::{
    format_clock, render_progress_bar, Phase, PreferenceField, PRESETS,
};
use crate::tui::app::{App, Overlay, SettingsPanel};
use crate::tui::event::HELP;

const ACCENT: Color = Color::Cyan;
const BANNER_TEXT: &str = "Time for a mindful break! 🌿";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Quote
            Constraint::Min(8),    // Clock and breathing circle
            Constraint::Length(4), // Duration and sound
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_quote(frame, app, chunks[1]);
    render_session(frame, app, chunks[2]);
    render_controls(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    match &app.overlay {
        Some(Overlay::Help) => render_help(frame),
        Some(Overlay::Settings(panel)) => render_settings(frame, panel),
        None => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(" Mindful Moments ")
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );

    frame.render_widget(header, area);
}

fn render_quote(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let style = if app.quotes.is_fading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::ITALIC)
    };

    let quote = Paragraph::new(format!("\"{}\"", app.quotes.current()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(style);

    frame.render_widget(quote, area);
}

fn render_session(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Clock
            Constraint::Length(1), // Progress
            Constraint::Length(2), // Banner
        ])
        .split(columns[0]);

    let timer = &app.timer;
    let seconds = if timer.is_active() {
        timer.remaining_seconds()
    } else {
        timer.selected().as_seconds()
    };
    let (label, color) = match timer.phase() {
        Phase::Idle => ("ready", Color::Gray),
        Phase::Running => ("meditating", Color::Green),
        Phase::Paused => ("paused", Color::Yellow),
    };

    let clock = Paragraph::new(vec![
        Line::from(Span::styled(
            format_clock(seconds),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Timer "));
    frame.render_widget(clock, rows[0]);

    let elapsed = if timer.is_active() { 1.0 - timer.progress() } else { 0.0 };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT))
        .ratio(elapsed.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);

    if timer.banner_visible() {
        let banner = Paragraph::new(BANNER_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        frame.render_widget(banner, rows[2]);
    }

    render_breathing(frame, breathing_frame(timer.is_active(), app.now), columns[1]);
}

fn render_breathing(frame: &mut Frame<'_>, breath: Option<BreathFrame>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let Some(breath) = breath else {
        frame.render_widget(block, area);
        return;
    };

    let canvas = Canvas::default()
        .block(block.title(format!(" {} ", breath.breath.label())))
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 0.25 + 0.6 * breath.scale,
                color: ACCENT,
            });
            ctx.print(
                -0.5,
                -0.95,
                Span::styled(breath.caption, Style::default().fg(Color::DarkGray)),
            );
        });
    frame.render_widget(canvas, area);
}

fn render_controls(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = &app.timer;
    let locked = timer.is_active();
    let dim = Style::default().fg(Color::DarkGray);

    let mut presets = vec![Span::raw(" ")];
    for (i, minutes) in PRESETS.iter().enumerate() {
        let style = if timer.preset_index() == Some(i) {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else if locked {
            dim
        } else {
            Style::default()
        };
        presets.push(Span::styled(format!(" {minutes} min "), style));
        presets.push(Span::raw(" "));
    }
    presets.push(Span::styled(
        format!(" {} ", render_progress_bar(timer.slider_ratio(), 24)),
        if locked { dim } else { Style::default().fg(ACCENT) },
    ));
    presets.push(Span::raw(format!("{} min", timer.selected().get())));

    let ambient = if timer.ambient_playing() {
        Span::styled("♪ on ", Style::default().fg(Color::Green))
    } else {
        Span::styled("♪ off", dim)
    };
    let volume = timer.volume();
    let notifications = if timer.notifications_enabled() {
        Span::styled("🔔 on", Style::default().fg(Color::Green))
    } else {
        Span::styled("🔕 off", dim)
    };
    let sound = vec![
        Span::raw(" "),
        ambient,
        Span::raw("  "),
        Span::raw(render_progress_bar(f64::from(volume.get()), 10)),
        Span::raw(format!(" {volume}  ")),
        notifications,
    ];

    let controls = Paragraph::new(vec![Line::from(presets), Line::from(sound)])
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(controls, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | s:stop | 1-4:presets | m:sound | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame<'_>) {
    let lines: Vec<Line<'_>> = HELP
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>9}  "), Style::default().fg(ACCENT)),
                Span::raw(*what),
            ])
        })
        .collect();

    let area = centered(frame.area(), 48, u16::try_from(lines.len() + 2).unwrap_or(12));
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn render_settings(frame: &mut Frame<'_>, panel: &SettingsPanel) {
    let items: Vec<ListItem<'_>> = PreferenceField::ALL
        .iter()
        .map(|field| {
            let value = match panel.draft.flag(*field) {
                Some(true) => "[x]".to_string(),
                Some(false) => "[ ]".to_string(),
                None => match &panel.editing {
                    Some(text) => format!("{text}▏"),
                    None => panel.draft.message.clone(),
                },
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", field.label()), Style::default().fg(ACCENT)),
                Span::raw(value),
            ]))
        })
        .collect();

    let area = centered(frame.area(), 64, 8);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notification Settings ")
                .title_bottom(" ↑/↓ select · space toggle · e edit · Enter save · Esc close ")
                .border_style(Style::default().fg(ACCENT)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(panel.selected));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::meditation::{
        Capabilities, MeditationTimer, Minutes, NotificationPreferences, Volume,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn app() -> App {
        let timer = MeditationTimer::new(
            Capabilities::default(),
            NotificationPreferences::default(),
            Volume::default(),
            Minutes::new(1).unwrap(),
        );
        App::new(timer, StdRng::seed_from_u64(0))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_idle_screen() {
        let text = screen(&app());
        assert!(text.contains("Mindful Moments"));
        assert!(text.contains("1:00"));
        assert!(text.contains("ready"));
        assert!(!text.contains("Breathe with the circle"));
        assert!(text.contains("1 min"));
        assert!(!text.contains("minute min"));
    }

    #[test]
    fn test_running_screen_shows_breathing() {
        let mut app = app();
        app.apply(crate::tui::event::Action::StartOrPause);
        app.advance(Duration::from_secs(5));

        let text = screen(&app);
        assert!(text.contains("0:55"));
        assert!(text.contains("meditating"));
        assert!(text.contains("Breathe with the circle"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.overlay = Some(Overlay::Help);
        assert!(screen(&app).contains("Keys"));
    }

    #[test]
    fn test_centered_fits() {
        let r = centered(Rect::new(0, 0, 20, 5), 48, 12);
        assert_eq!((r.width, r.height), (20, 5));
    }
}
