use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph},
};
use weather_core::{
    BackgroundTheme, WidgetState,
    view::{self, ResultView, report_heading, report_rows},
};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const MAX_SUGGESTION_ROWS: usize = 8;

/// Terminal stand-in for a background image.
struct Palette {
    background: Color,
    foreground: Color,
    accent: Color,
}

impl Palette {
    fn for_theme(theme: BackgroundTheme) -> Self {
        let (background, foreground) = match theme {
            BackgroundTheme::ClearSky => (Color::Rgb(58, 134, 201), Color::White),
            BackgroundTheme::Cloudy => (Color::Rgb(112, 128, 144), Color::White),
            BackgroundTheme::Rain => (Color::Rgb(44, 62, 80), Color::White),
            BackgroundTheme::Snow => (Color::Rgb(220, 230, 240), Color::Black),
            BackgroundTheme::Storm => (Color::Rgb(40, 30, 60), Color::White),
            BackgroundTheme::Fog => (Color::Rgb(170, 170, 170), Color::Black),
            BackgroundTheme::Smoke => (Color::Rgb(90, 85, 80), Color::White),
            BackgroundTheme::Haze => (Color::Rgb(200, 180, 140), Color::Black),
            BackgroundTheme::Overcast => (Color::Rgb(96, 104, 112), Color::White),
            BackgroundTheme::Night => (Color::Rgb(12, 18, 40), Color::White),
        };
        Self {
            background,
            foreground,
            accent: Color::Rgb(202, 138, 4),
        }
    }
}

pub fn draw(frame: &mut Frame, state: &WidgetState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let palette = Palette::for_theme(state.theme());
    let base = Style::new().bg(palette.background).fg(palette.foreground);
    frame.render_widget(Block::new().style(base), frame.area());

    let suggestions = state.suggestions();
    let list_height = if suggestions.is_empty() {
        0
    } else {
        suggestions.len().min(MAX_SUGGESTION_ROWS) as u16 + 2
    };

    let body = frame.area().inner(Margin::new(2, 1));
    let [title_area, input_area, list_area, button_area, result_area, footer_area] =
        Layout::vertical([Length(1), Length(3), Length(list_height), Length(1), Min(0), Length(1)])
            .areas(body);

    let title = Paragraph::new(view::TITLE)
        .style(Style::new().fg(palette.accent).add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(title, title_area);

    draw_input(frame, input_area, state);

    if list_height > 0 {
        draw_suggestions(frame, list_area, state);
    }

    let button = Paragraph::new("[ Search ]")
        .style(Style::new().add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(button, button_area);

    draw_result(frame, result_area, state, &palette, spinner_frame);

    let theme = state.theme();
    let footer = Paragraph::new(format!(
        "background: {theme} ({}) | Enter search | Up/Down pick | Ctrl+U clear | Esc quit",
        theme.image_path()
    ))
    .style(Style::new().add_modifier(Modifier::DIM));
    frame.render_widget(footer, footer_area);

    draw_toasts(frame, frame.area(), state);
}

fn draw_input(frame: &mut Frame, area: Rect, state: &WidgetState) {
    let query = state.query();
    let text = if query.is_empty() {
        Span::styled(view::PLACEHOLDER, Style::new().add_modifier(Modifier::DIM))
    } else {
        Span::raw(query)
    };

    let input = Paragraph::new(Line::from(text)).block(Block::bordered().title("City"));
    frame.render_widget(input, area);

    let cursor_x = area.x + 1 + query.chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn draw_suggestions(frame: &mut Frame, area: Rect, state: &WidgetState) {
    let items: Vec<ListItem> = state
        .suggestions()
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title("Suggestions"))
        .style(Style::new().bg(Color::White).fg(Color::Black))
        .highlight_style(Style::new().bg(Color::Green).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default().with_selected(state.highlighted());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_result(frame: &mut Frame, area: Rect, state: &WidgetState, palette: &Palette, spinner_frame: usize) {
    let area = area.inner(Margin::new(0, 1));

    match ResultView::of(state) {
        ResultView::Loading => {
            let spinner = SPINNER[spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{spinner} Loading...")).centered();
            frame.render_widget(loading, area);
        }
        ResultView::Report(report) => {
            let accent = Style::new().fg(palette.accent);
            let mut lines = vec![Line::styled(
                report_heading(report),
                accent.add_modifier(Modifier::BOLD),
            )];
            lines.extend(
                report_rows(report)
                    .into_iter()
                    .map(|(label, value)| Line::styled(format!("- {label}: {value}"), accent)),
            );

            let panel = Paragraph::new(lines).block(Block::bordered());
            frame.render_widget(panel, area);
        }
        ResultView::Empty => {
            frame.render_widget(Paragraph::new(view::NO_DATA).centered(), area);
        }
    }
}

/// Stack visible toasts at the top center, newest last.
fn draw_toasts(frame: &mut Frame, area: Rect, state: &WidgetState) {
    for (i, toast) in state.notifications().visible().iter().enumerate() {
        let message = toast.message();
        let width = (message.chars().count() as u16 + 4).min(area.width);
        let y = area.y + 1 + i as u16 * 3;
        if y + 3 > area.bottom() {
            break;
        }

        let rect = Rect::new(area.x + (area.width - width) / 2, y, width, 3);
        let popup = Paragraph::new(message)
            .centered()
            .style(Style::new().bg(Color::Red).fg(Color::White).add_modifier(Modifier::BOLD))
            .block(Block::bordered());

        frame.render_widget(Clear, rect);
        frame.render_widget(popup, rect);
    }
}
