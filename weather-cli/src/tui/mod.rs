//! # Terminal widget
//!
//! The ratatui / crossterm layer. Reads keys, turns them into widget
//! [`Action`]s and redraws. All behaviour lives in `weather_core`.

mod event;
mod ui;

use std::{sync::Arc, time::Duration};

use ratatui::DefaultTerminal;
use tokio::time::Instant;
use tracing::info;
use weather_core::{Controller, WeatherProvider, widget::Action};

use self::event::{TuiEvent, poll_event};

/// Upper bound on how long a key poll blocks, which also paces the spinner
/// and toast expiry.
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

pub async fn run(provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let mut controller = Controller::new(provider);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut controller).await;
    ratatui::restore();

    info!("widget closed");
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, controller: &mut Controller) -> anyhow::Result<()> {
    let started = Instant::now();

    loop {
        controller.drain();
        controller.dispatch(Action::Tick);

        let spinner_frame = (started.elapsed().as_millis() / FRAME_INTERVAL.as_millis()) as usize;
        terminal.draw(|frame| ui::draw(frame, controller.state(), spinner_frame))?;

        // Lookups run on the worker threads; this thread only blocks on input.
        let Some(event) = poll_event(FRAME_INTERVAL)? else {
            continue;
        };

        match event {
            TuiEvent::Quit => return Ok(()),
            TuiEvent::Resize => {}
            TuiEvent::Submit => controller.dispatch(Action::Submit),
            TuiEvent::Up => controller.dispatch(Action::HighlightPrev),
            TuiEvent::Down => controller.dispatch(Action::HighlightNext),
            edit => {
                if let Some(query) = edited_query(controller.state().query(), &edit) {
                    controller.dispatch(Action::Edit(query));
                }
            }
        }
    }
}

/// New query text after an editing key, or `None` if the key changes nothing.
fn edited_query(current: &str, event: &TuiEvent) -> Option<String> {
    match event {
        TuiEvent::InputChar(c) => {
            let mut query = current.to_owned();
            query.push(*c);
            Some(query)
        }
        TuiEvent::Backspace => {
            let mut query = current.to_owned();
            query.pop().map(|_| query)
        }
        TuiEvent::ClearLine if !current.is_empty() => Some(String::new()),
        _ => None,
    }
}
