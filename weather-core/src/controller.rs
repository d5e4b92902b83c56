//! Runs the effects requested by [`WidgetState::update`] and feeds the
//! results back in.
//!
//! The controller is the single owner of widget state. Lookups run as tokio
//! tasks and report through an unbounded channel; completions are applied by
//! [`Controller::drain`] or [`Controller::settle`] on the owner's side, so no
//! locking is involved.

use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::{
    debounce::{Debouncer, SUGGESTION_DEBOUNCE},
    provider::WeatherProvider,
    widget::{Action, Effect, RequestId, WeatherFailure, WidgetState},
};

#[derive(Debug)]
pub struct Controller {
    state: WidgetState,
    provider: Arc<dyn WeatherProvider>,
    debouncer: Debouncer,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl Controller {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_debounce(provider, SUGGESTION_DEBOUNCE)
    }

    pub fn with_debounce(provider: Arc<dyn WeatherProvider>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: WidgetState::new(),
            provider,
            debouncer: Debouncer::new(delay),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Apply a user action and start whatever it asks for.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        for effect in self.state.update(action) {
            self.run(effect);
        }
    }

    /// Apply every completion that has already arrived. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Wait until no weather lookup is in flight, applying completions as they arrive.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            // The controller holds a sender, so the channel never closes.
            let Some(action) = self.rx.recv().await else {
                break;
            };
            self.dispatch(action);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleSuggestions(query) => {
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                self.debouncer
                    .schedule(async move { lookup_places(provider, query, tx).await });
            }
            Effect::CancelSuggestions => {
                if self.debouncer.cancel() {
                    debug!("pending suggestion lookup cancelled");
                }
            }
            Effect::FetchWeather { request, city } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move { lookup_weather(provider, request, city, tx).await });
            }
        }
    }
}

async fn lookup_places(provider: Arc<dyn WeatherProvider>, query: String, tx: UnboundedSender<Action>) {
    let action = match provider.find_places(&query).await {
        Ok(places) => {
            debug!(%query, count = places.len(), "suggestions received");
            Action::SuggestionsLoaded { query, places }
        }
        Err(err) => {
            warn!(%query, error = %err, "error fetching suggestions");
            Action::SuggestionsFailed { query }
        }
    };

    // The receiver only disappears when the widget is gone.
    let _ = tx.send(action);
}

async fn lookup_weather(
    provider: Arc<dyn WeatherProvider>,
    request: RequestId,
    city: String,
    tx: UnboundedSender<Action>,
) {
    let action = match provider.current_weather(&city).await {
        Ok(report) => Action::WeatherLoaded { request, report },
        Err(err) => {
            let failure = if err.is_rejection() {
                WeatherFailure::CityNotFound
            } else {
                WeatherFailure::Unavailable
            };
            warn!(request, %city, error = %err, ?failure, "weather lookup failed");
            Action::WeatherFailed { request, failure }
        }
    };

    let _ = tx.send(action);
}
