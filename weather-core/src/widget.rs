//! # Widget state machine
//!
//! Everything the user does, and every lookup that completes, becomes an
//! [`Action`]. [`WidgetState::update`] applies it and returns the [`Effect`]s
//! the caller has to run. No I/O happens here.
//!
//! ```text
//! State + Action  ->  update()  ->  New State + Effects
//! ```

use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    model::WeatherReport,
    notify::{Notifications, ToastKind},
    theme::BackgroundTheme,
};

/// Identifies one weather lookup so late answers to superseded requests can be
/// recognised.
pub type RequestId = u64;

/// Where the user is in the search / pick cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Editing, no suggestion list on screen.
    #[default]
    Typing,
    /// Editing with a non-empty suggestion list on screen.
    Suggesting {
        suggestions: Vec<String>,
        highlighted: Option<usize>,
    },
    /// A city was committed; suggestions are suppressed until the next edit.
    Selected { city: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fetch {
    #[default]
    Idle,
    Loading { request: RequestId, city: String },
}

/// Why a weather lookup produced no report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherFailure {
    /// Upstream answered with a non-success code.
    CityNotFound,
    /// Transport or decoding failure.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The query text changed to this value.
    Edit(String),
    /// Search button: look up the typed text.
    Search,
    /// Pick the suggestion at this index.
    SelectSuggestion(usize),
    HighlightNext,
    HighlightPrev,
    /// Enter key: pick the highlighted suggestion, or search if none is highlighted.
    Submit,
    /// Clock tick, used to dismiss expired toasts.
    Tick,

    SuggestionsLoaded { query: String, places: Vec<String> },
    SuggestionsFailed { query: String },
    WeatherLoaded { request: RequestId, report: WeatherReport },
    WeatherFailed { request: RequestId, failure: WeatherFailure },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer for a place lookup.
    ScheduleSuggestions(String),
    /// Drop the pending debounce timer, if any.
    CancelSuggestions,
    FetchWeather { request: RequestId, city: String },
}

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    query: String,
    selection: Selection,
    fetch: Fetch,
    report: Option<WeatherReport>,
    theme: BackgroundTheme,
    notifications: Notifications,
    next_request: RequestId,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn fetch(&self) -> &Fetch {
        &self.fetch
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn theme(&self) -> BackgroundTheme {
        self.theme
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, Fetch::Loading { .. })
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.selection, Selection::Selected { .. })
    }

    /// Suggestions currently shown; empty unless in [`Selection::Suggesting`].
    pub fn suggestions(&self) -> &[String] {
        match &self.selection {
            Selection::Suggesting { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self.selection {
            Selection::Suggesting { highlighted, .. } => highlighted,
            _ => None,
        }
    }

    /// The city the last lookup was committed for.
    pub fn selected_city(&self) -> Option<&str> {
        match &self.selection {
            Selection::Selected { city } => Some(city),
            _ => None,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Edit(text) => self.on_edit(text),
            Action::Search => self.on_search(),
            Action::SelectSuggestion(index) => self.on_select(index),
            Action::HighlightNext => {
                self.move_highlight(true);
                Vec::new()
            }
            Action::HighlightPrev => {
                self.move_highlight(false);
                Vec::new()
            }
            Action::Submit => match self.highlighted() {
                Some(index) => self.on_select(index),
                None => self.on_search(),
            },
            Action::Tick => {
                self.notifications.dismiss_expired(Instant::now());
                Vec::new()
            }
            Action::SuggestionsLoaded { query, places } => {
                self.on_suggestions(query, places);
                Vec::new()
            }
            Action::SuggestionsFailed { query } => {
                self.on_suggestions(query, Vec::new());
                Vec::new()
            }
            Action::WeatherLoaded { request, report } => {
                self.on_weather(request, Ok(report));
                Vec::new()
            }
            Action::WeatherFailed { request, failure } => {
                self.on_weather(request, Err(failure));
                Vec::new()
            }
        }
    }

    fn on_edit(&mut self, text: String) -> Vec<Effect> {
        self.query = text;

        if self.is_selected() {
            self.selection = Selection::Typing;
        }

        if self.query.trim().is_empty() {
            self.selection = Selection::Typing;
            return vec![Effect::CancelSuggestions];
        }

        vec![Effect::ScheduleSuggestions(self.query.clone())]
    }

    fn on_search(&mut self) -> Vec<Effect> {
        let city = self.query.trim().to_string();
        if city.is_empty() {
            self.toast(ToastKind::EmptyInput);
            return Vec::new();
        }

        self.commit(city)
    }

    fn on_select(&mut self, index: usize) -> Vec<Effect> {
        let Some(city) = self.suggestions().get(index).cloned() else {
            debug!(index, "ignoring selection outside the suggestion list");
            return Vec::new();
        };

        self.query = city.clone();
        self.commit(city)
    }

    fn commit(&mut self, city: String) -> Vec<Effect> {
        let request = self.next_request;
        self.next_request += 1;

        info!(request, %city, "weather lookup requested");
        self.selection = Selection::Selected { city: city.clone() };
        self.fetch = Fetch::Loading {
            request,
            city: city.clone(),
        };

        vec![Effect::CancelSuggestions, Effect::FetchWeather { request, city }]
    }

    fn move_highlight(&mut self, forward: bool) {
        if let Selection::Suggesting {
            suggestions,
            highlighted,
        } = &mut self.selection
        {
            let last = suggestions.len().saturating_sub(1);
            *highlighted = match (*highlighted, forward) {
                (None, true) => Some(0),
                (None, false) => Some(last),
                (Some(i), true) => Some(if i >= last { 0 } else { i + 1 }),
                (Some(i), false) => Some(if i == 0 { last } else { i - 1 }),
            };
        }
    }

    fn on_suggestions(&mut self, query: String, places: Vec<String>) {
        if self.is_selected() {
            debug!(%query, "dropping suggestions that arrived after a city was selected");
            return;
        }

        // Last response wins, even if it answers an older query.
        self.selection = if places.is_empty() {
            Selection::Typing
        } else {
            Selection::Suggesting {
                suggestions: places,
                highlighted: None,
            }
        };
    }

    fn on_weather(&mut self, request: RequestId, outcome: Result<WeatherReport, WeatherFailure>) {
        match &self.fetch {
            Fetch::Loading { request: current, .. } if *current == request => {}
            _ => {
                debug!(request, "ignoring weather response for a superseded request");
                return;
            }
        }

        self.fetch = Fetch::Idle;

        match outcome {
            Ok(report) => {
                self.theme = BackgroundTheme::classify(&report.description);
                info!(request, theme = %self.theme, "weather report updated");
                self.report = Some(report);
            }
            Err(WeatherFailure::CityNotFound) => self.toast(ToastKind::CityNotFound),
            Err(WeatherFailure::Unavailable) => self.toast(ToastKind::FetchFailed),
        }
    }

    fn toast(&mut self, kind: ToastKind) {
        self.notifications.push(kind, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(description: &str) -> WeatherReport {
        WeatherReport {
            location_name: "London".into(),
            temperature_c: 11.0,
            feels_like_c: 10.0,
            temp_min_c: 9.0,
            temp_max_c: 12.0,
            humidity_pct: 80,
            sea_level_hpa: None,
            description: description.into(),
            observed_at: None,
        }
    }

    fn with_suggestions(places: &[&str]) -> WidgetState {
        let mut state = WidgetState::new();
        state.update(Action::Edit("Lon".into()));
        state.update(Action::SuggestionsLoaded {
            query: "Lon".into(),
            places: places.iter().map(|p| p.to_string()).collect(),
        });
        state
    }

    fn kinds(state: &WidgetState) -> Vec<ToastKind> {
        state.notifications().visible().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn initial_state_is_empty_night() {
        let state = WidgetState::new();
        assert_eq!(state.selection(), &Selection::Typing);
        assert!(!state.is_loading());
        assert!(state.report().is_none());
        assert_eq!(state.theme(), BackgroundTheme::Night);
    }

    #[test]
    fn edit_schedules_lookup_for_non_empty_query() {
        let mut state = WidgetState::new();
        let effects = state.update(Action::Edit("Par".into()));
        assert_eq!(effects, vec![Effect::ScheduleSuggestions("Par".into())]);
        assert_eq!(state.query(), "Par");
    }

    #[test]
    fn edit_to_blank_cancels_and_clears() {
        let mut state = with_suggestions(&["London"]);
        let effects = state.update(Action::Edit("   ".into()));
        assert_eq!(effects, vec![Effect::CancelSuggestions]);
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn blank_search_raises_toast_without_fetch() {
        let mut state = WidgetState::new();
        state.update(Action::Edit("  ".into()));
        let effects = state.update(Action::Search);

        assert!(effects.is_empty());
        assert!(!state.is_loading());
        assert_eq!(kinds(&state), vec![ToastKind::EmptyInput]);
    }

    #[test]
    fn search_uses_trimmed_query_and_selects() {
        let mut state = with_suggestions(&["London"]);
        state.update(Action::Edit("  Paris ".into()));
        let effects = state.update(Action::Search);

        assert_eq!(
            effects,
            vec![
                Effect::CancelSuggestions,
                Effect::FetchWeather { request: 0, city: "Paris".into() }
            ]
        );
        assert_eq!(state.selected_city(), Some("Paris"));
        assert!(state.is_loading());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn selecting_suggestion_fetches_exact_name() {
        let mut state = with_suggestions(&["London", "Londonderry"]);
        let effects = state.update(Action::SelectSuggestion(1));

        assert_eq!(
            effects,
            vec![
                Effect::CancelSuggestions,
                Effect::FetchWeather { request: 0, city: "Londonderry".into() }
            ]
        );
        assert_eq!(state.query(), "Londonderry");
        assert!(state.is_selected());
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut state = with_suggestions(&["London"]);
        assert!(state.update(Action::SelectSuggestion(5)).is_empty());
        assert!(!state.is_selected());
    }

    #[test]
    fn suggestions_are_suppressed_while_selected() {
        let mut state = with_suggestions(&["London"]);
        state.update(Action::SelectSuggestion(0));

        state.update(Action::SuggestionsLoaded {
            query: "Lon".into(),
            places: vec!["Longyearbyen".into()],
        });
        assert!(state.suggestions().is_empty());
        assert_eq!(state.selected_city(), Some("London"));

        let effects = state.update(Action::Edit("Londo".into()));
        assert_eq!(effects, vec![Effect::ScheduleSuggestions("Londo".into())]);
        assert!(!state.is_selected());
    }

    #[test]
    fn empty_or_failed_lookup_clears_list() {
        let mut state = with_suggestions(&["London"]);
        state.update(Action::SuggestionsLoaded { query: "Lonx".into(), places: vec![] });
        assert!(state.suggestions().is_empty());

        let mut state = with_suggestions(&["London"]);
        state.update(Action::SuggestionsFailed { query: "Lon".into() });
        assert!(state.suggestions().is_empty());
        assert!(state.notifications().is_empty());
    }

    #[test]
    fn stale_lookup_overwrites_newer_list() {
        let mut state = with_suggestions(&["Paris"]);
        state.update(Action::SuggestionsLoaded {
            query: "P".into(),
            places: vec!["Prague".into(), "Porto".into()],
        });
        assert_eq!(state.suggestions(), ["Prague", "Porto"]);
    }

    #[test]
    fn highlight_wraps_and_submit_selects_it() {
        let mut state = with_suggestions(&["London", "Londonderry", "London Colney"]);
        state.update(Action::HighlightPrev);
        assert_eq!(state.highlighted(), Some(2));
        state.update(Action::HighlightNext);
        assert_eq!(state.highlighted(), Some(0));
        state.update(Action::HighlightNext);

        let effects = state.update(Action::Submit);
        assert_eq!(
            effects.last(),
            Some(&Effect::FetchWeather { request: 0, city: "Londonderry".into() })
        );
    }

    #[test]
    fn submit_without_highlight_searches() {
        let mut state = with_suggestions(&["London"]);
        let effects = state.update(Action::Submit);
        assert_eq!(
            effects.last(),
            Some(&Effect::FetchWeather { request: 0, city: "Lon".into() })
        );
    }

    #[test]
    fn success_replaces_report_and_theme() {
        let mut state = WidgetState::new();
        state.update(Action::Edit("London".into()));
        state.update(Action::Search);
        state.update(Action::WeatherLoaded { request: 0, report: report("light rain") });

        assert!(!state.is_loading());
        assert_eq!(state.report(), Some(&report("light rain")));
        assert_eq!(state.theme(), BackgroundTheme::Rain);
    }

    #[test]
    fn failures_keep_previous_report() {
        let mut state = WidgetState::new();
        state.update(Action::Edit("London".into()));
        state.update(Action::Search);
        state.update(Action::WeatherLoaded { request: 0, report: report("clear sky") });

        state.update(Action::Edit("Atlantis".into()));
        state.update(Action::Search);
        state.update(Action::WeatherFailed { request: 1, failure: WeatherFailure::CityNotFound });

        state.update(Action::Search);
        state.update(Action::WeatherFailed { request: 2, failure: WeatherFailure::Unavailable });

        assert!(!state.is_loading());
        assert_eq!(state.report(), Some(&report("clear sky")));
        assert_eq!(state.theme(), BackgroundTheme::ClearSky);
        assert_eq!(kinds(&state), vec![ToastKind::CityNotFound, ToastKind::FetchFailed]);
    }

    #[test]
    fn superseded_response_is_ignored() {
        let mut state = WidgetState::new();
        state.update(Action::Edit("London".into()));
        state.update(Action::Search);
        state.update(Action::Edit("Paris".into()));
        state.update(Action::Search);

        state.update(Action::WeatherLoaded { request: 0, report: report("snow") });
        assert!(state.is_loading());
        assert!(state.report().is_none());

        state.update(Action::WeatherLoaded { request: 1, report: report("fog") });
        assert!(!state.is_loading());
        assert_eq!(state.theme(), BackgroundTheme::Fog);
    }
}
