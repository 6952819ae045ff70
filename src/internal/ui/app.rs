use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::comment::{CommentError, SUCCESS_MESSAGE};
use crate::internal::debounce::Debouncer;
use crate::internal::notification::Notification;
use crate::internal::pages::{Fetch, Loaded, Page, PageCommand, PageSettings, Route};
use crate::internal::remote_list::RequestTicket;
use crate::internal::theme::{
    FileThemeStore, MemoryThemeStore, ThemeContext, ThemeController, ThemeMode, ThemeStore,
};

use ratatui::Frame;

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Typing into the event search box.
    Search,
    /// Typing into the comment form of an article.
    Comment,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    RelatedUp,
    RelatedDown,
    Enter,
    Back,
    NextTab,
    PrevTab,
    GoTo(Route),
    Refresh,
    ToggleTheme,
    ToggleHelp,
    Loaded(Loaded),
    /// Search text after the debounce period.
    SearchSettled(String),
    SubmitComment,
    /// Outcome of a comment POST, tagged with the submitting page's ticket.
    CommentSubmitted(RequestTicket, Result<(), CommentError>),
}

pub struct App {
    pub running: bool,
    pub app_version: String,
    pub config: AppConfig,
    pub api: ApiService,
    pub theme: ThemeController,
    pub settings: PageSettings,
    pub route: Route,
    pub page: Page,
    /// Routes to return to with `Esc`.
    pub route_stack: Vec<Route>,
    pub input_mode: InputMode,
    pub notification: Option<Notification>,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub show_help: bool,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    search_debouncer: Debouncer<Action>,
}

impl App {
    #[tracing::instrument]
    pub fn new() -> Self {
        let start = std::time::Instant::now();
        let config = AppConfig::load();
        let api = ApiService::new(
            config.api_base_url.clone(),
            &config.network,
            config.logging.enable_performance_metrics,
        );

        let store: Box<dyn ThemeStore> = match FileThemeStore::default_location() {
            Ok(store) => {
                tracing::info!("Theme preference stored at {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!("Theme preference will not persist: {}", e);
                Box::new(MemoryThemeStore::default())
            }
        };
        let theme_file = match config.theme_file.trim() {
            "" => None,
            path => Some(PathBuf::from(path)),
        };
        let theme = ThemeController::init(
            ThemeContext::new(),
            store,
            ThemeMode::detect_os_preference(),
        )
        .with_theme_file(theme_file, config.logging.enable_performance_metrics);

        let app = Self::with_parts(config, api, theme);
        tracing::info!(elapsed = ?start.elapsed(), "App initialized");
        app
    }

    /// Build the app from already resolved parts. The home page is selected
    /// but nothing is requested until [`App::run`] starts.
    pub fn with_parts(config: AppConfig, api: ApiService, theme: ThemeController) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let settings = PageSettings::from(&config);
        let search_debouncer = Debouncer::new(
            Duration::from_millis(config.search_debounce_ms),
            action_tx.clone(),
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            api,
            theme,
            settings,
            route: Route::Home,
            page: Page::Home(Default::default()),
            route_stack: Vec::new(),
            input_mode: InputMode::Normal,
            notification: None,
            spinner_state: 0,
            last_spinner_update: None,
            show_help: false,
            action_tx,
            action_rx,
            search_debouncer,
        }
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.notification = Some(Notification::info(message));
    }

    pub fn notify_success(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.notification = Some(Notification::success(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.notification = Some(Notification::error(message));
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        // Initial load
        let _ = self.action_tx.send(Action::Refresh);

        let mut event_interval = tokio::time::interval(Duration::from_millis(16));

        loop {
            // Update spinner animation every 100ms
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) => {
                    if now.duration_since(last_update).as_millis() >= 100 {
                        self.spinner_state = self.spinner_state.wrapping_add(1);
                        self.last_spinner_update = Some(now);
                    }
                }
                None => {
                    self.last_spinner_update = Some(now);
                }
            }

            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.clear_notification();
            }

            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Comment => self.handle_comment_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        let Page::Events(state) = &mut self.page else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Char(c) => {
                state.input.push(c);
                self.search_debouncer
                    .push(Action::SearchSettled(state.input.clone()));
            }
            KeyCode::Backspace => {
                state.input.pop();
                self.search_debouncer
                    .push(Action::SearchSettled(state.input.clone()));
            }
            KeyCode::Enter => {
                // Apply right away instead of waiting for the timer.
                self.search_debouncer.cancel();
                let settled = state.input.clone();
                state.apply_query(&settled);
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.search_debouncer.cancel();
                state.input.clear();
                state.apply_query("");
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_comment_input(&mut self, key: KeyEvent) {
        let Page::ArticleDetail(state) = &mut self.page else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Tab => state.comment.focus = state.comment.focus.next(),
            KeyCode::Char(c) => state.comment.focused_mut().push(c),
            KeyCode::Backspace => {
                state.comment.focused_mut().pop();
            }
            KeyCode::Enter => {
                let _ = self.action_tx.send(Action::SubmitComment);
            }
            KeyCode::Esc => {
                state.form_open = false;
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => self.show_help = false,
                // Swallow other keys while help is shown
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.send(Action::Quit),
            KeyCode::Esc => self.send(Action::Back),
            KeyCode::Char(c @ '1'..='8') => {
                if let Some(route) = Route::from_digit(c) {
                    self.send(Action::GoTo(route));
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.send(Action::NavigateDown),
            KeyCode::Char('k') | KeyCode::Up => self.send(Action::NavigateUp),
            KeyCode::Char('J') => self.send(Action::RelatedDown),
            KeyCode::Char('K') => self.send(Action::RelatedUp),
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => self.send(Action::NextTab),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => self.send(Action::PrevTab),
            KeyCode::Enter => self.send(Action::Enter),
            KeyCode::Char('r') => self.send(Action::Refresh),
            KeyCode::Char('t') => self.send(Action::ToggleTheme),
            KeyCode::Char('?') => self.send(Action::ToggleHelp),
            KeyCode::Char('/') => {
                if matches!(self.page, Page::Events(_)) {
                    self.input_mode = InputMode::Search;
                }
            }
            KeyCode::Char('c') => {
                if let Page::ArticleDetail(state) = &mut self.page {
                    state.form_open = true;
                    self.input_mode = InputMode::Comment;
                }
            }
            _ => {}
        }
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => self.page.state_mut().up(),
            Action::NavigateDown => {
                let fetches = self.page.state_mut().down();
                self.spawn_fetches(fetches);
            }
            Action::RelatedUp => self.page.state_mut().related_up(),
            Action::RelatedDown => self.page.state_mut().related_down(),
            Action::NextTab => {
                let fetches = self.page.state_mut().next_tab();
                self.spawn_fetches(fetches);
            }
            Action::PrevTab => {
                let fetches = self.page.state_mut().prev_tab();
                self.spawn_fetches(fetches);
            }
            Action::Enter => {
                let command = self.page.state().activate(self.api.base_url());
                match command {
                    Some(PageCommand::Navigate(route)) => self.navigate(route),
                    Some(PageCommand::Open(url)) => {
                        tracing::info!(%url, "Opening in browser");
                        if let Err(e) = open::that(&url) {
                            self.notify_error(format!("Gagal membuka tautan: {}", e));
                        }
                    }
                    None => {}
                }
            }
            Action::Back => match self.route_stack.pop() {
                Some(route) => self.open_route(route),
                None => tracing::debug!("back pressed on the first page"),
            },
            Action::GoTo(route) => {
                if route != self.route {
                    self.route_stack.clear();
                    self.open_route(route);
                }
            }
            Action::Refresh => {
                let state = self.page.state_mut();
                state.cancel();
                let fetches = state.load();
                self.spawn_fetches(fetches);
            }
            Action::ToggleTheme => {
                let mode = self.theme.toggle();
                self.notify_info(format!("Tema: {}", mode));
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Loaded(loaded) => self.page.state_mut().apply(loaded),
            Action::SearchSettled(query) => match &mut self.page {
                Page::Events(state) => state.apply_query(&query),
                _ => tracing::debug!("search settled after leaving the events page"),
            },
            Action::SubmitComment => self.submit_comment(),
            Action::CommentSubmitted(ticket, result) => self.finish_comment(ticket, result),
        }
    }

    /// Open `route` on top of the current page, remembering where we came from.
    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.route_stack.push(previous);
        self.open_route(route);
    }

    /// Replace the current page. Everything the old page had in flight is
    /// cancelled so late responses are dropped.
    fn open_route(&mut self, route: Route) {
        self.page.state_mut().cancel();
        self.search_debouncer.cancel();
        self.input_mode = InputMode::Normal;

        tracing::info!(?route, "Opening page");
        let (page, fetches) = Page::open(&route, &self.settings);
        self.route = route;
        self.page = page;
        self.spawn_fetches(fetches);
    }

    fn spawn_fetches(&self, fetches: Vec<Fetch>) {
        for fetch in fetches {
            let api = self.api.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                let loaded = fetch.run(&api).await;
                let _ = tx.send(Action::Loaded(loaded));
            });
        }
    }

    fn submit_comment(&mut self) {
        let Page::ArticleDetail(state) = &mut self.page else {
            return;
        };
        let Some((ticket, payload)) = state.begin_comment() else {
            return;
        };

        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api.submit_comment(&payload).await.map_err(|e| {
                tracing::error!("Comment submission failed: {}", e);
                CommentError::SubmitFailed
            });
            let _ = tx.send(Action::CommentSubmitted(ticket, result));
        });
    }

    fn finish_comment(&mut self, ticket: RequestTicket, result: Result<(), CommentError>) {
        let outcome = match &mut self.page {
            Page::ArticleDetail(state) => state.finish_comment(ticket, result),
            _ => None,
        };
        match outcome {
            Some(Ok(fetch)) => {
                self.input_mode = InputMode::Normal;
                self.notify_success(SUCCESS_MESSAGE);
                self.spawn_fetches(vec![fetch]);
            }
            Some(Err(e)) => self.notify_error(e.to_string()),
            None => tracing::debug!("comment result arrived after leaving the article"),
        }
    }

    pub fn get_spinner_char(&self) -> &'static str {
        const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER_FRAMES[self.spinner_state % SPINNER_FRAMES.len()]
    }

    pub fn is_loading(&self) -> bool {
        self.page.state().is_loading()
    }

    pub fn ui(&mut self, f: &mut Frame) {
        super::view::draw(self, f);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
