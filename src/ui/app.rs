use crate::api::{ApiError, BotApiClient, BotStatus, TradeReceipt};
use crate::config::Config;
use crate::data::StatusStore;
use crate::trading::{TradeController, TradeRequest};
use crate::ui::charts::{PriceChart, VolumeChart};
use crate::ui::dialogs::{HelpOverlay, TradeDialog};
use crate::ui::input::{DialogType, InputMode, InputState, TradeDialogState};
use crate::ui::widgets::alerts::alert_rows;
use crate::ui::widgets::{AlertsWidget, MetricsWidget, TradePanel};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Completions of background work, applied by the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A status poll finished. `seq` is the poll's issue number; the store
    /// uses it to discard completions that arrive out of order.
    Status {
        seq: u64,
        result: Result<BotStatus, ApiError>,
    },
    /// The in-flight trade submission finished.
    Trade {
        result: Result<TradeReceipt, ApiError>,
    },
}

pub struct App {
    config: Config,
    client: Arc<BotApiClient>,
    store: StatusStore,
    controller: TradeController,
    input: InputState,
    trade_dialog: Option<TradeDialogState>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = BotApiClient::new(&config.server.base_url)?;

        Ok(Self {
            config,
            client: Arc::new(client),
            store: StatusStore::new(),
            controller: TradeController::new(),
            input: InputState::new(),
            trade_dialog: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create event channel
        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(64);

        // Poll loop: each tick issues an independent fetch tagged with a
        // monotonically increasing sequence number, so a slow response can
        // be recognized and discarded when a newer one already landed.
        let poller = {
            let client = Arc::clone(&self.client);
            let tx = event_tx.clone();
            let interval = self.config.ui.poll_interval();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                let mut seq: u64 = 0;
                loop {
                    ticker.tick().await;
                    seq += 1;
                    let client = Arc::clone(&client);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_status().await;
                        let _ = tx.send(AppEvent::Status { seq, result }).await;
                    });
                }
            })
        };

        // Main loop
        let tick_rate = self.config.ui.refresh_rate();

        loop {
            // Apply completed background work
            while let Ok(app_event) = event_rx.try_recv() {
                self.handle_app_event(app_event);
            }

            // Draw UI
            terminal.draw(|f| self.draw(f))?;

            // Handle input
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, &event_tx);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Stop polling before tearing down the view; completions of any
        // still-outstanding fetch are dropped with the channel.
        poller.abort();

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Status { seq, result } => match result {
                Ok(status) => {
                    if !self.store.apply(seq, status) {
                        tracing::debug!("discarded out-of-order status snapshot #{}", seq);
                    }
                }
                Err(err) => {
                    if self.store.mark_stale(seq) {
                        tracing::warn!("status poll #{} failed: {}", seq, err);
                    }
                }
            },
            AppEvent::Trade { result } => match result {
                Ok(receipt) if receipt.is_success() => self.controller.resolve_accepted(),
                Ok(receipt) => self.controller.resolve_rejected(receipt.rejection_reason()),
                Err(err) => self.controller.resolve_rejected(err.to_string()),
            },
        }
    }

    fn handle_key(&mut self, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
        match self.input.mode {
            InputMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('b') => {
                    self.trade_dialog = Some(TradeDialogState::new_buy());
                    self.input.show_trade();
                }
                KeyCode::Char('s') => {
                    self.trade_dialog = Some(TradeDialogState::new_sell());
                    self.input.show_trade();
                }
                KeyCode::Char('a') => {
                    self.controller.acknowledge();
                }
                KeyCode::Char('?') | KeyCode::Char('h') => {
                    self.input.show_help();
                }
                _ => {}
            },
            InputMode::Dialog(DialogType::Help) => {
                self.input.close_dialog();
            }
            InputMode::Dialog(DialogType::Trade) => match code {
                KeyCode::Esc => {
                    self.trade_dialog = None;
                    self.input.close_dialog();
                }
                KeyCode::Enter => {
                    self.submit_trade(event_tx);
                }
                KeyCode::Backspace => {
                    if let Some(dialog) = self.trade_dialog.as_mut() {
                        dialog.backspace();
                    }
                }
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                    if let Some(dialog) = self.trade_dialog.as_mut() {
                        dialog.push_char(c);
                    }
                }
                _ => {}
            },
        }
    }

    /// Run the dialog's input through the controller. Validation failures
    /// stay in the dialog; an admitted request is dispatched exactly once.
    fn submit_trade(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        let (side, raw_amount) = match &self.trade_dialog {
            Some(dialog) => (dialog.side, dialog.amount.clone()),
            None => return,
        };

        match self.controller.submit(side, &raw_amount) {
            Ok(request) => {
                self.dispatch_trade(&request, event_tx);
                self.trade_dialog = None;
                self.input.close_dialog();
            }
            Err(err) => {
                if let Some(dialog) = self.trade_dialog.as_mut() {
                    dialog.set_error(&err.to_string());
                }
            }
        }
    }

    fn dispatch_trade(&self, request: &TradeRequest, event_tx: &mpsc::Sender<AppEvent>) {
        let client = Arc::clone(&self.client);
        let tx = event_tx.clone();
        let timeout_secs = self.config.trade.timeout_secs;
        let deadline = self.config.trade.timeout();
        let side = request.side;
        let amount = request.amount;

        tokio::spawn(async move {
            let result = match tokio::time::timeout(deadline, client.submit_trade(side, amount))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ApiError::Timeout(timeout_secs)),
            };
            let _ = tx.send(AppEvent::Trade { result }).await;
        });
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let size = f.area();

        // Main layout: metrics bar + charts + bottom row
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Percentage(50),
                Constraint::Min(8),
            ])
            .split(size);

        self.draw_metrics(f, main_chunks[0]);

        // Charts: price line + volume bars side by side
        let chart_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);

        self.draw_price_chart(f, chart_chunks[0]);
        self.draw_volume_chart(f, chart_chunks[1]);

        // Bottom row: trade panel + alert feed
        let bottom_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[2]);

        self.draw_trade_panel(f, bottom_chunks[0]);
        self.draw_alerts(f, bottom_chunks[1]);

        // Modal overlays
        match self.input.mode {
            InputMode::Dialog(DialogType::Help) => {
                f.render_widget(HelpOverlay::new(), size);
            }
            InputMode::Dialog(DialogType::Trade) => {
                if let Some(dialog) = &self.trade_dialog {
                    f.render_widget(TradeDialog::new(dialog), size);
                }
            }
            InputMode::Normal => {}
        }
    }

    fn draw_metrics(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let widget = MetricsWidget::new(
            self.store.latest(),
            self.store.is_stale(),
            self.store.last_refresh(),
        );
        f.render_widget(widget, area);
    }

    fn draw_price_chart(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let series = self
            .store
            .latest()
            .map(|s| s.price_series.as_slice())
            .unwrap_or(&[]);
        f.render_widget(PriceChart::new(series), area);
    }

    fn draw_volume_chart(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let series = self
            .store
            .latest()
            .map(|s| s.volume_series.as_slice())
            .unwrap_or(&[]);
        f.render_widget(VolumeChart::new(series), area);
    }

    fn draw_trade_panel(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        f.render_widget(TradePanel::new(self.controller.state()), area);
    }

    fn draw_alerts(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let alerts = self
            .store
            .latest()
            .map(|s| s.alerts.as_slice())
            .unwrap_or(&[]);
        let rows = alert_rows(alerts, self.config.ui.max_alerts);
        f.render_widget(AlertsWidget::new(&rows), area);
    }
}
