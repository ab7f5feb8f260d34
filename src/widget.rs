//! The countdown widget.
//!
//! Composes the duration form, the [`Engine`], the [`Ticker`] that drives it,
//! one gauge per time unit and a help line. While no countdown exists the
//! form is shown; once started, the form gives way to the gauges until the
//! countdown is cancelled.
//!
//! # Controls
//!
//! | key | action | available |
//! |-----|--------|-----------|
//! | `enter` | start with the entered duration | form |
//! | `space` / `p` | pause, or resume when paused | running, paused |
//! | `esc` / `r` | restart the last duration | running, paused, finished |
//! | `c` | cancel and return to the form | running, paused, finished |
//! | `?` | toggle full help | running, paused, finished |
//! | `q` / `ctrl+c` | quit | `ctrl+c` everywhere |
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use countdown_rings::widget::{FinishedMsg, Model as Countdown};
//!
//! struct App {
//!     countdown: Countdown,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let (countdown, cmd) = Countdown::init();
//!         (App { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config;
use crate::engine::{Engine, Mode, TickOutcome, TimerState};
use crate::form;
use crate::gauge::{self, with_solid_fill, with_width};
use crate::help;
use crate::key::{self, Binding};
use crate::render::{present, Presentation, Unit};
use crate::ticker::{TickMsg, Ticker};
use crate::time::DurationSpec;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::time::Duration;
use tracing::{debug, info};

const ACCENT: &str = "#7571F9";
const ACCENT_2: &str = "#FF5F87";

/// Sent once when a countdown reaches zero.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The widget whose countdown finished.
    pub id: i64,
}

/// Widget key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Submit the form.
    pub start: Binding,
    /// Pause or resume.
    pub pause: Binding,
    /// Restart the last duration.
    pub reset: Binding,
    /// Cancel and return to the form.
    pub cancel: Binding,
    /// Toggle the full help view.
    pub show_help: Binding,
    /// Quit.
    pub quit: Binding,
    /// Quit from anywhere, including the form.
    pub force_quit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            start: Binding::new(vec![KeyCode::Enter]).with_help("enter", "start"),
            pause: Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')])
                .with_help("space", "pause"),
            reset: Binding::new(vec![KeyCode::Esc, KeyCode::Char('r')]).with_help("esc", "reset"),
            cancel: Binding::new(vec![KeyCode::Char('c')]).with_help("c", "cancel"),
            show_help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "quit"),
        }
    }
}

impl KeyMap {
    /// Enables and relabels bindings for `mode`.
    pub fn sync(&mut self, mode: Mode) {
        let idle = mode == Mode::Idle;
        self.start.set_enabled(idle);
        self.pause
            .set_enabled(matches!(mode, Mode::Running | Mode::Paused));
        self.pause
            .set_desc(if mode == Mode::Paused { "resume" } else { "pause" });
        self.reset.set_enabled(!idle);
        self.cancel.set_enabled(!idle);
        self.show_help.set_enabled(!idle);
        self.quit.set_enabled(!idle);
    }
}

/// Widget styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Heading above everything.
    pub title: Style,
    /// Status line while paused.
    pub paused: Style,
    /// Banner once finished.
    pub finished: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            title: Style::new().bold(true).foreground(Color::from(ACCENT)),
            paused: Style::new().faint(true),
            finished: Style::new().bold(true).foreground(Color::from(ACCENT_2)),
        }
    }
}

/// The countdown widget.
pub struct Model<C: Clock = SystemClock> {
    /// Duration entry form.
    pub form: form::Model,
    /// Key bindings; enablement follows the engine mode.
    pub keymap: KeyMap,
    /// Help line.
    pub help: help::Model,
    /// One gauge per unit, days first.
    pub gauges: [gauge::Model; 4],
    /// Styling.
    pub styles: Styles,
    /// Heading text.
    pub title: String,
    engine: Engine<C>,
    ticker: Ticker,
    presentation: Presentation,
}

impl Model<SystemClock> {
    /// Creates a widget on the system clock.
    pub fn new(defaults: DurationSpec, interval: Duration, gauge_width: usize) -> Self {
        Self::with_clock(defaults, interval, gauge_width, SystemClock)
    }
}

impl<C: Clock> Model<C> {
    /// Creates a widget reading time from `clock`.
    pub fn with_clock(
        defaults: DurationSpec,
        interval: Duration,
        gauge_width: usize,
        clock: C,
    ) -> Self {
        let engine = Engine::with_clock(clock);
        let presentation = present(engine.state());
        let gauges = [ACCENT, ACCENT_2, ACCENT, ACCENT_2].map(|color| {
            gauge::new(&[with_width(gauge_width), with_solid_fill(color.to_string())])
        });

        let mut keymap = KeyMap::default();
        keymap.sync(Mode::Idle);

        Self {
            form: form::Model::new(defaults),
            keymap,
            help: help::Model::new(),
            gauges,
            styles: Styles::default(),
            title: "Countdown Timer".to_string(),
            engine,
            ticker: Ticker::new(interval),
            presentation,
        }
    }

    /// Identifier carried by this widget's [`FinishedMsg`].
    pub fn id(&self) -> i64 {
        self.ticker.id()
    }

    /// Current engine mode.
    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    /// Current engine state.
    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    /// The presentation model of the last refresh.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Whether the periodic driver is live.
    pub fn ticking(&self) -> bool {
        self.ticker.active()
    }

    /// Starts a countdown with the duration in the form.
    ///
    /// A zero duration is rejected: the form stays up and shows the message.
    pub fn start(&mut self) -> Option<Cmd> {
        let spec = self.form.spec();
        match self.engine.start(&spec) {
            Ok(()) => self.form.err = None,
            Err(err) => self.form.err = Some(err.to_string()),
        }
        self.refresh()
    }

    /// Pauses when running, resumes when paused.
    pub fn pause_toggle(&mut self) -> Option<Cmd> {
        self.engine.pause_toggle();
        self.refresh()
    }

    /// Restarts the last duration from the top.
    pub fn reset(&mut self) -> Option<Cmd> {
        self.engine.reset();
        self.refresh()
    }

    /// Abandons the countdown and shows the form again.
    pub fn cancel(&mut self) -> Option<Cmd> {
        self.engine.cancel();
        self.refresh()
    }

    // Re-derives the presentation and starts or stops the driver to match
    // the engine mode.
    fn refresh(&mut self) -> Option<Cmd> {
        self.presentation = present(self.engine.state());
        let mode = self.engine.mode();
        self.keymap.sync(mode);

        match (mode, self.ticker.active()) {
            (Mode::Running, false) => {
                debug!("starting driver");
                Some(self.ticker.start())
            }
            (Mode::Running, true) => None,
            (_, true) => {
                debug!(?mode, "stopping driver");
                self.ticker.stop();
                None
            }
            (_, false) => None,
        }
    }

    fn on_tick(&mut self, msg: &TickMsg) -> Option<Cmd> {
        if !self.ticker.accepts(msg) {
            return None;
        }

        let outcome = self.engine.tick();
        self.presentation = present(self.engine.state());
        match outcome {
            TickOutcome::Counting(_) => Some(self.ticker.schedule()),
            TickOutcome::Finished => {
                self.ticker.stop();
                self.keymap.sync(Mode::Finished);
                info!(initial_ms = self.engine.state().initial_ms, "countdown finished");
                let id = self.id();
                Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
                    Box::new(FinishedMsg { id }) as Msg
                }))
            }
            TickOutcome::Ignored => {
                self.ticker.stop();
                None
            }
        }
    }

    /// Handles ticks and key presses.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            return self.on_tick(tick);
        }

        if let Some(size) = msg.downcast_ref::<bubbletea_rs::WindowSizeMsg>() {
            self.help.width = size.width as usize;
            return None;
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if key::matches(key_msg, &[&self.keymap.force_quit, &self.keymap.quit]) {
            return Some(bubbletea_rs::quit());
        }

        if self.mode() == Mode::Idle {
            if self.keymap.start.matches(key_msg) {
                return self.start();
            }
            return self.form.update(&msg);
        }

        if self.keymap.pause.matches(key_msg) {
            self.pause_toggle()
        } else if self.keymap.reset.matches(key_msg) {
            self.reset()
        } else if self.keymap.cancel.matches(key_msg) {
            self.cancel()
        } else if self.keymap.show_help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
            None
        } else {
            None
        }
    }

    /// Renders the form or the gauges, followed by the help line.
    pub fn view(&self) -> String {
        let mut out = self.styles.title.render(&self.title);
        out.push_str("\n\n");

        if self.mode() == Mode::Idle {
            out.push_str(&self.form.view());
        } else {
            out.push_str(&self.gauges_view());
            match self.mode() {
                Mode::Paused => {
                    out.push_str("\n\n");
                    out.push_str(&self.styles.paused.render("Paused"));
                }
                Mode::Finished => {
                    out.push_str("\n\n");
                    out.push_str(&self.styles.finished.render("Time's up!"));
                }
                Mode::Idle | Mode::Running => {}
            }
        }

        out.push_str("\n\n");
        out.push_str(&self.help.view(self));
        out
    }

    fn gauges_view(&self) -> String {
        let columns: Vec<String> = self
            .presentation
            .visible_units()
            .map(|u| self.gauge_for(u.unit).view(u))
            .collect();

        let mut parts = Vec::with_capacity(columns.len() * 2);
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push("  ");
            }
            parts.push(col.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn gauge_for(&self, unit: Unit) -> &gauge::Model {
        let idx = Unit::ALL.iter().position(|u| *u == unit).unwrap_or(0);
        &self.gauges[idx]
    }
}

impl<C: Clock> key::KeyMap for Model<C> {
    fn short_help(&self) -> Vec<&Binding> {
        let k = &self.keymap;
        if self.mode() == Mode::Idle {
            vec![
                &k.start,
                &self.form.keymap.next_field,
                &self.form.keymap.prev_field,
                &k.force_quit,
            ]
        } else {
            vec![&k.pause, &k.reset, &k.cancel, &k.quit, &k.show_help]
        }
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let k = &self.keymap;
        let mut columns = vec![vec![&k.start, &k.pause, &k.reset, &k.cancel]];
        // Field navigation only applies while the form is up
        if self.mode() == Mode::Idle {
            columns.push(vec![&self.form.keymap.next_field, &self.form.keymap.prev_field]);
        }
        columns.push(vec![&k.show_help, &k.quit, &k.force_quit]);
        columns
    }
}

impl BubbleTeaModel for Model<SystemClock> {
    /// Builds the widget from the installed configuration.
    fn init() -> (Self, Option<Cmd>) {
        let config = config::current();
        let mut model = Self::new(
            config.duration_spec(),
            config.interval(),
            config.width as usize,
        );
        let cmd = if config.start { model.start() } else { None };
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::time::DAY_MS;

    fn widget() -> (Model<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let model = Model::with_clock(
            DurationSpec::from_seconds(10),
            Duration::from_millis(200),
            10,
            clock.clone(),
        );
        (model, clock)
    }

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn live_tick<C: Clock>(model: &Model<C>) -> Msg {
        Box::new(model.ticker.live_msg()) as Msg
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_new_widget_shows_form() {
        let (model, _clock) = widget();
        assert_eq!(model.mode(), Mode::Idle);
        assert!(!model.ticking());

        let out = plain(&model.view());
        assert!(out.contains("Countdown Timer"));
        assert!(out.contains("Seconds"));
        assert!(out.contains("enter start"));
        assert!(!out.contains("pause"));
    }

    #[test]
    fn test_enter_starts_countdown() {
        let (mut model, _clock) = widget();
        let cmd = model.update(press(KeyCode::Enter));

        assert!(cmd.is_some());
        assert_eq!(model.mode(), Mode::Running);
        assert!(model.ticking());
        assert_eq!(model.state().initial_ms, 10_000);
        assert_eq!(model.presentation().unit(Unit::Seconds).value, 10);
    }

    #[test]
    fn test_zero_duration_rejected_with_message() {
        let (mut model, _clock) = widget();
        model.form.fill(DurationSpec::default());

        let cmd = model.start();
        assert!(cmd.is_none());
        assert_eq!(model.mode(), Mode::Idle);
        assert!(!model.ticking());

        let out = plain(&model.view());
        assert!(out.contains("Please enter a duration greater than zero."));
    }

    #[test]
    fn test_tick_counts_down_and_reschedules() {
        let (mut model, clock) = widget();
        model.start();

        clock.advance(Duration::from_millis(3_500));
        let cmd = model.update(live_tick(&model));

        assert!(cmd.is_some());
        assert_eq!(model.state().remaining_ms, 6_500);
        assert_eq!(model.presentation().unit(Unit::Seconds).value, 6);
    }

    #[test]
    fn test_pause_stops_driver_and_rejects_in_flight_tick() {
        let (mut model, clock) = widget();
        model.start();
        let in_flight = live_tick(&model);

        model.update(press(KeyCode::Char(' ')));
        assert_eq!(model.mode(), Mode::Paused);
        assert!(!model.ticking());
        assert_eq!(model.keymap.pause.help().desc, "resume");

        clock.advance(Duration::from_secs(5));
        assert!(model.update(in_flight).is_none());
        assert_eq!(model.state().remaining_ms, 10_000);

        let out = plain(&model.view());
        assert!(out.contains("Paused"));
        assert!(out.contains("space resume"));

        // Resume restarts the driver
        let cmd = model.update(press(KeyCode::Char('p')));
        assert!(cmd.is_some());
        assert_eq!(model.mode(), Mode::Running);
        assert!(model.ticking());
        assert_eq!(model.keymap.pause.help().desc, "pause");
    }

    #[test]
    fn test_finish_emits_finished_and_stops() {
        let (mut model, clock) = widget();
        model.start();

        clock.advance(Duration::from_secs(11));
        let cmd = model.update(live_tick(&model));

        assert!(cmd.is_some());
        assert_eq!(model.mode(), Mode::Finished);
        assert!(!model.ticking());
        assert!(!model.keymap.pause.enabled());
        assert!(model.keymap.reset.enabled());

        let out = plain(&model.view());
        assert!(out.contains("Time's up!"));
    }

    #[tokio::test]
    async fn test_finished_msg_carries_widget_id() {
        let (mut model, clock) = widget();
        model.start();
        clock.advance(Duration::from_secs(10));

        let cmd = model.update(live_tick(&model)).expect("finish command");
        let msg = cmd.await.expect("a message");
        let finished = msg.downcast_ref::<FinishedMsg>().expect("a FinishedMsg");
        assert_eq!(finished.id, model.id());
    }

    #[test]
    fn test_escape_resets_after_finish() {
        let (mut model, clock) = widget();
        model.start();
        clock.advance(Duration::from_secs(10));
        model.update(live_tick(&model));
        assert_eq!(model.mode(), Mode::Finished);

        let cmd = model.update(press(KeyCode::Esc));
        assert!(cmd.is_some());
        assert_eq!(model.mode(), Mode::Running);
        assert_eq!(model.state().remaining_ms, 10_000);
        assert!(model.ticking());
    }

    #[test]
    fn test_escape_while_running_keeps_single_chain() {
        let (mut model, clock) = widget();
        model.start();
        clock.advance(Duration::from_secs(4));
        model.update(live_tick(&model));

        // Reset while running reuses the live chain
        assert!(model.update(press(KeyCode::Esc)).is_none());
        assert_eq!(model.state().remaining_ms, 10_000);
        assert!(model.ticking());
    }

    #[test]
    fn test_cancel_returns_to_form_with_values() {
        let (mut model, _clock) = widget();
        model.form.set_value(2, "5");
        model.start();
        assert_eq!(model.state().initial_ms, 310_000);

        model.update(press(KeyCode::Char('c')));
        assert_eq!(model.mode(), Mode::Idle);
        assert!(!model.ticking());
        assert_eq!(model.state().initial_ms, 0);
        assert_eq!(model.form.fields[2].value(), "5");

        // Escape on the form is inert
        model.update(press(KeyCode::Esc));
        assert_eq!(model.mode(), Mode::Idle);
    }

    #[test]
    fn test_typing_in_form_does_not_trigger_controls() {
        let (mut model, _clock) = widget();
        model.form.set_value(0, "");
        for c in ['q', 'c', 'p', ' ', '?', 'r'] {
            assert!(model.update(press(KeyCode::Char(c))).is_none());
        }
        assert_eq!(model.mode(), Mode::Idle);
        assert_eq!(model.form.fields[0].value(), "");
        assert!(!model.ticking());
    }

    #[test]
    fn test_typo_does_not_shorten_countdown() {
        let (mut model, _clock) = widget();
        model.form.set_value(0, "");
        model.update(press(KeyCode::Char('1')));
        model.update(press(KeyCode::Char('o')));
        model.update(press(KeyCode::Enter));

        assert_eq!(model.mode(), Mode::Running);
        assert_eq!(model.state().initial_ms, DAY_MS + 10_000);
    }

    #[test]
    fn test_full_help_lists_field_keys_only_on_form() {
        let (mut model, _clock) = widget();
        let idle = key::KeyMap::full_help(&model);
        assert!(idle
            .iter()
            .flatten()
            .any(|b| b.help().desc == "next field"));

        model.start();
        model.update(press(KeyCode::Char('?')));
        assert!(model.help.show_all);

        let out = plain(&model.view());
        assert!(out.contains("space pause"));
        assert!(out.contains("c cancel"));
        assert!(!out.contains("next field"));
        assert!(!out.contains("prev field"));
    }

    #[test]
    fn test_days_gauge_only_for_multi_day_countdowns() {
        let (mut model, _clock) = widget();
        model.start();
        assert!(!plain(&model.view()).contains("Days"));

        model.cancel();
        model.form.fill(DurationSpec::new(2, 0, 0, 0));
        model.start();
        let out = plain(&model.view());
        assert!(out.contains("Days"));
        assert_eq!(model.presentation().unit(Unit::Days).max_for_scale, 2);
    }

    #[test]
    fn test_help_toggle() {
        let (mut model, _clock) = widget();
        model.start();
        model.update(press(KeyCode::Char('?')));
        assert!(model.help.show_all);
    }

    #[test]
    fn test_window_size_sets_help_width() {
        let (mut model, _clock) = widget();
        model.update(Box::new(bubbletea_rs::WindowSizeMsg {
            width: 42,
            height: 10,
        }) as Msg);
        assert_eq!(model.help.width, 42);
    }
}
