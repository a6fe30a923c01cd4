use super::config::MenuConfig;
use super::error::MenuError;
use super::event::MenuEvent;
use super::interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine};
use super::item::{Action, Item, Outcome};
use super::overlay::Overlay;
use super::page::{Page, PAGES};
use super::screens::{self, Frame};

/// The menu's event dispatcher and the only owner of mutable menu state.
///
/// Routes each [`MenuEvent`] to the [`Action`] bound in
/// `PAGES[current_page].items[current_selection]`, then re-renders the
/// current page through the [`DisplaySink`].
///
/// # Concurrency
///
/// Input events and overlay-deadline deliveries are two entry points
/// into the same state. The host must serialise them, e.g. by keeping the
/// controller behind one mutex that both the input task and the timer task
/// lock. Every call runs to completion without blocking.
///
/// # Examples
///
/// ```
/// use fm_panel::menu::{
///     BankCatalog, DeadlineTimer, DisplaySink, MenuController, MenuEvent, SynthEngine,
///     ToneGeneratorParameter,
/// };
///
/// # struct Engine { params: [[i32; 8]; 4], volume: f32 }
/// # impl SynthEngine for Engine {
/// #     fn tg_parameter(&self, p: ToneGeneratorParameter, tg: usize) -> i32 { self.params[p as usize][tg] }
/// #     fn set_tg_parameter(&mut self, p: ToneGeneratorParameter, v: i32, tg: usize) { self.params[p as usize][tg] = v; }
/// #     fn master_volume(&self) -> f32 { self.volume }
/// #     fn set_master_volume(&mut self, v: f32) { self.volume = v; }
/// #     fn active_performance(&self) -> usize { 0 }
/// #     fn set_active_performance(&mut self, _: usize) {}
/// #     fn performance_name(&self, _: usize) -> &str { "Init" }
/// #     fn last_performance(&self) -> usize { 1 }
/// #     fn select_to_load(&self) -> bool { false }
/// #     fn voice_name(&self, _: usize) -> &str { "E.PIANO 1" }
/// # }
/// # struct Banks;
/// # impl BankCatalog for Banks {
/// #     fn previous_bank(&self, bank: i32) -> i32 { (bank - 1).rem_euclid(8) }
/// #     fn next_bank(&self, bank: i32) -> i32 { (bank + 1).rem_euclid(8) }
/// #     fn bank_name(&self, _: i32) -> &str { "ROM1A" }
/// # }
/// # #[derive(Default)]
/// # struct Lcd { top: String }
/// # impl DisplaySink for Lcd {
/// #     fn write(&mut self, top_left: &str, _: &str, _: &str, _: &str) { self.top = top_left.into(); }
/// # }
/// # struct NoTimer;
/// # impl DeadlineTimer for NoTimer {
/// #     type Handle = ();
/// #     fn start_one_shot(&mut self, _: u32) -> Self::Handle {}
/// #     fn cancel(&mut self, _: ()) {}
/// # }
/// let mut engine = Engine { params: [[0; 8]; 4], volume: 0.5 };
/// let mut lcd = Lcd::default();
///
/// let mut menu = MenuController::new(&mut engine, &Banks, &mut lcd, NoTimer);
/// menu.handle_event(MenuEvent::StepUp);
/// assert_eq!(menu.current_tone_generator(), 1);
///
/// menu.handle_event(MenuEvent::VolumeUp);
/// assert!(menu.overlay_active());
/// drop(menu);
///
/// assert_eq!(lcd.top, "Master Volume");
/// assert!((engine.volume - 0.55).abs() < 1e-6);
/// ```
pub struct MenuController<S, B, D, T: DeadlineTimer> {
    pub(super) synth: S,
    pub(super) catalog: B,
    pub(super) display: D,
    pub(super) overlay: Overlay<T>,
    pub(super) config: MenuConfig,

    /// Index into [`PAGES`].
    pub(super) current_page: usize,
    /// Index into the current page's items.
    pub(super) current_selection: usize,
    /// Tone generator edited on the bank/voice page.
    pub(super) current_tg: usize,
    /// Tone generator under the cursor on the group/mute page.
    pub(super) selected_tg: usize,
    /// Performance slot shown on the performance page.
    pub(super) selected_performance: usize,
}

impl<S, B, D, T> MenuController<S, B, D, T>
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    /// Create a controller with [`MenuConfig::default()`], starting on the
    /// first page with the first item selected.
    ///
    /// Nothing is drawn until the first event or an explicit
    /// [`render()`](Self::render).
    pub fn new(synth: S, catalog: B, display: D, timer: T) -> Self {
        Self::build(MenuConfig::default(), synth, catalog, display, timer)
    }

    /// Create a controller with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`MenuError`] reported by [`MenuConfig::validate()`].
    pub fn with_config(
        config: MenuConfig,
        synth: S,
        catalog: B,
        display: D,
        timer: T,
    ) -> Result<Self, MenuError> {
        config.validate()?;
        Ok(Self::build(config, synth, catalog, display, timer))
    }

    fn build(config: MenuConfig, synth: S, catalog: B, display: D, timer: T) -> Self {
        let selected_performance = synth.active_performance();
        Self {
            synth,
            catalog,
            display,
            overlay: Overlay::new(timer),
            config,
            current_page: 0,
            current_selection: 0,
            current_tg: 0,
            selected_tg: 0,
            selected_performance,
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Handle one input event.
    ///
    /// 1. `NextScreen` advances the page (wrapping), resets the selection
    ///    and re-reads the active performance slot. No handler runs.
    /// 2. `Select` runs the current item's short-press action.
    /// 3. `StepDown`/`StepUp` run the encoder action.
    /// 4. `PressAndStepDown`/`PressAndStepUp` run the press-and-turn action.
    /// 5. `VolumeDown`/`VolumeUp` run [`Action::ChangeMasterVolume`]
    ///    regardless of the current item.
    /// 6. `Update` runs nothing.
    ///
    /// Afterwards the current page is re-rendered, unless the action
    /// returned [`Outcome::Suppress`]. An empty slot is a no-op followed by
    /// a re-render.
    pub fn handle_event(&mut self, event: MenuEvent) {
        let item = self.current_item();
        let outcome = match event {
            MenuEvent::NextScreen => {
                self.next_page();
                Outcome::Render
            }
            MenuEvent::Select => self.run(item.short_press, event),
            MenuEvent::StepDown | MenuEvent::StepUp => self.run(item.encoder, event),
            MenuEvent::PressAndStepDown | MenuEvent::PressAndStepUp => {
                self.run(item.press_and_turn, event)
            }
            MenuEvent::VolumeDown | MenuEvent::VolumeUp => {
                self.apply(Action::ChangeMasterVolume, event)
            }
            MenuEvent::Update => Outcome::Render,
        };

        if outcome == Outcome::Render {
            self.render();
        }
    }

    /// Deliver the expiry of the overlay timer identified by `handle`.
    ///
    /// If `handle` is the outstanding overlay timer the overlay goes idle
    /// and an [`MenuEvent::Update`] re-renders the current page, replacing
    /// the overlay. A stale handle (a timer that was cancelled but fired
    /// anyway) is ignored.
    pub fn on_deadline(&mut self, handle: T::Handle) {
        if self.overlay.expire(handle) {
            self.handle_event(MenuEvent::Update);
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("ignoring stale overlay deadline");
        }
    }

    /// Render the current page to the display.
    pub fn render(&mut self) {
        let frame = screens::render(self.page().screen, self);
        self.show(&frame);
    }

    fn run(&mut self, action: Option<Action>, event: MenuEvent) -> Outcome {
        match action {
            Some(action) => self.apply(action, event),
            None => Outcome::Render,
        }
    }

    fn next_page(&mut self) {
        self.current_page = (self.current_page + 1) % PAGES.len();
        self.current_selection = 0;
        // Open the performance page on whatever is loaded now, even if it
        // was changed from outside the menu.
        self.selected_performance = self.synth.active_performance();

        #[cfg(feature = "defmt")]
        defmt::debug!("menu page -> {}", self.current_page);
    }

    pub(super) fn show(&mut self, frame: &Frame) {
        self.display.write(
            &frame.top_left,
            &frame.top_right,
            &frame.bottom_left,
            &frame.bottom_right,
        );
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Index of the current page in [`PAGES`].
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The current page.
    pub fn page(&self) -> &'static Page {
        &PAGES[self.current_page]
    }

    /// Index of the selected item on the current page.
    pub fn current_selection(&self) -> usize {
        self.current_selection
    }

    /// The selected item on the current page.
    pub fn current_item(&self) -> Item {
        self.page().items[self.current_selection]
    }

    /// Tone generator edited on the bank/voice page.
    pub fn current_tone_generator(&self) -> usize {
        self.current_tg
    }

    /// Tone generator under the cursor on the group/mute page.
    pub fn selected_tone_generator(&self) -> usize {
        self.selected_tg
    }

    /// Performance slot shown on the performance page.
    pub fn selected_performance(&self) -> usize {
        self.selected_performance
    }

    /// Returns `true` while the volume overlay is showing.
    pub fn overlay_active(&self) -> bool {
        self.overlay.is_active()
    }

    /// The overlay and its timer facility.
    pub fn overlay(&self) -> &Overlay<T> {
        &self.overlay
    }

    /// Active configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Shared access to the sound engine.
    pub fn synth(&self) -> &S {
        &self.synth
    }

    /// Exclusive access to the sound engine, for changes made outside the menu.
    pub fn synth_mut(&mut self) -> &mut S {
        &mut self.synth
    }

    /// Shared access to the bank catalog.
    pub fn catalog(&self) -> &B {
        &self.catalog
    }

    /// Shared access to the display sink.
    pub fn display(&self) -> &D {
        &self.display
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
