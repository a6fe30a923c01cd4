//! Embassy glue for the overlay deadline.
//!
//! [`SignalTimer`] is the [`DeadlineTimer`] the controller owns on target.
//! It does no timing itself; it posts [`TimerCommand`]s over a
//! [`Signal`] to [`overlay_timer_task`], which waits out the deadline and
//! delivers the expiry back through
//! [`MenuController::on_deadline()`](super::MenuController::on_deadline).
//!
//! A `Signal` keeps only the latest command. That is enough here: the
//! only back-to-back pair the controller sends is cancel-then-arm, and
//! the arm supersedes the cancel.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_deadline, Duration, Instant};

use super::controller::MenuController;
use super::interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine};

/// Identifies one started overlay timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(u32);

/// Request from [`SignalTimer`] to [`overlay_timer_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// Start `handle`, replacing whatever was armed.
    Arm { handle: TimerHandle, delay_ms: u32 },
    /// Stop `handle` if it is still the armed one.
    Cancel { handle: TimerHandle },
}

/// Command channel between the controller and the timer task.
pub type TimerSignal = Signal<CriticalSectionRawMutex, TimerCommand>;

/// [`DeadlineTimer`] backed by [`overlay_timer_task`].
pub struct SignalTimer {
    commands: &'static TimerSignal,
    last: u32,
}

impl SignalTimer {
    /// Post commands to `commands`; the same signal must be handed to
    /// [`overlay_timer_task`].
    pub const fn new(commands: &'static TimerSignal) -> Self {
        Self { commands, last: 0 }
    }
}

impl DeadlineTimer for SignalTimer {
    type Handle = TimerHandle;

    fn start_one_shot(&mut self, delay_ms: u32) -> TimerHandle {
        self.last = self.last.wrapping_add(1);
        let handle = TimerHandle(self.last);
        self.commands.signal(TimerCommand::Arm { handle, delay_ms });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.commands.signal(TimerCommand::Cancel { handle });
    }
}

/// Armed timer: handle and absolute deadline.
type Armed = Option<(TimerHandle, Instant)>;

fn next_state(armed: Armed, command: TimerCommand, now: Instant) -> Armed {
    match command {
        TimerCommand::Arm { handle, delay_ms } => {
            Some((handle, now + Duration::from_millis(u64::from(delay_ms))))
        }
        TimerCommand::Cancel { handle } => match armed {
            Some((armed_handle, _)) if armed_handle == handle => None,
            // Cancelling anything else leaves the armed deadline alone.
            other => other,
        },
    }
}

/// Overlay deadline loop.
///
/// Like the display task this is a plain `async fn`; wrap it in a
/// concrete `#[embassy_executor::task]` since tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn overlay_task(
///     commands: &'static TimerSignal,
///     menu: &'static Mutex<CriticalSectionRawMutex, Menu>,
/// ) {
///     overlay_timer_task(commands, menu).await
/// }
/// ```
///
/// While idle it waits for a command. While armed it waits for the next
/// command or the deadline, whichever comes first. On expiry it locks the
/// controller and calls `on_deadline`; if the overlay was re-armed in the
/// meantime the controller ignores the stale handle and the new `Arm` is
/// picked up on the next pass.
pub async fn overlay_timer_task<S, B, D>(
    commands: &'static TimerSignal,
    menu: &'static Mutex<CriticalSectionRawMutex, MenuController<S, B, D, SignalTimer>>,
) -> !
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
{
    let mut armed: Armed = None;
    loop {
        armed = match armed {
            None => {
                let command = commands.wait().await;
                next_state(None, command, Instant::now())
            }
            Some((handle, deadline)) => match with_deadline(deadline, commands.wait()).await {
                Ok(command) => next_state(armed, command, Instant::now()),
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("overlay deadline {} expired", handle);
                    menu.lock().await.on_deadline(handle);
                    None
                }
            },
        };
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;

    use std::boxed::Box;

    use embassy_futures::block_on;
    use embassy_futures::select::select;
    use embassy_time::Timer;

    use super::*;
    use crate::menu::testing::{FakeCatalog, FakeSynth, RecordingDisplay};
    use crate::menu::{MenuConfig, MenuEvent};

    type SharedMenu = Mutex<
        CriticalSectionRawMutex,
        MenuController<FakeSynth, FakeCatalog, RecordingDisplay, SignalTimer>,
    >;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    /// Controller on the default pages with a short overlay timeout.
    fn shared_menu(commands: &'static TimerSignal, overlay_timeout_ms: u32) -> &'static SharedMenu {
        let config = MenuConfig {
            overlay_timeout_ms,
            ..MenuConfig::default()
        };
        let menu = MenuController::with_config(
            config,
            FakeSynth::new(),
            FakeCatalog::new(4),
            RecordingDisplay::default(),
            SignalTimer::new(commands),
        )
        .unwrap();
        Box::leak(Box::new(Mutex::new(menu)))
    }

    // ── Timer state ──────────────────────────────────────────────────

    #[test]
    fn arm_sets_deadline_from_now() {
        let armed = next_state(
            None,
            TimerCommand::Arm {
                handle: TimerHandle(1),
                delay_ms: 1500,
            },
            at(100),
        );
        assert_eq!(armed, Some((TimerHandle(1), at(1600))));
    }

    #[test]
    fn rearm_replaces_deadline() {
        let armed = Some((TimerHandle(1), at(1500)));
        let armed = next_state(
            armed,
            TimerCommand::Arm {
                handle: TimerHandle(2),
                delay_ms: 1500,
            },
            at(1000),
        );
        assert_eq!(armed, Some((TimerHandle(2), at(2500))));
    }

    #[test]
    fn cancel_armed_handle_goes_idle() {
        let armed = Some((TimerHandle(3), at(1500)));
        let armed = next_state(armed, TimerCommand::Cancel { handle: TimerHandle(3) }, at(200));
        assert_eq!(armed, None);
    }

    #[test]
    fn cancel_other_handle_keeps_deadline() {
        let armed = Some((TimerHandle(3), at(1500)));
        let next = next_state(armed, TimerCommand::Cancel { handle: TimerHandle(2) }, at(200));
        assert_eq!(next, armed);
    }

    #[test]
    fn signal_timer_hands_out_fresh_handles() {
        static COMMANDS: TimerSignal = Signal::new();
        let mut timer = SignalTimer::new(&COMMANDS);

        let first = timer.start_one_shot(1500);
        let second = timer.start_one_shot(1500);
        assert_ne!(first, second);

        // Only the latest command is kept.
        assert_eq!(
            COMMANDS.try_take(),
            Some(TimerCommand::Arm {
                handle: second,
                delay_ms: 1500
            })
        );

        timer.cancel(second);
        assert_eq!(COMMANDS.try_take(), Some(TimerCommand::Cancel { handle: second }));
    }

    // ── Overlay task ─────────────────────────────────────────────────

    #[test]
    fn expired_overlay_reverts_to_page() {
        static COMMANDS: TimerSignal = Signal::new();
        let menu = shared_menu(&COMMANDS, 50);

        block_on(select(overlay_timer_task(&COMMANDS, menu), async move {
            menu.lock().await.handle_event(MenuEvent::VolumeUp);

            Timer::after_millis(10).await;
            {
                let menu = menu.lock().await;
                assert!(menu.overlay_active());
                assert_eq!(menu.display().last()[0], "Master Volume");
            }

            Timer::after_millis(100).await;
            let menu = menu.lock().await;
            assert!(!menu.overlay_active());
            assert_eq!(menu.display().last()[0], "001 ROM1A      ");
        }));
    }

    #[test]
    fn rearm_while_expiry_waits_for_lock_keeps_overlay() {
        static COMMANDS: TimerSignal = Signal::new();
        let menu = shared_menu(&COMMANDS, 50);

        block_on(select(overlay_timer_task(&COMMANDS, menu), async move {
            {
                let mut guard = menu.lock().await;
                guard.handle_event(MenuEvent::VolumeUp);
                // The first deadline passes while the lock is held, so the
                // task delivers it only after the second step re-armed.
                Timer::after_millis(100).await;
                guard.handle_event(MenuEvent::VolumeUp);
            }

            Timer::after_millis(20).await;
            {
                let guard = menu.lock().await;
                assert!(guard.overlay_active());
                assert_eq!(guard.display().last()[0], "Master Volume");
            }

            Timer::after_millis(100).await;
            let guard = menu.lock().await;
            assert!(!guard.overlay_active());
            assert_eq!(guard.display().last()[0], "001 ROM1A      ");
            assert!((guard.synth().volume - 0.6).abs() < 1e-6);
        }));
    }
}
