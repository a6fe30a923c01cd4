//! Item actions.
//!
//! Every handler reads what it needs from the engine, computes the new
//! value from the event direction and writes it back. Handlers bound to
//! a slot they do not understand leave everything unchanged.

use heapless::Vec;

use super::controller::MenuController;
use super::event::MenuEvent;
use super::format::volume_percent;
use super::interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine, ToneGeneratorParameter};
use super::item::{Action, Outcome};
use super::screens;
use super::MAX_TONE_GENERATORS;

use ToneGeneratorParameter::{Enable, Grouping, Program, VoiceBank};

impl<S, B, D, T> MenuController<S, B, D, T>
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    /// Run `action` for `event`.
    pub(super) fn apply(&mut self, action: Action, event: MenuEvent) -> Outcome {
        match action {
            Action::NextField => self.next_field(),
            Action::ChangeToneGenerator => {
                self.current_tg = self.step_tone_generator(self.current_tg, event);
                Outcome::Render
            }
            Action::ChangeBank => self.change_bank(event),
            Action::ChangeVoice => self.change_voice(event),
            Action::ChangeMasterVolume => self.change_master_volume(event),
            Action::LoadPerformance => self.load_performance(),
            Action::SelectPerformance => self.select_performance(event),
            Action::ToggleMute => self.toggle_mute(),
            Action::SelectToneGenerator => {
                self.selected_tg = self.step_tone_generator(self.selected_tg, event);
                Outcome::Render
            }
            Action::EditGroup => self.edit_group(event),
        }
    }

    fn next_field(&mut self) -> Outcome {
        self.current_selection += 1;
        if self.current_selection >= self.page().items.len() {
            self.current_selection = 0;
        }
        Outcome::Render
    }

    /// Move a tone-generator cursor one step, clamped to the configured count.
    fn step_tone_generator(&self, tg: usize, event: MenuEvent) -> usize {
        let last = self.config.tone_generators - 1;
        match event.direction() {
            -1 => tg.saturating_sub(1),
            1 => (tg + 1).min(last),
            _ => tg,
        }
    }

    /// Tone generators an edit of `tg` applies to: every member of its
    /// group, or `tg` alone when it is ungrouped (group 0).
    fn group_targets(&self, tg: usize) -> Vec<usize, MAX_TONE_GENERATORS> {
        let group = self.synth.tg_parameter(Grouping, tg);
        let mut targets = Vec::new();
        for n in 0..self.config.tone_generators {
            let member = if group == 0 {
                n == tg
            } else {
                self.synth.tg_parameter(Grouping, n) == group
            };
            // tone_generators <= MAX_TONE_GENERATORS, so this never fails.
            if member && targets.push(n).is_err() {
                break;
            }
        }
        targets
    }

    fn change_bank(&mut self, event: MenuEvent) -> Outcome {
        let tg = self.current_tg;
        let bank = self.synth.tg_parameter(VoiceBank, tg);
        let bank = match event.direction() {
            -1 => self.catalog.previous_bank(bank),
            1 => self.catalog.next_bank(bank),
            _ => return Outcome::Render,
        };

        for target in self.group_targets(tg) {
            self.synth.set_tg_parameter(VoiceBank, bank, target);
        }
        Outcome::Render
    }

    fn change_voice(&mut self, event: MenuEvent) -> Outcome {
        let tg = self.current_tg;
        let mut bank = self.synth.tg_parameter(VoiceBank, tg);
        let mut voice = self.synth.tg_parameter(Program, tg);
        let last_voice = self.catalog.voices_per_bank() - 1;
        let mut bank_changed = false;

        match event.direction() {
            -1 => {
                voice -= 1;
                if voice < 0 {
                    voice = last_voice;
                    bank = self.catalog.previous_bank(bank);
                    bank_changed = true;
                }
            }
            1 => {
                voice += 1;
                if voice > last_voice {
                    voice = 0;
                    bank = self.catalog.next_bank(bank);
                    bank_changed = true;
                }
            }
            _ => return Outcome::Render,
        }

        // Bank before program on every target.
        for target in self.group_targets(tg) {
            if bank_changed {
                self.synth.set_tg_parameter(VoiceBank, bank, target);
            }
            self.synth.set_tg_parameter(Program, voice, target);
        }
        Outcome::Render
    }

    fn change_master_volume(&mut self, event: MenuEvent) -> Outcome {
        let step = match event.direction() {
            -1 => -self.config.volume_step,
            1 => self.config.volume_step,
            _ => return Outcome::Render,
        };

        let percent = (volume_percent(self.synth.master_volume()) + step).clamp(0, 100);
        self.synth.set_master_volume(percent as f32 / 100.0);

        #[cfg(feature = "defmt")]
        defmt::debug!("master volume {}%", percent);

        let frame = screens::master_volume(self);
        self.show(&frame);
        self.overlay.rearm(self.config.overlay_timeout_ms);
        Outcome::Suppress
    }

    fn load_performance(&mut self) -> Outcome {
        // In auto-load mode the selection already loaded it.
        if self.synth.select_to_load() {
            self.synth.set_active_performance(self.selected_performance);
        }
        Outcome::Render
    }

    fn select_performance(&mut self, event: MenuEvent) -> Outcome {
        let last = self.synth.last_performance().saturating_sub(1);
        let slot = match event.direction() {
            -1 => self.selected_performance.saturating_sub(1).min(last),
            1 => (self.selected_performance + 1).min(last),
            _ => return Outcome::Render,
        };

        self.selected_performance = slot;
        if !self.synth.select_to_load() {
            self.synth.set_active_performance(slot);
        }
        Outcome::Render
    }

    fn toggle_mute(&mut self) -> Outcome {
        let tg = self.selected_tg;
        let enabled = self.synth.tg_parameter(Enable, tg) != 0;
        self.synth.set_tg_parameter(Enable, i32::from(!enabled), tg);
        Outcome::Render
    }

    fn edit_group(&mut self, event: MenuEvent) -> Outcome {
        let tg = self.selected_tg;
        let direction = event.direction();
        if direction == 0 {
            return Outcome::Render;
        }
        let group = self.synth.tg_parameter(Grouping, tg);
        let group = (group + direction).clamp(0, self.config.group_count as i32);
        self.synth.set_tg_parameter(Grouping, group, tg);
        Outcome::Render
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::menu::testing::{controller, TestController};
    use crate::menu::MenuEvent::*;
    use crate::menu::{MenuEvent, MAX_GROUPS};

    fn send(menu: &mut TestController, event: MenuEvent, times: usize) {
        for _ in 0..times {
            menu.handle_event(event);
        }
    }

    /// Controller on the bank/voice page with the bank field selected.
    fn on_bank_field() -> TestController {
        let mut menu = controller();
        menu.handle_event(Select);
        menu
    }

    /// Controller on the bank/voice page with the voice field selected.
    fn on_voice_field() -> TestController {
        let mut menu = controller();
        send(&mut menu, Select, 2);
        menu
    }

    fn on_performance_page() -> TestController {
        let mut menu = controller();
        menu.handle_event(NextScreen);
        menu
    }

    fn on_group_page() -> TestController {
        let mut menu = controller();
        send(&mut menu, NextScreen, 2);
        menu
    }

    fn volume_percent(menu: &TestController) -> i32 {
        crate::menu::format::volume_percent(menu.synth().volume)
    }

    // ── Tone-generator cursors ───────────────────────────────────────

    #[test]
    fn tone_generator_cursor_steps() {
        let mut menu = controller();
        send(&mut menu, StepUp, 3);
        assert_eq!(menu.current_tone_generator(), 3);
        menu.handle_event(StepDown);
        assert_eq!(menu.current_tone_generator(), 2);
    }

    #[test]
    fn tone_generator_cursor_clamps_at_zero() {
        let mut menu = controller();
        send(&mut menu, StepDown, 20);
        assert_eq!(menu.current_tone_generator(), 0);
    }

    #[test]
    fn tone_generator_cursor_clamps_at_max() {
        let mut menu = controller();
        let count = menu.config().tone_generators;
        send(&mut menu, StepUp, count * 3);
        assert_eq!(menu.current_tone_generator(), count - 1);
    }

    #[test]
    fn selected_tone_generator_clamps_both_ends() {
        let mut menu = on_group_page();
        let count = menu.config().tone_generators;
        send(&mut menu, StepDown, 5);
        assert_eq!(menu.selected_tone_generator(), 0);
        send(&mut menu, StepUp, count + 5);
        assert_eq!(menu.selected_tone_generator(), count - 1);
    }

    #[test]
    fn cursors_are_independent() {
        let mut menu = controller();
        send(&mut menu, StepUp, 2);
        send(&mut menu, NextScreen, 2);
        menu.handle_event(StepUp);

        assert_eq!(menu.current_tone_generator(), 2);
        assert_eq!(menu.selected_tone_generator(), 1);
    }

    // ── Bank select ──────────────────────────────────────────────────

    #[test]
    fn bank_steps_through_catalog() {
        let mut menu = on_bank_field();
        menu.handle_event(StepUp);
        assert_eq!(menu.synth().banks[0], 1);
        menu.handle_event(StepDown);
        menu.handle_event(StepDown);
        // FakeCatalog wraps: 0 -> 3.
        assert_eq!(menu.synth().banks[0], 3);
    }

    #[test]
    fn bank_change_fans_out_to_group() {
        let mut menu = on_bank_field();
        {
            let synth = menu.synth_mut();
            synth.groups[0] = 2;
            synth.groups[1] = 2;
            synth.groups[2] = 2;
            synth.groups[3] = 0;
        }
        menu.handle_event(StepUp);

        let banks = menu.synth().banks;
        assert_eq!(&banks[..4], &[1, 1, 1, 0]);
    }

    #[test]
    fn bank_change_ungrouped_affects_only_current() {
        let mut menu = controller();
        menu.handle_event(StepUp); // edit tone generator 1
        menu.handle_event(Select); // bank field
        menu.synth_mut().groups[0] = 0;
        menu.synth_mut().groups[1] = 0;
        menu.handle_event(StepUp);

        assert_eq!(menu.synth().banks[0], 0);
        assert_eq!(menu.synth().banks[1], 1);
    }

    #[test]
    fn bank_change_leaves_other_groups_alone() {
        let mut menu = on_bank_field();
        menu.synth_mut().groups[0] = 1;
        menu.synth_mut().groups[1] = 1;
        menu.synth_mut().groups[2] = 3;
        menu.handle_event(StepUp);

        assert_eq!(menu.synth().banks[1], 1);
        assert_eq!(menu.synth().banks[2], 0);
    }

    // ── Voice select ─────────────────────────────────────────────────

    #[test]
    fn voice_steps_within_bank() {
        let mut menu = on_voice_field();
        send(&mut menu, StepUp, 5);
        assert_eq!(menu.synth().programs[0], 5);
        assert_eq!(menu.synth().banks[0], 0);
    }

    #[test]
    fn voice_roll_under_goes_to_previous_bank() {
        let mut menu = on_voice_field();
        menu.synth_mut().banks[0] = 2;
        menu.synth_mut().programs[0] = 0;
        menu.handle_event(StepDown);

        assert_eq!(menu.synth().programs[0], 31);
        assert_eq!(menu.synth().banks[0], 1);
    }

    #[test]
    fn voice_roll_over_goes_to_next_bank() {
        let mut menu = on_voice_field();
        menu.synth_mut().banks[0] = 2;
        menu.synth_mut().programs[0] = 31;
        menu.handle_event(StepUp);

        assert_eq!(menu.synth().programs[0], 0);
        assert_eq!(menu.synth().banks[0], 3);
    }

    #[test]
    fn voice_roll_over_wraps_catalog() {
        let mut menu = on_voice_field();
        menu.synth_mut().banks[0] = 3;
        menu.synth_mut().programs[0] = 31;
        menu.handle_event(StepUp);

        assert_eq!(menu.synth().banks[0], 0);
        assert_eq!(menu.synth().programs[0], 0);
    }

    #[test]
    fn voice_change_fans_out_to_group() {
        let mut menu = on_voice_field();
        {
            let synth = menu.synth_mut();
            synth.groups[0] = 4;
            synth.groups[5] = 4;
            synth.programs[0] = 31;
            synth.programs[5] = 12;
        }
        menu.handle_event(StepUp);

        // Every member follows the edited generator, bank included.
        assert_eq!(menu.synth().programs[0], 0);
        assert_eq!(menu.synth().programs[5], 0);
        assert_eq!(menu.synth().banks[0], 1);
        assert_eq!(menu.synth().banks[5], 1);
        assert_eq!(menu.synth().programs[1], 0);
        assert_eq!(menu.synth().banks[1], 0);
    }

    #[test]
    fn voice_change_without_roll_keeps_group_banks() {
        let mut menu = on_voice_field();
        {
            let synth = menu.synth_mut();
            synth.groups[0] = 1;
            synth.groups[1] = 1;
            synth.banks[1] = 3;
        }
        menu.handle_event(StepUp);

        assert_eq!(menu.synth().programs[1], 1);
        assert_eq!(menu.synth().banks[1], 3);
    }

    // ── Master volume ────────────────────────────────────────────────

    #[test]
    fn volume_steps_by_five() {
        let mut menu = controller();
        assert_eq!(volume_percent(&menu), 50);
        menu.handle_event(PressAndStepUp);
        assert_eq!(volume_percent(&menu), 55);
        menu.handle_event(PressAndStepDown);
        menu.handle_event(PressAndStepDown);
        assert_eq!(volume_percent(&menu), 45);
    }

    #[test]
    fn volume_clamps_at_bounds() {
        let mut menu = controller();
        send(&mut menu, PressAndStepUp, 30);
        assert_eq!(volume_percent(&menu), 100);
        send(&mut menu, PressAndStepDown, 30);
        assert_eq!(volume_percent(&menu), 0);
    }

    #[test]
    fn volume_stays_in_range_and_steps_exactly() {
        let mut menu = controller();
        let pattern = [PressAndStepUp, PressAndStepUp, PressAndStepDown, VolumeUp, VolumeDown, VolumeDown];
        for round in 0..40 {
            for (i, &event) in pattern.iter().enumerate() {
                // Bias the walk so both bounds are reached.
                let event = if round < 20 && i == 2 { PressAndStepUp } else { event };
                let event = if round >= 20 && i < 2 { PressAndStepDown } else { event };

                let before = volume_percent(&menu);
                menu.handle_event(event);
                let after = volume_percent(&menu);

                assert!((0..=100).contains(&after));
                let expected = (before + 5 * event.direction()).clamp(0, 100);
                assert_eq!(after, expected);
            }
        }
    }

    #[test]
    fn volume_step_arms_overlay_timer() {
        let mut menu = controller();
        menu.handle_event(PressAndStepUp);
        let handle = menu.overlay().pending().unwrap();
        assert_eq!(menu.overlay().timer().deadline_of(handle), Some(1500));
    }

    #[test]
    fn repeated_volume_steps_keep_one_timer() {
        let mut menu = controller();
        send(&mut menu, PressAndStepUp, 4);
        assert_eq!(menu.overlay().timer().started, 4);
        assert_eq!(menu.overlay().timer().cancelled.len(), 3);
        assert_eq!(menu.overlay().timer().outstanding(), 1);
    }

    // ── Mute / group ─────────────────────────────────────────────────

    #[test]
    fn mute_toggles_selected_tone_generator() {
        let mut menu = on_group_page();
        send(&mut menu, StepUp, 2);
        menu.handle_event(Select);
        assert_eq!(menu.synth().enabled[2], 0);
        assert_eq!(menu.synth().enabled[0], 1);

        menu.handle_event(Select);
        assert_eq!(menu.synth().enabled[2], 1);
    }

    #[test]
    fn mute_ignores_edit_cursor() {
        let mut menu = controller();
        send(&mut menu, StepUp, 4); // bank/voice cursor on 4
        send(&mut menu, NextScreen, 2);
        menu.handle_event(Select);
        assert_eq!(menu.synth().enabled[0], 0);
        assert_eq!(menu.synth().enabled[4], 1);
    }

    #[test]
    fn edit_group_steps_selected_tone_generator() {
        let mut menu = on_group_page();
        menu.handle_event(StepUp);
        send(&mut menu, PressAndStepUp, 2);
        assert_eq!(menu.synth().groups[1], 2);
        menu.handle_event(PressAndStepDown);
        assert_eq!(menu.synth().groups[1], 1);
        assert_eq!(menu.synth().groups[0], 0);
    }

    #[test]
    fn edit_group_stays_in_range() {
        let mut menu = on_group_page();
        send(&mut menu, PressAndStepDown, 3);
        assert_eq!(menu.synth().groups[0], 0);
        send(&mut menu, PressAndStepUp, 10);
        assert_eq!(menu.synth().groups[0], MAX_GROUPS as i32);

        for i in 0..50 {
            let event = if i % 3 == 0 { PressAndStepDown } else { PressAndStepUp };
            menu.handle_event(event);
            let group = menu.synth().groups[0];
            assert!((0..=MAX_GROUPS as i32).contains(&group));
        }
    }

    #[test]
    fn edit_group_pulls_out_of_range_value_back() {
        let mut menu = on_group_page();
        menu.synth_mut().groups[0] = 9;
        menu.handle_event(PressAndStepDown);
        assert_eq!(menu.synth().groups[0], MAX_GROUPS as i32);
    }

    // ── Performances ─────────────────────────────────────────────────

    #[test]
    fn auto_load_commits_every_step() {
        let mut menu = on_performance_page();
        menu.handle_event(StepUp);
        assert_eq!(menu.selected_performance(), 1);
        assert_eq!(menu.synth().active_performance, 1);

        menu.handle_event(StepUp);
        assert_eq!(menu.synth().active_performance, 2);
        assert_eq!(menu.synth().loads.as_slice(), &[1, 2]);
    }

    #[test]
    fn select_then_confirm_waits_for_press() {
        let mut menu = on_performance_page();
        menu.synth_mut().select_to_load = true;
        send(&mut menu, StepUp, 2);
        assert_eq!(menu.selected_performance(), 2);
        assert_eq!(menu.synth().active_performance, 0);
        assert!(menu.synth().loads.is_empty());

        menu.handle_event(Select);
        assert_eq!(menu.synth().active_performance, 2);
        assert_eq!(menu.synth().loads.as_slice(), &[2]);
    }

    #[test]
    fn load_in_auto_mode_is_noop() {
        let mut menu = on_performance_page();
        menu.handle_event(Select);
        assert!(menu.synth().loads.is_empty());
    }

    #[test]
    fn performance_selection_clamps() {
        let mut menu = on_performance_page();
        menu.synth_mut().select_to_load = true;
        send(&mut menu, StepDown, 3);
        assert_eq!(menu.selected_performance(), 0);
        // last_performance is 3, so slot 2 is the highest.
        send(&mut menu, StepUp, 10);
        assert_eq!(menu.selected_performance(), 2);
    }

    #[test]
    fn performance_selection_with_no_slots_stays_at_zero() {
        let mut menu = on_performance_page();
        menu.synth_mut().last_performance = 0;
        menu.synth_mut().select_to_load = true;
        menu.handle_event(StepUp);
        assert_eq!(menu.selected_performance(), 0);
    }
}
