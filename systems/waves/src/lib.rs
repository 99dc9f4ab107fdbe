#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scripted wave progression consumed by the Lawn Siege world.
//!
//! [`ScriptedWaves`] implements the engine's [`WaveProgression`] interface on
//! top of a fixed [`WaveScript`]: waves release their zombies in order at a
//! per-wave cadence, eliminations are counted as the world reports them, and
//! the schedule is complete once every scheduled zombie has been both
//! released and eliminated.

use std::collections::VecDeque;
use std::num::NonZeroU32;

use lawn_siege_core::{WaveInfo, WaveProgression, ZombieKind};

/// Ordered release plan for a single wave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WavePlan {
    spawns: Vec<ZombieKind>,
    cadence: NonZeroU32,
}

impl WavePlan {
    /// Creates a new wave releasing the provided zombies in order, one every
    /// `cadence` steps.
    #[must_use]
    pub fn new(spawns: Vec<ZombieKind>, cadence: NonZeroU32) -> Self {
        Self { spawns, cadence }
    }

    /// Zombies the wave releases, in release order.
    #[must_use]
    pub fn spawns(&self) -> &[ZombieKind] {
        &self.spawns
    }

    /// Steps between consecutive releases within the wave.
    #[must_use]
    pub const fn cadence(&self) -> NonZeroU32 {
        self.cadence
    }
}

/// Complete spawn script for one level attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveScript {
    waves: Vec<WavePlan>,
}

impl WaveScript {
    /// Creates a new script from the provided waves.
    #[must_use]
    pub fn new(waves: Vec<WavePlan>) -> Self {
        Self { waves }
    }

    /// Waves of the script, in play order.
    #[must_use]
    pub fn waves(&self) -> &[WavePlan] {
        &self.waves
    }
}

#[derive(Debug)]
struct WaveState {
    pending: VecDeque<ZombieKind>,
    cadence: NonZeroU32,
}

/// Data-driven implementation of [`WaveProgression`].
#[derive(Debug)]
pub struct ScriptedWaves {
    waves: Vec<WaveState>,
    current: usize,
    clock: u32,
    scheduled: u32,
    eliminated: u32,
}

impl ScriptedWaves {
    /// Creates a schedule that plays the provided script from its first wave.
    #[must_use]
    pub fn new(script: WaveScript) -> Self {
        let waves: Vec<WaveState> = script
            .waves
            .into_iter()
            .map(|plan| WaveState {
                pending: plan.spawns.into(),
                cadence: plan.cadence,
            })
            .collect();
        let scheduled = waves
            .iter()
            .map(|wave| wave.pending.len() as u32)
            .sum::<u32>();
        Self {
            waves,
            current: 0,
            clock: 0,
            scheduled,
            eliminated: 0,
        }
    }

    /// Total number of zombies the script will release.
    #[must_use]
    pub fn scheduled_total(&self) -> u32 {
        self.scheduled
    }

    /// Number of eliminations reported so far.
    #[must_use]
    pub fn eliminated(&self) -> u32 {
        self.eliminated
    }

    fn all_released(&self) -> bool {
        self.waves.iter().all(|wave| wave.pending.is_empty())
    }
}

impl WaveProgression for ScriptedWaves {
    fn next_zombie(&mut self) -> Option<ZombieKind> {
        while let Some(wave) = self.waves.get_mut(self.current) {
            if wave.pending.is_empty() {
                // The release clock restarts with every wave.
                self.current += 1;
                self.clock = 0;
                continue;
            }

            self.clock += 1;
            if self.clock < wave.cadence.get() {
                return None;
            }
            self.clock = 0;
            return wave.pending.pop_front();
        }
        None
    }

    fn record_elimination(&mut self) {
        self.eliminated = self.eliminated.saturating_add(1);
    }

    fn is_complete(&self) -> bool {
        self.all_released() && self.eliminated >= self.scheduled
    }

    fn wave_info(&self) -> WaveInfo {
        let total_waves = self.waves.len() as u32;
        let wave_number = if total_waves == 0 {
            0
        } else {
            (self.current as u32 + 1).min(total_waves)
        };
        WaveInfo {
            wave_number,
            total_waves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScriptedWaves, WavePlan, WaveScript};
    use lawn_siege_core::{WaveProgression, ZombieKind};
    use std::num::NonZeroU32;

    fn cadence(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("cadence must be non-zero")
    }

    #[test]
    fn empty_script_is_complete_and_silent() {
        let mut schedule = ScriptedWaves::new(WaveScript::default());

        assert_eq!(schedule.next_zombie(), None);
        assert!(schedule.is_complete());
        assert_eq!(schedule.scheduled_total(), 0);
        assert_eq!(schedule.wave_info().total_waves, 0);
    }

    #[test]
    fn releases_follow_the_wave_cadence() {
        let script = WaveScript::new(vec![WavePlan::new(
            vec![ZombieKind::Walker, ZombieKind::Sprinter],
            cadence(3),
        )]);
        let mut schedule = ScriptedWaves::new(script);

        let released: Vec<Option<ZombieKind>> = (0..7).map(|_| schedule.next_zombie()).collect();

        assert_eq!(
            released,
            vec![
                None,
                None,
                Some(ZombieKind::Walker),
                None,
                None,
                Some(ZombieKind::Sprinter),
                None,
            ]
        );
    }

    #[test]
    fn empty_waves_are_skipped() {
        let script = WaveScript::new(vec![
            WavePlan::new(Vec::new(), cadence(5)),
            WavePlan::new(vec![ZombieKind::Conehead], cadence(1)),
        ]);
        let mut schedule = ScriptedWaves::new(script);

        assert_eq!(schedule.next_zombie(), Some(ZombieKind::Conehead));
    }
}
