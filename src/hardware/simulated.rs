use std::{
    collections::{BTreeSet, VecDeque},
    mem, thread,
    time::Duration,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::{DEFAULT_PAD_COUNT, DEFAULT_WAIT_TIMEOUT_MS, DeviceConfig},
    hardware::{ANY_PAD, Jingle, PadHardware, PadTarget, SEQUENCE_LENGTH, WaitOutcome},
};

/// Longest single sleep in realtime mode.
const TIME_SLICE_MS: u32 = 20;

/// One hardware operation as observed by the rig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareEvent {
    Sound {
        tone:        u32,
        duration_ms: u32,
        target:      PadTarget,
    },
    Sequence {
        tones:        [u32; SEQUENCE_LENGTH],
        durations_ms: [u32; SEQUENCE_LENGTH],
        target:       PadTarget,
    },
    Jingle {
        jingle: Jingle,
        tones:  &'static [u32],
        target: PadTarget,
    },
    WaitForPad {
        target:  PadTarget,
        outcome: WaitOutcome,
    },
    WaitForAnyPad {
        result: Result<u8, WaitOutcome>,
    },
    WaitForAllPads {
        outcome: WaitOutcome,
    },
    Sleep {
        duration_ms: u32,
        cancelled:   bool,
    },
}

/// A pad rig that lives in memory.
///
/// Players are modeled as a queue of arrivals: each wait consumes the arrival
/// it is looking for, and an arrived player keeps the pad occupied until
/// [`SimulatedRig::set_occupied`] clears it. With `auto_arrive` enabled a
/// player shows up whenever a wait would otherwise time out, which is what an
/// interactive demo wants. Every operation is recorded.
#[derive(Debug)]
pub struct SimulatedRig {
    pads:              u8,
    wait_timeout_ms:   u32,
    occupied:          BTreeSet<u8>,
    arrivals:          VecDeque<u8>,
    play_outcome:      WaitOutcome,
    cancel_next_sleep: bool,
    auto_arrive:       bool,
    realtime:          bool,
    echo:              bool,
    rng:               StdRng,
    events:            Vec<HardwareEvent>,
    output:            Vec<String>,
    yields:            usize,
}

impl Default for SimulatedRig {
    fn default() -> Self {
        Self::new(DEFAULT_PAD_COUNT)
    }
}

impl SimulatedRig {
    /// Creates a rig with `pads` active pads and an entropy-seeded rng.
    #[must_use]
    pub fn new(pads: u8) -> Self {
        Self { pads,
               wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
               occupied: BTreeSet::new(),
               arrivals: VecDeque::new(),
               play_outcome: WaitOutcome::Timeout,
               cancel_next_sleep: false,
               auto_arrive: false,
               realtime: false,
               echo: false,
               rng: StdRng::from_entropy(),
               events: Vec::new(),
               output: Vec::new(),
               yields: 0 }
    }

    /// Creates a rig sized and seeded from a device preamble.
    #[must_use]
    pub fn from_config(config: &DeviceConfig) -> Self {
        let rig = Self { wait_timeout_ms: config.wait_timeout_ms,
                         ..Self::new(config.pads) };
        match config.seed {
            Some(seed) => rig.with_seed(seed),
            None => rig,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Sleeps for real during plays, waits and delays.
    #[must_use]
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Also writes script output to stdout.
    #[must_use]
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    #[must_use]
    pub fn auto_arrive(mut self, auto_arrive: bool) -> Self {
        self.auto_arrive = auto_arrive;
        self
    }

    /// Queues a player stepping onto `pad`.
    pub fn queue_arrival(&mut self, pad: u8) -> &mut Self {
        self.arrivals.push_back(pad);
        self
    }

    pub fn set_occupied(&mut self, pad: u8, occupied: bool) -> &mut Self {
        if occupied {
            self.occupied.insert(pad);
        } else {
            self.occupied.remove(&pad);
        }
        self
    }

    /// Sets what every play operation reports from now on.
    pub fn set_play_outcome(&mut self, outcome: WaitOutcome) -> &mut Self {
        self.play_outcome = outcome;
        self
    }

    /// Makes the next delay report an operator cancel.
    pub fn cancel_next_sleep(&mut self) -> &mut Self {
        self.cancel_next_sleep = true;
        self
    }

    #[must_use]
    pub fn events(&self) -> &[HardwareEvent] {
        &self.events
    }

    /// Lines printed by the script, in order.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// How many times the interpreter yielded.
    #[must_use]
    pub const fn yields(&self) -> usize {
        self.yields
    }

    const fn addresses_active_pad(&self, target: PadTarget) -> bool {
        match target {
            PadTarget::Any => true,
            PadTarget::Pad(index) => index < self.pads,
        }
    }

    /// Lets `duration_ms` pass. In realtime mode the rig sleeps in slices of
    /// at most [`TIME_SLICE_MS`] and yields after each one.
    ///
    /// # Returns
    /// `true` if `cancellable` and a pending cancel cut the wait short. The
    /// cancel is consumed.
    fn pass_time(&mut self, duration_ms: u32, cancellable: bool) -> bool {
        let mut remaining = duration_ms;
        loop {
            if cancellable && mem::take(&mut self.cancel_next_sleep) {
                return true;
            }
            if !self.realtime || remaining == 0 {
                return false;
            }
            let slice = remaining.min(TIME_SLICE_MS);
            thread::sleep(Duration::from_millis(u64::from(slice)));
            remaining -= slice;
            self.yield_now();
        }
    }

    fn arrive(&mut self, pad: u8) -> u8 {
        self.occupied.insert(pad);
        info!(pad, "player arrived");
        pad
    }

    /// Takes the first queued arrival matching `pad`, or the first of all when
    /// `pad` is `None`.
    fn take_arrival(&mut self, pad: Option<u8>) -> Option<u8> {
        let position = self.arrivals
                           .iter()
                           .position(|&a| pad.is_none_or(|p| p == a) && a < self.pads)?;
        self.arrivals.remove(position)
    }

    fn random_pad(&mut self) -> u8 {
        self.rng.gen_range(0..self.pads.max(1))
    }

    fn play(&mut self, event: HardwareEvent, target: PadTarget, length_ms: u32) -> WaitOutcome {
        let outcome = if self.addresses_active_pad(target) {
            self.pass_time(length_ms, false);
            self.play_outcome
        } else {
            WaitOutcome::DeliveryError
        };
        info!(?event, ?outcome, "play");
        self.events.push(event);
        outcome
    }
}

impl PadHardware for SimulatedRig {
    fn play_single_sound(&mut self, tone: u32, duration_ms: u32, target: PadTarget) -> WaitOutcome {
        self.play(HardwareEvent::Sound { tone,
                                         duration_ms,
                                         target },
                  target,
                  duration_ms)
    }

    fn play_sound_sequence(&mut self,
                           tones: &[u32; SEQUENCE_LENGTH],
                           durations_ms: &[u32; SEQUENCE_LENGTH],
                           target: PadTarget)
                           -> WaitOutcome {
        let length = durations_ms.iter().fold(0_u32, |total, d| total.saturating_add(*d));
        self.play(HardwareEvent::Sequence { tones: *tones,
                                            durations_ms: *durations_ms,
                                            target },
                  target,
                  length)
    }

    fn play_named_jingle(&mut self, jingle: Jingle, target: PadTarget) -> WaitOutcome {
        self.play(HardwareEvent::Jingle { jingle,
                                          tones: jingle.tones(),
                                          target },
                  target,
                  jingle.length_ms())
    }

    fn wait_for_occupancy(&mut self, target: PadTarget) -> WaitOutcome {
        let outcome = match target {
            PadTarget::Any => match self.wait_for_any_occupancy() {
                Ok(_) => WaitOutcome::Occupied,
                Err(outcome) => outcome,
            },
            PadTarget::Pad(index) if index >= self.pads => WaitOutcome::DeliveryError,
            PadTarget::Pad(index) => {
                if let Some(pad) = self.take_arrival(Some(index)) {
                    self.arrive(pad);
                    WaitOutcome::Occupied
                } else if self.auto_arrive {
                    self.arrive(index);
                    WaitOutcome::Occupied
                } else {
                    self.pass_time(self.wait_timeout_ms, false);
                    WaitOutcome::Timeout
                }
            },
        };
        info!(%target, ?outcome, "wait for occupancy");
        self.events.push(HardwareEvent::WaitForPad { target, outcome });
        outcome
    }

    fn wait_for_any_occupancy(&mut self) -> Result<u8, WaitOutcome> {
        let result = if let Some(pad) = self.take_arrival(None) {
            Ok(self.arrive(pad))
        } else if self.auto_arrive {
            let pad = self.random_pad();
            Ok(self.arrive(pad))
        } else {
            self.pass_time(self.wait_timeout_ms, false);
            Err(WaitOutcome::Timeout)
        };
        info!(?result, "wait for any occupancy");
        self.events.push(HardwareEvent::WaitForAnyPad { result });
        result
    }

    fn wait_for_all_active_occupancy(&mut self) -> WaitOutcome {
        let all_queued = (0..self.pads).all(|pad| self.arrivals.contains(&pad));
        let outcome = if all_queued {
            for pad in 0..self.pads {
                if let Some(arrived) = self.take_arrival(Some(pad)) {
                    self.arrive(arrived);
                }
            }
            WaitOutcome::Occupied
        } else if self.auto_arrive {
            for pad in 0..self.pads {
                self.arrive(pad);
            }
            WaitOutcome::Occupied
        } else {
            self.pass_time(self.wait_timeout_ms, false);
            WaitOutcome::Timeout
        };
        info!(?outcome, "wait for all active pads");
        self.events.push(HardwareEvent::WaitForAllPads { outcome });
        outcome
    }

    fn sleep_with_cancel_check(&mut self, duration_ms: u32) -> bool {
        let cancelled = self.pass_time(duration_ms, true);
        info!(duration_ms, cancelled, "sleep");
        self.events.push(HardwareEvent::Sleep { duration_ms, cancelled });
        cancelled
    }

    fn is_pad_occupied(&mut self, pad: u8) -> bool {
        pad != ANY_PAD && self.occupied.contains(&pad)
    }

    fn random(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..max)
    }

    fn print(&mut self, text: &str) {
        if self.echo {
            println!("{text}");
        }
        self.output.push(text.to_string());
    }

    fn yield_now(&mut self) {
        self.yields += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrivals_are_consumed_in_order() {
        let mut rig = SimulatedRig::new(3);
        rig.queue_arrival(2).queue_arrival(0);
        assert_eq!(rig.wait_for_any_occupancy(), Ok(2));
        assert_eq!(rig.wait_for_occupancy(PadTarget::Pad(0)), WaitOutcome::Occupied);
        assert_eq!(rig.wait_for_any_occupancy(), Err(WaitOutcome::Timeout));
        assert!(rig.is_pad_occupied(2));
        assert!(!rig.is_pad_occupied(1));
    }

    #[test]
    fn inactive_pads_fail_delivery() {
        let mut rig = SimulatedRig::new(2);
        assert_eq!(rig.play_single_sound(440, 10, PadTarget::Pad(5)), WaitOutcome::DeliveryError);
        assert_eq!(rig.wait_for_occupancy(PadTarget::Pad(2)), WaitOutcome::DeliveryError);
    }

    #[test]
    fn all_pads_need_one_arrival_each() {
        let mut rig = SimulatedRig::new(2);
        rig.queue_arrival(1);
        assert_eq!(rig.wait_for_all_active_occupancy(), WaitOutcome::Timeout);
        rig.queue_arrival(0);
        assert_eq!(rig.wait_for_all_active_occupancy(), WaitOutcome::Occupied);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SimulatedRig::new(3).with_seed(7);
        let mut b = SimulatedRig::new(3).with_seed(7);
        let first: Vec<_> = (0..10).map(|_| a.random(0, 100)).collect();
        let second: Vec<_> = (0..10).map(|_| b.random(0, 100)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|n| (0..100).contains(n)));
    }

    #[test]
    fn realtime_sleeps_yield_between_slices() {
        let mut rig = SimulatedRig::new(1).realtime(true);
        assert!(!rig.sleep_with_cancel_check(50));
        assert_eq!(rig.yields(), 3);

        rig.cancel_next_sleep();
        assert!(rig.sleep_with_cancel_check(60_000));
        assert_eq!(rig.yields(), 3);
    }

    #[test]
    fn cancel_applies_to_one_sleep() {
        let mut rig = SimulatedRig::new(1);
        rig.cancel_next_sleep();
        assert!(rig.sleep_with_cancel_check(100));
        assert!(!rig.sleep_with_cancel_check(100));
    }
}
