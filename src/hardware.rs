use std::fmt;

/// An in-process pad rig for hosts without hardware and for tests.
pub mod simulated;

/// Pad address meaning "whichever pad".
pub const ANY_PAD: u8 = 255;
/// Number of slots in a sound sequence sent to a pad.
pub const SEQUENCE_LENGTH: usize = 8;

/// Which pad a hardware operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadTarget {
    Any,
    Pad(u8),
}

impl PadTarget {
    /// Maps a wire address to a target; [`ANY_PAD`] is `Any`.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        if index == ANY_PAD { Self::Any } else { Self::Pad(index) }
    }
}

impl fmt::Display for PadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any pad"),
            Self::Pad(index) => write!(f, "pad {index}"),
        }
    }
}

/// How a blocking pad operation ended.
///
/// For play operations `Timeout` marks normal completion, since the pad
/// reports nothing back once the sound is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitOutcome {
    Occupied,
    UserAbort,
    DeliveryError,
    Timeout,
}

impl WaitOutcome {
    /// Whether a play operation ended without abort or delivery failure.
    #[must_use]
    pub const fn played(self) -> bool {
        matches!(self, Self::Occupied | Self::Timeout)
    }
}

/// The fixed jingles a pad can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jingle {
    Correct,
    Wrong,
    Winner,
    Loser,
}

const CORRECT_TONES: [u32; 4] = [880, 1100, 1320, 1760];
const CORRECT_DURATIONS: [u32; 4] = [100, 100, 100, 200];
const WRONG_TONES: [u32; 4] = [1760, 1320, 1100, 880];
const WINNER_TONES: [u32; 6] = [880, 1100, 1320, 1100, 1320, 1760];
const LOSER_TONES: [u32; 6] = [1760, 1320, 1100, 1320, 1100, 880];
const FANFARE_DURATIONS: [u32; 6] = [125; 6];

impl Jingle {
    pub const ALL: [Self; 4] = [Self::Correct, Self::Wrong, Self::Winner, Self::Loser];

    /// Looks a jingle up by its script-visible name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
            Self::Winner => "winner",
            Self::Loser => "loser",
        }
    }

    /// Tone frequencies in Hz, in play order.
    #[must_use]
    pub const fn tones(self) -> &'static [u32] {
        match self {
            Self::Correct => &CORRECT_TONES,
            Self::Wrong => &WRONG_TONES,
            Self::Winner => &WINNER_TONES,
            Self::Loser => &LOSER_TONES,
        }
    }

    /// Tone durations in milliseconds, parallel to [`Self::tones`].
    #[must_use]
    pub const fn durations(self) -> &'static [u32] {
        match self {
            Self::Correct | Self::Wrong => &CORRECT_DURATIONS,
            Self::Winner | Self::Loser => &FANFARE_DURATIONS,
        }
    }

    /// Total play time in milliseconds.
    #[must_use]
    pub fn length_ms(self) -> u32 {
        self.durations().iter().sum()
    }
}

/// The hardware collaborator behind the native function bridge.
///
/// The interpreter knows nothing about wireless addressing, framing or sensor
/// thresholds; it only calls these operations and turns their results into
/// script values. Blocking operations are expected to poll for cancellation
/// themselves and to keep the host's housekeeping alive while they wait.
pub trait PadHardware {
    /// Plays one tone on a pad.
    fn play_single_sound(&mut self, tone: u32, duration_ms: u32, target: PadTarget) -> WaitOutcome;

    /// Plays up to [`SEQUENCE_LENGTH`] tones; unused slots are zero.
    fn play_sound_sequence(&mut self,
                           tones: &[u32; SEQUENCE_LENGTH],
                           durations_ms: &[u32; SEQUENCE_LENGTH],
                           target: PadTarget)
                           -> WaitOutcome;

    fn play_named_jingle(&mut self, jingle: Jingle, target: PadTarget) -> WaitOutcome;

    /// Blocks until a player stands on the target pad, or the wait ends
    /// otherwise.
    fn wait_for_occupancy(&mut self, target: PadTarget) -> WaitOutcome;

    /// Blocks until a player stands on any active pad and returns its index.
    fn wait_for_any_occupancy(&mut self) -> Result<u8, WaitOutcome>;

    /// Blocks until every active pad is occupied.
    fn wait_for_all_active_occupancy(&mut self) -> WaitOutcome;

    /// Sleeps, returning `true` if the operator cancelled during the sleep.
    fn sleep_with_cancel_check(&mut self, duration_ms: u32) -> bool;

    fn is_pad_occupied(&mut self, pad: u8) -> bool;

    /// A random number in `min..max`. Callers guarantee `min < max`.
    fn random(&mut self, min: i32, max: i32) -> i32;

    /// Writes one line of script output.
    fn print(&mut self, text: &str);

    /// Gives the surrounding runtime a chance to do its housekeeping. Called
    /// between statements, and by implementations while they block.
    fn yield_now(&mut self) {}
}
