//! Guided breathing session state.
//!
//! A [`Session`] counts down from one of the fixed [`DURATIONS_SECS`] while a
//! [`BreathCycle`] walks inhale (4 s), hold (2 s), exhale (6 s). Both advance
//! only through [`Session::tick`], called once per second by whatever drives
//! the display; nothing here owns a timer. Audio cues are left to the caller,
//! signalled by [`Tick::Completed`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session lengths a user can pick, in seconds.
pub const DURATIONS_SECS: [u32; 5] = [180, 300, 600, 900, 1200];

pub const DEFAULT_DURATION_SECS: u32 = 300;

/// One stage of the breathing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// How many ticks the phase lasts.
    pub fn seconds(self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 2,
            BreathPhase::Exhale => 6,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    /// Prompt shown while the phase is running.
    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe In...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Breathe Out...",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.instruction())
    }
}

/// Position inside the repeating inhale/hold/exhale pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreathCycle {
    pub phase: BreathPhase,
    /// Ticks spent in the current phase, always below `phase.seconds()`.
    pub elapsed: u32,
}

impl Default for BreathCycle {
    fn default() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            elapsed: 0,
        }
    }
}

impl BreathCycle {
    /// Advance one second, rolling into the next phase when this one is done.
    pub fn tick(&mut self) {
        self.elapsed += 1;
        if self.elapsed >= self.phase.seconds() {
            self.phase = self.phase.next();
            self.elapsed = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a single [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The session is paused or already finished; nothing moved.
    Idle,
    Running,
    /// The countdown just reached zero and the session stopped.
    Completed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported session length: {0}s")]
pub struct InvalidDuration(pub u32);

/// A countdown with its breathing guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    duration: u32,
    remaining: u32,
    active: bool,
    breath: BreathCycle,
}

impl Default for Session {
    fn default() -> Self {
        Self::idle(DEFAULT_DURATION_SECS)
    }
}

impl Session {
    /// A paused session of `duration` seconds, which must be one of
    /// [`DURATIONS_SECS`].
    pub fn new(duration: u32) -> Result<Self, InvalidDuration> {
        if DURATIONS_SECS.contains(&duration) {
            Ok(Self::idle(duration))
        } else {
            Err(InvalidDuration(duration))
        }
    }

    fn idle(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            active: false,
            breath: BreathCycle::default(),
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn breath(&self) -> BreathCycle {
        self.breath
    }

    /// Start or pause. A finished session stays stopped until [`Session::reset`].
    pub fn toggle(&mut self) {
        self.active = !self.active && !self.is_complete();
    }

    /// Stop and rewind to the full duration with the breath at inhale.
    pub fn reset(&mut self) {
        *self = Self::idle(self.duration);
    }

    /// Switch to another allowed length. The session is reset.
    pub fn set_duration(&mut self, duration: u32) -> Result<(), InvalidDuration> {
        *self = Self::new(duration)?;
        Ok(())
    }

    /// Advance the countdown and the breath cycle by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.active || self.is_complete() {
            return Tick::Idle;
        }

        self.remaining -= 1;
        self.breath.tick();

        if self.remaining == 0 {
            self.active = false;
            Tick::Completed
        } else {
            Tick::Running
        }
    }

    /// Remaining time as `m:ss`.
    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Render seconds as `m:ss`; minutes are not padded.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(duration: u32) -> Session {
        let mut session = Session::new(duration).unwrap();
        session.toggle();
        session
    }

    #[test]
    fn test_default_session() {
        let session = Session::default();

        assert_eq!(session.duration(), 300);
        assert_eq!(session.remaining(), 300);
        assert!(!session.is_active());
        assert_eq!(session.breath().phase, BreathPhase::Inhale);
        assert_eq!(session.format_remaining(), "5:00");
    }

    #[test]
    fn test_rejects_unlisted_duration() {
        assert_eq!(Session::new(240), Err(InvalidDuration(240)));
        for duration in DURATIONS_SECS {
            assert!(Session::new(duration).is_ok());
        }
    }

    #[test]
    fn test_breath_phase_transitions() {
        let mut cycle = BreathCycle::default();
        let mut phases = Vec::new();
        for _ in 0..13 {
            cycle.tick();
            phases.push(cycle.phase);
        }

        use BreathPhase::*;
        assert_eq!(
            phases,
            vec![
                Inhale, Inhale, Inhale, Hold, Hold, Exhale, Exhale, Exhale, Exhale, Exhale,
                Exhale, Inhale, Inhale,
            ]
        );
    }

    #[test]
    fn test_paused_tick_does_nothing() {
        let mut session = Session::new(180).unwrap();

        assert_eq!(session.tick(), Tick::Idle);
        assert_eq!(session.remaining(), 180);
        assert_eq!(session.breath(), BreathCycle::default());
    }

    #[test]
    fn test_countdown_completes_at_zero() {
        let mut session = started(180);

        for _ in 0..179 {
            assert_eq!(session.tick(), Tick::Running);
        }
        assert_eq!(session.format_remaining(), "0:01");
        assert_eq!(session.tick(), Tick::Completed);

        assert!(session.is_complete());
        assert!(!session.is_active());
        assert_eq!(session.tick(), Tick::Idle);

        session.toggle();
        assert!(!session.is_active());
    }

    #[test]
    fn test_reset_rewinds_breath_and_clock() {
        let mut session = started(600);
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.breath().phase, BreathPhase::Hold);

        session.reset();

        assert_eq!(session.remaining(), 600);
        assert!(!session.is_active());
        assert_eq!(session.breath().phase, BreathPhase::Inhale);
    }

    #[test]
    fn test_set_duration_resets() {
        let mut session = started(300);
        session.tick();

        session.set_duration(1200).unwrap();

        assert_eq!(session.remaining(), 1200);
        assert!(!session.is_active());
        assert!(session.set_duration(7).is_err());
        assert_eq!(session.duration(), 1200);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
