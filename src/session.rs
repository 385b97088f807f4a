//! A duel wired to its collaborators
//!
//! The session owns one `DuelState` plus a clock, a result sink and a cue
//! sink. Each `step` reads the clock once, ticks the simulation and hands the
//! produced events to the sinks.

use crate::audio::{CueSink, NullCues};
use crate::persistence::{MemoryLog, ResultSink};
use crate::platform::Clock;
use crate::settings::DuelSettings;
use crate::sim::{DuelSnapshot, DuelState, GameEvent, MatchResult, TickInput, tick};

pub struct DuelSession<C: Clock> {
    state: DuelState,
    clock: C,
    results: Box<dyn ResultSink>,
    cues: Box<dyn CueSink>,
    /// Records that could not be written
    persist_failures: u32,
}

impl<C: Clock> DuelSession<C> {
    /// Session with in-memory results and no audio
    pub fn new(settings: DuelSettings, seed: u64, clock: C) -> Self {
        Self::with_sinks(
            settings,
            seed,
            clock,
            Box::new(MemoryLog::default()),
            Box::new(NullCues),
        )
    }

    pub fn with_sinks(
        settings: DuelSettings,
        seed: u64,
        clock: C,
        results: Box<dyn ResultSink>,
        cues: Box<dyn CueSink>,
    ) -> Self {
        log::info!(
            "Duel session: {} rounds, opponent difficulty {}, seed {}",
            settings.max_rounds,
            settings.opponent_difficulty,
            seed
        );
        Self {
            state: DuelState::new(settings, seed),
            clock,
            results,
            cues,
            persist_failures: 0,
        }
    }

    /// Poll the clock, advance the duel and dispatch events.
    /// Returns the match result if the match ended on this step.
    pub fn step(&mut self, input: &TickInput) -> Option<MatchResult> {
        let now = self.clock.now_ms();
        tick(&mut self.state, input, now);

        let mut finished = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(effect) => self.cues.play(effect),
                GameEvent::RoundResolved(record) => {
                    if let Err(e) = self.results.append(&record) {
                        self.persist_failures += 1;
                        log::warn!("Round {} not saved: {}", record.round_number, e);
                    }
                }
                GameEvent::MatchOver(result) => finished = Some(result),
            }
        }
        finished
    }

    pub fn state(&self) -> &DuelState {
        &self.state
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        self.state.snapshot(self.clock.now_ms())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn persist_failures(&self) -> u32 {
        self.persist_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordedCues, SoundEffect};
    use crate::persistence::{PersistError, RoundRecord};
    use crate::platform::ManualClock;
    use crate::sim::DuelPhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares its records with the test through an `Rc`
    #[derive(Clone, Default)]
    struct SharedLog(Rc<RefCell<Vec<RoundRecord>>>);

    impl ResultSink for SharedLog {
        fn append(&mut self, record: &RoundRecord) -> Result<(), PersistError> {
            self.0.borrow_mut().push(record.clone());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct SharedCues(Rc<RefCell<RecordedCues>>);

    impl CueSink for SharedCues {
        fn play(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().play(effect);
        }
    }

    struct BrokenDisk;

    impl ResultSink for BrokenDisk {
        fn append(&mut self, _record: &RoundRecord) -> Result<(), PersistError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    fn start() -> TickInput {
        TickInput {
            start_round: true,
            ..Default::default()
        }
    }

    fn play_round<C: Clock>(session: &mut DuelSession<C>, advance: impl Fn(&mut C)) {
        session.step(&start());
        for _ in 0..2000 {
            if session.state().phase == DuelPhase::Result {
                return;
            }
            advance(session.clock_mut());
            session.step(&TickInput::default());
        }
        panic!("round never resolved");
    }

    #[test]
    fn test_rounds_are_persisted_and_cued() {
        let log = SharedLog::default();
        let cues = SharedCues::default();
        let mut session = DuelSession::with_sinks(
            DuelSettings::default(),
            42,
            ManualClock::new(0),
            Box::new(log.clone()),
            Box::new(cues.clone()),
        );

        play_round(&mut session, |c| c.advance(16));

        let records = log.0.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].round_number, 1);
        assert_eq!(records[0].opponent_difficulty, 5);

        let played = cues.0.borrow().cues.clone();
        assert_eq!(played[0], SoundEffect::RoundStarted);
        assert!(played.contains(&SoundEffect::DrawSignal));
        assert!(played.contains(&SoundEffect::ShotFired));
    }

    #[test]
    fn test_persist_failure_does_not_stop_the_round() {
        let mut session = DuelSession::with_sinks(
            DuelSettings::default(),
            7,
            ManualClock::new(0),
            Box::new(BrokenDisk),
            Box::new(NullCues),
        );
        play_round(&mut session, |c| c.advance(16));
        assert_eq!(session.state().phase, DuelPhase::Result);
        assert_eq!(session.state().outcomes.len(), 1);
        assert_eq!(session.persist_failures(), 1);

        session.step(&TickInput {
            continue_round: true,
            ..Default::default()
        });
        assert_eq!(session.state().phase, DuelPhase::Waiting);
    }

    #[test]
    fn test_step_reports_match_end() {
        let settings = DuelSettings {
            max_rounds: 1,
            ..DuelSettings::default()
        };
        let mut session = DuelSession::new(settings, 3, ManualClock::new(0));
        play_round(&mut session, |c| c.advance(16));
        session.clock_mut().advance(1000);
        let ended = session.step(&TickInput {
            continue_round: true,
            ..Default::default()
        });
        assert!(ended.is_some());
        assert_eq!(session.snapshot().phase, DuelPhase::GameOver);
    }
}
