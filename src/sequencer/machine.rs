use crate::{
    catalog::{CreatureRecord, FetchError},
    models::TimingsPreset,
};
use bevy::prelude::*;
use std::time::Duration;

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Ball shakes, lid still shut.
    Opening,
    /// Lid pops, flash and glow fire.
    Flashing,
    /// Waiting on the catalog, then the short dramatic pause.
    AwaitingFetch,
    /// Card is up, lid stays open for a moment.
    Revealing,
    /// Lid shuts, busy is released right after.
    Closing,
}

/// Side effects the machine asks for. The caller turns them into events.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Open,
    Fetch,
    Reveal(CreatureRecord),
    Fail(FetchError),
    Close,
    Idle,
}

#[derive(Debug, Clone)]
struct CatchAttempt {
    phase: Phase,
    /// Countdown of the current phase.
    wait: Duration,
    result: Option<Result<CreatureRecord, FetchError>>,
    reveal_delay: Duration,
    close_delay: Duration,
}

/// Catch flow owned by the sequencer. Busy exactly while an attempt exists.
#[derive(Resource, Debug, Default)]
pub struct InteractionState {
    attempt: Option<CatchAttempt>,
}

impl InteractionState {
    pub fn is_busy(&self) -> bool {
        self.attempt.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.attempt.as_ref().map_or(Phase::Idle, |a| a.phase)
    }

    /// Starts an attempt. Returns `false` and changes nothing while one is running.
    pub fn begin(&mut self, timings: &TimingsPreset) -> bool {
        if self.is_busy() {
            return false;
        }
        self.attempt = Some(CatchAttempt {
            phase: Phase::Opening,
            wait: timings.open(),
            result: None,
            reveal_delay: timings.reveal(),
            close_delay: timings.close(),
        });
        true
    }

    /// Hands the fetch outcome to the attempt. Ignored outside [`Phase::AwaitingFetch`].
    pub fn resolve(&mut self, result: Result<CreatureRecord, FetchError>) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };
        if attempt.phase != Phase::AwaitingFetch || attempt.result.is_some() {
            return;
        }
        attempt.wait = match result {
            Ok(_) => attempt.reveal_delay,
            Err(_) => Duration::ZERO,
        };
        attempt.result = Some(result);
    }

    /// Moves the attempt forward by `delta`, running every transition that is due.
    pub fn advance(&mut self, delta: Duration) -> Vec<Cue> {
        let mut cues = Vec::new();
        let Some(attempt) = self.attempt.as_mut() else {
            return cues;
        };
        attempt.wait = attempt.wait.saturating_sub(delta);

        loop {
            match attempt.phase {
                Phase::Idle => break,
                Phase::Opening => {
                    if !attempt.wait.is_zero() {
                        break;
                    }
                    cues.push(Cue::Open);
                    attempt.phase = Phase::Flashing;
                }
                Phase::Flashing => {
                    cues.push(Cue::Fetch);
                    attempt.phase = Phase::AwaitingFetch;
                }
                Phase::AwaitingFetch => {
                    if attempt.result.is_none() || !attempt.wait.is_zero() {
                        break;
                    }
                    match attempt.result.take() {
                        Some(Ok(record)) => {
                            cues.push(Cue::Reveal(record));
                            attempt.phase = Phase::Revealing;
                        }
                        Some(Err(err)) => {
                            cues.push(Cue::Fail(err));
                            attempt.phase = Phase::Closing;
                        }
                        None => break,
                    }
                    attempt.wait = attempt.close_delay;
                }
                Phase::Revealing => {
                    if !attempt.wait.is_zero() {
                        break;
                    }
                    attempt.phase = Phase::Closing;
                }
                Phase::Closing => {
                    if !attempt.wait.is_zero() {
                        break;
                    }
                    cues.push(Cue::Close);
                    cues.push(Cue::Idle);
                    attempt.phase = Phase::Idle;
                }
            }
        }

        if attempt.phase == Phase::Idle {
            self.attempt = None;
        }
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::bulbasaur;

    const FRAME: Duration = Duration::from_millis(50);

    fn run(state: &mut InteractionState, frames: usize) -> Vec<Cue> {
        (0..frames).flat_map(|_| state.advance(FRAME)).collect()
    }

    #[test]
    fn successful_attempt_runs_every_phase_and_releases_busy() {
        let mut state = InteractionState::default();
        assert!(state.begin(&TimingsPreset::default()));
        assert_eq!(state.phase(), Phase::Opening);

        // 0.6 s of shaking
        assert!(run(&mut state, 11).is_empty());
        assert_eq!(run(&mut state, 1), vec![Cue::Open, Cue::Fetch]);
        assert_eq!(state.phase(), Phase::AwaitingFetch);

        // nothing happens until the catalog answers
        assert!(run(&mut state, 40).is_empty());
        state.resolve(Ok(bulbasaur()));
        assert!(run(&mut state, 7).is_empty());
        assert_eq!(run(&mut state, 1), vec![Cue::Reveal(bulbasaur())]);
        assert_eq!(state.phase(), Phase::Revealing);
        assert!(state.is_busy());

        assert!(run(&mut state, 19).is_empty());
        assert_eq!(run(&mut state, 1), vec![Cue::Close, Cue::Idle]);
        assert!(!state.is_busy());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn failed_attempt_skips_reveal_and_still_waits_before_closing() {
        let mut state = InteractionState::default();
        state.begin(&TimingsPreset::default());
        run(&mut state, 12);
        state.resolve(Err(FetchError::Status(404)));

        assert_eq!(run(&mut state, 1), vec![Cue::Fail(FetchError::Status(404))]);
        assert_eq!(state.phase(), Phase::Closing);
        assert!(state.is_busy());

        let rest = run(&mut state, 25);
        assert_eq!(rest, vec![Cue::Close, Cue::Idle]);
        assert!(!state.is_busy());
    }

    #[test]
    fn second_begin_is_rejected_while_busy() {
        let mut state = InteractionState::default();
        assert!(state.begin(&TimingsPreset::default()));
        run(&mut state, 5);
        assert!(!state.begin(&TimingsPreset::default()));
        assert_eq!(state.phase(), Phase::Opening);
    }

    #[test]
    fn early_result_is_ignored() {
        let mut state = InteractionState::default();
        state.resolve(Ok(bulbasaur()));
        assert!(!state.is_busy());

        state.begin(&TimingsPreset::default());
        state.resolve(Ok(bulbasaur()));
        run(&mut state, 12);
        assert_eq!(state.phase(), Phase::AwaitingFetch);
        assert!(run(&mut state, 20).is_empty());
    }

    #[test]
    fn zero_timings_finish_in_one_step() {
        let timings = TimingsPreset {
            open: 0.0,
            reveal: 0.0,
            close: 0.0,
            ..default()
        };
        let mut state = InteractionState::default();
        state.begin(&timings);
        assert_eq!(state.advance(Duration::ZERO), vec![Cue::Open, Cue::Fetch]);
        state.resolve(Ok(bulbasaur()));
        assert_eq!(
            state.advance(Duration::ZERO),
            vec![Cue::Reveal(bulbasaur()), Cue::Close, Cue::Idle]
        );
        assert!(!state.is_busy());
    }
}
