//! Seeded random play for headless runs and smoke tests.

use game_core::{Direction, GameState, Intent, PcgRng, RngOracle, ScriptedPrompts};

use crate::repository::SaveRepository;
use crate::session::{Session, SessionError};

const DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

/// Where an autoplay run ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub intents: u32,
    pub turns: u64,
    pub depth: u32,
    pub died: bool,
}

/// Chooses intents from its own generator, separate from the world's.
///
/// It takes the stairs when standing on them, picks up whatever lies at its
/// feet, now and then tries an inventory item and otherwise wanders.
/// Targeting prompts are cancelled and level-ups take the first reward.
pub struct Autoplay {
    rng: PcgRng,
    prompts: ScriptedPrompts,
}

impl Autoplay {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgRng::from_seed(seed),
            prompts: ScriptedPrompts::new(),
        }
    }

    pub fn next_intent(&mut self, state: &GameState) -> Intent {
        let here = state.player_position();
        let on_stairs = state
            .stairs
            .and_then(|id| state.entities.get(id))
            .is_some_and(|stairs| stairs.position == here);
        if on_stairs {
            return Intent::Descend;
        }
        if state.entities.at(here).any(|entity| entity.item.is_some()) && !state.inventory.is_full() {
            return Intent::PickUp;
        }
        if !state.inventory.is_empty() && self.rng.roll_die(12) == 1 {
            let slot = self.rng.range(0, state.inventory.len() as i32 - 1) as usize;
            return Intent::UseItem { slot };
        }
        match self.rng.roll_die(9) {
            9 => Intent::Wait,
            n => Intent::Move(DIRECTIONS[n as usize - 1]),
        }
    }

    /// Plays the session's current game for up to `max_intents` intents or
    /// until the runner dies.
    pub fn run<R: SaveRepository>(
        &mut self,
        session: &mut Session<R>,
        max_intents: u32,
    ) -> Result<RunSummary, SessionError> {
        let mut intents = 0;
        while intents < max_intents {
            let Some(state) = session.state() else {
                return Err(SessionError::NotPlaying);
            };
            if state.is_dead() {
                break;
            }
            let intent = self.next_intent(state);
            session.submit(intent, &mut self.prompts)?;
            intents += 1;
        }

        let state = session.state().ok_or(SessionError::NotPlaying)?;
        let summary = RunSummary {
            intents,
            turns: state.turn,
            depth: state.depth,
            died: state.is_dead(),
        };
        tracing::info!(?summary, "autoplay finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySaveRepository;
    use game_core::{GameConfig, SpawnTables};

    fn playing(seed: u64) -> Session<InMemorySaveRepository> {
        let mut session = Session::new(
            InMemorySaveRepository::new(),
            GameConfig::new(),
            SpawnTables::default(),
        );
        session.start_new_game(seed);
        session
    }

    #[test]
    fn runs_are_reproducible() {
        let mut a = playing(17);
        let mut b = playing(17);
        let first = Autoplay::new(5).run(&mut a, 300).expect("run");
        let second = Autoplay::new(5).run(&mut b, 300).expect("run");
        assert_eq!(first, second);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn stops_when_the_runner_dies() {
        let mut session = playing(2);
        let summary = Autoplay::new(9).run(&mut session, 5_000).expect("run");
        assert!(summary.died || summary.intents == 5_000);
        assert_eq!(session.state().map(|state| state.validate()), Some(Ok(())));
    }

    #[test]
    fn needs_a_game_in_progress() {
        let mut session = Session::new(
            InMemorySaveRepository::new(),
            GameConfig::new(),
            SpawnTables::default(),
        );
        assert!(matches!(
            Autoplay::new(1).run(&mut session, 10),
            Err(SessionError::NotPlaying)
        ));
    }
}
