use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mutable state of one dealt game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    deck: Deck,
    matched: BTreeSet<SlotIndex>,
    pending_first: Option<SlotIndex>,
    comparing: Option<SlotIndex>,
    input_locked: bool,
}

impl GameState {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            ..Default::default()
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn matched_indexes(&self) -> &BTreeSet<SlotIndex> {
        &self.matched
    }

    pub fn pending_first_index(&self) -> Option<SlotIndex> {
        self.pending_first
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// A card is flipped when it waits for its partner or has been matched already.
    pub fn is_flipped(&self, index: SlotIndex) -> bool {
        self.pending_first == Some(index) || self.matched.contains(&index)
    }

    pub fn slot_status(&self, index: SlotIndex) -> SlotStatus {
        if self.matched.contains(&index) {
            SlotStatus::Matched
        } else if self.pending_first == Some(index) || self.comparing == Some(index) {
            SlotStatus::Revealed
        } else {
            SlotStatus::Hidden
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.deck.is_empty() && self.matched.len() == self.deck.len()
    }

    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }
}

/// Drives the turns of a pairs game and tells its collaborators what to show.
///
/// A controller does nothing until [`reset_game`](Self::reset_game) deals the first deck.
#[derive(Debug)]
pub struct GameController<C, R, N, S> {
    config: GameConfig,
    collaborators: Collaborators<C, R, N, S>,
    shuffler: DrawShuffler,
    state: GameState,
    epoch: u64,
}

impl<C, R, N, S> GameController<C, R, N, S>
where
    C: CardCatalog,
    R: SlotRegistry,
    N: Notifier,
    S: Scheduler,
{
    pub fn new(config: GameConfig, collaborators: Collaborators<C, R, N, S>, seed: u64) -> Self {
        Self {
            shuffler: DrawShuffler::with_rounds(seed, config.draw_rounds),
            config,
            collaborators,
            state: Default::default(),
            epoch: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn slot_count(&self) -> usize {
        self.state.deck.len()
    }

    pub fn face_at(&self, index: SlotIndex) -> Option<&CardFace> {
        self.state.deck.get(index)
    }

    pub fn slot_status(&self, index: SlotIndex) -> SlotStatus {
        self.state.slot_status(index)
    }

    pub fn pending_first_index(&self) -> Option<SlotIndex> {
        self.state.pending_first
    }

    pub fn matched_indexes(&self) -> &BTreeSet<SlotIndex> {
        &self.state.matched
    }

    pub fn is_input_locked(&self) -> bool {
        self.state.input_locked
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn pairs_found(&self) -> usize {
        self.state.pairs_found()
    }

    pub fn total_pairs(&self) -> usize {
        self.state.deck.pair_count()
    }

    pub fn registry(&self) -> &R {
        &self.collaborators.registry
    }

    pub fn notifier(&self) -> &N {
        &self.collaborators.notifier
    }

    pub fn scheduler(&self) -> &S {
        &self.collaborators.scheduler
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators<C, R, N, S> {
        &mut self.collaborators
    }

    /// Deals a freshly shuffled deck from the catalog and starts over.
    pub fn reset_game(&mut self) {
        let distinct = self.collaborators.catalog.distinct_faces();
        if distinct.is_empty() {
            log::warn!("Card catalog is empty, dealing an empty board");
        }

        let deck = Deck::pair_up(&distinct).shuffled(&mut self.shuffler);
        self.reset_with_deck(deck);
    }

    /// Starts over with `deck` as dealt, without shuffling.
    pub fn reset_with_deck(&mut self, deck: Deck) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = GameState::new(deck);

        let Collaborators { registry, .. } = &mut self.collaborators;
        let slot_count = registry.slot_count();
        if slot_count != self.state.deck.len() {
            log::warn!(
                "Board has {} slots but the deck holds {} cards",
                slot_count,
                self.state.deck.len()
            );
        }

        for index in 0..slot_count {
            registry.render_slot(index, SlotStatus::Hidden, self.state.deck.get(index));
            registry.bind_click(index);
        }

        log::info!(
            "New game #{} with {} pairs",
            self.epoch,
            self.state.deck.pair_count()
        );
    }

    /// Click handler bound to every slot. Clicks that cannot flip a card are ignored.
    pub fn on_slot_clicked(&mut self, index: SlotIndex) -> ClickOutcome {
        log::trace!("slot {} clicked", index);
        match self.flip(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("ignored click on slot {}: {}", index, err);
                ClickOutcome::Ignored
            }
        }
    }

    pub fn flip(&mut self, index: SlotIndex) -> Result<ClickOutcome> {
        self.check_unlocked()?;
        let index = self.state.deck.validate_index(index)?;
        if self.state.is_flipped(index) {
            return Err(GameError::AlreadyFlipped);
        }

        match self.state.pending_first {
            None => {
                self.state.pending_first = Some(index);
                self.render(index);
                Ok(ClickOutcome::FirstFlipped)
            }
            Some(first) => {
                self.state.input_locked = true;
                self.state.comparing = Some(index);
                self.render(index);
                self.schedule(
                    self.config.reveal_delay,
                    DeferredAction::Resolve {
                        first,
                        second: index,
                    },
                );
                Ok(ClickOutcome::SecondFlipped)
            }
        }
    }

    /// Runs a task previously handed to the [`Scheduler`], unless a reset happened since.
    pub fn run_deferred(&mut self, task: DeferredTask) -> DeferredOutcome {
        if task.epoch != self.epoch {
            log::debug!(
                "dropping {:?} from game #{}, current game is #{}",
                task.action,
                task.epoch,
                self.epoch
            );
            return DeferredOutcome::Stale;
        }

        match task.action {
            DeferredAction::Resolve { first, second } => self.resolve_turn(first, second),
            DeferredAction::Restart => {
                self.collaborators.notifier.notify(Notice::GameComplete);
                self.reset_game();
                DeferredOutcome::Restarted
            }
        }
    }

    fn resolve_turn(&mut self, first: SlotIndex, second: SlotIndex) -> DeferredOutcome {
        self.state.comparing = None;
        self.state.pending_first = None;

        if !self.state.deck.is_pair(first, second) {
            log::debug!("slots {} and {} do not match", first, second);
            self.render(first);
            self.render(second);
            self.state.input_locked = false;
            return DeferredOutcome::Mismatch;
        }

        self.state.matched.insert(first);
        self.state.matched.insert(second);
        self.render(first);
        self.render(second);

        if self.state.is_complete() {
            log::info!("All {} pairs found", self.state.deck.pair_count());
            // input stays locked until the restart deals a new deck
            self.schedule(self.config.win_delay, DeferredAction::Restart);
            DeferredOutcome::Completed
        } else {
            log::debug!("slots {} and {} match", first, second);
            self.collaborators.notifier.notify(Notice::TurnWon);
            self.state.input_locked = false;
            DeferredOutcome::Matched
        }
    }

    fn render(&mut self, index: SlotIndex) {
        let status = self.state.slot_status(index);
        self.collaborators
            .registry
            .render_slot(index, status, self.state.deck.get(index));
    }

    fn schedule(&mut self, delay: core::time::Duration, action: DeferredAction) {
        let task = DeferredTask {
            epoch: self.epoch,
            action,
        };
        self.collaborators.scheduler.schedule(delay, task);
    }

    fn check_unlocked(&self) -> Result<()> {
        if self.state.input_locked {
            Err(GameError::InputLocked)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;

    #[derive(Debug, Default)]
    struct Board {
        slots: Vec<(SlotStatus, Option<CardFace>)>,
        bound: Vec<bool>,
    }

    impl Board {
        fn with_slots(count: usize) -> Self {
            Self {
                slots: vec![(SlotStatus::Hidden, None); count],
                bound: vec![false; count],
            }
        }

        fn status(&self, index: SlotIndex) -> SlotStatus {
            self.slots[index].0
        }
    }

    impl SlotRegistry for Board {
        fn slot_count(&self) -> usize {
            self.slots.len()
        }

        fn bind_click(&mut self, index: SlotIndex) {
            self.bound[index] = true;
        }

        fn render_slot(&mut self, index: SlotIndex, status: SlotStatus, face: Option<&CardFace>) {
            self.slots[index] = (status, face.cloned());
        }
    }

    #[derive(Debug, Default)]
    struct Notices(Vec<Notice>);

    impl Notifier for Notices {
        fn notify(&mut self, notice: Notice) {
            self.0.push(notice);
        }
    }

    #[derive(Debug, Default)]
    struct Timers(Vec<(Duration, DeferredTask)>);

    impl Scheduler for Timers {
        fn schedule(&mut self, delay: Duration, task: DeferredTask) {
            self.0.push((delay, task));
        }
    }

    type TestGame = GameController<Vec<CardFace>, Board, Notices, Timers>;

    fn new_game(catalog: &[&str], slots: usize) -> TestGame {
        let collaborators = Collaborators {
            catalog: catalog.iter().copied().map(CardFace::from).collect(),
            registry: Board::with_slots(slots),
            notifier: Notices::default(),
            scheduler: Timers::default(),
        };
        GameController::new(GameConfig::default(), collaborators, 5)
    }

    fn dealt(arrangement: &[&str]) -> TestGame {
        let mut game = new_game(&["a", "b"], arrangement.len());
        let faces = arrangement.iter().copied().map(CardFace::from).collect();
        game.reset_with_deck(Deck::from_faces(faces).unwrap());
        game
    }

    fn fire_next(game: &mut TestGame) -> DeferredOutcome {
        let (_, task) = game.collaborators_mut().scheduler.0.remove(0);
        game.run_deferred(task)
    }

    #[test]
    fn reset_deals_pairs_and_hides_every_slot() {
        let mut game = new_game(&["a", "b", "c", "d", "e", "f"], 12);
        game.reset_game();

        assert_eq!(game.slot_count(), 12);
        let mut faces = game.state().deck().faces().to_vec();
        faces.sort();
        faces.dedup();
        assert_eq!(faces.len(), 6);
        assert!(game.matched_indexes().is_empty());
        assert_eq!(game.pending_first_index(), None);
        assert!(!game.is_input_locked());
        assert!(game.registry().bound.iter().all(|&bound| bound));
        assert!(
            (0..12).all(|i| game.registry().status(i) == SlotStatus::Hidden)
        );
    }

    #[test]
    fn first_click_reveals_without_locking() {
        let mut game = dealt(&["a", "b", "a", "b"]);

        assert_eq!(game.on_slot_clicked(0), ClickOutcome::FirstFlipped);
        assert_eq!(game.pending_first_index(), Some(0));
        assert!(!game.is_input_locked());
        assert_eq!(game.registry().slots[0], (SlotStatus::Revealed, Some(CardFace::from("a"))));
        assert!(game.scheduler().0.is_empty());
    }

    #[test]
    fn clicking_pending_card_again_is_ignored() {
        let mut game = dealt(&["a", "b", "a", "b"]);
        game.on_slot_clicked(0);

        assert_eq!(game.flip(0), Err(GameError::AlreadyFlipped));
        assert_eq!(game.on_slot_clicked(0), ClickOutcome::Ignored);
        assert_eq!(game.pending_first_index(), Some(0));
        assert_eq!(game.registry().status(0), SlotStatus::Revealed);
    }

    #[test]
    fn second_click_locks_and_schedules_one_resolution() {
        let mut game = dealt(&["a", "b", "a", "b"]);
        game.on_slot_clicked(0);

        assert_eq!(game.on_slot_clicked(1), ClickOutcome::SecondFlipped);
        assert!(game.is_input_locked());
        assert_eq!(game.slot_status(1), SlotStatus::Revealed);
        assert_eq!(
            game.scheduler().0,
            vec![(
                game.config().reveal_delay,
                DeferredTask {
                    epoch: game.epoch(),
                    action: DeferredAction::Resolve { first: 0, second: 1 },
                }
            )]
        );

        assert_eq!(game.flip(2), Err(GameError::InputLocked));
        assert_eq!(game.scheduler().0.len(), 1);
    }

    #[test]
    fn mismatch_hides_both_cards_and_unlocks() {
        let mut game = dealt(&["a", "b", "a", "b"]);
        game.on_slot_clicked(0);
        game.on_slot_clicked(1);

        assert_eq!(fire_next(&mut game), DeferredOutcome::Mismatch);
        assert_eq!(game.registry().status(0), SlotStatus::Hidden);
        assert_eq!(game.registry().status(1), SlotStatus::Hidden);
        assert_eq!(game.pending_first_index(), None);
        assert!(!game.is_input_locked());
        assert!(game.notifier().0.is_empty());
    }

    #[test]
    fn match_keeps_cards_up_and_notifies_turn_won() {
        let mut game = dealt(&["a", "a", "b", "b"]);
        game.on_slot_clicked(0);
        game.on_slot_clicked(1);

        assert_eq!(fire_next(&mut game), DeferredOutcome::Matched);
        assert_eq!(game.matched_indexes().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(game.registry().status(0), SlotStatus::Matched);
        assert_eq!(game.registry().status(1), SlotStatus::Matched);
        assert_eq!(game.notifier().0, vec![Notice::TurnWon]);
        assert_eq!(game.pending_first_index(), None);
        assert!(!game.is_input_locked());
        assert_eq!(game.pairs_found(), 1);
    }

    #[test]
    fn matched_card_cannot_be_clicked() {
        let mut game = dealt(&["a", "a", "b", "b"]);
        game.on_slot_clicked(0);
        game.on_slot_clicked(1);
        fire_next(&mut game);

        assert_eq!(game.flip(0), Err(GameError::AlreadyFlipped));
        game.on_slot_clicked(2);
        assert_eq!(game.flip(1), Err(GameError::AlreadyFlipped));
        assert_eq!(game.pending_first_index(), Some(2));
    }

    #[test]
    fn last_pair_schedules_restart_then_deals_again() {
        let mut game = dealt(&["a", "a", "b", "b"]);
        let first_epoch = game.epoch();
        for (first, second) in [(0, 1), (2, 3)] {
            game.on_slot_clicked(first);
            game.on_slot_clicked(second);
            fire_next(&mut game);
        }

        assert!(game.is_complete());
        assert!(game.is_input_locked());
        assert_eq!(game.notifier().0, vec![Notice::TurnWon]);
        assert_eq!(
            game.scheduler().0,
            vec![(
                Duration::from_millis(1000),
                DeferredTask {
                    epoch: first_epoch,
                    action: DeferredAction::Restart,
                }
            )]
        );

        assert_eq!(fire_next(&mut game), DeferredOutcome::Restarted);
        assert_eq!(game.notifier().0, vec![Notice::TurnWon, Notice::GameComplete]);
        assert_eq!(game.epoch(), first_epoch + 1);
        assert!(game.matched_indexes().is_empty());
        assert!(!game.is_input_locked());
        assert!((0..4).all(|i| game.registry().status(i) == SlotStatus::Hidden));
    }

    #[test]
    fn task_from_previous_game_is_dropped() {
        let mut game = dealt(&["a", "b", "a", "b"]);
        game.on_slot_clicked(0);
        game.on_slot_clicked(2);
        game.reset_game();

        assert_eq!(fire_next(&mut game), DeferredOutcome::Stale);
        assert!(game.matched_indexes().is_empty());
        assert!(!game.is_input_locked());
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut game = dealt(&["a", "a"]);

        assert_eq!(game.flip(2), Err(GameError::InvalidSlot));
        assert_eq!(game.on_slot_clicked(usize::MAX), ClickOutcome::Ignored);
        assert_eq!(game.pending_first_index(), None);
    }

    #[test]
    fn empty_catalog_deals_empty_board() {
        let mut game = new_game(&[], 0);
        game.reset_game();

        assert_eq!(game.slot_count(), 0);
        assert!(!game.is_complete());
        assert_eq!(game.on_slot_clicked(0), ClickOutcome::Ignored);
    }

    #[test]
    fn extra_registry_slots_are_bound_but_inert() {
        let mut game = new_game(&["a"], 4);
        game.reset_game();

        assert!(game.registry().bound.iter().all(|&bound| bound));
        assert_eq!(game.registry().slots[3], (SlotStatus::Hidden, None));
        assert_eq!(game.flip(3), Err(GameError::InvalidSlot));
    }
}
