//! Round orchestrator
//!
//! [`Game`] owns everything a round touches and runs one simulation step per
//! display frame. Frames are requested through a [`FrameScheduler`]; each
//! request is tagged with the round generation so a callback left over from
//! an ended or restarted round never ticks.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use crate::audio::{AudioSink, NullAudio, SoundCue};
use crate::highscores::{Leaderboard, ScoreEntry};
use crate::persistence::KeyValueStore;
use crate::platform::{FrameHandle, FrameScheduler};
use crate::renderer::{NullRenderer, RenderSink};
use crate::sim::{Collision, GameEvent, RoundState, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// How the last round finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub name: String,
    pub score: u32,
    pub collision: Collision,
    /// Leaderboard position, if the score made the cut and was stored
    pub rank: Option<usize>,
}

/// What happened during one frame, handed to the host after the game is released
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outcome: TickOutcome,
    pub score: u32,
    pub events: Vec<GameEvent>,
}

/// Host callback run after every frame (HUD refresh, game-over panel)
pub type FrameObserver = Rc<dyn Fn(&FrameReport)>;

/// Game instance holding all state
pub struct Game {
    pub tuning: Tuning,
    pub round: RoundState,
    pending_flap: bool,
    leaderboard: Leaderboard<Box<dyn KeyValueStore>>,
    renderer: Box<dyn RenderSink>,
    audio: Box<dyn AudioSink>,
    frame_request: Option<FrameHandle>,
    generation: u64,
    last_result: Option<RoundResult>,
}

impl Game {
    pub fn new(tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            tuning: tuning.or_default(),
            round: RoundState::default(),
            pending_flap: false,
            leaderboard: Leaderboard::new(store),
            renderer: Box::new(NullRenderer),
            audio: Box::new(NullAudio),
            frame_request: None,
            generation: 0,
            last_result: None,
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn RenderSink>) {
        self.renderer = renderer;
    }

    pub fn set_audio(&mut self, audio: Box<dyn AudioSink>) {
        self.audio = audio;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    /// Call from a click or key handler so later cues can play
    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Queue a flap for the next frame. Ignored unless a round is running.
    pub fn flap(&mut self) -> bool {
        if !self.round.is_running() {
            return false;
        }
        self.pending_flap = true;
        true
    }

    /// Reset to a fresh running round. Prefer [`start_round`], which also
    /// takes care of frame scheduling.
    pub fn begin_round(&mut self, player_name: &str, seed: u64, now_ms: f64) {
        self.generation += 1;
        self.round = RoundState::start(player_name, seed, now_ms, &self.tuning);
        self.pending_flap = false;
        self.last_result = None;
        log::info!(
            "Round {} started for {} (seed {})",
            self.generation,
            self.round.player_name,
            seed
        );
    }

    /// Run one frame: tick, draw the snapshot, play cues, and record the
    /// score if the round just ended
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        if !self.round.is_running() {
            return FrameReport {
                outcome: TickOutcome::Ended,
                score: self.round.score,
                events: Vec::new(),
            };
        }

        let input = TickInput {
            flap: std::mem::take(&mut self.pending_flap),
        };
        let outcome = tick(&mut self.round, &input, now_ms, &self.tuning);

        self.renderer.render(&self.round.snapshot());

        let events = self.round.drain_events();
        for event in &events {
            if let Some(cue) = SoundCue::for_event(event) {
                self.audio.play(cue);
            }
            if let GameEvent::Crashed { collision, score } = *event {
                self.finish_round(collision, score);
            }
        }

        FrameReport {
            outcome,
            score: self.round.score,
            events,
        }
    }

    /// Draw the current state without ticking (idle screen, after resize)
    pub fn redraw(&mut self) {
        self.renderer.render(&self.round.snapshot());
    }

    fn finish_round(&mut self, collision: Collision, score: u32) {
        let name = self.round.player_name.clone();
        let rank = self.leaderboard.submit(&name, score, Utc::now());
        log::info!(
            "Round {} over: {} scored {} ({:?}, rank {:?})",
            self.generation,
            name,
            score,
            collision,
            rank
        );
        self.last_result = Some(RoundResult {
            name,
            score,
            collision,
            rank,
        });
    }

    pub fn is_running(&self) -> bool {
        self.round.is_running()
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Best `limit` stored scores, highest first
    pub fn top_scores(&self, limit: usize) -> Vec<ScoreEntry> {
        self.leaderboard.top_scores(limit)
    }

    pub fn clear_scores(&mut self) {
        self.leaderboard.clear();
    }
}

/// Start a new round and request its first frame. Any frame still pending
/// from the previous round is cancelled.
pub fn start_round<S: FrameScheduler + 'static>(
    game: &Rc<RefCell<Game>>,
    scheduler: &Rc<S>,
    observer: &FrameObserver,
    player_name: &str,
    seed: u64,
    now_ms: f64,
) {
    {
        let mut g = game.borrow_mut();
        if let Some(handle) = g.frame_request.take() {
            scheduler.cancel_frame(handle);
        }
        g.begin_round(player_name, seed, now_ms);
    }
    schedule_next(game, scheduler, observer);
}

/// Request the next frame of the current round, if it is still running
pub fn schedule_next<S: FrameScheduler + 'static>(
    game: &Rc<RefCell<Game>>,
    scheduler: &Rc<S>,
    observer: &FrameObserver,
) {
    let generation = {
        let g = game.borrow();
        if !g.is_running() {
            return;
        }
        g.generation
    };

    let game_cb = Rc::clone(game);
    let scheduler_cb = Rc::clone(scheduler);
    let observer_cb = Rc::clone(observer);
    let handle = scheduler.request_frame(Box::new(move |now_ms| {
        let report = {
            let mut g = game_cb.borrow_mut();
            if g.generation != generation {
                log::trace!("Dropping frame from round {}", generation);
                return;
            }
            g.frame_request = None;
            g.frame(now_ms)
        };

        observer_cb(&report);

        // The observer may have started another round
        let current = game_cb.borrow().generation == generation;
        if current && report.outcome == TickOutcome::Continue {
            schedule_next(&game_cb, &scheduler_cb, &observer_cb);
        }
    }));

    game.borrow_mut().frame_request = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_MS;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::platform::ManualScheduler;
    use crate::sim::{Obstacle, RenderFrame, RoundPhase};

    #[derive(Clone, Default)]
    struct RecordingRenderer(Rc<RefCell<Vec<RenderFrame>>>);

    impl RenderSink for RecordingRenderer {
        fn render(&mut self, frame: &RenderFrame) {
            self.0.borrow_mut().push(frame.clone());
        }
    }

    #[derive(Clone, Default)]
    struct RecordingAudio(Rc<RefCell<Vec<SoundCue>>>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    #[derive(Clone, Default)]
    struct GatedAudio {
        unlocked: Rc<std::cell::Cell<bool>>,
        volume: Rc<std::cell::Cell<f32>>,
    }

    impl AudioSink for GatedAudio {
        fn play(&mut self, _cue: SoundCue) {}

        fn set_volume(&mut self, volume: f32) {
            self.volume.set(volume);
        }

        fn resume(&mut self) {
            self.unlocked.set(true);
        }
    }

    /// Scheduler that forgets to cancel, to exercise the generation guard
    #[derive(Default)]
    struct ForgetfulScheduler(ManualScheduler);

    impl FrameScheduler for ForgetfulScheduler {
        fn request_frame(&self, callback: crate::platform::FrameCallback) -> FrameHandle {
            self.0.request_frame(callback)
        }

        fn cancel_frame(&self, _handle: FrameHandle) {}
    }

    struct Harness {
        game: Rc<RefCell<Game>>,
        scheduler: Rc<ManualScheduler>,
        observer: FrameObserver,
        reports: Rc<RefCell<Vec<FrameReport>>>,
        frames: Rc<RefCell<Vec<RenderFrame>>>,
        cues: Rc<RefCell<Vec<SoundCue>>>,
        now: f64,
    }

    impl Harness {
        fn new(tuning: Tuning, store: MemoryStore) -> Self {
            let renderer = RecordingRenderer::default();
            let audio = RecordingAudio::default();
            let frames = renderer.0.clone();
            let cues = audio.0.clone();

            let mut game = Game::new(tuning, Box::new(store));
            game.set_renderer(Box::new(renderer));
            game.set_audio(Box::new(audio));

            let reports = Rc::new(RefCell::new(Vec::new()));
            let sink = reports.clone();
            let observer: FrameObserver = Rc::new(move |r: &FrameReport| sink.borrow_mut().push(r.clone()));

            Self {
                game: Rc::new(RefCell::new(game)),
                scheduler: Rc::new(ManualScheduler::new()),
                observer,
                reports,
                frames,
                cues,
                now: 0.0,
            }
        }

        fn start(&mut self, name: &str) {
            start_round(&self.game, &self.scheduler, &self.observer, name, 42, self.now);
        }

        fn step(&mut self) -> usize {
            let ran = self.scheduler.fire(self.now);
            self.now += REFERENCE_FRAME_MS;
            ran
        }

        fn run_until_idle(&mut self, max_frames: usize) -> usize {
            let mut frames = 0;
            while self.scheduler.pending() > 0 {
                self.step();
                frames += 1;
                assert!(frames <= max_frames, "round never ended");
            }
            frames
        }
    }

    #[test]
    fn test_round_ends_on_floor_and_saves_once() {
        let mut h = Harness::new(Tuning::default(), MemoryStore::new());
        h.start("  ace ");
        h.run_until_idle(200);

        let game = h.game.borrow();
        assert_eq!(game.round.phase, RoundPhase::Ended);
        let result = game.last_result().unwrap();
        assert_eq!(result.collision, Collision::Floor);
        assert_eq!(result.name, "ace");
        assert_eq!(result.rank, Some(1));

        let scores = game.top_scores(10);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "ace");
        assert_eq!(scores[0].score, 0);
        drop(game);

        // Nothing left to tick; further frames change nothing
        assert_eq!(h.step(), 0);
        assert_eq!(h.game.borrow().top_scores(10).len(), 1);
        assert_eq!(h.cues.borrow().last(), Some(&SoundCue::Crash));
    }

    #[test]
    fn test_every_tick_renders() {
        let mut h = Harness::new(Tuning::default(), MemoryStore::new());
        h.start("p");
        let frames = h.run_until_idle(200);
        assert_eq!(h.frames.borrow().len(), frames);
        assert_eq!(h.reports.borrow().len(), frames);
        assert_eq!(
            h.reports.borrow().last().map(|r| r.outcome),
            Some(TickOutcome::Ended)
        );
    }

    #[test]
    fn test_restart_resets_round() {
        let mut h = Harness::new(Tuning::default(), MemoryStore::new());
        h.start("first");
        for _ in 0..20 {
            h.step();
        }
        {
            let mut game = h.game.borrow_mut();
            game.round.score = 7;
            game.round.obstacles.obstacles.push(Obstacle::new(9, 300.0, 200.0, 130.0, 68.0));
        }

        h.start("second");
        assert_eq!(h.scheduler.pending(), 1);
        let game = h.game.borrow();
        assert_eq!(game.score(), 0);
        assert!(game.round.obstacles.is_empty());
        assert_eq!(game.round.player.pos.y, 360.0);
        assert_eq!(game.round.player.vel, 0.0);
        assert_eq!(game.round.player_name, "second");
        assert!(game.round.clock.is_first_frame());
    }

    #[test]
    fn test_stale_frame_is_dropped() {
        let game = Rc::new(RefCell::new(Game::new(Tuning::default(), Box::new(MemoryStore::new()))));
        let scheduler = Rc::new(ForgetfulScheduler::default());
        let observer: FrameObserver = Rc::new(|_: &FrameReport| {});

        start_round(&game, &scheduler, &observer, "a", 1, 0.0);
        start_round(&game, &scheduler, &observer, "b", 2, 0.0);
        assert_eq!(scheduler.0.pending(), 2);

        scheduler.0.fire(0.0);
        assert_eq!(game.borrow().round.ticks, 1);
        assert_eq!(scheduler.0.pending(), 1);
    }

    #[test]
    fn test_flap_only_while_running() {
        let mut h = Harness::new(Tuning::default(), MemoryStore::new());
        assert!(!h.game.borrow_mut().flap());

        h.start("p");
        h.step();
        assert!(h.game.borrow_mut().flap());
        h.step();
        assert!(h.game.borrow().round.player.vel < 0.0);
        assert_eq!(h.cues.borrow().as_slice(), &[SoundCue::Flap]);

        h.run_until_idle(500);
        assert!(!h.game.borrow_mut().flap());
    }

    #[test]
    fn test_obstacle_passes_kite_and_scores_once() {
        let tuning = Tuning {
            spawn_interval_ms: 1.0e9,
            ..Tuning::default()
        };
        let mut h = Harness::new(tuning, MemoryStore::new());
        h.start("p");
        h.game
            .borrow_mut()
            .round
            .obstacles
            .obstacles
            .push(Obstacle::new(1, 520.0, 300.0, 130.0, 68.0));

        for _ in 0..500 {
            // Hold the kite level inside the gap [300, 430]
            {
                let mut game = h.game.borrow_mut();
                game.round.player.pos.y = 360.0;
                game.round.player.vel = 0.0;
            }
            assert_eq!(h.step(), 1);
        }

        let game = h.game.borrow();
        assert!(game.is_running());
        assert_eq!(game.score(), 1);
        assert!(game.round.obstacles.is_empty());

        let scored = h
            .reports
            .borrow()
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        assert_eq!(scored, 1);
    }

    #[test]
    fn test_audio_controls_reach_sink() {
        let audio = GatedAudio::default();
        let mut game = Game::new(Tuning::default(), Box::new(MemoryStore::new()));
        game.set_audio(Box::new(audio.clone()));

        game.resume_audio();
        game.set_volume(0.4);
        assert!(audio.unlocked.get());
        assert_eq!(audio.volume.get(), 0.4);
    }

    #[test]
    fn test_storage_failure_does_not_stop_round_end() {
        let mut store = MemoryStore::new();
        store.fail_with(Some(StorageError::Quota("full".into())));
        let mut h = Harness::new(Tuning::default(), store);
        h.start("p");
        h.run_until_idle(200);

        let game = h.game.borrow();
        assert_eq!(game.round.phase, RoundPhase::Ended);
        assert!(game.top_scores(10).is_empty());
        // The panel must not claim a rank for a score that was not stored
        assert_eq!(game.last_result().map(|r| r.rank), Some(None));
    }

    #[test]
    fn test_observer_restart_is_not_doubled() {
        let game = Rc::new(RefCell::new(Game::new(Tuning::default(), Box::new(MemoryStore::new()))));
        let scheduler = Rc::new(ManualScheduler::new());

        let restarted = Rc::new(std::cell::Cell::new(false));
        let observer: FrameObserver = {
            let game = Rc::downgrade(&game);
            let scheduler = scheduler.clone();
            let restarted = restarted.clone();
            Rc::new(move |_: &FrameReport| {
                if restarted.replace(true) {
                    return;
                }
                if let Some(game) = game.upgrade() {
                    let noop: FrameObserver = Rc::new(|_: &FrameReport| {});
                    start_round(&game, &scheduler, &noop, "again", 3, 0.0);
                }
            })
        };

        start_round(&game, &scheduler, &observer, "p", 1, 0.0);
        scheduler.fire(0.0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(game.borrow().round.player_name, "again");
    }
}
