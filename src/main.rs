//! Block Blast runner (default binary).
//!
//! Draws the game with the framebuffer renderer and reads keyboard and mouse
//! input through crossterm. `--headless` swaps the terminal UI for the JSON
//! line protocol on stdin/stdout.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use block_blast::config::Cli;
use block_blast::core::{GameSnapshot, GameState, PlaceOutcome};
use block_blast::engine::{Cursor, DragSession};
use block_blast::headless;
use block_blast::high_score::HighScoreStore;
use block_blast::input::{handle_key_event, handle_mouse_event, should_quit, Gesture};
use block_blast::logging;
use block_blast::term::{
    install_panic_hook, Decorations, FlashTimer, FrameBuffer, GameView, Layout, TerminalRenderer,
};
use block_blast::types::GameAction;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = Cli::parse().into_config();

    if let Err(err) = logging::init(config.log_path.as_deref()) {
        eprintln!("block-blast: logging disabled: {err:#}");
    }

    let store = HighScoreStore::new(config.high_score_path.clone());
    let mut state = GameState::new(config.seed, store.load());
    info!(
        seed = config.seed,
        high_score = state.high_score(),
        headless = config.headless,
        "session started"
    );

    if config.headless {
        let stdin = io::stdin();
        return headless::run(&mut state, &store, stdin.lock(), io::stdout().lock());
    }

    install_panic_hook();
    let mut term = TerminalRenderer::enter()?;

    let mut app = App::new(state, store);
    let result = app.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = app.state.score(), high_score = app.state.high_score(), "session ended");
    result
}

struct App {
    state: GameState,
    cursor: Cursor,
    drag: DragSession,
    flash: FlashTimer,
    store: HighScoreStore,
    saved_high_score: u32,
    started: Instant,
}

impl App {
    fn new(state: GameState, store: HighScoreStore) -> Self {
        let mut cursor = Cursor::new();
        cursor.clamp(&state);
        Self {
            saved_high_score: state.high_score(),
            state,
            cursor,
            drag: DragSession::new(),
            flash: FlashTimer::default(),
            store,
            started: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);
        let mut snap = GameSnapshot::default();

        loop {
            let viewport = term.viewport();
            let layout = view.layout(viewport);

            self.state.snapshot_into(&mut snap);
            let deco = self.decorations();
            view.render_into(&snap, &deco, viewport, &mut fb);
            term.present(&mut fb)?;

            if !event::poll(Duration::from_millis(FRAME_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        self.on_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(gesture) = handle_mouse_event(mouse) {
                        self.on_gesture(gesture, &layout);
                    }
                }
                Event::Resize(w, h) => term.resize(w, h),
                _ => {}
            }
        }
    }

    fn decorations(&self) -> Decorations {
        let now = self.now_ms();
        let preview = if self.drag.is_active() {
            self.drag.preview(&self.state)
        } else {
            self.cursor.preview(&self.state)
        };
        Decorations {
            preview,
            flash: self.flash.mask(now),
            selected_slot: (!self.state.is_terminal()).then(|| self.cursor.slot()),
            dragging_slot: self.drag.slot(),
        }
    }

    fn on_action(&mut self, action: GameAction) {
        self.drag.cancel();
        let outcome = self.cursor.apply(&mut self.state, action);
        if action == GameAction::Restart {
            self.flash.cancel();
            info!(episode = self.state.episode_id(), "game restarted");
        }
        if let Some(outcome) = outcome {
            self.on_outcome(&outcome);
        }
    }

    fn on_gesture(&mut self, gesture: Gesture, layout: &Layout) {
        match gesture {
            Gesture::Press { x, y } => {
                if let Some(slot) = layout.slot_at(x, y) {
                    if self.drag.begin(&self.state, slot) {
                        self.cursor.select(&self.state, slot);
                    }
                }
            }
            Gesture::Drag { x, y } => {
                if self.drag.is_active() {
                    self.drag
                        .hover(&self.state, layout.pointer(x, y), layout.geometry());
                }
            }
            Gesture::Release { x, y } => {
                if !self.drag.is_active() {
                    return;
                }
                self.drag
                    .hover(&self.state, layout.pointer(x, y), layout.geometry());
                if let Some(outcome) = self.drag.release(&mut self.state) {
                    self.on_outcome(&outcome);
                }
                self.cursor.clamp(&self.state);
                if self.state.tray().get(self.cursor.slot()).is_none() {
                    self.cursor.next_slot(&self.state);
                }
            }
        }
    }

    fn on_outcome(&mut self, outcome: &PlaceOutcome) {
        self.flash.trigger(&outcome.clear, self.now_ms());

        if self.state.high_score() > self.saved_high_score {
            self.saved_high_score = self.state.high_score();
            info!(high_score = self.saved_high_score, "new high score");
            if let Err(err) = self.store.save(self.saved_high_score) {
                warn!("could not save high score: {err:#}");
            }
        }
        if outcome.terminal {
            info!(score = self.state.score(), "game over");
        }
    }
}
