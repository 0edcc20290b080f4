use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use tilebox_core::{
    splitmix32, MoveOutcome, PuzzleAction, PuzzleEvent, PuzzleGame, SurfaceHooks,
};

use crate::config::AppConfig;
use crate::dom_surface::DomGridSurface;

pub const CONTAINER_ID: &str = "puzzle-container";
pub const SHUFFLE_BUTTON_ID: &str = "shuffle-btn";
pub const MOVE_COUNTER_ID: &str = "move-counter";

type SharedGame = Rc<RefCell<PuzzleGame<DomGridSurface>>>;

thread_local! {
    static PUZZLE_VIEW: RefCell<Option<PuzzleView>> = RefCell::new(None);
}

pub struct PuzzleView {
    game: SharedGame,
    _listeners: Vec<EventListener>,
}

impl PuzzleView {
    pub fn game(&self) -> &SharedGame {
        &self.game
    }

    pub fn dispatch(&self, action: PuzzleAction) {
        dispatch(&Rc::downgrade(&self.game), action);
    }
}

/// Mounts the puzzle on the page's puzzle container. Does nothing when the
/// container is missing.
pub fn run(config: &AppConfig) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
        gloo::console::log!("puzzle: no container, skipping", CONTAINER_ID);
        return;
    };
    let counter = document.get_element_by_id(MOVE_COUNTER_ID);
    let surface = DomGridSurface::new(document.clone(), container, counter);
    let mut view = mount(surface, config);
    if let Some(button) = document.get_element_by_id(SHUFFLE_BUTTON_ID) {
        let game = Rc::downgrade(&view.game);
        view._listeners.push(EventListener::new(&button, "click", move |_| {
            dispatch(&game, PuzzleAction::Shuffle);
        }));
    } else {
        gloo::console::warn!("puzzle: no shuffle button", SHUFFLE_BUTTON_ID);
    }
    PUZZLE_VIEW.with(|slot| {
        *slot.borrow_mut() = Some(view);
    });
}

/// Wires a game to an existing surface and applies the start-up config.
pub fn mount(surface: DomGridSurface, config: &AppConfig) -> PuzzleView {
    let game = Rc::new(RefCell::new(PuzzleGame::new(
        config.rules,
        surface,
        clock_seed(),
    )));
    let weak = Rc::downgrade(&game);
    game.borrow_mut().subscribe(SurfaceHooks {
        on_action: Rc::new(move |action| dispatch(&weak, action)),
    });
    let view = PuzzleView {
        game,
        _listeners: Vec::new(),
    };
    if config.auto_shuffle {
        view.dispatch(PuzzleAction::Shuffle);
    }
    view
}

fn dispatch(game: &Weak<RefCell<PuzzleGame<DomGridSurface>>>, action: PuzzleAction) {
    let Some(game) = game.upgrade() else {
        return;
    };
    let Ok(mut game) = game.try_borrow_mut() else {
        gloo::console::warn!("puzzle: action dropped during dispatch", format!("{action:?}"));
        return;
    };
    let event = game.apply_action(action);
    log_event(&event);
}

fn log_event(event: &PuzzleEvent) {
    match event {
        PuzzleEvent::Moved {
            outcome: MoveOutcome::Solved { moves },
            ..
        } => {
            gloo::console::log!("puzzle: solved", *moves);
        }
        PuzzleEvent::Shuffled { steps } => {
            gloo::console::log!("puzzle: shuffled", *steps as u32);
        }
        PuzzleEvent::DragRejected { index, reason } => {
            gloo::console::log!(
                "puzzle: drag rejected",
                *index as u32,
                format!("{reason:?}")
            );
        }
        _ => {}
    }
}

fn clock_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let jitter = (js_sys::Math::random() * u32::MAX as f64) as u32;
    let low = splitmix32(now as u32);
    let high = splitmix32((now >> 32) as u32 ^ jitter.wrapping_add(0x9E37_79B9));
    (u64::from(high) << 32) | u64::from(low)
}
