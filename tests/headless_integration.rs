use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hangmath::{
    app::App,
    config::MemoryConfigStore,
    game::{Game, GameState},
    question::ScriptedQuestions,
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    sound::BellSink,
};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

fn scripted_app(pairs: &[(u32, u32)]) -> App<ScriptedQuestions> {
    App::new(
        Game::with_source(ScriptedQuestions::new(pairs.to_vec())),
        Box::new(MemoryConfigStore::default()),
        Box::new(BellSink::new(std::io::sink())),
    )
}

/// Drive the app the same way `start_tui` does, minus the terminal.
/// `time_scale` stretches the measured step time so countdowns run fast.
fn drive(
    app: &mut App<ScriptedQuestions>,
    runner: &mut Runner<TestEventSource, FixedTicker>,
    steps: u32,
    time_scale: u32,
) {
    for _ in 0..steps {
        let step = runner.step();
        app.on_tick(step.elapsed * time_scale);
        match step.event {
            AppEvent::Tick => {}
            AppEvent::Key(k) => app.on_key(k),
            AppEvent::Resize(w, h) => app.on_resize(w, h),
        }
        if app.should_quit {
            break;
        }
    }
}

// Headless integration using the internal runtime without a TTY
#[test]
fn headless_menu_to_first_answer() {
    let mut app = scripted_app(&[(3, 4), (2, 5)]);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for ev in [key('1'), key('1'), key('2'), enter()] {
        tx.send(ev).unwrap();
    }
    drive(&mut app, &mut runner, 4, 1);

    let session = app.session();
    assert_eq!(session.state, GameState::Playing);
    assert_eq!(session.score, 10);
    assert_eq!(session.current_question.map(|q| q.answer), Some(10));
}

#[test]
fn headless_six_misses_end_the_game() {
    let mut app = scripted_app(&[(3, 4)]);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key('3')).unwrap();
    for _ in 0..6 {
        tx.send(key('9')).unwrap();
        tx.send(enter()).unwrap();
    }
    drive(&mut app, &mut runner, 13, 1);

    let session = app.session();
    assert_eq!(session.state, GameState::GameOver);
    assert_eq!(session.mistakes, 6);
    assert_eq!(session.lives_left(), 0);
    assert_eq!(session.time_left, 0);
}

#[test]
fn headless_resize_and_quit() {
    let mut app = scripted_app(&[(3, 4)]);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(AppEvent::Resize(120, 40)).unwrap();
    tx.send(key('q')).unwrap();
    drive(&mut app, &mut runner, 10, 1);

    assert_eq!(app.viewport, (120, 40));
    assert!(app.should_quit);
}

#[test]
fn headless_round_times_out_without_input() {
    let mut app = scripted_app(&[(6, 7)]);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key('3')).unwrap();
    drive(&mut app, &mut runner, 1, 1);
    assert_eq!(app.session().state, GameState::Playing);
    assert_eq!(app.session().time_left, 7);

    // every 5ms tick counts as at least half a second of play
    let mut steps = 0;
    while app.session().mistakes == 0 && steps < 200 {
        drive(&mut app, &mut runner, 1, 100);
        steps += 1;
    }

    let session = app.session();
    assert_eq!(session.mistakes, 1);
    assert_eq!(session.score, 0);
    assert_eq!(session.state, GameState::Playing);
    drop(tx);
}
