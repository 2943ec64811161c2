use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use letter_twins::layout::{board_slots, hit_test};
use letter_twins::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use letter_twins::{Difficulty, GameController, Letter, Phase, Timing};
use ratatui::layout::Rect;

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 30,
};

fn fast_timing() -> Timing {
    Timing {
        loading_delay: Duration::from_millis(20),
        correct_delay: Duration::from_millis(40),
        wrong_pulse: Duration::from_millis(30),
    }
}

// Drive the controller from runner events the way the binary does, but with
// a fixed step per event so the test is deterministic.
fn pump(
    controller: &mut GameController,
    runner: &Runner<TestEventSource, FixedTicker>,
    steps: u32,
    mut until: impl FnMut(&GameController) -> bool,
) {
    for _ in 0..steps {
        match runner.step() {
            GameEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    let shown = Letter::new(c).filter(|letter| {
                        let round = controller.session().round();
                        round.is_some_and(|r| r.contains(*letter))
                    });
                    if let Some(letter) = shown {
                        controller.submit_letter_click(letter);
                    }
                }
            }
            GameEvent::Click { column, row } => {
                let letter = controller
                    .session()
                    .round()
                    .and_then(|round| hit_test(&board_slots(AREA, round), column, row));
                if let Some(letter) = letter {
                    controller.submit_letter_click(letter);
                }
            }
            GameEvent::Resize | GameEvent::Tick => {}
        }
        controller.advance(runner.tick_interval());
        if until(controller) {
            break;
        }
    }
}

#[test]
fn headless_round_flow_via_keyboard() {
    let mut controller = GameController::seeded(fast_timing(), 2024);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    controller.select_difficulty(Difficulty::Easy);
    pump(&mut controller, &runner, 100, |c| {
        c.session().phase() == Phase::RoundActive
    });
    assert_eq!(controller.session().phase(), Phase::RoundActive);

    let target = controller.session().round().unwrap().target();
    tx.send(GameEvent::Key(KeyEvent::new(
        KeyCode::Char(target.to_ascii_lowercase()),
        KeyModifiers::NONE,
    )))
    .unwrap();

    pump(&mut controller, &runner, 1, |_| true);
    assert_eq!(controller.session().score(), 1);
    assert_eq!(controller.session().phase(), Phase::RoundResolvedCorrect);

    // Correct feedback, then loading, then a fresh round.
    pump(&mut controller, &runner, 100, |c| {
        c.session().phase() == Phase::RoundActive
    });
    assert_eq!(controller.session().phase(), Phase::RoundActive);
    assert_eq!(controller.session().score(), 1);
}

#[test]
fn headless_click_flow() {
    let mut controller = GameController::seeded(fast_timing(), 99);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    controller.select_difficulty(Difficulty::Hard);
    pump(&mut controller, &runner, 100, |c| {
        c.session().phase() == Phase::RoundActive
    });

    let round = controller.session().round().unwrap().clone();
    let slots = board_slots(AREA, &round);
    let miss = slots.iter().find(|s| !round.is_target(s.letter)).unwrap();
    let hit = slots.iter().find(|s| round.is_target(s.letter)).unwrap();

    tx.send(GameEvent::Click {
        column: miss.x,
        row: miss.y,
    })
    .unwrap();
    pump(&mut controller, &runner, 1, |_| true);
    assert_eq!(controller.session().wrong_guesses(), 1);
    assert!(controller.session().is_wrong_pulse_active());
    assert_eq!(controller.session().score(), 0);

    tx.send(GameEvent::Click {
        column: hit.x,
        row: hit.y,
    })
    .unwrap();
    pump(&mut controller, &runner, 1, |_| true);
    assert_eq!(controller.session().score(), 1);
    assert_eq!(controller.session().stars(), 4);
}

#[test]
fn scenario_easy_round_b() {
    use letter_twins::{Round, Session};

    let letters = |s: &str| s.chars().filter_map(Letter::new).collect::<Vec<_>>();
    let round = Round::new('B', letters("KBRQ"), letters("MNBX")).unwrap();

    let session = Session::new().select_difficulty(Difficulty::Easy);
    let generation = session.generation();
    let session = session.install_round(generation, round);

    let (after_hit, hit) = session.clone().submit_letter(Letter::upper('B'));
    assert!(hit.is_match());
    assert_eq!(after_hit.score(), 1);

    let (after_miss, miss) = session.submit_letter(Letter::upper('K'));
    assert!(!miss.is_match());
    assert_eq!(after_miss.wrong_guesses(), 1);
    assert_eq!(after_miss.score(), 0);
}

#[test]
fn menu_then_hard_produces_lowercase_eventually() {
    let mut controller = GameController::seeded(fast_timing(), 5);
    controller.select_difficulty(Difficulty::Easy);
    controller.advance(Duration::from_millis(20));
    let target = controller.session().round().unwrap().target();
    controller.submit_letter_click(Letter::upper(target));

    controller.return_to_menu();
    assert_eq!(controller.session().score(), 0);
    assert_eq!(controller.session().difficulty(), None);

    let mut saw_lowercase = false;
    for _ in 0..50 {
        controller.select_difficulty(Difficulty::Hard);
        controller.advance(Duration::from_millis(20));
        let round = controller.session().round().unwrap();
        assert_eq!(round.letters_per_circle(), 8);
        saw_lowercase |= round
            .circles()
            .iter()
            .any(|c| c.iter().any(Letter::is_lowercase));
    }
    assert!(saw_lowercase);
}
