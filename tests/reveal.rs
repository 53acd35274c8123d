use std::time::{Duration, Instant};

use typewriter::backend::TerminalEvent;
use typewriter::{Dummy, Finish, Key, KeyPress, Terminal, Typewriter, Vec2};

fn quick(lines: &[&str]) -> Typewriter {
    Typewriter::new()
        .with_tick_interval(Duration::from_millis(2))
        .with_hold_duration(Duration::from_millis(5))
        .with_lines(lines.iter().copied())
}

#[test]
fn uneven_lines_reveal_in_lockstep() {
    let mut terminal = Terminal::new(Dummy::new((20, 5))).unwrap();
    let mut typewriter = quick(&["a", "", "abcd"]);

    let finish = typewriter.run_blocking(&mut terminal).unwrap();

    assert_eq!(finish, Finish::Completed);
    assert_eq!(
        terminal.backend().frames,
        [
            vec!["a", "", "a"],
            vec!["a", "", "ab"],
            vec!["a", "", "abc"],
            vec!["a", "", "abcd"],
        ]
    );
    assert_eq!(typewriter.lines(), ["a", "", "abcd"]);
}

#[test]
fn multibyte_characters_take_one_tick_each() {
    let mut terminal = Terminal::new(Dummy::new((20, 2))).unwrap();
    let mut typewriter = quick(&["héllo", "→→"]);

    typewriter.run_blocking(&mut terminal).unwrap();

    let frames = &terminal.backend().frames;
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[1], ["hé", "→→"]);
    assert_eq!(frames[4], ["héllo", "→→"]);
}

#[test]
fn escape_leaves_partial_frame() {
    let dummy = Dummy::new((20, 2)).with_key(Duration::from_millis(300), Key::Escape);
    let mut terminal = Terminal::new(dummy).unwrap();
    let mut typewriter = Typewriter::new()
        .with_tick_interval(Duration::from_millis(200))
        .with_hold_duration(Duration::from_secs(60))
        .with_lines(["Hello", "World"]);

    let start = Instant::now();
    let finish = typewriter.run_blocking(&mut terminal).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(finish, Finish::Terminated(KeyPress::from(Key::Escape)));
    assert!(elapsed < Duration::from_millis(700), "finished after {:?}", elapsed);
    assert_eq!(terminal.backend().frames, [vec!["H", "W"]]);
    assert_eq!(typewriter.lines(), ["H", "W"]);

    let mut printed = Vec::new();
    typewriter.write_lines(&mut printed).unwrap();
    assert_eq!(printed, b"H\nW\n");
}

#[test]
fn custom_key_replaces_escape() {
    let dummy = Dummy::new((20, 2))
        .with_key(Duration::ZERO, Key::Escape)
        .with_event(Duration::ZERO, TerminalEvent::Resize(Vec2::new(40, 10)))
        .with_key(Duration::from_millis(1), 'q');
    let mut terminal = Terminal::new(dummy).unwrap();
    let mut typewriter = quick(&["line"])
        .with_hold_duration(Duration::from_secs(60))
        .with_terminate_key(Key::Char('q'));

    let finish = typewriter.run_blocking(&mut terminal).unwrap();

    assert_eq!(finish, Finish::Terminated(KeyPress::from('q')));
}

#[test]
fn running_again_starts_from_the_stored_lines() {
    let mut terminal = Terminal::new(Dummy::new((20, 2))).unwrap();
    let mut typewriter = quick(&["ab"]);

    typewriter.run_blocking(&mut terminal).unwrap();
    typewriter.add_line("cde");
    typewriter.run_blocking(&mut terminal).unwrap();

    assert_eq!(
        terminal.backend().frames,
        [
            vec!["a"],
            vec!["ab"],
            vec!["a", "c"],
            vec!["ab", "cd"],
            vec!["ab", "cde"],
        ]
    );
    assert_eq!(typewriter.lines(), ["ab", "cde"]);
}

#[test]
fn play_sets_up_and_restores_the_terminal() {
    let mut typewriter = quick(&["ok"]);

    let finish = typewriter.play(Dummy::new((10, 1))).unwrap();

    assert_eq!(finish, Finish::Completed);
    assert_eq!(typewriter.lines(), ["ok"]);
}

#[test]
fn parses_key_names() {
    assert_eq!("escape".parse::<Key>().unwrap(), Key::Escape);
    assert_eq!("Esc".parse::<Key>().unwrap(), Key::Escape);
    assert_eq!("q".parse::<Key>().unwrap(), Key::Char('q'));
    assert_eq!("F5".parse::<Key>().unwrap(), Key::F(5));
    assert!("nonsense".parse::<Key>().is_err());
}
