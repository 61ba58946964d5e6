use core::cell::Cell;
use keycalc::{Binding, Engine, Session, SessionOptions};

fn type_in(session: &mut Session, keys: &str) -> usize {
    keys.chars().filter(|c| session.push(*c)).count()
}

#[test]
fn test_keypad_round_trip() {
    let mut session = Session::default();
    type_in(&mut session, "2+3*4");
    assert_eq!(session.equals().unwrap(), 14.0);
    assert_eq!(session.recall(), Some("14.00"));

    type_in(&mut session, "10/4");
    assert_eq!(session.display(), "10/4");
    assert_eq!(session.equals().unwrap(), 2.5);
    assert_eq!(session.display(), "2.50");
}

#[test]
fn test_buffer_holds_capacity_minus_one() {
    let mut session = Session::default();
    let keys = "1+".repeat(40);
    assert_eq!(type_in(&mut session, &keys), 63);
    assert_eq!(session.input().len(), 63);
}

#[test]
fn test_failed_equals_clears_input() {
    let mut session = Session::default();
    type_in(&mut session, "1+");
    let err = session.equals().unwrap_err();
    assert_eq!(err.offset(), Some(2));
    assert_eq!(session.input(), "");
    assert_eq!(session.recall(), Some("NaN"));
}

#[test]
fn test_negative_answer_with_precision() {
    let mut session = Session::new(SessionOptions {
        precision: 0,
        ..SessionOptions::default()
    });
    type_in(&mut session, "-7/2");
    session.equals().unwrap();
    assert_eq!(session.recall(), Some("-4"));
}

#[test]
fn test_session_with_engine() {
    let memory = Cell::new(42.0);
    let engine = Engine::default();
    let bindings = [Binding::variable("m", &memory)];

    let mut session = Session::default();
    type_in(&mut session, "m/2");
    assert_eq!(session.equals_with(&engine, &bindings).unwrap(), 21.0);
    assert_eq!(session.recall(), Some("21.00"));
}
