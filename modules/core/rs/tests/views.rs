use std::cell::Cell;
use std::collections::VecDeque;

use eyre::{ensure, Result};
use itertools::Itertools;

use lazyseq_core_rs::{engine, ConstDual, EngineState, Owned, PositionMut, Sequence, View, ViewMut};

fn ensure_consistent<S: Sequence>(view: &View<S>) -> Result<()> {
    let cached = view.known_len();
    let walked = view.elements().count();
    ensure!(cached == Some(walked), "cached {cached:?} but walked {walked}");
    Ok(())
}

#[test]
fn cached_length_follows_every_shift() -> Result<()> {
    let values = vec![1, 2, 3, 4, 5, 6, 7];
    let deque: VecDeque<i32> = values.iter().copied().collect();

    let view = View::new(&values);
    for shifted in [view.next(), view.advance(3), view.next().prev(), view.offset(2)] {
        ensure_consistent(&shifted)?;
    }
    let view = View::new(&deque);
    for shifted in [view.next(), view.advance(9), view.subview(1..4), view.offset(5)] {
        ensure_consistent(&shifted)?;
    }
    Ok(())
}

#[test]
fn const_duals_read_the_same_elements() -> Result<()> {
    let mut values: Vec<i32> = vec![3, 1, 4, 1, 5];

    let mut writable = ViewMut::new(&mut values);
    writable.for_each_mut(|x| *x *= 2);
    let readable = writable.into_const();
    ensure!((&readable).elements().copied().collect_vec() == [6, 2, 8, 2, 10]);
    ensure!(readable.clone().into_const() == readable);

    let position = PositionMut::new(&mut values, 2).into_const();
    ensure!(position.get() == &8);
    Ok(())
}

#[test]
fn owning_wrapper_survives_its_source() -> Result<()> {
    let owned = {
        let source = String::from("temporary");
        Owned::new(source.clone())
    };
    let copy = owned.clone();
    ensure!((&copy).elements().collect::<String>() == "temporary");
    ensure!(!copy.is_empty_state());
    ensure!(Owned::<String>::default().is_empty_state());
    Ok(())
}

#[test]
fn abandoned_engine_runs_nothing_more() -> Result<()> {
    let produced = Cell::new(0);
    let mut counter = engine::from_fn(|| {
        produced.set(produced.get() + 1);
        Some(produced.get())
    });

    ensure!(counter.state() == EngineState::Created);
    ensure!(counter.peek() == Some(&1));
    ensure!(counter.peek() == Some(&1), "peeking twice must not resume");
    ensure!(counter.next() == Some(1));
    ensure!(counter.state() == EngineState::Running);
    std::mem::drop(counter);

    ensure!(produced.get() == 1, "produced {} values", produced.get());
    Ok(())
}
