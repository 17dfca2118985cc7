use std::cell::Cell;
use std::collections::VecDeque;

use eyre::{ensure, Result};
use itertools::Itertools;

use lazyseq_adaptors_rs::{
    drop, dropping, filter, join, map, mapping, repeat, split, take, taking, zip, Dropped,
    Filter, Map, Repeat, Taken, Zip,
};
use lazyseq_core_rs::{
    engine, ConstDual, EngineState, Owned, Pipe, Position, PositionMut, Sequence, SequenceMut,
    SizedSequence, Traversal, View, ViewMut,
};

const VALUES: [i32; 6] = [1, 2, 3, 4, 5, 6];

#[test]
fn drop_then_take_knows_its_size() -> Result<()> {
    let values = VALUES.to_vec();
    let window: &[i32] = take(drop(&values, 2), 3);
    ensure!(window == [3, 4, 5], "unexpected window {window:?}");

    let deque: VecDeque<i32> = VALUES.into_iter().collect();
    let window = drop(&deque, 2).pipe(taking(3));
    ensure!(window.known_len() == Some(3), "length must be known without traversal");
    ensure!((&window).elements().copied().collect_vec() == [3, 4, 5]);

    let owned = drop(values, 2).pipe(taking(3));
    ensure!((&owned).size() == 3);
    ensure!((&owned).elements().copied().collect_vec() == [3, 4, 5]);
    Ok(())
}

#[test]
fn split_on_a_delimiter() -> Result<()> {
    let text = "thisXisXaXtest";
    let expected = ["this", "is", "a", "test"];

    let segments = split(text, 'X');
    let borrowed = (&segments)
        .elements()
        .map(|segment| (&segment).elements().collect::<String>())
        .collect_vec();
    ensure!(borrowed == expected, "multi-pass split gave {borrowed:?}");

    let pulled = split(engine::pull(text.chars()), 'X')
        .map(String::from_iter)
        .collect_vec();
    ensure!(pulled == expected, "single-pass split gave {pulled:?}");
    Ok(())
}

#[test]
fn flatten_forward_and_backward() -> Result<()> {
    let nested: Vec<Vec<i32>> = vec![vec![], vec![1, 2, 3], vec![], vec![4, 5], vec![6]];

    let flat = join(&nested);
    let forward = (&flat).elements().copied().collect_vec();
    let backward = (&flat).elements().rev().copied().collect_vec();
    ensure!(forward == VALUES);
    ensure!(backward == VALUES.into_iter().rev().collect_vec());

    let pulled = join(engine::pull(nested)).collect_vec();
    ensure!(pulled == VALUES);
    Ok(())
}

#[test]
fn rebind_keeps_the_offset() -> Result<()> {
    let old = vec![10, 20, 30, 40, 50];
    let new = old.clone();

    let mut position = (&old).position();
    position.advance();
    position.advance();
    let rebound: Position<&Vec<i32>> = position.rebind(&new);

    ensure!(*rebound.cursor() == 2);
    ensure!(rebound.get() == &30);
    ensure!(std::ptr::eq(*rebound.seq(), &new), "position must point into the new container");
    Ok(())
}

#[test]
fn owning_copies_are_independent() -> Result<()> {
    let original = Owned::new(vec![1, 2, 3]);
    let mut copy = original.clone();

    PositionMut::new(&mut copy, 0).set(100);
    ensure!((&copy).elements().copied().collect_vec() == [100, 2, 3]);
    ensure!((&original).elements().copied().collect_vec() == [1, 2, 3]);
    Ok(())
}

#[test]
fn take_pulls_exactly_n() -> Result<()> {
    let pulled = Cell::new(0);
    let source = (0..100).inspect(|_| pulled.set(pulled.get() + 1));
    let mut prefix = engine::pull(source)
        .pipe(mapping(|x: i32| x * 10))
        .pipe(taking(5));

    let collected = prefix.by_ref().collect_vec();
    ensure!(collected == [0, 10, 20, 30, 40]);
    ensure!(pulled.get() == 5, "pulled {} elements instead of 5", pulled.get());
    ensure!(prefix.state() == EngineState::Finished);
    Ok(())
}

#[test]
fn capabilities_are_never_strengthened() -> Result<()> {
    type Input<'a> = View<&'a Vec<i32>>;
    type Writes<'x> = ViewMut<'x, Vec<i32>>;
    type Square = fn(&i32) -> i32;
    type Odd = fn(&&i32) -> bool;

    let input = <&Input as Sequence>::CATEGORY;
    let writes = <&Writes as Sequence>::CATEGORY;
    for (name, category, base, traversal, sized, common, mutable) in [
        (
            "map",
            <&Map<Input, Square> as Sequence>::CATEGORY,
            input,
            Traversal::RandomAccess,
            true,
            true,
            false,
        ),
        (
            "filter",
            <&Filter<Input, Odd> as Sequence>::CATEGORY,
            input,
            Traversal::Bidirectional,
            false,
            false,
            false,
        ),
        (
            "filter of map",
            <&Filter<Map<Input, Square>, fn(&i32) -> bool> as Sequence>::CATEGORY,
            input,
            Traversal::Bidirectional,
            false,
            false,
            false,
        ),
        (
            "filter of a writable window",
            <&Filter<Writes, Odd> as Sequence>::CATEGORY,
            writes,
            Traversal::Bidirectional,
            false,
            false,
            true,
        ),
        (
            "drop of a writable window",
            <&Dropped<Writes> as Sequence>::CATEGORY,
            writes,
            Traversal::RandomAccess,
            true,
            true,
            true,
        ),
    ] {
        category.ensure_no_stronger_than(&base)?;
        ensure!(category.traversal == traversal, "{name}: {category:?}");
        ensure!(category.sized == sized, "{name}: {category:?}");
        ensure!(category.common == common, "{name}: {category:?}");
        ensure!(category.mutable == mutable, "{name}: {category:?}");
    }
    Ok(())
}

#[test]
fn writes_pass_through_stacked_adaptors() -> Result<()> {
    let mut values = VALUES.to_vec();
    let mut middle = take(drop(ViewMut::new(&mut values), 1), 3);
    let mut cursor = (&middle).begin();
    while !(&middle).is_end(&cursor) {
        *middle.read_at_mut(&cursor) = 0;
        (&middle).inc(&mut cursor);
    }

    let middle: Taken<Dropped<View<&Vec<i32>>>> = middle.into_const();
    ensure!((&middle).elements().copied().collect_vec() == [0, 0, 0]);
    ensure!(values == [1, 0, 0, 0, 5, 6], "unexpected values {values:?}");
    Ok(())
}

#[test]
fn adaptors_compose_through_the_pipe() -> Result<()> {
    let values = (1..=20).collect_vec();
    let result = filter(&values, |x: &&i32| **x % 2 == 1)
        .pipe(mapping(|x: &i32| x * x))
        .pipe(dropping(1))
        .pipe(taking(3));
    ensure!((&result).elements().collect_vec() == [9, 25, 49]);

    let labelled = zip(&values, repeat('#'));
    let labels = (&labelled)
        .elements()
        .take(2)
        .map(|(x, c)| format!("{c}{x}"))
        .collect_vec();
    ensure!(labels == ["#1", "#2"]);

    let category = <&Zip<View<&Vec<i32>>, Repeat<char>> as Sequence>::CATEGORY;
    ensure!(!category.infinite && !category.sized);

    let squares = map(&values, |x: &i32| x * x);
    ensure!((&squares).size() == 20);
    Ok(())
}
