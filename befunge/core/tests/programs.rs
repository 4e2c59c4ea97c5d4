use befunge_core::{
    run_until_halted, Direction, Machine, ScriptedRandom, Value, HEIGHT, WIDTH,
};

const MAX_TICKS: u64 = 1_000;

fn run(source: &str) -> Machine<ScriptedRandom> {
    let mut machine = Machine::with_random(source, ScriptedRandom::new([]));
    machine.set_trace(false);
    run_until_halted(&mut machine, MAX_TICKS)
        .unwrap_or_else(|err| panic!("{source:?} failed to halt: {err}"));
    machine
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn add_halts_with_sum() {
    assert_eq!(run("13+@").stack(), ints(&[4]));
}

#[test]
fn subtract_uses_next_minus_top() {
    assert_eq!(run("35-14--@").stack(), ints(&[1]));
}

#[test]
fn multiply() {
    assert_eq!(run("79*@").stack(), ints(&[63]));
}

#[test]
fn divide_truncates_toward_zero() {
    assert_eq!(run("82/@").stack(), ints(&[4]));
    assert_eq!(run("94/@").stack(), ints(&[2]));
    assert_eq!(run("09-4/@").stack(), ints(&[-2]));
}

#[test]
fn logical_not() {
    assert_eq!(run("0!@").stack(), ints(&[1]));
    assert_eq!(run("1!@").stack(), ints(&[0]));
    assert_eq!(run("14-!@").stack(), ints(&[0]));
}

#[test]
fn greater_than() {
    assert_eq!(run("21`@").stack(), ints(&[1]));
    assert_eq!(run("12`@").stack(), ints(&[0]));
    assert_eq!(run("22`@").stack(), ints(&[0]));
}

#[test]
fn stack_manipulation() {
    assert_eq!(run("9:@").stack(), ints(&[9, 9]));
    assert_eq!(run("42\\@").stack(), ints(&[2, 4]));
    assert_eq!(run("123$@").stack(), ints(&[1, 2]));
}

#[test]
fn output_opcodes() {
    assert_eq!(run("99*.@").output(), "81");
    assert_eq!(run("25*62**,@").output(), "x");
}

#[test]
fn bridge_skips_next_cell() {
    assert_eq!(run("#12@").stack(), ints(&[2]));
}

#[test]
fn get_reads_grid_cell() {
    assert_eq!(run("40g@7").stack(), ints(&[7]));
}

#[test]
fn put_modifies_program_text() {
    let machine = run("650p@");
    assert!(machine.program().starts_with("650p@6"));
    assert!(machine.stack().is_empty());
}

#[test]
fn string_mode_captures_embedded_halt() {
    let expected: Vec<Value> = "hello@".chars().map(Value::Char).collect();
    assert_eq!(run("\"hello@\"@").stack(), expected);
    assert_eq!(
        run("\"hi@\"@").stack(),
        vec![Value::Char('h'), Value::Char('i'), Value::Char('@')]
    );
}

#[test]
fn hello_world_prints_in_order() {
    // Leading 0 terminates the loop; an empty stack pops Undefined, not 0.
    let machine = run("0\"!dlrow olleh\">:#,_@");
    assert_eq!(machine.output(), "hello world!");
}

#[test]
fn self_modification_changes_later_execution() {
    // Writes '@' (64) over the cell at (9,0) before the pointer reaches it.
    let machine = run("88*90p  5x");
    assert_eq!(machine.pos(), (9, 0));
    assert_eq!(machine.stack(), ints(&[5]));
}

#[test]
fn random_direction_is_injectable() {
    let mut machine = Machine::with_random("?\n@", ScriptedRandom::new([Direction::Down]));
    machine.set_trace(false);
    run_until_halted(&mut machine, MAX_TICKS).expect("halts");
    assert_eq!(machine.pos(), (0, 1));
}

#[test]
fn horizontal_branch() {
    assert_eq!(run("v _@\n>0^").pos(), (3, 0));
    assert_eq!(run("v@_\n>9^").pos(), (1, 0));
}

#[test]
fn vertical_branch() {
    assert_eq!(run("0|\n @").pos(), (1, 1));
    assert_eq!(run("v @\n>1|").pos(), (2, 0));
}

fn ticked(source: &str, ticks: usize) -> Machine {
    let mut machine = Machine::new(source);
    machine.set_trace(false);
    for _ in 0..ticks {
        machine.tick();
    }
    machine
}

#[test]
fn pointer_wraps_right_edge() {
    assert_eq!(ticked("", WIDTH).pos(), (0, 0));
}

#[test]
fn pointer_wraps_bottom_edge() {
    assert_eq!(ticked("v", HEIGHT + 1).pos(), (0, 1));
}

#[test]
fn pointer_wraps_left_edge() {
    assert_eq!(ticked("<", 1).pos(), (WIDTH - 1, 0));
}

#[test]
fn pointer_wraps_top_edge() {
    assert_eq!(ticked("^", 1).pos(), (0, HEIGHT - 1));
}

#[test]
fn pointer_turns_right_after_down() {
    assert_eq!(ticked("v\n>", 2).pos(), (1, 1));
}

#[test]
fn underflow_policy_is_undefined_not_fatal() {
    let machine = run("+.5@");
    assert_eq!(machine.stack(), ints(&[5]));
    assert_eq!(machine.output(), "");
}

#[test]
fn division_by_zero_is_undefined() {
    assert_eq!(run("50/@").stack(), vec![Value::Undefined]);
}

#[test]
fn put_then_get_keeps_digit_codes() {
    // 48 is the code of '0'; it must come back as 48, not as the digit.
    assert_eq!(run("68*25*1p25*1g@").stack(), ints(&[48]));
    assert_eq!(run("025*-25*1p25*1g@").stack(), ints(&[-10]));
}

#[test]
fn put_of_newline_keeps_program_shape() {
    let machine = run("25*55p@");
    let program = machine.program();
    let rows: Vec<&str> = program.split('\n').collect();
    assert_eq!(rows.len(), HEIGHT);
    assert!(rows.iter().all(|row| row.chars().count() == WIDTH));
    assert_eq!(machine.snapshot().rows().count(), HEIGHT);
}
