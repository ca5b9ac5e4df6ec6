use super::{branch, Flow, NextLine, Strategy};
use crate::runtime::{error::TraceResult, frame::Line, state::VariableState, value::Value};

/// ```text
/// 1 if num mod 3 = 0 and num mod 5 = 0 then
/// 2   print "FizzBuzz"
/// 3 else if num mod 3 = 0 then
/// 4   print "Fizz"
/// 5 else if num mod 5 = 0 then
/// 6   print "Buzz"
/// 7 else
/// 8   print num
/// 9 end if
/// ```
pub struct FizzBuzz;

const END_IF: Line = 9;

impl Strategy for FizzBuzz {
    fn step(&self, line: Line, state: &mut VariableState) -> TraceResult<Flow> {
        match line {
            2 => say(state, Value::from("FizzBuzz")),
            4 => say(state, Value::from("Fizz")),
            6 => say(state, Value::from("Buzz")),
            8 => {
                let num = state.get("num")?.clone();
                say(state, num);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn next_line(&self, line: Line, state: &VariableState) -> TraceResult<NextLine> {
        Ok(match line {
            1 => {
                let num = state.int("num")?;
                branch(divisible(num, 3) && divisible(num, 5), 2, 3)
            }
            3 => branch(divisible(state.int("num")?, 3), 4, 5),
            5 => branch(divisible(state.int("num")?, 5), 6, 7),
            2 | 4 | 6 | 8 => NextLine::Goto(END_IF),
            _ => NextLine::Defer,
        })
    }
}

fn say(state: &mut VariableState, value: Value) {
    state.print(value.printed());
    state.set("result", value);
}

fn divisible(num: i64, by: i64) -> bool {
    num.rem_euclid(by) == 0
}
