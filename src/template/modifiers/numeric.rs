// ABOUTME: Arithmetic modifiers over numeric input
// ABOUTME: Non-numeric input and non-finite results pass the original value through

use std::sync::Arc;

use super::value::{as_number, number_value, parse_number};
use super::{ModifierRegistry, Transform};

const MAX_PRECISION: i32 = 15;

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("add", |params, _| with_operand(params, |n, x| n + x));
    registry.register("subtract", |params, _| with_operand(params, |n, x| n - x));
    registry.register("multiply", |params, _| with_operand(params, |n, x| n * x));
    registry.register("divide", |params, _| {
        let divisor = parse_number(params.first()?)?;
        if divisor == 0.0 {
            return None;
        }
        Some(numeric(move |n| n / divisor))
    });

    registry.register("increment", |params, _| {
        let step = optional_step(params)?;
        Some(numeric(move |n| n + step))
    });
    registry.register("decrement", |params, _| {
        let step = optional_step(params)?;
        Some(numeric(move |n| n - step))
    });

    registry.register("round", |params, _| {
        let precision = params
            .first()
            .and_then(|p| p.trim().parse::<i32>().ok())
            .unwrap_or(0)
            .clamp(-MAX_PRECISION, MAX_PRECISION);
        let scale = 10f64.powi(precision);
        Some(numeric(move |n| (n * scale).round() / scale))
    });
    registry.register("ceil", |_, _| Some(numeric(f64::ceil)));
    registry.register("floor", |_, _| Some(numeric(f64::floor)));
}

/// Apply `op` to numeric input
pub fn numeric<F>(op: F) -> Transform
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Arc::new(move |input| {
        match as_number(&input).map(&op).and_then(number_value) {
            Some(result) => result,
            None => input,
        }
    })
}

fn with_operand(params: &[String], op: fn(f64, f64) -> f64) -> Option<Transform> {
    let operand = parse_number(params.first()?)?;
    Some(numeric(move |n| op(n, operand)))
}

/// A step parameter that defaults to 1 when absent or blank
fn optional_step(params: &[String]) -> Option<f64> {
    match params.first().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        Some(step) => parse_number(step),
        None => Some(1.0),
    }
}
