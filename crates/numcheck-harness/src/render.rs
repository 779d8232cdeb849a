//! Human-readable rendering of boundary values for diagnostics.

use num_bigint::BigInt;
use numcheck_model::Felt;

/// Diagnostic rendering. Felts use the `e >= P/2 => e - P` heuristic, so a
/// negative integer prints as itself rather than as its field encoding.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Felt {
    fn render(&self) -> String {
        self.to_signed().to_string()
    }
}

impl Render for BigInt {
    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! render_display {
    ($($t:ty),*) => {
        $(impl Render for $t {
            fn render(&self) -> String {
                self.to_string()
            }
        })*
    };
}

render_display!(bool, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

/// Felt sequences, such as sentinel-terminated digit lists, render as `[..]`.
impl<T: Render> Render for Vec<T> {
    fn render(&self) -> String {
        render_results(self)
    }
}

/// `(a, b, c)` for argument lists.
pub fn render_args<A: Render>(args: &[A]) -> String {
    let parts: Vec<String> = args.iter().map(Render::render).collect();
    format!("({})", parts.join(", "))
}

/// `[a, b, c]` for result lists.
pub fn render_results<R: Render>(results: &[R]) -> String {
    let parts: Vec<String> = results.iter().map(Render::render).collect();
    format!("[{}]", parts.join(", "))
}
