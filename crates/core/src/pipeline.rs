//! Chain combinators for injecting work into a pipeline of calls.
//!
//! Two shapes, and the difference between them is the whole point:
//!
//! - [`tap_effect`] / [`Tap::tap`]: hand the value to a closure for a side
//!   effect, **discard** whatever the closure returns, pass the original value
//!   on.
//! - [`pipe`] / [`Pipe::pipe`]: hand the value to a closure and pass the
//!   closure's return value on. The original value is gone unless the closure
//!   returns it.
//!
//! ```
//! use tapline_core::{Pipe, Tap};
//!
//! let seen = std::cell::Cell::new(0);
//! let n = 21_i32.tap(|n| seen.set(*n)).pipe(|n| n * 2);
//! assert_eq!((seen.get(), n), (21, 42));
//! ```

/// Call `effect` with a borrow of `value`, ignore its result, return `value`.
pub fn tap_effect<T, R>(value: T, effect: impl FnOnce(&T) -> R) -> T {
    let _ = effect(&value);
    value
}

/// Apply `f` to `value` and return whatever `f` returns.
pub fn pipe<T, R>(value: T, f: impl FnOnce(T) -> R) -> R {
    f(value)
}

/// Receiver-preserving injection, available on every sized type.
pub trait Tap: Sized {
    /// See [`tap_effect`].
    fn tap<R>(self, effect: impl FnOnce(&Self) -> R) -> Self {
        tap_effect(self, effect)
    }

    /// Like [`Tap::tap`], but lends the value mutably.
    fn tap_mut<R>(mut self, effect: impl FnOnce(&mut Self) -> R) -> Self {
        let _ = effect(&mut self);
        self
    }
}

impl<T> Tap for T {}

/// Value-replacing injection, available on every sized type.
pub trait Pipe: Sized {
    /// See [`pipe`].
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        pipe(self, f)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Ticket {
        number: String,
    }

    fn ticket() -> Ticket {
        Ticket {
            number: "INV-5309".to_string(),
        }
    }

    #[test]
    fn tap_keeps_receiver_when_block_returns_something_else() {
        let log = RefCell::new(Vec::new());
        let out = ticket().tap(|t| {
            log.borrow_mut().push(format!("Updating {}", t.number));
            true
        });
        assert_eq!(out, ticket());
        assert_eq!(log.into_inner(), vec!["Updating INV-5309".to_string()]);
    }

    #[test]
    fn pipe_replaces_receiver_with_block_result() {
        let log = RefCell::new(Vec::new());
        let out: bool = ticket().pipe(|t| {
            log.borrow_mut().push(format!("Updating {}", t.number));
            true
        });
        assert!(out);
        assert_eq!(log.into_inner().len(), 1);
    }

    #[test]
    fn pipe_returning_its_argument_behaves_like_tap() {
        let piped = ticket().pipe(|t| {
            let _ = t.number.len();
            t
        });
        let tapped = ticket().tap(|t| t.number.len());
        assert_eq!(piped, tapped);
    }

    #[test]
    fn tap_mut_passes_on_the_adjusted_value() {
        let out = ticket().tap_mut(|t| t.number.push_str("-A"));
        assert_eq!(out.number, "INV-5309-A");
    }

    #[test]
    fn free_functions_match_the_methods() {
        assert_eq!(tap_effect(7, |n| n + 1), 7);
        assert_eq!(pipe(7, |n| n + 1), 8);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: tap is the identity on its input regardless of the block result.
        #[test]
        fn tap_is_identity_on_receiver(value in any::<i64>(), noise in any::<u8>()) {
            prop_assert_eq!(tap_effect(value, |_| noise), value);
            prop_assert_eq!(value.tap(|v| v.wrapping_mul(3)), value);
        }

        /// Property: pipe is plain function application.
        #[test]
        fn pipe_is_application(value in any::<i32>()) {
            let f = |v: i32| i64::from(v) * 2;
            prop_assert_eq!(pipe(value, f), f(value));
            prop_assert_eq!(value.pipe(f), f(value));
        }
    }
}
