//! Railway-oriented result types.
//!
//! [`Outcome`] is produced where a fallible fetch is executed and
//! classified; [`DomainResult`] is what use cases hand to presentation.
//! Both are two-track containers with the same combinator set: a value
//! moves along the success track until something fails, after which the
//! [`ErrorKind`] travels unchanged to the end of the chain unless it is
//! explicitly recovered with `catch`.
//!
//! ```rust,ignore
//! let titles = repository
//!     .get_popular()
//!     .await
//!     .filter(|page| page.shows.is_some())
//!     .map(|page| page.titles())
//!     .tap_error(|err| tracing::warn!(%err, "popular fetch failed"));
//! ```

use crate::errors::{classify, ErrorKind};
use std::future::Future;

/// Message carried by the validation error `filter` produces.
pub const FILTER_FAILURE_MESSAGE: &str = "Predicate not met for filter.";

/// Sentinel code carried by the validation error `filter` produces.
pub const FILTER_FAILURE_CODE: i32 = -1;

macro_rules! railway_result {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[must_use]
        pub enum $name<T> {
            /// The operation produced a value.
            Success(T),
            /// The operation failed.
            Error(ErrorKind),
        }

        impl<T> $name<T> {
            /// Returns true on the success track.
            pub fn is_success(&self) -> bool {
                matches!(self, Self::Success(_))
            }

            /// Returns true on the error track.
            pub fn is_error(&self) -> bool {
                matches!(self, Self::Error(_))
            }

            /// Borrows the success value, if any.
            pub fn value(&self) -> Option<&T> {
                match self {
                    Self::Success(value) => Some(value),
                    Self::Error(_) => None,
                }
            }

            /// Borrows the error, if any.
            pub fn error(&self) -> Option<&ErrorKind> {
                match self {
                    Self::Success(_) => None,
                    Self::Error(error) => Some(error),
                }
            }

            /// Converts into a standard `Result` so `?` can be used.
            pub fn into_result(self) -> Result<T, ErrorKind> {
                match self {
                    Self::Success(value) => Ok(value),
                    Self::Error(error) => Err(error),
                }
            }

            /// Transforms the success value. Errors pass through untouched.
            pub fn map<U, F>(self, f: F) -> $name<U>
            where
                F: FnOnce(T) -> U,
            {
                match self {
                    Self::Success(value) => $name::Success(f(value)),
                    Self::Error(error) => $name::Error(error),
                }
            }

            /// Chains another fallible step onto the success value.
            ///
            /// Chains stop at the first error; later steps are never run.
            pub fn flat_map<U, F>(self, f: F) -> $name<U>
            where
                F: FnOnce(T) -> $name<U>,
            {
                match self {
                    Self::Success(value) => f(value),
                    Self::Error(error) => $name::Error(error),
                }
            }

            /// Moves a success that fails `predicate` onto the error track.
            ///
            /// The rejection is a [`ErrorKind::ValidationError`] carrying
            /// [`FILTER_FAILURE_MESSAGE`] and [`FILTER_FAILURE_CODE`].
            pub fn filter<P>(self, predicate: P) -> Self
            where
                P: FnOnce(&T) -> bool,
            {
                match self {
                    Self::Success(value) => {
                        if predicate(&value) {
                            Self::Success(value)
                        } else {
                            Self::Error(ErrorKind::validation(
                                FILTER_FAILURE_MESSAGE,
                                FILTER_FAILURE_CODE,
                            ))
                        }
                    }
                    Self::Error(error) => Self::Error(error),
                }
            }

            /// Transforms the success value into an optional one, failing
            /// with `error` when the transformation yields `None`.
            pub fn map_some_or<U, F>(self, error: ErrorKind, f: F) -> $name<U>
            where
                F: FnOnce(T) -> Option<U>,
            {
                match self {
                    Self::Success(value) => match f(value) {
                        Some(mapped) => $name::Success(mapped),
                        None => $name::Error(error),
                    },
                    Self::Error(existing) => $name::Error(existing),
                }
            }

            /// Pairs two independent results.
            ///
            /// The left error wins over the right one; `other` is only
            /// consulted when `self` is a success.
            pub fn zip<U>(self, other: $name<U>) -> $name<(T, U)> {
                match (self, other) {
                    (Self::Error(error), _) => $name::Error(error),
                    (Self::Success(_), $name::Error(error)) => $name::Error(error),
                    (Self::Success(left), $name::Success(right)) => $name::Success((left, right)),
                }
            }

            /// Turns a sequence of results into a result of a sequence.
            ///
            /// Items are pulled in iteration order and the first error is
            /// returned as soon as it is seen, so nothing after it is read.
            pub fn sequence<I>(items: I) -> $name<Vec<T>>
            where
                I: IntoIterator<Item = Self>,
            {
                let mut values = Vec::new();
                for item in items {
                    match item {
                        Self::Success(value) => values.push(value),
                        Self::Error(error) => return $name::Error(error),
                    }
                }
                $name::Success(values)
            }

            /// Runs `f` on the success value for side effects.
            pub fn tap_success<F>(self, f: F) -> Self
            where
                F: FnOnce(&T),
            {
                if let Self::Success(value) = &self {
                    f(value);
                }
                self
            }

            /// Runs `f` on the error for side effects.
            pub fn tap_error<F>(self, f: F) -> Self
            where
                F: FnOnce(&ErrorKind),
            {
                if let Self::Error(error) = &self {
                    f(error);
                }
                self
            }

            /// Replaces an error with whatever `f` recovers from it.
            pub fn catch<F>(self, f: F) -> Self
            where
                F: FnOnce(ErrorKind) -> Self,
            {
                match self {
                    Self::Success(value) => Self::Success(value),
                    Self::Error(error) => f(error),
                }
            }

            /// Calls `action` when this is a success, then returns `self`.
            ///
            /// `action` runs at most once per result.
            pub fn on_success<F>(self, action: F) -> Self
            where
                F: FnOnce(&T),
            {
                if let Self::Success(value) = &self {
                    action(value);
                }
                self
            }

            /// Calls `action` when this is an error, then returns `self`.
            ///
            /// `action` runs at most once per result.
            pub fn on_error<F>(self, action: F) -> Self
            where
                F: FnOnce(&ErrorKind),
            {
                if let Self::Error(error) = &self {
                    action(error);
                }
                self
            }
        }

        impl<T> From<Result<T, ErrorKind>> for $name<T> {
            fn from(result: Result<T, ErrorKind>) -> Self {
                match result {
                    Ok(value) => Self::Success(value),
                    Err(error) => Self::Error(error),
                }
            }
        }

        impl<T> From<$name<T>> for Result<T, ErrorKind> {
            fn from(result: $name<T>) -> Self {
                result.into_result()
            }
        }

        impl<T> FromIterator<$name<T>> for $name<Vec<T>> {
            fn from_iter<I: IntoIterator<Item = $name<T>>>(iter: I) -> Self {
                $name::sequence(iter)
            }
        }
    };
}

railway_result! {
    /// Transport-tier result of executing and classifying one fetch.
    Outcome
}

railway_result! {
    /// App-tier result consumed by orchestration and presentation.
    DomainResult
}

impl<T> Outcome<T> {
    /// Projects into the app tier, keeping the variant.
    pub fn to_domain_result(self) -> DomainResult<T> {
        match self {
            Self::Success(value) => DomainResult::Success(value),
            Self::Error(error) => DomainResult::Error(error),
        }
    }
}

impl<T> From<Outcome<T>> for DomainResult<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.to_domain_result()
    }
}

impl ErrorKind {
    /// Wraps this error in an [`Outcome::Error`].
    pub fn as_error<T>(self) -> Outcome<T> {
        Outcome::Error(self)
    }
}

/// Wraps any value in an [`Outcome::Success`].
pub trait AsSuccess: Sized {
    /// Returns `Outcome::Success(self)`.
    fn as_success(self) -> Outcome<Self> {
        Outcome::Success(self)
    }
}

impl<T> AsSuccess for T {}

/// Runs a fallible operation once and classifies its failure.
///
/// This is the only place a raw transport failure becomes an
/// [`ErrorKind`]; nothing unclassified gets past it.
pub async fn execute<T, F>(operation: F) -> Outcome<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match operation.await {
        Ok(value) => Outcome::Success(value),
        Err(failure) => Outcome::Error(classify(failure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Cause;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::io;

    fn e1() -> ErrorKind {
        ErrorKind::unknown(Cause::msg("E1"))
    }

    fn e2() -> ErrorKind {
        ErrorKind::network(Cause::msg("E2"))
    }

    fn filter_failure() -> ErrorKind {
        ErrorKind::validation("Predicate not met for filter.", -1)
    }

    #[test]
    fn test_map_transforms_success_only() {
        assert_eq!(Outcome::Success(2).map(|x| x * 10), Outcome::Success(20));
        assert_eq!(Outcome::<i32>::Error(e1()).map(|x| x * 10), Outcome::Error(e1()));
    }

    #[test]
    fn test_flat_map_stops_at_first_error() {
        let calls = Cell::new(0);
        let result = Outcome::Success(1)
            .flat_map(|_| Outcome::<i32>::Error(e1()))
            .flat_map(|x| {
                calls.set(calls.get() + 1);
                Outcome::Success(x + 1)
            });

        assert_eq!(result, Outcome::Error(e1()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_zip_left_error_wins() {
        assert_eq!(Outcome::Success(1).zip(Outcome::Success(2)), Outcome::Success((1, 2)));
        assert_eq!(
            Outcome::<i32>::Error(e1()).zip(Outcome::Success(2)),
            Outcome::Error(e1())
        );
        assert_eq!(
            Outcome::Success(1).zip(Outcome::<i32>::Error(e2())),
            Outcome::Error(e2())
        );
        assert_eq!(
            Outcome::<i32>::Error(e1()).zip(Outcome::<i32>::Error(e2())),
            Outcome::Error(e1())
        );
    }

    #[test]
    fn test_sequence() {
        assert_eq!(Outcome::<i32>::sequence(Vec::new()), Outcome::Success(Vec::new()));
        assert_eq!(
            Outcome::sequence(vec![Outcome::Success(1), Outcome::Success(2), Outcome::Success(3)]),
            Outcome::Success(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_sequence_never_reads_past_first_error() {
        let inspected = Cell::new(0);
        let items = vec![Outcome::Success(1), Outcome::Error(e1()), Outcome::Success(3)];

        let result = Outcome::sequence(items.into_iter().inspect(|_| {
            inspected.set(inspected.get() + 1);
        }));

        assert_eq!(result, Outcome::Error(e1()));
        assert_eq!(inspected.get(), 2);
    }

    #[test]
    fn test_collect_uses_sequence() {
        let collected: DomainResult<Vec<i32>> =
            (1..=3).map(DomainResult::Success).collect();
        assert_eq!(collected, DomainResult::Success(vec![1, 2, 3]));
    }

    #[test]
    fn test_filter() {
        assert_eq!(Outcome::Success(5).filter(|x| *x > 0), Outcome::Success(5));
        assert_eq!(Outcome::Success(-1).filter(|x| *x > 0), Outcome::Error(filter_failure()));
        assert_eq!(Outcome::<i32>::Error(e1()).filter(|_| false), Outcome::Error(e1()));
    }

    #[test]
    fn test_filter_error_carries_sentinel() {
        let err = DomainResult::Success("").filter(|s| !s.is_empty());

        match err {
            DomainResult::Error(ErrorKind::ValidationError { body, code, cause }) => {
                assert_eq!(body, serde_json::json!(FILTER_FAILURE_MESSAGE));
                assert_eq!(code, FILTER_FAILURE_CODE);
                assert!(cause.is_none());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_catch() {
        assert_eq!(Outcome::Success(5).catch(|_| Outcome::Success(9)), Outcome::Success(5));
        assert_eq!(Outcome::Error(e1()).catch(|_| Outcome::Success(9)), Outcome::Success(9));
    }

    #[test]
    fn test_map_some_or() {
        let missing = ErrorKind::validation("missing results", 0);

        assert_eq!(
            Outcome::Success(Some(4)).map_some_or(missing.clone(), |v| v),
            Outcome::Success(4)
        );
        assert_eq!(
            Outcome::Success(None::<i32>).map_some_or(missing.clone(), |v| v),
            Outcome::Error(missing.clone())
        );
        assert_eq!(
            Outcome::<Option<i32>>::Error(e1()).map_some_or(missing, |v| v),
            Outcome::Error(e1())
        );
    }

    #[test]
    fn test_taps_only_fire_on_their_track() {
        let seen_value = Cell::new(None);
        let seen_error = Cell::new(false);

        let success = Outcome::Success(7)
            .tap_success(|v| seen_value.set(Some(*v)))
            .tap_error(|_| seen_error.set(true));
        assert_eq!(success, Outcome::Success(7));
        assert_eq!(seen_value.get(), Some(7));
        assert!(!seen_error.get());

        seen_value.set(None);
        let failure = Outcome::<i32>::Error(e1())
            .tap_success(|v| seen_value.set(Some(*v)))
            .tap_error(|_| seen_error.set(true));
        assert_eq!(failure, Outcome::Error(e1()));
        assert_eq!(seen_value.get(), None);
        assert!(seen_error.get());
    }

    #[test]
    fn test_on_hooks_return_original() {
        let calls = Cell::new(0);

        let result = DomainResult::<i32>::Error(e2())
            .on_success(|_| calls.set(calls.get() + 10))
            .on_error(|_| calls.set(calls.get() + 1));

        assert_eq!(result, DomainResult::Error(e2()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_as_success_and_as_error() {
        assert_eq!("payload".as_success(), Outcome::Success("payload"));
        assert_eq!(e1().as_error::<u8>(), Outcome::Error(e1()));
    }

    #[test]
    fn test_to_domain_result_keeps_variant() {
        assert_eq!(Outcome::Success(3).to_domain_result(), DomainResult::Success(3));
        assert_eq!(
            DomainResult::<i32>::from(Outcome::Error(e2())),
            DomainResult::Error(e2())
        );
    }

    #[test]
    fn test_result_interop() {
        let result: Result<i32, ErrorKind> = Outcome::Success(1).into();
        assert_eq!(result.unwrap(), 1);

        let back: Outcome<i32> = Err(e1()).into();
        assert_eq!(back, Outcome::Error(e1()));
    }

    #[tokio::test]
    async fn test_execute_success() {
        let result = execute(async { Ok::<_, anyhow::Error>(42) }).await;
        assert_eq!(result, Outcome::Success(42));
    }

    #[tokio::test]
    async fn test_execute_classifies_failures() {
        let timeout = execute(async {
            Err::<(), _>(anyhow::Error::new(io::Error::new(io::ErrorKind::TimedOut, "slow")))
        })
        .await;
        let network = execute(async {
            Err::<(), _>(anyhow::Error::new(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
        })
        .await;
        let unknown = execute(async { Err::<(), _>(anyhow::anyhow!("bad payload")) }).await;

        assert!(matches!(timeout, Outcome::Error(ErrorKind::TimeoutError { .. })));
        assert!(matches!(network, Outcome::Error(ErrorKind::NetworkError { .. })));
        assert!(matches!(unknown, Outcome::Error(ErrorKind::UnknownError { .. })));
    }

    #[tokio::test]
    async fn test_execute_runs_operation_once() {
        let runs = std::sync::atomic::AtomicUsize::new(0);
        let _ = execute(async {
            runs.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err::<(), _>(anyhow::anyhow!("fail"))
        })
        .await;

        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    fn arb_outcome() -> impl Strategy<Value = Outcome<i32>> {
        prop_oneof![
            any::<i32>().prop_map(Outcome::Success),
            "[a-z]{1,8}".prop_map(|m| Outcome::Error(ErrorKind::unknown(Cause::msg(m)))),
        ]
    }

    fn halve(x: i32) -> Outcome<i32> {
        if x % 2 == 0 {
            Outcome::Success(x / 2)
        } else {
            Outcome::Error(ErrorKind::validation("odd", x))
        }
    }

    fn shrink(x: i32) -> Outcome<i32> {
        if x > 1000 {
            Outcome::Error(ErrorKind::validation("too large", x))
        } else {
            Outcome::Success(x.wrapping_sub(3))
        }
    }

    proptest! {
        #[test]
        fn functor_identity(o in arb_outcome()) {
            prop_assert_eq!(o.clone().map(|x| x), o);
        }

        #[test]
        fn functor_composition(o in arb_outcome()) {
            let f = |x: i32| x.wrapping_mul(3);
            let g = |x: i32| x.wrapping_add(7);
            prop_assert_eq!(o.clone().map(|x| g(f(x))), o.map(f).map(g));
        }

        #[test]
        fn monad_left_identity(x in any::<i32>()) {
            prop_assert_eq!(Outcome::Success(x).flat_map(halve), halve(x));
        }

        #[test]
        fn monad_right_identity(o in arb_outcome()) {
            prop_assert_eq!(o.clone().flat_map(Outcome::Success), o);
        }

        #[test]
        fn monad_associativity(o in arb_outcome()) {
            prop_assert_eq!(
                o.clone().flat_map(halve).flat_map(shrink),
                o.flat_map(|x| halve(x).flat_map(shrink))
            );
        }

        #[test]
        fn domain_result_monad_laws(o in arb_outcome(), x in any::<i32>()) {
            let d = o.to_domain_result();
            let halve_d = |v: i32| halve(v).to_domain_result();
            let shrink_d = |v: i32| shrink(v).to_domain_result();

            prop_assert_eq!(DomainResult::Success(x).flat_map(halve_d), halve_d(x));
            prop_assert_eq!(d.clone().flat_map(DomainResult::Success), d.clone());
            prop_assert_eq!(
                d.clone().flat_map(halve_d).flat_map(shrink_d),
                d.flat_map(|v| halve_d(v).flat_map(shrink_d))
            );
        }
    }
}
