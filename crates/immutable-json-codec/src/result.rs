//! The outcome of a decode.
//!
//! [`DecodeResult`] is a plain `Result`, so `map`, `and_then` (bind), `ok`
//! (to `Option`) and `?` work as usual. [`DecodeResultExt`] adds the folds and
//! escalation points, and the free functions provide the two accumulation
//! strategies: [`sequence`] keeps every failure, [`sequence_first`] stops at
//! the first one.

use tracing::debug;

use crate::DecodeError;

pub type DecodeResult<A> = Result<A, DecodeError>;

pub fn ok<A>(value: A) -> DecodeResult<A> {
    Ok(value)
}

pub fn fail<A>(message: impl std::fmt::Display) -> DecodeResult<A> {
    Err(DecodeError::msg(message))
}

pub fn from_option<A>(value: Option<A>) -> DecodeResult<A> {
    from_option_with(value, || "No value found".to_string())
}

pub fn from_option_with<A>(value: Option<A>, error: impl FnOnce() -> String) -> DecodeResult<A> {
    value.ok_or_else(|| DecodeError::Message(error()))
}

/// Collects every result, failing with all failure messages when any fail.
///
/// The combined failure is a [`DecodeError::Aggregate`], rendered as
/// `One or more results failed: ` followed by the messages joined by `\n`.
pub fn sequence<A, I>(results: I) -> DecodeResult<Vec<A>>
where
    I: IntoIterator<Item = DecodeResult<A>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) => errors.push(err),
        }
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(DecodeError::Aggregate(errors))
    }
}

/// Collects every result, failing with the first failure in iteration order.
pub fn sequence_first<A, I>(results: I) -> DecodeResult<Vec<A>>
where
    I: IntoIterator<Item = DecodeResult<A>>,
{
    results.into_iter().collect()
}

pub trait DecodeResultExt<A>: Sized {
    /// Fails with `Filter failed` when the predicate rejects the value.
    fn filter(self, predicate: impl FnOnce(&A) -> bool) -> DecodeResult<A> {
        self.filter_with(predicate, || "Filter failed".to_string())
    }

    fn filter_with(
        self,
        predicate: impl FnOnce(&A) -> bool,
        error: impl FnOnce() -> String,
    ) -> DecodeResult<A>;

    /// Eliminates both branches into one value.
    fn fold<B>(self, on_fail: impl FnOnce(&DecodeError) -> B, on_ok: impl FnOnce(A) -> B) -> B;

    /// Runs exactly one of the callbacks.
    fn consume(self, on_fail: impl FnOnce(&DecodeError), on_ok: impl FnOnce(A)) {
        self.fold(on_fail, on_ok)
    }

    fn for_each(self, f: impl FnOnce(A)) {
        self.consume(|_| {}, f)
    }

    fn get_or_else(self, default: impl FnOnce() -> A) -> A {
        self.fold(|_| default(), |a| a)
    }

    /// Escalates a failure into the caller's error type, built from the message.
    fn get_or_else_throw<E>(self, error: impl FnOnce(String) -> E) -> Result<A, E> {
        self.fold(|err| Err(error(err.message())), Ok)
    }

    /// Returns the value or panics with the failure message.
    fn unsafe_get(self) -> A;

    fn is_failure(&self) -> bool;
}

impl<A> DecodeResultExt<A> for DecodeResult<A> {
    fn filter_with(
        self,
        predicate: impl FnOnce(&A) -> bool,
        error: impl FnOnce() -> String,
    ) -> DecodeResult<A> {
        self.and_then(|a| {
            if predicate(&a) {
                Ok(a)
            } else {
                Err(DecodeError::Message(error()))
            }
        })
    }

    fn fold<B>(self, on_fail: impl FnOnce(&DecodeError) -> B, on_ok: impl FnOnce(A) -> B) -> B {
        match self {
            Ok(a) => on_ok(a),
            Err(err) => on_fail(&err),
        }
    }

    fn unsafe_get(self) -> A {
        match self {
            Ok(a) => a,
            Err(err) => {
                debug!(error = %err, "unsafe_get on a failed decode");
                panic!("{err}")
            }
        }
    }

    fn is_failure(&self) -> bool {
        self.is_err()
    }
}
