use std::fmt;
use std::sync::Arc;

use immutable_json::Value;

/// The encoding role: `A → Value`. Encoding never fails.
pub trait EncodeJson<A> {
    fn to_json(&self, value: &A) -> Value;
}

type EncodeFn<A> = dyn Fn(&A) -> Value + Send + Sync;

/// A reusable, stateless encoder.
pub struct Encoder<A> {
    run: Arc<EncodeFn<A>>,
}

impl<A> Clone for Encoder<A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<A> fmt::Debug for Encoder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder").finish_non_exhaustive()
    }
}

impl<A: 'static> Encoder<A> {
    pub fn new(f: impl Fn(&A) -> Value + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(f) }
    }

    pub fn to_json(&self, value: &A) -> Value {
        (self.run)(value)
    }

    /// Encodes a `B` by first turning it into an `A`.
    pub fn contramap<B: 'static>(self, f: impl Fn(&B) -> A + Send + Sync + 'static) -> Encoder<B> {
        let run = self.run;
        Encoder::new(move |b| run(&f(b)))
    }

    /// `None` encodes as `null`.
    pub fn option(self) -> Encoder<Option<A>> {
        let run = self.run;
        Encoder::new(move |opt: &Option<A>| opt.as_ref().map_or(Value::Null, |a| run(a)))
    }

    pub fn list(self) -> Encoder<Vec<A>> {
        let run = self.run;
        Encoder::new(move |items: &Vec<A>| Value::Array(items.iter().map(|a| run(a)).collect()))
    }

    /// Encodes any iterable container as an array, in iteration order.
    pub(crate) fn iterable<C>(self) -> Encoder<C>
    where
        C: 'static,
        for<'a> &'a C: IntoIterator<Item = &'a A>,
    {
        let run = self.run;
        Encoder::new(move |items: &C| Value::Array(items.into_iter().map(|a| run(a)).collect()))
    }
}

impl<A: 'static> EncodeJson<A> for Encoder<A> {
    fn to_json(&self, value: &A) -> Value {
        Encoder::to_json(self, value)
    }
}
