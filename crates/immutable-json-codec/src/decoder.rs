use std::fmt;
use std::sync::Arc;

use immutable_json::Value;

use crate::field::FieldDecoder;
use crate::{decoders, DecodeError, DecodeResult, DecodeResultExt};

/// Types that can flow through the combinators: owned, cloneable for default
/// values, and shareable across threads.
pub trait CodecValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> CodecValue for T {}

/// The decoding role: `Value → DecodeResult<A>`, plus an optional fallback
/// used when the value sits in a missing or malformed object field.
pub trait DecodeJson<A> {
    fn from_json(&self, value: &Value) -> DecodeResult<A>;

    fn default_value(&self) -> Option<A> {
        None
    }
}

type DecodeFn<A> = dyn Fn(&Value) -> DecodeResult<A> + Send + Sync;

/// A reusable, stateless decoder.
pub struct Decoder<A> {
    run: Arc<DecodeFn<A>>,
    default: Option<A>,
}

impl<A: Clone> Clone for Decoder<A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            default: self.default.clone(),
        }
    }
}

impl<A> fmt::Debug for Decoder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("has_default", &self.default.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: CodecValue> Decoder<A> {
    pub fn new(f: impl Fn(&Value) -> DecodeResult<A> + Send + Sync + 'static) -> Self {
        Self {
            run: Arc::new(f),
            default: None,
        }
    }

    pub fn from_json(&self, value: &Value) -> DecodeResult<A> {
        (self.run)(value)
    }

    pub fn default_value(&self) -> Option<A> {
        self.default.clone()
    }

    pub fn with_default_value(self, default: A) -> Self {
        Self {
            run: self.run,
            default: Some(default),
        }
    }

    pub(crate) fn with_default_option(self, default: Option<A>) -> Self {
        Self {
            run: self.run,
            default,
        }
    }

    /// Maps the decoded value. The default value is not carried over.
    pub fn map<B: CodecValue>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Decoder<B> {
        let run = self.run;
        Decoder::new(move |value| run(value).map(&f))
    }

    pub fn flat_map<B: CodecValue>(
        self,
        f: impl Fn(A) -> DecodeResult<B> + Send + Sync + 'static,
    ) -> Decoder<B> {
        let run = self.run;
        Decoder::new(move |value| run(value).and_then(&f))
    }

    /// Maps through a fallible conversion; its error message becomes the
    /// decode failure.
    pub fn try_map<B, E>(self, f: impl Fn(A) -> Result<B, E> + Send + Sync + 'static) -> Decoder<B>
    where
        B: CodecValue,
        E: fmt::Display,
    {
        self.flat_map(move |a| f(a).map_err(DecodeError::msg))
    }

    pub fn filter(
        self,
        predicate: impl Fn(&A) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let default = self.default.clone();
        let run = self.run;
        Decoder::new(move |value| run(value).filter_with(&predicate, || message.clone()))
            .with_default_option(default)
    }

    pub fn option(self) -> Decoder<Option<A>> {
        decoders::option(self)
    }

    pub fn list(self) -> Decoder<Vec<A>> {
        decoders::list(self)
    }

    pub fn field(self, name: impl Into<String>) -> FieldDecoder<A> {
        FieldDecoder::new(name, self)
    }
}

impl<A: CodecValue> DecodeJson<A> for Decoder<A> {
    fn from_json(&self, value: &Value) -> DecodeResult<A> {
        Decoder::from_json(self, value)
    }

    fn default_value(&self) -> Option<A> {
        Decoder::default_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immutable_json::ValueKind;

    fn even() -> Decoder<i64> {
        decoders::i64().filter(|n| n % 2 == 0, "odd number")
    }

    #[test]
    fn test_map_and_flat_map() {
        let doubled = decoders::i32().map(|n| n * 2);
        assert_eq!(doubled.from_json(&Value::from(21)), Ok(42));

        let positive = decoders::i32().flat_map(|n| {
            if n > 0 {
                Ok(n)
            } else {
                Err(DecodeError::msg("not positive"))
            }
        });
        assert_eq!(
            positive.from_json(&Value::from(-1)).unwrap_err().to_string(),
            "not positive"
        );
    }

    #[test]
    fn test_map_drops_default() {
        let d = decoders::i32().with_default_value(5).map(|n| n + 1);
        assert_eq!(d.default_value(), None);
    }

    #[test]
    fn test_filter_keeps_default() {
        let d = even().with_default_value(0);
        assert_eq!(d.from_json(&Value::from(4)), Ok(4));
        assert_eq!(d.from_json(&Value::from(3)).unwrap_err().to_string(), "odd number");
        assert_eq!(d.filter(|_| true, "x").default_value(), Some(0));
    }

    #[test]
    fn test_try_map() {
        let parsed = decoders::string().try_map(|s| s.parse::<u8>());
        assert_eq!(parsed.from_json(&Value::from("7")), Ok(7));
        assert_eq!(
            parsed.from_json(&Value::from("300")).unwrap_err().to_string(),
            "number too large to fit in target type"
        );
        assert_eq!(
            parsed.from_json(&Value::from(7)),
            Err(DecodeError::type_mismatch(ValueKind::Number, ValueKind::String))
        );
    }

    #[test]
    fn test_decoders_are_shareable() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let d = decoders::string().list();
        assert_send_sync(&d);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let d = d.clone();
                std::thread::spawn(move || d.from_json(&Value::array([i.to_string()])))
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), Ok(vec![i.to_string()]));
        }
    }
}
