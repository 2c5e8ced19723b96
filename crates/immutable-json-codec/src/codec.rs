use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use immutable_json::Value;
use tracing::trace;

use crate::field::NamedCodec;
use crate::{
    decoders, encoders, CodecValue, DecodeJson, DecodeResult, Decoder, EncodeJson, Encoder,
};

/// A total mapping between two representations of the same information.
pub struct Iso<A, B> {
    get: Arc<dyn Fn(&A) -> B + Send + Sync>,
    reverse_get: Arc<dyn Fn(&B) -> A + Send + Sync>,
}

impl<A, B> Clone for Iso<A, B> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            reverse_get: Arc::clone(&self.reverse_get),
        }
    }
}

impl<A, B> fmt::Debug for Iso<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iso").finish_non_exhaustive()
    }
}

impl<A, B> Iso<A, B> {
    pub fn new(
        get: impl Fn(&A) -> B + Send + Sync + 'static,
        reverse_get: impl Fn(&B) -> A + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            reverse_get: Arc::new(reverse_get),
        }
    }

    pub fn get(&self, a: &A) -> B {
        (self.get)(a)
    }

    pub fn reverse_get(&self, b: &B) -> A {
        (self.reverse_get)(b)
    }

    pub fn reverse(self) -> Iso<B, A> {
        Iso {
            get: self.reverse_get,
            reverse_get: self.get,
        }
    }
}

/// A decoder and an encoder for the same type.
pub struct Codec<A> {
    decoder: Decoder<A>,
    encoder: Encoder<A>,
}

impl<A: Clone> Clone for Codec<A> {
    fn clone(&self) -> Self {
        Self {
            decoder: self.decoder.clone(),
            encoder: self.encoder.clone(),
        }
    }
}

impl<A> fmt::Debug for Codec<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("decoder", &self.decoder)
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl<A: CodecValue> Codec<A> {
    pub fn new(
        decode: impl Fn(&Value) -> DecodeResult<A> + Send + Sync + 'static,
        encode: impl Fn(&A) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::lift(Decoder::new(decode), Encoder::new(encode))
    }

    /// Pairs a decoder with an encoder. The decoder's default is kept.
    pub fn lift(decoder: Decoder<A>, encoder: Encoder<A>) -> Self {
        Self { decoder, encoder }
    }

    pub fn lift_with_default(decoder: Decoder<A>, encoder: Encoder<A>, default: A) -> Self {
        Self::lift(decoder.with_default_value(default), encoder)
    }

    /// Builds a codec for an object-shaped type from a decoding function over
    /// objects and an encoder.
    pub fn object(
        decode: impl Fn(&immutable_json::JsonObject) -> DecodeResult<A> + Send + Sync + 'static,
        encoder: Encoder<A>,
    ) -> Self {
        Self::lift(decoders::object(decode), encoder)
    }

    pub fn decoder(&self) -> &Decoder<A> {
        &self.decoder
    }

    pub fn encoder(&self) -> &Encoder<A> {
        &self.encoder
    }

    pub fn into_parts(self) -> (Decoder<A>, Encoder<A>) {
        (self.decoder, self.encoder)
    }

    pub fn from_json(&self, value: &Value) -> DecodeResult<A> {
        self.decoder.from_json(value)
    }

    pub fn to_json(&self, value: &A) -> Value {
        self.encoder.to_json(value)
    }

    pub fn default_value(&self) -> Option<A> {
        self.decoder.default_value()
    }

    pub fn with_default_value(self, default: A) -> Self {
        Self {
            decoder: self.decoder.with_default_value(default),
            encoder: self.encoder,
        }
    }

    /// Maps both directions through total functions. The default value is not
    /// carried over.
    pub fn xmap<B: CodecValue>(
        self,
        f: impl Fn(A) -> B + Send + Sync + 'static,
        g: impl Fn(&B) -> A + Send + Sync + 'static,
    ) -> Codec<B> {
        Codec {
            decoder: self.decoder.map(f),
            encoder: self.encoder.contramap(g),
        }
    }

    pub fn xmapi<B: CodecValue>(self, iso: Iso<A, B>) -> Codec<B> {
        let reverse = iso.clone();
        self.xmap(move |a| iso.get(&a), move |b| reverse.reverse_get(b))
    }

    /// Decodes an `A`, then narrows it to a `B`. A rejected narrowing becomes
    /// a decode failure carrying the narrowing error's message.
    pub fn narrow<B, E>(
        self,
        f: impl Fn(A) -> Result<B, E> + Send + Sync + 'static,
        g: impl Fn(&B) -> A + Send + Sync + 'static,
    ) -> Codec<B>
    where
        B: CodecValue,
        E: fmt::Display,
    {
        Codec {
            decoder: self.decoder.try_map(f),
            encoder: self.encoder.contramap(g),
        }
    }

    /// Like [`Codec::narrow`], for a narrowing function that panics on bad
    /// input. The panic is caught and its message becomes the failure.
    pub fn try_narrow<B: CodecValue>(
        self,
        f: impl Fn(A) -> B + Send + Sync + 'static,
        g: impl Fn(&B) -> A + Send + Sync + 'static,
    ) -> Codec<B> {
        self.narrow(
            move |a| {
                panic::catch_unwind(AssertUnwindSafe(|| f(a))).map_err(|payload| {
                    let message = panic_message(payload.as_ref());
                    trace!(%message, "narrowing panicked");
                    message
                })
            },
            g,
        )
    }

    pub fn option(self) -> Codec<Option<A>> {
        Codec {
            decoder: decoders::option(self.decoder),
            encoder: encoders::option(self.encoder),
        }
    }

    pub fn list(self) -> Codec<Vec<A>> {
        Codec {
            decoder: decoders::list(self.decoder),
            encoder: encoders::list(self.encoder),
        }
    }

    pub fn set(self) -> Codec<HashSet<A>>
    where
        A: Eq + Hash,
    {
        Codec {
            decoder: decoders::set(self.decoder),
            encoder: encoders::set(self.encoder),
        }
    }

    pub fn field(self, name: impl Into<String>) -> NamedCodec<A> {
        NamedCodec::new(name, self)
    }
}

impl<A: CodecValue> DecodeJson<A> for Codec<A> {
    fn from_json(&self, value: &Value) -> DecodeResult<A> {
        self.decoder.from_json(value)
    }

    fn default_value(&self) -> Option<A> {
        self.decoder.default_value()
    }
}

impl<A: CodecValue> EncodeJson<A> for Codec<A> {
    fn to_json(&self, value: &A) -> Value {
        self.encoder.to_json(value)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "narrowing panicked".to_string()
    }
}
