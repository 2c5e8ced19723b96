//! Text in, typed values out, and back.

use std::io::Read;

use immutable_json::{JsonParser, ParseError, WriteOptions};
use tracing::debug;

use crate::{DecodeError, DecodeJson, DecodeResult, EncodeJson};

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        DecodeError::Message(err.to_string())
    }
}

/// Parses then decodes in one step. A parse failure becomes a
/// [`DecodeError::Message`] carrying the parser's message.
pub trait ParseAndDecode: JsonParser {
    fn decode_str<A, D>(&self, input: &str, decoder: &D) -> DecodeResult<A>
    where
        D: DecodeJson<A> + ?Sized,
    {
        let value = self.parse_str(input).inspect_err(|err| {
            debug!(error = %err, "input rejected before decoding");
        })?;
        decoder.from_json(&value)
    }

    fn decode_slice<A, D>(&self, input: &[u8], decoder: &D) -> DecodeResult<A>
    where
        D: DecodeJson<A> + ?Sized,
    {
        let value = self.parse_slice(input).inspect_err(|err| {
            debug!(error = %err, "input rejected before decoding");
        })?;
        decoder.from_json(&value)
    }

    fn decode_reader<A, D, R>(&self, reader: R, decoder: &D) -> DecodeResult<A>
    where
        Self: Sized,
        D: DecodeJson<A> + ?Sized,
        R: Read,
    {
        let value = self.parse_reader(reader).inspect_err(|err| {
            debug!(error = %err, "input rejected before decoding");
        })?;
        decoder.from_json(&value)
    }
}

impl<P: JsonParser + ?Sized> ParseAndDecode for P {}

pub fn encode_to_string<A, E>(encoder: &E, value: &A, options: &WriteOptions) -> String
where
    E: EncodeJson<A> + ?Sized,
{
    encoder.to_json(value).write(options)
}
