//! Writer adapter: renders a [`Value`] as JSON text.
//!
//! Output layout is driven by [`WriteOptions`]. An indent of zero produces the
//! compact form used inside diagnostics; any other indent places each array
//! element and object member on its own line.

use crate::{JsonArray, JsonObject, Value};

/// Layout settings for the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level. Zero disables line breaks entirely.
    pub indent: usize,
    /// Emit `"key": value` instead of `"key":value`.
    pub space_after_colon: bool,
}

impl WriteOptions {
    pub const NO_SPACES: WriteOptions = WriteOptions {
        indent: 0,
        space_after_colon: false,
    };
    pub const SPACES2: WriteOptions = WriteOptions {
        indent: 2,
        space_after_colon: true,
    };
    pub const SPACES4: WriteOptions = WriteOptions {
        indent: 4,
        space_after_colon: true,
    };

    pub fn with_indent(indent: usize) -> Self {
        WriteOptions {
            indent,
            space_after_colon: indent > 0,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::NO_SPACES
    }
}

pub(crate) fn write_value(value: &Value, options: &WriteOptions) -> String {
    let mut writer = JsonWriter::new(options);
    writer.write_any(value);
    writer.out
}

pub(crate) fn write_array(array: &JsonArray, options: &WriteOptions) -> String {
    let mut writer = JsonWriter::new(options);
    writer.write_arr(array);
    writer.out
}

pub(crate) fn write_object(object: &JsonObject, options: &WriteOptions) -> String {
    let mut writer = JsonWriter::new(options);
    writer.write_obj(object);
    writer.out
}

struct JsonWriter<'a> {
    out: String,
    options: &'a WriteOptions,
    depth: usize,
}

impl<'a> JsonWriter<'a> {
    fn new(options: &'a WriteOptions) -> Self {
        Self {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.out.push_str(n.as_str()),
            Value::String(s) => self.write_str(s),
            Value::Array(a) => self.write_arr(a),
            Value::Object(o) => self.write_obj(o),
        }
    }

    fn write_str(&mut self, s: &str) {
        let plain = s
            .bytes()
            .all(|b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
        if plain {
            self.out.reserve(s.len() + 2);
            self.out.push('"');
            self.out.push_str(s);
            self.out.push('"');
            return;
        }
        // Fall back to serde_json for proper escaping
        let escaped = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
        self.out.push_str(&escaped);
    }

    fn write_arr(&mut self, array: &JsonArray) {
        if array.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.depth += 1;
        for (i, item) in array.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_any(item);
        }
        self.depth -= 1;
        self.newline();
        self.out.push(']');
    }

    fn write_obj(&mut self, object: &JsonObject) {
        if object.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.depth += 1;
        for (i, (key, value)) in object.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_str(key);
            self.out.push(':');
            if self.options.space_after_colon {
                self.out.push(' ');
            }
            self.write_any(value);
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }

    fn newline(&mut self) {
        if self.options.indent == 0 {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.depth * self.options.indent {
            self.out.push(' ');
        }
    }
}
