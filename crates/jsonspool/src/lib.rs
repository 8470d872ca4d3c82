//! Incremental JSON serialization into caller-sized buffers.
//!
//! A [`Serializer`] walks a borrowed [`Value`] tree and fills each buffer
//! handed to [`Serializer::read`] completely before suspending, even if the
//! buffer ends inside an escape sequence, a number, or a `true` / `false` /
//! `null` literal; the next call resumes at the exact byte. The output never
//! has to be buffered in full, and a `read` call never allocates.
//!
//! # Examples
//!
//! ```
//! use jsonspool::{Map, Serializer, Value};
//!
//! let mut map = Map::new();
//! map.insert("greeting", "hello");
//! let value = Value::Object(map);
//!
//! let mut ser = Serializer::new();
//! ser.reset(&value);
//!
//! let mut buf = [0u8; 8];
//! let mut out = Vec::new();
//! while !ser.done() {
//!     out.extend_from_slice(ser.read(&mut buf));
//! }
//! assert_eq!(out, br#"{"greeting":"hello"}"#.to_vec());
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod escape;
mod frame;
mod number;
mod out_buf;
mod serializer;
mod value;

pub use number::MAX_NUMBER_CHARS;
pub use serializer::{to_string, to_vec, Serializer};
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
