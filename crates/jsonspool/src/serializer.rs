//! The incremental serializer engine.
//!
//! A [`Serializer`] borrows a JSON tree and emits its compact rendering one
//! caller-sized chunk at a time. Every writer returns `true` when its
//! production completed and `false` when the output buffer filled mid-way;
//! in the latter case it has pushed a frame recording exactly where to pick
//! up, so the next [`read`] continues at the suspended byte.
//!
//! [`read`]: Serializer::read

use alloc::{string::String, vec::Vec};

use crate::{
    escape::{count_unescaped, ESCAPE, HEX_DIGITS},
    frame::{ArrState, Frame, FrameStack, ObjState, StrState},
    number::MAX_NUMBER_CHARS,
    out_buf::OutBuf,
    value::{Map, Value},
};

const NULL: &[u8] = b"null";
const TRUE: &[u8] = b"true";
const FALSE: &[u8] = b"false";

/// Scratch holds either the tail of a formatted number or the pending
/// bytes of an escape that straddled the end of a buffer.
const SCRATCH_LEN: usize = MAX_NUMBER_CHARS + 1;

/// The root the engine is currently draining. The variant selects which
/// writer a fresh run enters.
#[derive(Debug, Clone, Copy)]
enum Root<'a> {
    Null,
    Value(&'a Value),
    Array(&'a [Value]),
    Object(&'a Map),
    Str(&'a str),
}

/// Incremental JSON serializer.
///
/// The engine borrows the tree for the whole serialization and borrows each
/// output buffer only for the duration of a single [`read`] call. Every
/// `read` fills its buffer completely unless it finishes the document.
///
/// # Examples
///
/// ```
/// use jsonspool::{Serializer, Value};
///
/// let value = Value::Array(vec![Value::Int(1), Value::Int(-2), Value::Float(3.5)]);
/// let mut ser = Serializer::new();
/// ser.reset(&value);
///
/// let mut buf = [0u8; 4];
/// assert_eq!(ser.read(&mut buf), b"[1,-");
/// assert_eq!(ser.read(&mut buf), b"2,3.");
/// assert_eq!(ser.read(&mut buf), b"5]");
/// assert!(ser.done());
/// ```
///
/// [`read`]: Serializer::read
#[derive(Debug)]
pub struct Serializer<'a> {
    root: Root<'a>,
    stack: FrameStack<'a>,
    scratch: [u8; SCRATCH_LEN],
    complete: bool,
}

impl Default for Serializer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Serializer<'a> {
    /// Creates an idle engine. With no `reset` call, [`read`] emits the
    /// literal `null`.
    ///
    /// [`read`]: Serializer::read
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Root::Null,
            stack: FrameStack::new(),
            scratch: [0; SCRATCH_LEN],
            complete: false,
        }
    }

    /// Re-arms the engine to serialize `value` from the beginning,
    /// discarding any serialization in progress.
    pub fn reset(&mut self, value: &'a Value) {
        self.rearm(Root::Value(value));
    }

    /// Re-arms the engine with an array root.
    pub fn reset_array(&mut self, items: &'a [Value]) {
        self.rearm(Root::Array(items));
    }

    /// Re-arms the engine with an object root.
    pub fn reset_object(&mut self, object: &'a Map) {
        self.rearm(Root::Object(object));
    }

    /// Re-arms the engine with a bare string root.
    pub fn reset_str(&mut self, s: &'a str) {
        self.rearm(Root::Str(s));
    }

    /// Re-arms the engine to emit the literal `null`.
    pub fn reset_null(&mut self) {
        self.rearm(Root::Null);
    }

    fn rearm(&mut self, root: Root<'a>) {
        self.root = root;
        self.stack.clear();
        self.complete = false;
    }

    /// Returns `true` once the current root has been fully emitted. The
    /// next [`read`] must be preceded by a `reset`.
    ///
    /// [`read`]: Serializer::read
    #[must_use]
    pub fn done(&self) -> bool {
        self.complete
    }

    /// Produces up to `buf.len()` bytes of output and returns the filled
    /// prefix. The prefix is shorter than the buffer only on the call that
    /// finishes the document, and empty only if `buf` is empty.
    pub fn read<'b>(&mut self, buf: &'b mut [u8]) -> &'b [u8] {
        debug_assert!(
            !self.complete,
            "read called after the serialization completed; reset first"
        );
        if self.complete {
            return &buf[..0];
        }
        let (finished, written) = {
            let mut out = OutBuf::new(&mut buf[..]);
            let finished = if self.stack.is_empty() {
                self.start(&mut out)
            } else {
                self.resume(&mut out)
            };
            (finished, out.len())
        };
        if finished {
            self.complete = true;
        }
        &buf[..written]
    }

    fn start(&mut self, out: &mut OutBuf<'_>) -> bool {
        match self.root {
            Root::Null => self.write_literal(out, NULL),
            Root::Value(value) => self.write_value(out, value),
            Root::Array(items) => self.write_array(out, items, 0, ArrState::Open),
            Root::Object(object) => self.write_object(out, object.entries(), 0, ObjState::Open),
            Root::Str(s) => self.write_string(out, s.as_bytes(), StrState::Open),
        }
    }

    /// Re-enters the writer recorded by the top frame. Frames pop
    /// outside-in: an outer writer restores itself first and re-invokes the
    /// nested writer, which finds its own frame on top in turn.
    fn resume(&mut self, out: &mut OutBuf<'_>) -> bool {
        let Some(frame) = self.stack.pop() else {
            return true;
        };
        match frame {
            Frame::Literal { rest } => self.write_literal(out, rest),
            Frame::Number { off, len } => self.drain_number(out, off, len),
            Frame::Str { s, state } => self.write_string(out, s, state),
            Frame::Array { items, pos, state } => self.write_array(out, items, pos, state),
            Frame::Object {
                entries,
                pos,
                state,
            } => self.write_object(out, entries, pos, state),
        }
    }

    fn write_value(&mut self, out: &mut OutBuf<'_>, value: &'a Value) -> bool {
        if !self.stack.is_empty() {
            // A non-empty stack on entry means exactly this value suspended
            // earlier; the top frame belongs to it.
            return self.resume(out);
        }
        match value {
            Value::Null => self.write_literal(out, NULL),
            Value::Bool(true) => self.write_literal(out, TRUE),
            Value::Bool(false) => self.write_literal(out, FALSE),
            Value::Int(v) => self.write_i64(out, *v),
            Value::UInt(v) => self.write_u64(out, *v),
            Value::Float(v) => self.write_f64(out, *v),
            Value::String(s) => self.write_string(out, s.as_bytes(), StrState::Open),
            Value::Array(items) => self.write_array(out, items, 0, ArrState::Open),
            Value::Object(object) => self.write_object(out, object.entries(), 0, ObjState::Open),
        }
    }

    fn write_literal(&mut self, out: &mut OutBuf<'_>, lit: &'static [u8]) -> bool {
        if out.has_space(lit.len()) {
            out.append_unchecked(lit);
            return true;
        }
        let n = out.available();
        out.append_unchecked(&lit[..n]);
        self.stack.push(Frame::Literal { rest: &lit[n..] });
        false
    }

    fn write_i64(&mut self, out: &mut OutBuf<'_>, v: i64) -> bool {
        let mut fmt = itoa::Buffer::new();
        self.stage_number(out, fmt.format(v).as_bytes())
    }

    fn write_u64(&mut self, out: &mut OutBuf<'_>, v: u64) -> bool {
        let mut fmt = itoa::Buffer::new();
        self.stage_number(out, fmt.format(v).as_bytes())
    }

    /// Non-finite doubles come out however `ryu` spells them; the engine
    /// does not validate.
    fn write_f64(&mut self, out: &mut OutBuf<'_>, v: f64) -> bool {
        let mut fmt = ryu::Buffer::new();
        self.stage_number(out, fmt.format(v).as_bytes())
    }

    /// Copies a freshly formatted number, staging the part that does not
    /// fit in engine scratch. The token length is bounded by
    /// `MAX_NUMBER_CHARS`, so the formatter never has to restart.
    fn stage_number(&mut self, out: &mut OutBuf<'_>, digits: &[u8]) -> bool {
        debug_assert!(digits.len() <= MAX_NUMBER_CHARS);
        if out.has_space(digits.len()) {
            out.append_unchecked(digits);
            return true;
        }
        let n = out.available();
        out.append_unchecked(&digits[..n]);
        let rest = &digits[n..];
        self.scratch[..rest.len()].copy_from_slice(rest);
        self.stack.push(Frame::Number {
            off: 0,
            len: rest.len() as u8,
        });
        false
    }

    fn drain_number(&mut self, out: &mut OutBuf<'_>, off: u8, len: u8) -> bool {
        let take = out.available().min(usize::from(len));
        out.append_unchecked(&self.scratch[usize::from(off)..usize::from(off) + take]);
        if take == usize::from(len) {
            return true;
        }
        self.stack.push(Frame::Number {
            off: off + take as u8,
            len: len - take as u8,
        });
        false
    }

    /// Emits `"` + escaped payload + `"`. `s` is always the not yet
    /// consumed suffix; every consumed input byte shortens it by one, so a
    /// suspension can stash `s` as-is and resume without re-scanning.
    fn write_string(&mut self, out: &mut OutBuf<'_>, mut s: &'a [u8], mut state: StrState) -> bool {
        loop {
            match state {
                StrState::Open => {
                    if !out.append(b'"') {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::Fast;
                }
                StrState::Fast => {
                    if s.is_empty() {
                        state = StrState::Close;
                        continue;
                    }
                    if out.is_full() {
                        return self.suspend_str(s, state);
                    }
                    let cap = out.available().min(s.len());
                    let run = count_unescaped(&s[..cap]);
                    if run > 0 {
                        out.append_unchecked(&s[..run]);
                        s = &s[run..];
                    }
                    if run == cap {
                        // Clean prefix exhausted the window; re-check for
                        // end-of-input or a full buffer.
                        continue;
                    }
                    state = StrState::Slow;
                }
                StrState::Slow => {
                    if s.is_empty() {
                        state = StrState::Close;
                        continue;
                    }
                    if out.is_full() {
                        return self.suspend_str(s, state);
                    }
                    let b = s[0];
                    s = &s[1..];
                    match ESCAPE[usize::from(b)] {
                        0 => {
                            out.push_unchecked(b);
                            state = StrState::Fast;
                        }
                        b'u' => {
                            if out.has_space(6) {
                                out.append_unchecked(b"\\u00");
                                out.push_unchecked(HEX_DIGITS[usize::from(b >> 4)]);
                                out.push_unchecked(HEX_DIGITS[usize::from(b & 0x0f)]);
                                state = StrState::Fast;
                            } else {
                                out.push_unchecked(b'\\');
                                self.scratch[0] = HEX_DIGITS[usize::from(b >> 4)];
                                self.scratch[1] = HEX_DIGITS[usize::from(b & 0x0f)];
                                state = StrState::UnicodeU;
                            }
                        }
                        esc => {
                            if out.has_space(2) {
                                out.push_unchecked(b'\\');
                                out.push_unchecked(esc);
                                state = StrState::Fast;
                            } else {
                                out.push_unchecked(b'\\');
                                self.scratch[0] = esc;
                                state = StrState::EscapeTail;
                            }
                        }
                    }
                }
                StrState::EscapeTail => {
                    if !out.append(self.scratch[0]) {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::Fast;
                }
                StrState::UnicodeU => {
                    if !out.append(b'u') {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::UnicodeZero1;
                }
                StrState::UnicodeZero1 => {
                    if !out.append(b'0') {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::UnicodeZero2;
                }
                StrState::UnicodeZero2 => {
                    if !out.append(b'0') {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::UnicodeHigh;
                }
                StrState::UnicodeHigh => {
                    if !out.append(self.scratch[0]) {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::UnicodeLow;
                }
                StrState::UnicodeLow => {
                    if !out.append(self.scratch[1]) {
                        return self.suspend_str(s, state);
                    }
                    state = StrState::Fast;
                }
                StrState::Close => {
                    if !out.append(b'"') {
                        return self.suspend_str(s, state);
                    }
                    return true;
                }
            }
        }
    }

    fn suspend_str(&mut self, s: &'a [u8], state: StrState) -> bool {
        self.stack.push(Frame::Str { s, state });
        false
    }

    fn write_array(
        &mut self,
        out: &mut OutBuf<'_>,
        items: &'a [Value],
        mut pos: usize,
        mut state: ArrState,
    ) -> bool {
        loop {
            match state {
                ArrState::Open => {
                    if !out.append(b'[') {
                        return self.suspend_arr(items, pos, state);
                    }
                    state = if items.is_empty() {
                        ArrState::Close
                    } else {
                        ArrState::Elem
                    };
                }
                ArrState::Elem => {
                    if !self.write_value(out, &items[pos]) {
                        return self.suspend_arr(items, pos, state);
                    }
                    pos += 1;
                    state = ArrState::Comma;
                }
                ArrState::Comma => {
                    if pos == items.len() {
                        state = ArrState::Close;
                        continue;
                    }
                    if !out.append(b',') {
                        return self.suspend_arr(items, pos, state);
                    }
                    state = ArrState::Elem;
                }
                ArrState::Close => {
                    if !out.append(b']') {
                        return self.suspend_arr(items, pos, state);
                    }
                    return true;
                }
            }
        }
    }

    fn suspend_arr(&mut self, items: &'a [Value], pos: usize, state: ArrState) -> bool {
        self.stack.push(Frame::Array { items, pos, state });
        false
    }

    fn write_object(
        &mut self,
        out: &mut OutBuf<'_>,
        entries: &'a [(String, Value)],
        mut pos: usize,
        mut state: ObjState,
    ) -> bool {
        loop {
            match state {
                ObjState::Open => {
                    if !out.append(b'{') {
                        return self.suspend_obj(entries, pos, state);
                    }
                    state = if entries.is_empty() {
                        ObjState::Close
                    } else {
                        ObjState::Key
                    };
                }
                ObjState::Key => {
                    let key = entries[pos].0.as_bytes();
                    let finished = if self.stack.is_empty() {
                        self.write_string(out, key, StrState::Open)
                    } else {
                        // The key's string frame is on top; re-enter it.
                        self.resume(out)
                    };
                    if !finished {
                        return self.suspend_obj(entries, pos, state);
                    }
                    state = ObjState::Colon;
                }
                ObjState::Colon => {
                    if !out.append(b':') {
                        return self.suspend_obj(entries, pos, state);
                    }
                    state = ObjState::Value;
                }
                ObjState::Value => {
                    if !self.write_value(out, &entries[pos].1) {
                        return self.suspend_obj(entries, pos, state);
                    }
                    pos += 1;
                    state = ObjState::Comma;
                }
                ObjState::Comma => {
                    if pos == entries.len() {
                        state = ObjState::Close;
                        continue;
                    }
                    if !out.append(b',') {
                        return self.suspend_obj(entries, pos, state);
                    }
                    state = ObjState::Key;
                }
                ObjState::Close => {
                    if !out.append(b'}') {
                        return self.suspend_obj(entries, pos, state);
                    }
                    return true;
                }
            }
        }
    }

    fn suspend_obj(
        &mut self,
        entries: &'a [(String, Value)],
        pos: usize,
        state: ObjState,
    ) -> bool {
        self.stack.push(Frame::Object {
            entries,
            pos,
            state,
        });
        false
    }
}

/// Serializes `value` to a compact JSON byte vector in one call.
#[must_use]
pub fn to_vec(value: &Value) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.reset(value);
    let mut chunk = [0u8; 512];
    let mut out = Vec::new();
    while !ser.done() {
        out.extend_from_slice(ser.read(&mut chunk));
    }
    out
}

/// Serializes `value` to a compact JSON string in one call.
///
/// # Examples
///
/// ```
/// use jsonspool::Value;
///
/// let value = Value::String("line\nbreak".into());
/// assert_eq!(jsonspool::to_string(&value), r#""line\nbreak""#);
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    String::from_utf8(to_vec(value)).expect("serialized JSON is valid UTF-8")
}
