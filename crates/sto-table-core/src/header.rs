//! STO header scanning.
//!
//! An STO file starts with a header block of free-form lines, most of them
//! `key=value` pairs, closed by a line containing `endheader`. The element
//! type of the data columns is declared by the first key that *contains*
//! `DataType` (files written by older tools use decorated key names, so the
//! match is a substring match, not an equality test).
//!
//! Lines are read as bytes and decoded lossily, so a stray Latin-1 byte in a
//! comment line (a degree sign, say) does not hide a later declaration.
//!
//! [`sniff_type_tag`] reads only as far as it needs to find that declaration.
//! It leaves the stream positioned somewhere inside the header: callers must
//! hand a fresh stream to the adapter that parses the payload.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead};

use snafu::ResultExt;

use crate::adapter::error::{AdapterResult, MissingEndHeaderSnafu, ReadHeaderSnafu};

/// Substring that marks the last line of the header.
pub const END_HEADER: &str = "endheader";

/// Substring that marks a key as the element type declaration.
pub const DATA_TYPE_KEY: &str = "DataType";

/// Element type declaration found in a header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeTag {
    /// A `DataType` key was found with this value. The value is not yet
    /// validated against the registry.
    Declared(String),
    /// No `DataType` key before the end of the header (or of the stream).
    #[default]
    Absent,
}

impl TypeTag {
    /// The declared value, if any.
    pub fn declared(&self) -> Option<&str> {
        match self {
            TypeTag::Declared(value) => Some(value),
            TypeTag::Absent => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Declared(value) => f.write_str(value),
            TypeTag::Absent => f.write_str("<absent>"),
        }
    }
}

/// Line reader that tracks 1-based line numbers and strips line endings.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD instead of failing.
pub(crate) struct NumberedLines<'r, R: ?Sized> {
    reader: &'r mut R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<'r, R: BufRead + ?Sized> NumberedLines<'r, R> {
    pub(crate) fn new(reader: &'r mut R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    /// Next line without its terminator, or `None` at end of stream.
    pub(crate) fn next_line(&mut self) -> io::Result<Option<(usize, Cow<'_, str>)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let line = self.buf.strip_suffix(b"\n").unwrap_or(self.buf.as_slice());
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Ok(Some((self.line_no, String::from_utf8_lossy(line))))
    }
}

/// Split a header line at its last `=`.
///
/// Returns `None` when there is no `=` or when either side is empty. No
/// whitespace is trimmed.
pub(crate) fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.rsplit_once('=')?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

pub(crate) fn is_end_header(line: &str) -> bool {
    line.contains(END_HEADER)
}

pub(crate) fn declares_data_type(key: &str) -> bool {
    key.contains(DATA_TYPE_KEY)
}

/// Scan a header for its element type declaration.
///
/// Scanning stops at the first line containing `endheader` (returning
/// [`TypeTag::Absent`]) or at the first `key=value` line whose key contains
/// `DataType` (returning its value). Running out of input before either
/// happens also yields [`TypeTag::Absent`]. The stream is left wherever the
/// scan stopped.
pub fn sniff_type_tag<R: BufRead + ?Sized>(reader: &mut R) -> AdapterResult<TypeTag> {
    let mut lines = NumberedLines::new(reader);
    while let Some((_, line)) = lines.next_line().context(ReadHeaderSnafu)? {
        if is_end_header(&line) {
            break;
        }
        if let Some((key, value)) = split_key_value(&line) {
            if declares_data_type(key) {
                return Ok(TypeTag::Declared(value.to_string()));
            }
        }
    }
    Ok(TypeTag::Absent)
}

/// A fully parsed header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// The first element type declaration in the header.
    pub type_tag: TypeTag,
    /// Every `key=value` line, in file order, including the declaration.
    pub entries: Vec<(String, String)>,
}

impl Header {
    /// Value of the first entry whose key equals `key` exactly.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Read the complete header, consuming the `endheader` line.
pub(crate) fn read_header<R: BufRead + ?Sized>(
    lines: &mut NumberedLines<'_, R>,
) -> AdapterResult<Header> {
    let mut header = Header::default();
    loop {
        let Some((_, line)) = lines.next_line().context(ReadHeaderSnafu)? else {
            return MissingEndHeaderSnafu.fail();
        };
        if is_end_header(&line) {
            return Ok(header);
        }
        if let Some((key, value)) = split_key_value(&line) {
            if header.type_tag == TypeTag::Absent && declares_data_type(key) {
                header.type_tag = TypeTag::Declared(value.to_string());
            }
            header.entries.push((key.to_string(), value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::adapter::AdapterError;

    fn sniff(text: &str) -> TypeTag {
        sniff_type_tag(&mut text.as_bytes()).unwrap()
    }

    #[test]
    fn finds_declaration_before_endheader() {
        let text = "walk\nversion=3\nDataType=Vec3\nnRows=2\nendheader\ntime\ta\n";
        assert_eq!(sniff(text), TypeTag::Declared("Vec3".to_string()));
    }

    #[test]
    fn first_declaration_wins() {
        let text = "DataType=Quaternion\nDataType=Vec3\nendheader\n";
        assert_eq!(sniff(text), TypeTag::Declared("Quaternion".to_string()));
    }

    #[test]
    fn stops_at_endheader_and_ignores_later_lines() {
        let text = "version=1\nendheader\nDataType=Vec3\n";
        assert_eq!(sniff(text), TypeTag::Absent);
    }

    #[test]
    fn endheader_is_a_substring_match() {
        let text = "# --- endheader ---\nDataType=Vec3\n";
        assert_eq!(sniff(text), TypeTag::Absent);
        // Checked before the key/value parse.
        assert_eq!(sniff("DataType=endheader\n"), TypeTag::Absent);
    }

    #[test]
    fn key_is_a_substring_match() {
        let text = "MyDataTypeField=SpatialVec\nendheader\n";
        assert_eq!(sniff(text), TypeTag::Declared("SpatialVec".to_string()));
    }

    #[test]
    fn exhausted_stream_without_terminator_is_absent() {
        assert_eq!(sniff("version=1\nnRows=3\n"), TypeTag::Absent);
        assert_eq!(sniff(""), TypeTag::Absent);
    }

    #[test]
    fn empty_parts_are_not_declarations() {
        let text = "DataType=\n=Vec3\nDataType=Vec4\nendheader\n";
        assert_eq!(sniff(text), TypeTag::Declared("Vec4".to_string()));
    }

    #[test]
    fn splits_at_last_equals_without_trimming() {
        assert_eq!(split_key_value("a=b=c"), Some(("a=b", "c")));
        assert_eq!(split_key_value(" DataType = Vec3"), Some((" DataType ", " Vec3")));
        assert_eq!(split_key_value("no separator"), None);
        assert_eq!(sniff("DataType= Vec3\nendheader\n").declared(), Some(" Vec3"));
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let text = "DataType=Vec2\r\nendheader\r\n";
        assert_eq!(sniff(text), TypeTag::Declared("Vec2".to_string()));
    }

    #[test]
    fn sniffing_leaves_the_cursor_inside_the_header() {
        let text = "DataType=Vec3\nnRows=1\nendheader\n";
        let mut cursor = Cursor::new(text.as_bytes());
        sniff_type_tag(&mut cursor).unwrap();
        assert_eq!(cursor.position(), "DataType=Vec3\n".len() as u64);
    }

    #[test]
    fn latin1_comment_lines_do_not_stop_the_scan() {
        let bytes: &[u8] = b"Units are S.I. units (angles in \xb0)\nDataType=Vec3\nendheader\n";
        let tag = sniff_type_tag(&mut &bytes[..]).unwrap();
        assert_eq!(tag, TypeTag::Declared("Vec3".to_string()));
    }

    #[test]
    fn invalid_utf8_in_a_declared_value_decodes_lossily() {
        let bytes: &[u8] = b"DataType=\xff\xfe\nendheader\n";
        let tag = sniff_type_tag(&mut &bytes[..]).unwrap();
        assert_eq!(tag, TypeTag::Declared("\u{FFFD}\u{FFFD}".to_string()));
    }

    #[test]
    fn io_failures_are_header_read_errors() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk gone"))
            }
        }

        let mut reader = io::BufReader::new(Broken);
        let err = sniff_type_tag(&mut reader).unwrap_err();
        assert!(matches!(err, AdapterError::ReadHeader { .. }));
    }

    #[test]
    fn read_header_collects_entries_and_requires_terminator() {
        let text = "walk\nversion=3\nDataType=Vec3\nnRows=0\nendheader\n";
        let mut bytes = text.as_bytes();
        let mut lines = NumberedLines::new(&mut bytes);
        let header = read_header(&mut lines).unwrap();

        assert_eq!(header.type_tag, TypeTag::Declared("Vec3".to_string()));
        assert_eq!(header.get("nRows"), Some("0"));
        assert_eq!(header.entries.len(), 3);

        let mut bytes = "version=3\nDataType=Vec3\n".as_bytes();
        let mut lines = NumberedLines::new(&mut bytes);
        let err = read_header(&mut lines).unwrap_err();
        assert!(matches!(err, AdapterError::MissingEndHeader));
    }
}
