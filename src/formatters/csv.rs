use std::borrow::Cow;
use std::io::{self, Write};

const RECORD_TERMINATOR: &[u8] = b"\r\n";

/// Minimal CSV record writer: comma separated, CRLF terminated, fields quoted
/// only when they need it.
pub struct CsvWriter<W: Write> {
    inner: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record<I, S>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (idx, field) in fields.into_iter().enumerate() {
            if idx > 0 {
                self.inner.write_all(b",")?;
            }
            self.inner
                .write_all(escape_field(field.as_ref()).as_bytes())?;
        }
        self.inner.write_all(RECORD_TERMINATOR)
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
