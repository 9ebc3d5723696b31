use std::io::{self, BufRead};

/// Prefix of the line that opens a new file block
pub const FILE_MARKER: &str = "FILE: ";

const SEPARATOR_CHAR: char = '=';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChunk {
    pub path: String,
    pub content: String,
}

struct PendingChunk {
    path: String,
    lines: Vec<String>,
}

impl PendingChunk {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            lines: Vec::new(),
        }
    }

    fn finish(self) -> FileChunk {
        FileChunk {
            path: self.path,
            content: self.lines.join("\n"),
        }
    }
}

/// Lazy splitter over a digest: yields one `FileChunk` per `FILE:` block,
/// holding at most one block's lines in memory.
pub struct DigestChunks<R> {
    reader: R,
    current: Option<PendingChunk>,
    line: String,
    done: bool,
}

impl<R: BufRead> DigestChunks<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: None,
            line: String::new(),
            done: false,
        }
    }
}

impl<'a> DigestChunks<&'a [u8]> {
    pub fn from_text(digest: &'a str) -> Self {
        Self::new(digest.as_bytes())
    }
}

impl<R: BufRead> Iterator for DigestChunks<R> {
    type Item = io::Result<FileChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    // A trailing marker with nothing after it yields nothing
                    return self
                        .current
                        .take()
                        .filter(|chunk| !chunk.lines.is_empty())
                        .map(|chunk| Ok(chunk.finish()));
                }
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }

            let line = self.line.strip_suffix('\n').unwrap_or(&self.line);

            if let Some(path) = marker_path(line) {
                if let Some(previous) = self.current.replace(PendingChunk::new(path)) {
                    return Some(Ok(previous.finish()));
                }
                continue;
            }

            if is_separator(line) {
                continue;
            }

            if let Some(chunk) = self.current.as_mut() {
                chunk.lines.push(line.to_string());
            }
        }
    }
}

/// Path named by a `FILE: <path>` marker line, trimmed. The path may be empty.
pub fn marker_path(line: &str) -> Option<&str> {
    line.strip_prefix(FILE_MARKER).map(str::trim)
}

/// True for lines made only of `=` (a trailing `\r` is ignored)
pub fn is_separator(line: &str) -> bool {
    let line = line.strip_suffix('\r').unwrap_or(line);
    !line.is_empty() && line.chars().all(|c| c == SEPARATOR_CHAR)
}
