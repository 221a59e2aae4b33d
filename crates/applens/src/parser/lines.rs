/// Line splitting tolerant of `\n`, `\r\n` and bare `\r` terminators.
///
/// Yields `(index, line)` pairs where `index` is the zero-based position of the
/// line in the document. Terminators are not part of the line; all other bytes
/// (including leading/trailing spaces and tabs) are preserved.
pub fn split_lines(content: &str) -> Lines<'_> {
    Lines {
        rest: content,
        index: 0,
        done: content.is_empty(),
    }
}

pub struct Lines<'a> {
    rest: &'a str,
    index: usize,
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let bytes = self.rest.as_bytes();
        let line = match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[pos + skip..];
                // A trailing terminator does not open an extra empty line
                if self.rest.is_empty() {
                    self.done = true;
                }
                line
            }
            None => {
                self.done = true;
                self.rest
            }
        };

        let index = self.index;
        self.index += 1;
        Some((index, line))
    }
}

/// Blank lines never produce a record.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
