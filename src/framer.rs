/// Splits a raw transport stream into newline-delimited lines, holding back
/// an incomplete trailing line until more data arrives.
///
/// The buffer holds bytes rather than text so a UTF-8 sequence split across
/// chunk boundaries is reassembled before any conversion happens. Lines may
/// span any number of chunks.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, returning every complete line it closes.
    /// Line terminators are not included; a trailing `\r` is left for the
    /// decoder to handle.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(idx) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=idx).collect();
            lines.push(String::from_utf8_lossy(&line[..idx]).into_owned());
        }
        lines
    }

    /// Emit the trailing partial line at end of stream, if it holds anything
    /// beyond whitespace.
    pub fn flush(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let text = String::from_utf8_lossy(&rest).into_owned();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}
