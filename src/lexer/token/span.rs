use std::ops::Range;

/// Byte range of a token within its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The byte position of the start of the token.
    pub start: u32,
    /// The length of the token in bytes.
    pub length: u32,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            length: u32::try_from(end.saturating_sub(start)).unwrap_or(u32::MAX),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end()
    }

    pub fn end(&self) -> usize {
        self.start as usize + self.length as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_covers_token_bytes() {
        let span = Span::new(4, 9);
        assert_eq!(span.range(), 4..9);
        assert_eq!(Span::new(3, 1).length, 0);
    }

    #[test]
    fn oversized_offsets_saturate() {
        let huge = u32::MAX as usize + 10;
        let span = Span::new(huge, huge + 5);
        assert_eq!(span.start, u32::MAX);
        assert_eq!(span.length, 5);
        let span = Span::new(0, huge);
        assert_eq!(span.length, u32::MAX);
        assert_eq!(span.end(), u32::MAX as usize);
    }
}
