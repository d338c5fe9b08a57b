#![forbid(unsafe_code)]

////////////////////////////////////////////////////////////////////////////////

/// Where decoded bytes go.
#[derive(Debug)]
pub enum Destination<'a> {
    /// Copy into this buffer; its length is the capacity.
    Buffer(&'a mut [u8]),
    /// Write nothing, only count how many bytes would have been produced.
    CountOnly,
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct OutputSink<'a> {
    destination: Destination<'a>,
    position: usize,
}

impl<'a> OutputSink<'a> {
    pub fn new(destination: Destination<'a>) -> Self {
        Self {
            destination,
            position: 0,
        }
    }

    pub fn has_destination(&self) -> bool {
        matches!(self.destination, Destination::Buffer(_))
    }

    /// Declared capacity, 0 in count-only mode where it is not enforced.
    pub fn capacity(&self) -> usize {
        match &self.destination {
            Destination::Buffer(buf) => buf.len(),
            Destination::CountOnly => 0,
        }
    }

    /// Bytes produced so far, or counted in count-only mode.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn can_accept(&self, n: usize) -> bool {
        match &self.destination {
            Destination::Buffer(buf) => self
                .position
                .checked_add(n)
                .map_or(false, |end| end <= buf.len()),
            Destination::CountOnly => true,
        }
    }

    /// Callers check `can_accept(1)` first.
    pub(crate) fn emit(&mut self, byte: u8) {
        if let Destination::Buffer(buf) = &mut self.destination {
            buf[self.position] = byte;
        }
        self.position += 1;
    }

    /// The bytes written so far; empty in count-only mode.
    pub fn written(&self) -> &[u8] {
        match &self.destination {
            Destination::Buffer(buf) => &buf[..self.position],
            Destination::CountOnly => &[],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
