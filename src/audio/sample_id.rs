#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleId(pub u64);

// Hands out ids for buffers registered with the audio engine. Owned by
// whoever loads samples; ids are never reused within a session.
#[derive(Debug, Default)]
pub struct SampleIdAllocator {
    next: u64,
}

impl SampleIdAllocator {
    pub fn next_id(&mut self) -> SampleId {
        let id = SampleId(self.next);
        self.next += 1;
        id
    }
}
