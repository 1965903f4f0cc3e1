use std::path::Path;

use crate::audio::{SampleBuffer, SampleId, SampleIdAllocator};

// Load a WAV from disk and give it an id, ready to be registered with the engine
pub fn load(
    ids: &mut SampleIdAllocator,
    path: &Path,
    target_rate: u32,
) -> anyhow::Result<(SampleId, SampleBuffer)> {
    let buffer = SampleBuffer::load_wav(path, target_rate)?;
    if buffer.is_empty() {
        anyhow::bail!("{} contains no audio", path.display());
    }
    Ok((ids.next_id(), buffer))
}
