use crate::{
    graph::node::{Frame, SampleSource, SILENCE},
    MAX_BLOCK_SIZE,
};

/*
Summing Mixer
=============

The Mix node adds two stereo sources sample by sample:

    out[n] = A[n] + B[n]        (per channel)

There is no balance control and no normalization. Every session source
already carries a fixed 0.5 headroom factor, so a full-volume tone plus
full-volume noise peaks around 0.75. Extreme settings can still exceed
1.0; clipping is left to whoever quantizes the output.

Mixes nest, so three sources are two mixes:

  left.mix(right).mix(noise)

         ┌──────┐
  left ──┤      │
         │ Mix  ├──┐
  right ─┤      │  │  ┌─────┐
         └──────┘  └──┤     │
                      │ Mix ├──→ out
  noise ──────────────┤     │
                      └─────┘

End-of-data: the mix keeps producing while either input does. A finished
input contributes silence.
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    temp_buffer: Vec<Frame>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B) -> Self {
        Mix {
            source_a,
            source_b,
            temp_buffer: vec![SILENCE; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: SampleSource, B: SampleSource> SampleSource for Mix<A, B> {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        let mut written = 0;

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let len = chunk.len();

            let produced_a = self.source_a.render_block(chunk);
            chunk[produced_a..].fill(SILENCE);

            // Slice temp buffer to match chunk size (RT-safe, no allocation)
            let frames = &mut self.temp_buffer[..len];
            let produced_b = self.source_b.render_block(frames);

            for (o, b) in chunk.iter_mut().zip(frames[..produced_b].iter()) {
                o[0] += b[0];
                o[1] += b[1];
            }

            let produced = produced_a.max(produced_b);
            written += produced;
            if produced < len {
                break;
            }
        }

        written
    }

    fn is_finished(&self) -> bool {
        self.source_a.is_finished() && self.source_b.is_finished()
    }
}
