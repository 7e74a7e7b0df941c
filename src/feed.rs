//! Chunked input

use log::trace;

use crate::{
    decoder::{Outcome, StripDecoder},
    error::DecodeError,
    raster::{Raster, RowPlacement},
};

/// State of a strip after a chunk was fed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// All rows are decoded
    Done,
    /// More input is needed, `buffered` bytes are held back
    Pending {
        /// Bytes carried over into the next call
        buffered: usize,
    },
}

/// Carries the unconsumed tail of the input from one chunk to the next
#[derive(Debug, Default)]
pub struct ChunkFeeder {
    pending: Vec<u8>,
}

impl ChunkFeeder {
    /// A feeder with nothing buffered
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes carried over from previous chunks
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Append `chunk` to the carried over bytes and decode
    pub fn feed<P: RowPlacement>(
        &mut self,
        decoder: &mut StripDecoder<P>,
        raster: &mut Raster,
        chunk: &[u8],
    ) -> Result<FeedStatus, DecodeError> {
        self.pending.extend_from_slice(chunk);
        match decoder.decode(&self.pending, raster)? {
            Outcome::Done => {
                self.pending.clear();
                Ok(FeedStatus::Done)
            }
            Outcome::NeedMoreInput(consumed) => {
                self.pending.drain(..consumed);
                trace!("carrying {} bytes", self.pending.len());
                Ok(FeedStatus::Pending {
                    buffered: self.pending.len(),
                })
            }
        }
    }

    /// Check that the strip was completed once the input is exhausted
    pub fn finish<P>(self, decoder: &StripDecoder<P>) -> Result<(), DecodeError> {
        if decoder.is_done() {
            Ok(())
        } else {
            Err(DecodeError::Incomplete {
                rows: decoder.rows(),
                height: decoder.height(),
                buffered: self.pending.len(),
            })
        }
    }
}
