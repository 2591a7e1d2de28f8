//! Reference memory slave used by the CLI demo and the integration tests.
//!
//! This is not part of the cache/arbiter design under test; it is a simple,
//! fixed-latency [`BusSlave`] implementation that the rest of the crate is
//! exercised against. Addresses wrap modulo the backing store's capacity, so
//! the bus-facing side never rejects a transaction; callers that need exact
//! bounds checking (image loading, CLI peek/poke) use [`MemorySlave::read_word`]
//! and [`MemorySlave::write_word`] instead.

use crate::bus::{
    ArChannel, AwChannel, BChannel, BusRequest, BusResp, BusResponse, BusSlave, RChannel,
    WChannel, handshake,
};
use crate::common::error::SlaveError;

/// Masks `strb`-selected bytes of `new_value` into `old_value`, leaving the
/// rest of `old_value` untouched.
const fn apply_strobe(old_value: u32, new_value: u32, strb: u8) -> u32 {
    let mut result = old_value;
    let mut byte = 0;
    while byte < 4 {
        if strb & (1 << byte) != 0 {
            let shift = byte * 8;
            let mask = 0xFFu32 << shift;
            result = (result & !mask) | (new_value & mask);
        }
        byte += 1;
    }
    result
}

/// A flat, word-addressed memory model with one-cycle read and write-response
/// latency and always-OKAY responses.
#[derive(Debug, Clone)]
pub struct MemorySlave {
    words: Vec<u32>,
    pending_read: Option<usize>,
    write_ack_due: bool,
}

impl MemorySlave {
    /// Builds a zero-initialized slave backed by `capacity_words` 32-bit
    /// words.
    #[must_use]
    pub fn new(capacity_words: usize) -> Self {
        Self {
            words: vec![0; capacity_words.max(1)],
            pending_read: None,
            write_ack_due: false,
        }
    }

    fn word_index(&self, byte_addr: u32) -> usize {
        (byte_addr >> 2) as usize % self.words.len()
    }

    /// Reads a word at an exact word address, without wraparound.
    ///
    /// # Errors
    ///
    /// Returns [`SlaveError::OutOfBounds`] if `word_addr` is beyond the
    /// backing store.
    pub fn read_word(&self, word_addr: u32) -> Result<u32, SlaveError> {
        self.words
            .get(word_addr as usize)
            .copied()
            .ok_or(SlaveError::OutOfBounds {
                word_addr,
                capacity: self.words.len(),
            })
    }

    /// Writes a word at an exact word address, without wraparound.
    ///
    /// # Errors
    ///
    /// Returns [`SlaveError::OutOfBounds`] if `word_addr` is beyond the
    /// backing store.
    pub fn write_word(&mut self, word_addr: u32, value: u32) -> Result<(), SlaveError> {
        match self.words.get_mut(word_addr as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SlaveError::OutOfBounds {
                word_addr,
                capacity: self.words.len(),
            }),
        }
    }

    /// Loads `image` starting at `base_word_addr`, word by word.
    ///
    /// # Errors
    ///
    /// Returns [`SlaveError::OutOfBounds`] on the first word that falls
    /// beyond the backing store; earlier words are left written.
    pub fn load_image(&mut self, base_word_addr: u32, image: &[u32]) -> Result<(), SlaveError> {
        for (offset, &word) in image.iter().enumerate() {
            self.write_word(base_word_addr + offset as u32, word)?;
        }
        Ok(())
    }
}

impl Default for MemorySlave {
    fn default() -> Self {
        Self::new(1 << 16)
    }
}

impl BusSlave for MemorySlave {
    fn tick(&mut self, request: BusRequest) -> BusResponse {
        let r = match self.pending_read {
            Some(word_idx) => {
                let resp = RChannel {
                    valid: true,
                    ready: request.r_ready,
                    data: self.words[word_idx],
                    resp: BusResp::Okay,
                };
                if handshake(true, request.r_ready) {
                    self.pending_read = None;
                }
                resp
            }
            None => RChannel::default(),
        };

        let ar_ready = self.pending_read.is_none();
        if ar_ready && request.ar.valid {
            self.pending_read = Some(self.word_index(request.ar.addr));
        }

        let b = if self.write_ack_due {
            let resp = BChannel {
                valid: true,
                ready: request.b_ready,
                resp: BusResp::Okay,
            };
            if handshake(true, request.b_ready) {
                self.write_ack_due = false;
            }
            resp
        } else {
            BChannel::default()
        };

        let write_ready = !self.write_ack_due;
        if write_ready && request.aw.valid && request.w.valid {
            let idx = self.word_index(request.aw.addr);
            self.words[idx] = apply_strobe(self.words[idx], request.w.data, request.w.strb);
            self.write_ack_due = true;
        }

        BusResponse {
            ar_ready,
            r,
            aw_ready: write_ready,
            w_ready: write_ready,
            b,
        }
    }

    fn reset(&mut self) {
        self.pending_read = None;
        self.write_ack_due = false;
    }
}
