// typea/src/initiator/mod.rs

//! Reader-side (initiator) card discovery.
//!
//! Two routes to a selected card: [`Anticollision`] drives the ISO
//! 14443-A REQA / SDD_REQ / SEL_REQ cascade by hand over raw card-layer
//! transceive primitives, and [`list_passive_target`] lets the chip do
//! the whole sequence itself via InListPassiveTarget.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::cancel::Cancel;
use crate::constants::{card, cmd};
use crate::device::exchange::Exchange;
use crate::device::registers::{ChipRegisters, RegisterAccess};
use crate::protocol::crc::crc_a_append;
use crate::transport::Transport;
use crate::types::{Atqa, CardIdentity, PollBaud, Sak, Uid};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Card-layer transceive primitives, relayed transparently by the
/// front-end chip. Card exchanges are not chip commands; the chip only
/// ferries the bits.
pub trait Transceive {
    /// Exchange a partial-byte frame. `bits` is the number of valid bits
    /// in `data` (REQA is a 7-bit short frame).
    fn transceive_bits(&mut self, data: &[u8], bits: usize, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Exchange whole bytes.
    fn transceive_bytes(&mut self, data: &[u8], timeout_ms: u64) -> Result<Vec<u8>>;
}

/// [`Transceive`] over the chip's InCommunicateThru verb.
pub struct ChipTransceive<'a, T: Transport> {
    exchange: &'a mut Exchange<T>,
}

impl<'a, T: Transport> ChipTransceive<'a, T> {
    /// Borrow the command engine for a run of card exchanges.
    pub fn new(exchange: &'a mut Exchange<T>) -> Self {
        Self { exchange }
    }

    fn communicate(&mut self, data: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        let resp = self
            .exchange
            .command(cmd::IN_COMMUNICATE_THRU, data, timeout_ms)?;
        match resp.split_first() {
            Some((&0x00, rest)) => Ok(rest.to_vec()),
            Some((&0x01, _)) => Err(Error::ResponseTimeout), // RF timeout status
            Some((&status, _)) => Err(Error::ChipError(status)),
            None => Ok(resp), // cancelled upstream
        }
    }
}

impl<T: Transport> Transceive for ChipTransceive<'_, T> {
    fn transceive_bits(&mut self, data: &[u8], bits: usize, timeout_ms: u64) -> Result<Vec<u8>> {
        // The CIU transmits whole bytes unless TxLastBits trims the
        // final one.
        let last_bits = (bits % 8) as u8;
        let mut regs = ChipRegisters::new(self.exchange);
        regs.write_register(crate::constants::reg::CIU_BIT_FRAMING, last_bits)?;
        let result = self.communicate(data, timeout_ms);
        let mut regs = ChipRegisters::new(self.exchange);
        regs.write_register(crate::constants::reg::CIU_BIT_FRAMING, 0x00)?;
        result
    }

    fn transceive_bytes(&mut self, data: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        self.communicate(data, timeout_ms)
    }
}

/// Driver for the REQA -> SDD_REQ/SEL_REQ cascade against a live card.
pub struct Anticollision<'a, X: Transceive + ?Sized> {
    tx: &'a mut X,
    cancel: Cancel,
    /// Pause between REQA attempts; card presence is intermittent by
    /// nature, so absence is retried rather than surfaced.
    backoff: Duration,
    timeout_ms: u64,
}

impl<'a, X: Transceive + ?Sized> Anticollision<'a, X> {
    /// Poll with a 1 second backoff between REQA attempts.
    pub fn new(tx: &'a mut X, cancel: Cancel) -> Self {
        Self {
            tx,
            cancel,
            backoff: Duration::from_secs(1),
            timeout_ms: 100,
        }
    }

    /// Override the pause between REQA attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Poll until a card answers REQA, then walk the cascade levels and
    /// assemble its identity. Returns `Ok(None)` when cancelled.
    pub fn poll_for_uid(&mut self) -> Result<Option<CardIdentity>> {
        let atqa = loop {
            if self.cancel.is_set() {
                return Ok(None);
            }
            match self.tx.transceive_bits(&[card::REQA], 7, self.timeout_ms) {
                Ok(resp) if resp.len() == 2 => {
                    break Atqa::from_bytes([resp[0], resp[1]]);
                }
                Ok(resp) => {
                    debug!("non-ATQA answer to REQA: {}", bytes_to_hex_spaced(&resp));
                }
                Err(Error::ResponseTimeout) => {}
                Err(err) => return Err(err),
            }
            if self.cancel.is_set() {
                return Ok(None);
            }
            thread::sleep(self.backoff);
        };
        debug!("ATQA {}", bytes_to_hex_spaced(atqa.as_bytes()));

        let mut uid_bytes: Vec<u8> = Vec::with_capacity(7);
        let mut sak = Sak::new(0);

        for level in [card::SEL_CL1, card::SEL_CL2] {
            let fragment = self.select_level(level, &mut uid_bytes)?;
            sak = fragment;
            if !sak.cascade_pending() {
                break;
            }
            if level == card::SEL_CL2 {
                return Err(Error::MalformedFrame(
                    "cascade bit still set after level 2".into(),
                ));
            }
        }

        let uid = Uid::try_from(&uid_bytes[..])?;
        info!("selected card uid {}", uid.to_hex());
        Ok(Some(CardIdentity::new(uid, atqa, sak)))
    }

    /// One cascade level: SDD_REQ for the UID fragment, then SEL_REQ to
    /// lock it in. Appends the valid UID bytes and returns the SAK.
    fn select_level(&mut self, level: u8, uid_bytes: &mut Vec<u8>) -> Result<Sak> {
        let sdd = self
            .tx
            .transceive_bytes(&[level, card::SDD_REQ], self.timeout_ms)?;
        if sdd.len() < 5 {
            return Err(Error::InvalidLength {
                expected: 5,
                actual: sdd.len(),
            });
        }

        // BCC is the XOR of the four preceding bytes. The check is
        // advisory: mismatches happen on marginal field coupling and the
        // SEL_REQ echo below is the real arbiter.
        let bcc = sdd[0] ^ sdd[1] ^ sdd[2] ^ sdd[3];
        if bcc != sdd[4] {
            warn!(
                "BCC mismatch at level {level:#04x}: computed {bcc:#04x}, got {:#04x}",
                sdd[4]
            );
        }

        if sdd[0] == card::CASCADE_TAG {
            uid_bytes.extend_from_slice(&sdd[1..4]);
        } else {
            uid_bytes.extend_from_slice(&sdd[..4]);
        }

        let mut sel = Vec::with_capacity(9);
        sel.push(level);
        sel.push(card::SEL_REQ);
        sel.extend_from_slice(&sdd[..5]);
        sel.extend_from_slice(&[0, 0]);
        crc_a_append(&mut sel)?;

        let sak_resp = self.tx.transceive_bytes(&sel, self.timeout_ms)?;
        let sak = *sak_resp.first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        Ok(Sak::new(sak))
    }
}

/// Let the chip run the whole anticollision itself (InListPassiveTarget)
/// and parse the selected target out of its response.
pub fn list_passive_target<T: Transport>(
    exchange: &mut Exchange<T>,
    baud: PollBaud,
    timeout_ms: u64,
) -> Result<Option<CardIdentity>> {
    let resp = exchange.command(
        cmd::IN_LIST_PASSIVE_TARGET,
        &[0x01, baud as u8],
        timeout_ms,
    )?;
    if resp.is_empty() {
        return Ok(None); // cancelled
    }

    // [NbTg, Tg, SENS_RES(2), SEL_RES, NFCIDLength, NFCID1...]
    if resp[0] == 0 {
        return Err(Error::ResponseTimeout); // no target in the field
    }
    if resp.len() < 7 {
        return Err(Error::InvalidLength {
            expected: 7,
            actual: resp.len(),
        });
    }
    let atqa = Atqa::from_bytes([resp[2], resp[3]]);
    let sak = Sak::new(resp[4]);
    let id_len = resp[5] as usize;
    if resp.len() < 6 + id_len {
        return Err(Error::InvalidLength {
            expected: 6 + id_len,
            actual: resp.len(),
        });
    }
    let uid = Uid::try_from(&resp[6..6 + id_len])?;
    Ok(Some(CardIdentity::new(uid, atqa, sak)))
}

/// Read one 16-byte chunk from a selected NTAG/Ultralight-class card via
/// InDataExchange.
pub fn read_page<T: Transport>(
    exchange: &mut Exchange<T>,
    page: u8,
    timeout_ms: u64,
) -> Result<[u8; 16]> {
    let resp = exchange.command(
        cmd::IN_DATA_EXCHANGE,
        &[0x01, card::READ_PAGE, page],
        timeout_ms,
    )?;
    match resp.split_first() {
        Some((&0x00, data)) if data.len() >= 16 => {
            let mut out = [0u8; 16];
            out.copy_from_slice(&data[..16]);
            Ok(out)
        }
        Some((&0x00, data)) => Err(Error::InvalidLength {
            expected: 16,
            actual: data.len(),
        }),
        Some((&status, _)) => Err(Error::ChipError(status)),
        None => Err(Error::ResponseTimeout),
    }
}
