// typea/src/target/mod.rs

//! Card-side (target) emulation.
//!
//! The chip's automatic emulation engine only speaks ISO 14443-4, so the
//! responder first escapes it: CRC generation and parity checking are
//! switched off at the CIU registers, automatic ATR_RES/RATS handling is
//! dropped, and every card-layer command is then answered by hand from
//! [`Responder::run`].

use log::{debug, info, warn};

use crate::cancel::Cancel;
use crate::constants::{PARAMS_NONE, card, cmd, reg};
use crate::device::exchange::Exchange;
use crate::device::registers::{ChipRegisters, RegisterAccess};
use crate::protocol::crc::crc_a_append;
use crate::transport::Transport;
use crate::types::{EmulationImage, TargetConfig, Uid};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// CIU TxMode/RxMode bit enabling hardware CRC
const CRC_ENABLE: u8 = 0x80;
/// CIU ManualRCV bit disabling the parity check
const PARITY_DISABLE: u8 = 0x10;

/// Lifecycle of one emulation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderState {
    /// Activated, no REQA seen yet
    Idle,
    /// ATQA sent, anticollision in progress
    Polling,
    /// SEL_REQ answered with the final SAK
    Selected,
    /// At least one read served
    Serving,
    /// HLTA received, session over
    Halted,
}

/// One dispatch outcome: an optional card-layer reply, the next state,
/// and whether the session is over.
struct Step {
    reply: Option<Vec<u8>>,
    next: ResponderState,
    done: bool,
}

/// Serves a fake card identity and a read-only memory image to a live
/// reader.
pub struct Responder<'a> {
    uid: Uid,
    config: TargetConfig,
    image: EmulationImage<'a>,
    cancel: Cancel,
    state: ResponderState,
}

impl<'a> Responder<'a> {
    /// Build a responder for `uid` serving the pages of `image`.
    pub fn new(uid: Uid, config: TargetConfig, image: EmulationImage<'a>, cancel: Cancel) -> Self {
        Self {
            uid,
            config,
            image,
            cancel,
            state: ResponderState::Idle,
        }
    }

    /// Where the current (or last) session stands.
    pub fn state(&self) -> ResponderState {
        self.state
    }

    /// Run one emulation session to completion. Returns the final state:
    /// `Halted` after a clean HLTA, or wherever the session stood when
    /// the cancel token fired. Protocol violations and transport failures
    /// end the session as errors without touching the rest of the
    /// process.
    pub fn run<T: Transport>(&mut self, exchange: &mut Exchange<T>) -> Result<ResponderState> {
        if self.cancel.is_set() {
            return Ok(self.state);
        }

        self.escape_automatic_emulation(exchange)?;
        exchange.set_parameters(PARAMS_NONE)?;
        if self.init_as_target(exchange)?.is_none() {
            return Ok(self.state); // cancelled while waiting for a field
        }
        info!("target activated, serving uid {}", self.uid.to_hex());

        loop {
            if self.cancel.is_set() {
                return Ok(self.state);
            }

            // Blocks until the initiator talks to us again.
            let resp = exchange.command(cmd::TG_GET_INITIATOR_COMMAND, &[], 0)?;
            if resp.is_empty() {
                return Ok(self.state);
            }
            let (status, command) = resp.split_at(1);
            if status[0] != 0x00 {
                return Err(Error::ChipError(status[0]));
            }
            if command.is_empty() {
                return Err(Error::InvalidLength {
                    expected: 1,
                    actual: 0,
                });
            }
            debug!("<- initiator {}", bytes_to_hex_spaced(command));

            let step = self.dispatch(command)?;
            if let Some(reply) = step.reply {
                if self.cancel.is_set() {
                    return Ok(self.state);
                }
                self.send_reply(exchange, &reply)?;
            }
            self.state = step.next;
            if step.done {
                return Ok(self.state);
            }
        }
    }

    /// Turn off the CIU's CRC generation and parity checking so raw
    /// card-layer frames pass through untouched.
    fn escape_automatic_emulation<T: Transport>(
        &mut self,
        exchange: &mut Exchange<T>,
    ) -> Result<()> {
        let mut regs = ChipRegisters::new(exchange);
        regs.clear_bit_mask(reg::CIU_TX_MODE, CRC_ENABLE)?;
        regs.clear_bit_mask(reg::CIU_RX_MODE, CRC_ENABLE)?;
        regs.set_bit_mask(reg::CIU_MANUAL_RCV, PARITY_DISABLE)?;
        Ok(())
    }

    /// TgInitAsTarget. Blocks until an external field activates us;
    /// returns `None` when cancelled first.
    fn init_as_target<T: Transport>(
        &mut self,
        exchange: &mut Exchange<T>,
    ) -> Result<Option<Vec<u8>>> {
        // Mode, MifareParams(6), FeliCaParams(18), NFCID3t(10),
        // general bytes length, historical bytes length.
        let mut args = Vec::with_capacity(37);
        args.push(self.config.mode);
        args.extend_from_slice(&self.config.sens_res);
        args.extend_from_slice(&self.config.uid_prefix);
        args.push(self.config.sel_res);
        args.extend_from_slice(&[0u8; 18]);
        args.extend_from_slice(&[0u8; 10]);
        args.push(0x00);
        args.push(0x00);

        let resp = exchange.command(cmd::TG_INIT_AS_TARGET, &args, 0)?;
        if resp.is_empty() {
            return Ok(None);
        }
        Ok(Some(resp))
    }

    /// The transition function: card-layer command in, reply and next
    /// state out.
    fn dispatch(&self, command: &[u8]) -> Result<Step> {
        use ResponderState::*;

        match (command[0], self.state) {
            (card::REQA, Idle | Polling) => Ok(Step {
                reply: Some(self.config.sens_res.to_vec()),
                next: Polling,
                done: false,
            }),
            (level @ (card::SEL_CL1 | card::SEL_CL2), _)
                if command.get(1) == Some(&card::SDD_REQ) =>
            {
                Ok(Step {
                    reply: Some(self.sdd_fragment(level)?.to_vec()),
                    next: Polling,
                    done: false,
                })
            }
            (level @ (card::SEL_CL1 | card::SEL_CL2), _)
                if command.get(1) == Some(&card::SEL_REQ) =>
            {
                let (sak, complete) = self.sak_for_level(level)?;
                let mut reply = vec![sak, 0, 0];
                crc_a_append(&mut reply)?;
                Ok(Step {
                    reply: Some(reply),
                    next: if complete { Selected } else { Polling },
                    done: false,
                })
            }
            (card::READ_PAGE, Selected | Serving) => {
                let page = *command.get(1).ok_or(Error::InvalidLength {
                    expected: 2,
                    actual: command.len(),
                })?;
                let chunk = self.image.read_chunk(page as usize)?;
                let mut reply = Vec::with_capacity(chunk.len() + 2);
                reply.extend_from_slice(&chunk);
                reply.extend_from_slice(&[0, 0]);
                crc_a_append(&mut reply)?;
                Ok(Step {
                    reply: Some(reply),
                    next: Serving,
                    done: false,
                })
            }
            (card::HALT, _) => {
                debug!("HLTA, closing session");
                Ok(Step {
                    reply: None,
                    next: Halted,
                    done: true,
                })
            }
            (code, state) => {
                warn!("unhandled initiator command {code:#04x} in state {state:?}");
                Err(Error::UnknownInitiatorCommand(code))
            }
        }
    }

    /// 4-byte UID fragment + BCC for one cascade level. Double-size UIDs
    /// present the cascade tag at level 1.
    fn sdd_fragment(&self, level: u8) -> Result<[u8; 5]> {
        let four: [u8; 4] = match (level, &self.uid) {
            (card::SEL_CL1, Uid::Single(u)) => *u,
            (card::SEL_CL1, Uid::Double(u)) => [card::CASCADE_TAG, u[0], u[1], u[2]],
            (card::SEL_CL2, Uid::Double(u)) => [u[3], u[4], u[5], u[6]],
            _ => return Err(Error::UnknownInitiatorCommand(level)),
        };
        let bcc = four.iter().fold(0, |a, b| a ^ b);
        Ok([four[0], four[1], four[2], four[3], bcc])
    }

    /// SAK answered at one cascade level, and whether selection is now
    /// complete.
    fn sak_for_level(&self, level: u8) -> Result<(u8, bool)> {
        match (level, &self.uid) {
            (card::SEL_CL1, Uid::Single(_)) | (card::SEL_CL2, Uid::Double(_)) => {
                Ok((self.config.sel_res, true))
            }
            // UID incomplete, cascade bit set
            (card::SEL_CL1, Uid::Double(_)) => Ok((0x04, false)),
            _ => Err(Error::UnknownInitiatorCommand(level)),
        }
    }

    fn send_reply<T: Transport>(&self, exchange: &mut Exchange<T>, reply: &[u8]) -> Result<()> {
        debug!("-> initiator {}", bytes_to_hex_spaced(reply));
        let resp = exchange.command(
            cmd::TG_RESPONSE_TO_INITIATOR,
            reply,
            crate::utils::DEFAULT_READ_TIMEOUT_MS,
        )?;
        match resp.first() {
            Some(&0x00) | None => Ok(()),
            Some(&status) => Err(Error::ChipError(status)),
        }
    }
}
