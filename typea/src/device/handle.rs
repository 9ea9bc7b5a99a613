// typea/src/device/handle.rs

//! The caller-facing device handle and its type-state lifecycle.

use std::marker::PhantomData;

use log::info;

use crate::cancel::Cancel;
use crate::constants::SamMode;
use crate::device::exchange::Exchange;
use crate::device::registers::{ChipRegisters, RegisterAccess};
use crate::initiator;
use crate::target::{Responder, ResponderState};
use crate::transport::Transport;
use crate::types::{CardIdentity, EmulationImage, PollBaud, TargetConfig, Uid};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// Type-state marker: constructed but not yet woken.
pub struct Uninitialized;
/// Type-state marker: woken and SAM-configured, card operations
/// available.
pub struct Initialized;

/// Device handle that enforces the wake/configure sequence at compile
/// time: card operations only exist on `Device<T, Initialized>`.
pub struct Device<T: Transport, State = Uninitialized> {
    exchange: Exchange<T>,
    firmware: Vec<u8>,
    _state: PhantomData<State>,
}

impl<T: Transport, State> Device<T, State> {
    /// The cancellation token shared with every blocking operation on
    /// this handle.
    pub fn cancel(&self) -> Cancel {
        self.exchange.cancel()
    }
}

impl<T: Transport> Device<T, Uninitialized> {
    pub(crate) fn from_exchange(exchange: Exchange<T>) -> Self {
        Self {
            exchange,
            firmware: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Wake the chip, confirm it answers, and activate it for standalone
    /// use (SAMConfiguration Normal). Returns an initialized handle.
    pub fn initialize(self) -> Result<Device<T, Initialized>> {
        let mut this = self;
        let firmware = this.exchange.wake()?;
        info!("chip answered wake: {}", bytes_to_hex_spaced(&firmware));
        this.exchange.configure(SamMode::Normal)?;
        Ok(Device {
            exchange: this.exchange,
            firmware,
            _state: PhantomData,
        })
    }
}

impl<T: Transport> Device<T, Initialized> {
    /// IC, version, revision and support bytes captured during wake.
    pub fn firmware(&self) -> &[u8] {
        &self.firmware
    }

    /// One chip-driven polling pass. `Ok(None)` means the pass was
    /// cancelled before a card appeared.
    pub fn poll_for_uid(&mut self, baud: PollBaud, timeout_ms: u64) -> Result<Option<CardIdentity>> {
        initiator::list_passive_target(&mut self.exchange, baud, timeout_ms)
    }

    /// Read the 16-byte chunk starting at `page` from the currently
    /// selected card.
    pub fn read_page(&mut self, page: u8, timeout_ms: u64) -> Result<[u8; 16]> {
        initiator::read_page(&mut self.exchange, page, timeout_ms)
    }

    /// Run one emulation session serving `uid` and `image` until the
    /// reader halts us or the cancel token fires.
    pub fn emulate(&mut self, uid: Uid, image: EmulationImage<'_>) -> Result<ResponderState> {
        let config = match uid {
            Uid::Single(bytes) => TargetConfig::ntag_like([bytes[1], bytes[2], bytes[3]]),
            Uid::Double(bytes) => TargetConfig::ntag_like([bytes[0], bytes[1], bytes[2]]),
        };
        let cancel = self.exchange.cancel();
        Responder::new(uid, config, image, cancel).run(&mut self.exchange)
    }

    /// Read one CIU register through the serial passthrough.
    pub fn read_register(&mut self, addr: u16) -> Result<u8> {
        ChipRegisters::new(&mut self.exchange).read_register(addr)
    }

    /// Write one CIU register through the serial passthrough.
    pub fn write_register(&mut self, addr: u16, value: u8) -> Result<()> {
        ChipRegisters::new(&mut self.exchange).write_register(addr, value)
    }

    /// Escape hatch for operations the handle does not wrap.
    pub fn exchange_mut(&mut self) -> &mut Exchange<T> {
        &mut self.exchange
    }
}
