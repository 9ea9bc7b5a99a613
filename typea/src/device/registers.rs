// typea/src/device/registers.rs

//! Uniform access to the contactless-front-end configuration registers.
//!
//! Two wirings exist for the same capability: serial hosts reach the CIU
//! registers through the chip's ReadRegister/WriteRegister passthrough
//! commands, SPI hosts talk to the register file directly with 2-byte bus
//! transactions. Callers stay backend-agnostic through [`RegisterAccess`].

use log::trace;

use crate::constants::{MAX_PAYLOAD_LEN, cmd};
use crate::device::exchange::Exchange;
use crate::transport::{RegisterBus, Transport};
use crate::{Error, Result};

/// Read/write access to front-end registers. Every access is a live bus
/// operation; nothing is cached.
pub trait RegisterAccess {
    /// Read the register at `addr`.
    fn read_register(&mut self, addr: u16) -> Result<u8>;
    /// Write `value` to the register at `addr`.
    fn write_register(&mut self, addr: u16, value: u8) -> Result<()>;

    /// Set `mask` bits in the register at `addr`.
    fn set_bit_mask(&mut self, addr: u16, mask: u8) -> Result<()> {
        let value = self.read_register(addr)?;
        self.write_register(addr, value | mask)
    }

    /// Clear `mask` bits in the register at `addr`.
    fn clear_bit_mask(&mut self, addr: u16, mask: u8) -> Result<()> {
        let value = self.read_register(addr)?;
        self.write_register(addr, value & !mask)
    }
}

/// Serial-path registers: ReadRegister (0x06) / WriteRegister (0x08)
/// passthrough via the command engine. Addresses are the full 16-bit
/// 0x63xx CIU space.
pub struct ChipRegisters<'a, T: Transport> {
    exchange: &'a mut Exchange<T>,
    timeout_ms: u64,
}

impl<'a, T: Transport> ChipRegisters<'a, T> {
    /// Borrow the command engine for a run of register operations.
    pub fn new(exchange: &'a mut Exchange<T>) -> Self {
        Self {
            exchange,
            timeout_ms: crate::utils::DEFAULT_READ_TIMEOUT_MS,
        }
    }

    fn passthrough(&mut self, code: u8, args: &[u8]) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + args.len());
        payload.push(code);
        payload.extend_from_slice(args);

        let resp = self
            .exchange
            .send_command(&payload, MAX_PAYLOAD_LEN, self.timeout_ms)?;
        let expected = cmd::response(code);
        match resp.first() {
            Some(&echoed) if echoed == expected => Ok(resp[1..].to_vec()),
            Some(&echoed) => Err(Error::RegisterAccess {
                expected,
                actual: echoed,
            }),
            None => Err(Error::ResponseTimeout),
        }
    }
}

impl<T: Transport> RegisterAccess for ChipRegisters<'_, T> {
    fn read_register(&mut self, addr: u16) -> Result<u8> {
        let [hi, lo] = addr.to_be_bytes();
        let resp = self.passthrough(cmd::READ_REGISTER, &[hi, lo])?;
        let value = *resp.first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        trace!("reg[{addr:#06x}] -> {value:#04x}");
        Ok(value)
    }

    fn write_register(&mut self, addr: u16, value: u8) -> Result<()> {
        let [hi, lo] = addr.to_be_bytes();
        trace!("reg[{addr:#06x}] <- {value:#04x}");
        self.passthrough(cmd::WRITE_REGISTER, &[hi, lo, value])?;
        Ok(())
    }
}

/// Bus-path registers: directly addressed SPI transactions, no framing
/// layer involved. Addresses are 6 bits wide; the MSB of the first shifted
/// byte selects read (1) or write (0), the LSB stays 0.
pub struct BusRegisters<B: RegisterBus> {
    bus: B,
}

impl<B: RegisterBus> BusRegisters<B> {
    /// Take ownership of the bus.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Give the bus back.
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> RegisterAccess for BusRegisters<B> {
    fn read_register(&mut self, addr: u16) -> Result<u8> {
        let tx = [((addr as u8) << 1) | 0x80, 0x00];
        let rx = self.bus.transact(tx)?;
        trace!("reg[{addr:#04x}] -> {:#04x}", rx[1]);
        Ok(rx[1])
    }

    fn write_register(&mut self, addr: u16, value: u8) -> Result<()> {
        let tx = [((addr as u8) << 1) & 0x7E, value];
        trace!("reg[{addr:#04x}] <- {value:#04x}");
        self.bus.transact(tx)?;
        Ok(())
    }
}
