//! Microchip maXTouch controller over I²C.
//!
//! The controller describes itself through an information block at address
//! 0 followed by an object table. Each object ("Tn") has a register window
//! and a range of report IDs used to tag its messages. The driver only needs
//! four of them:
//!
//! - T5, message processor: the message FIFO
//! - T6, command processor: reset and calibrate
//! - T7, power config
//! - T9, multi-touch screen: the touch reports
//!
//! The rest of the tuning (T8, T9 thresholds, T46, T56) stays whatever the
//! controller has in NVM.
//!
//! Register addresses go on the wire little-endian. The CHG line is pulled
//! low while messages are waiting.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::config::{MXT_I2C_ADDRESS, MXT_RESET_TIME_MS, MXT_T7_CONFIG};
use crate::error::TouchError;
use crate::touch::{TouchController, TouchEvent};

const INFO_BLOCK_LEN: usize = 7;
const OBJECT_ENTRY_LEN: usize = 6;

/// Largest T5 message the driver will read.
const MAX_MESSAGE_LEN: usize = 16;

const T5_MESSAGE_PROCESSOR: u8 = 5;
const T6_COMMAND_PROCESSOR: u8 = 6;
const T7_POWER_CONFIG: u8 = 7;
const T9_MULTITOUCH: u8 = 9;

const T6_RESET: u16 = 0;
const T6_CALIBRATE: u16 = 2;

/// Device identification from the information block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InfoBlock {
    pub family_id: u8,
    pub variant_id: u8,
    pub version: u8,
    pub build: u8,
    pub matrix_x: u8,
    pub matrix_y: u8,
    pub num_objects: u8,
}

impl InfoBlock {
    fn parse(raw: &[u8; INFO_BLOCK_LEN]) -> Self {
        Self {
            family_id: raw[0],
            variant_id: raw[1],
            version: raw[2],
            build: raw[3],
            matrix_x: raw[4],
            matrix_y: raw[5],
            num_objects: raw[6],
        }
    }
}

/// One object table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Object {
    address: u16,
    /// Register window size in bytes.
    size: u16,
}

impl Object {
    fn parse(raw: &[u8; OBJECT_ENTRY_LEN]) -> (u8, Self, u16) {
        let kind = raw[0];
        let object = Self {
            address: u16::from_le_bytes([raw[1], raw[2]]),
            size: u16::from(raw[3]) + 1,
        };
        let instances = u16::from(raw[4]) + 1;
        let report_ids = u16::from(raw[5]) * instances;
        (kind, object, report_ids)
    }
}

#[derive(Default)]
struct ObjectMap {
    t5: Option<Object>,
    t6: Option<Object>,
    t7: Option<Object>,
    /// First and last report ID owned by T9.
    t9_reports: Option<(u8, u8)>,
}

/// maXTouch driver.
pub struct Mxt<I2C, CHG> {
    i2c: I2C,
    chg: CHG,
    info: InfoBlock,
    message_addr: u16,
    message_len: usize,
    touch_reports: (u8, u8),
}

impl<I2C: I2c, CHG: InputPin> Mxt<I2C, CHG> {
    /// Probe the controller, parse its object table, reset it, apply the
    /// power config and recalibrate.
    pub fn new(i2c: I2C, chg: CHG, delay: &mut impl DelayNs) -> Result<Self, TouchError> {
        let mut mxt = Self {
            i2c,
            chg,
            info: InfoBlock::default(),
            message_addr: 0,
            message_len: 0,
            touch_reports: (0, 0),
        };

        let mut raw = [0u8; INFO_BLOCK_LEN];
        mxt.read(0, &mut raw)?;
        mxt.info = InfoBlock::parse(&raw);
        debug!("mxt: info {}", mxt.info);

        let map = mxt.read_object_table()?;
        let t5 = map.t5.ok_or(TouchError::ObjectNotFound(T5_MESSAGE_PROCESSOR))?;
        let t6 = map.t6.ok_or(TouchError::ObjectNotFound(T6_COMMAND_PROCESSOR))?;
        let t7 = map.t7.ok_or(TouchError::ObjectNotFound(T7_POWER_CONFIG))?;
        mxt.touch_reports = map
            .t9_reports
            .ok_or(TouchError::ObjectNotFound(T9_MULTITOUCH))?;

        // Checksum byte at the end of T5 is not read.
        let message_len = usize::from(t5.size.saturating_sub(1));
        if message_len > MAX_MESSAGE_LEN {
            return Err(TouchError::MessageTooLong);
        }
        mxt.message_addr = t5.address;
        mxt.message_len = message_len;

        mxt.write(t6.address + T6_RESET, &[0x01])?;
        delay.delay_ms(MXT_RESET_TIME_MS);
        mxt.write(t7.address, &MXT_T7_CONFIG)?;
        mxt.write(t6.address + T6_CALIBRATE, &[0x01])?;

        info!(
            "mxt: ready, family {=u8:#x} variant {=u8:#x}",
            mxt.info.family_id, mxt.info.variant_id
        );
        Ok(mxt)
    }

    pub fn info(&self) -> &InfoBlock {
        &self.info
    }

    /// Give back the bus and the CHG pin.
    pub fn release(self) -> (I2C, CHG) {
        (self.i2c, self.chg)
    }

    fn read_object_table(&mut self) -> Result<ObjectMap, TouchError> {
        let mut map = ObjectMap::default();
        // report ID 0 is reserved
        let mut next_report: u16 = 1;

        for i in 0..u16::from(self.info.num_objects) {
            let mut raw = [0u8; OBJECT_ENTRY_LEN];
            let addr = INFO_BLOCK_LEN as u16 + i * OBJECT_ENTRY_LEN as u16;
            self.read(addr, &mut raw)?;
            let (kind, object, report_ids) = Object::parse(&raw);
            trace!("mxt: T{} at {=u16:#x}", kind, object.address);

            match kind {
                T5_MESSAGE_PROCESSOR => map.t5 = Some(object),
                T6_COMMAND_PROCESSOR => map.t6 = Some(object),
                T7_POWER_CONFIG => map.t7 = Some(object),
                T9_MULTITOUCH if report_ids > 0 => {
                    let first = next_report;
                    let last = next_report.saturating_add(report_ids - 1);
                    map.t9_reports = u8::try_from(first)
                        .ok()
                        .zip(u8::try_from(last).ok());
                }
                _ => {}
            }
            next_report = next_report.saturating_add(report_ids);
        }
        Ok(map)
    }

    fn read(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), TouchError> {
        self.i2c
            .write_read(MXT_I2C_ADDRESS, &addr.to_le_bytes(), buf)
            .map_err(|_| TouchError::Bus)
    }

    fn write(&mut self, addr: u16, data: &[u8]) -> Result<(), TouchError> {
        let mut frame = [0u8; 2 + MAX_MESSAGE_LEN];
        let len = 2 + data.len();
        if len > frame.len() {
            return Err(TouchError::MessageTooLong);
        }
        frame[..2].copy_from_slice(&addr.to_le_bytes());
        frame[2..len].copy_from_slice(data);
        self.i2c
            .write(MXT_I2C_ADDRESS, &frame[..len])
            .map_err(|_| TouchError::Bus)
    }

    /// Decode a T9 message. `msg[0]` is the report ID.
    fn decode(&self, msg: &[u8]) -> Result<TouchEvent, TouchError> {
        let (first, last) = self.touch_reports;
        let id = msg[0];
        if id < first || id > last || msg.len() < 5 {
            return Err(TouchError::NoTouchEvent);
        }
        Ok(TouchEvent {
            status: msg[1],
            x: (u16::from(msg[2]) << 4) | u16::from(msg[4] >> 4),
            y: (u16::from(msg[3]) << 4) | u16::from(msg[4] & 0x0F),
        })
    }
}

impl<I2C: I2c, CHG: InputPin> TouchController for Mxt<I2C, CHG> {
    fn is_message_pending(&mut self) -> bool {
        // a pin we can't read counts as idle
        self.chg.is_low().unwrap_or(false)
    }

    fn read_touch_event(&mut self) -> Result<TouchEvent, TouchError> {
        let mut buf = [0u8; MAX_MESSAGE_LEN];
        let len = self.message_len;
        if len == 0 {
            return Err(TouchError::NoTouchEvent);
        }
        self.read(self.message_addr, &mut buf[..len])?;
        self.decode(&buf[..len])
    }
}
