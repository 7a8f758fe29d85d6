//! washpanel - washing-machine front panel firmware for nRF52840.
//!
//! Bring-up: touch controller on TWIM0, ILI9488 LCD on SPIM3, diagnostic
//! UART on UARTE0, door sensor / release button / door LED on GPIO. After
//! that a single loop polls the touch controller and drains the event flags
//! into the panel state machine.

#![no_std]
#![no_main]

mod inputs;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals, spim, twim};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9488Rgb666;
use mipidsi::options::{Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;
use washpanel::config::{DIAG_BAUD_RATE, PANEL_HEIGHT, PANEL_WIDTH, POLL_INTERVAL_MS};
use washpanel::diag::DiagnosticSink;
use washpanel::display::GraphicsSurface;
use washpanel::events::dispatch_pending;
use washpanel::touch::{self, mxt::Mxt};
use washpanel::ui::panel::Panel;
use washpanel::ui::PanelIo;
use washpanel::Error;
use {defmt_rtt as _, panic_probe as _};

use crate::inputs::{edge_task, tick_task, EdgeSource, EVENTS, TICK_ARM, WAKE};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Tick control and the door LED.
struct BoardIo {
    /// Active-low.
    door_led: Output<'static>,
}

impl PanelIo for BoardIo {
    fn set_tick_enabled(&mut self, enabled: bool) {
        TICK_ARM.signal(enabled);
    }

    fn set_door_led(&mut self, on: bool) {
        if on {
            self.door_led.set_low();
        } else {
            self.door_led.set_high();
        }
    }
}

/// Best-effort serial log.
struct UartSink {
    tx: UarteTx<'static, UARTE0>,
}

impl DiagnosticSink for UartSink {
    fn write_line(&mut self, line: &str) {
        if self.tx.blocking_write(line.as_bytes()).is_err() {
            debug!("diag: {}", Error::Uart);
        }
    }
}

fn uart_baudrate(rate: u32) -> uarte::Baudrate {
    match rate {
        9_600 => uarte::Baudrate::BAUD9600,
        115_200 => uarte::Baudrate::BAUD115200,
        _ => uarte::Baudrate::BAUD57600,
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("washpanel: starting");

    // Touch controller
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);
    let chg = Input::new(p.P0_28, Pull::Up);
    let mut mxt = match Mxt::new(i2c, chg, &mut Delay) {
        Ok(mxt) => mxt,
        Err(e) => defmt::panic!("touch init failed: {}", Error::from(e)),
    };
    info!("touch: {}", mxt.info());

    // LCD
    let mut spim_config = spim::Config::default();
    spim_config.frequency = spim::Frequency::M32;
    let spi = spim::Spim::new(p.SPI3, Irqs, p.P1_15, p.P1_14, p.P1_13, spim_config);
    let cs = Output::new(p.P1_12, Level::High, OutputDrive::Standard);
    let dc = Output::new(p.P1_11, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P1_10, Level::High, OutputDrive::Standard);
    let Ok(spi_device) = ExclusiveDevice::new(spi, cs, Delay) else {
        defmt::panic!("LCD chip select: {}", Error::Init);
    };
    let interface = SpiInterface::new(spi_device, dc, SPI_BUFFER.init([0; 512]));
    let display = match Builder::new(ILI9488Rgb666, interface)
        .reset_pin(rst)
        .display_size(PANEL_HEIGHT, PANEL_WIDTH)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
    {
        Ok(display) => display,
        Err(_) => defmt::panic!("LCD init failed: {}", Error::Display),
    };
    let mut surface = GraphicsSurface::new(display);

    // Diagnostics
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uart_baudrate(DIAG_BAUD_RATE);
    let mut sink = UartSink {
        tx: UarteTx::new(p.UARTE0, Irqs, p.P0_06, uart_config),
    };

    let mut io = BoardIo {
        door_led: Output::new(p.P0_13, Level::High, OutputDrive::Standard),
    };

    spawner.must_spawn(edge_task(p.P0_11.degrade(), EdgeSource::Door));
    spawner.must_spawn(edge_task(p.P0_12.degrade(), EdgeSource::Release));
    spawner.must_spawn(tick_task());

    let mut panel = Panel::new();
    if panel.boot(&mut surface, &mut io).is_err() {
        defmt::panic!("first draw failed: {}", Error::Init);
    }
    info!("washpanel: ready");

    loop {
        if touch::poll(&mut mxt, &mut panel, &mut surface, &mut io, &mut sink).is_err() {
            warn!("touch: {}", Error::Display);
        }
        if dispatch_pending(&EVENTS, &mut panel, &mut surface, &mut io).is_err() {
            warn!("events: {}", Error::Display);
        }
        select(WAKE.wait(), Timer::after_millis(POLL_INTERVAL_MS)).await;
    }
}
