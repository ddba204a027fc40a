#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Instant, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use gamepad_core::{AdcChannel, PinId};
use static_cell::StaticCell;
use usb_gamepad::{
    board, configure_usb_hid, BoardInputs, ControllerConfig, DeviceStatus, GamepadController,
    GamepadRequestHandler, GamepadWriter, HidLink, ReportId, ReportSlot, UsbDriver, UsbHandler,
    UsbTransport,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type Gamepad = GamepadController<'static, BoardInputs<'static>, UsbTransport, Output<'static>, 1>;

/// USB connectivity, written by the USB handler and read by the gamepad loop.
static STATUS: DeviceStatus = DeviceStatus::new();

/// Report hand-off between the gamepad loop and the HID writer.
static LINK: HidLink = HidLink::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<GamepadRequestHandler> = StaticCell::new();
static USB_HANDLER: StaticCell<UsbHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("USB gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Inputs ---
    let buttons = [
        (PinId(7), Input::new(p.PIN_7, Pull::Up)),
        (PinId(8), Input::new(p.PIN_8, Pull::Up)),
        (PinId(5), Input::new(p.PIN_5, Pull::Up)),
        (PinId(6), Input::new(p.PIN_6, Pull::Up)),
        (PinId(9), Input::new(p.PIN_9, Pull::Up)),
        (PinId(20), Input::new(p.PIN_20, Pull::Up)),
        (PinId(21), Input::new(p.PIN_21, Pull::Up)),
    ];
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sticks = [
        (AdcChannel(0), Channel::new_pin(p.PIN_26, Pull::None)),
        (AdcChannel(1), Channel::new_pin(p.PIN_27, Pull::None)),
    ];
    let inputs = BoardInputs::new(buttons, adc, sticks);

    // External status LED
    let led = Output::new(p.PIN_18, Level::Low);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("USB Gamepad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = true;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(USB_HANDLER.init(UsbHandler::new(&STATUS)));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(GamepadRequestHandler::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Build the USB device
    let usb_device = builder.build();

    let gamepad: Gamepad = GamepadController::new(
        ControllerConfig::default(),
        [ReportSlot::new(ReportId::GAMEPAD, board::REGISTRY)],
        inputs,
        UsbTransport::new(&LINK, &STATUS),
        led,
        &STATUS,
    );

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device, &LINK).unwrap());
    spawner.spawn(hid_writer_task(hid_writer, &LINK).unwrap());
    spawner.spawn(gamepad_task(gamepad, &LINK).unwrap());

    info!("USB gamepad initialized");
}

/// USB device task - runs the USB stack and wakes the host on request.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, UsbDriver<'static>>, link: &'static HidLink) {
    loop {
        device.run_until_suspend().await;
        match select(device.wait_resume(), link.wakeup_requested()).await {
            Either::First(()) => link.clear_wakeup(),
            Either::Second(()) => {
                info!("Requesting remote wakeup");
                if let Err(e) = device.remote_wakeup().await {
                    warn!("Remote wakeup failed: {:?}", e);
                }
            }
        }
    }
}

/// HID writer task - sends queued reports and signals completion.
#[embassy_executor::task]
async fn hid_writer_task(mut writer: GamepadWriter<'static>, link: &'static HidLink) {
    link.run_writer(&mut writer).await
}

/// Gamepad task - cooperative loop over the report and indicator tasks.
#[embassy_executor::task]
async fn gamepad_task(mut gamepad: Gamepad, link: &'static HidLink) {
    loop {
        // Wraps after ~49 days; the scheduler uses wrapping arithmetic.
        let now_ms = Instant::now().as_millis() as u32;
        gamepad.poll(now_ms);

        if let Some(id) = link.take_sent() {
            gamepad.on_report_sent(id);
        }

        Timer::after_millis(1).await;
    }
}
