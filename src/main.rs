#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};
use nrf_softdevice::{Flash, Softdevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::{BatteryInfo, BatteryStatus},
    display::Display,
};
use pinetime_watchface::{
    config::ConfigMessage,
    settings::FlashSettings,
    ui::TimeFormat,
    Event, WatchApp,
};
use system::{
    bluetooth::{self, Server},
    config::{SystemConfig, TIMEZONE_OFFSET},
    time::TimeManager,
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

/// Start of the flash page holding the face settings, excluded in memory.x
const SETTINGS_OFFSET: u32 = 0x7E000;
/// Frame period while the intro animation runs
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Event polling period once the face is static
const IDLE_INTERVAL: Duration = Duration::from_millis(200);
const BRIGHTNESS: u8 = 2;

type Store = FlashSettings<Flash>;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static CONFIG: Signal<ThreadModeRawMutex, ConfigMessage> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Receive configuration writes over BLE.
#[embassy_executor::task]
async fn serve_config(sd: &'static Softdevice, server: &'static Server) {
    bluetooth::run(sd, server, &CONFIG).await
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: BatteryStatus) {
    loop {
        if battery.update().await {
            // Battery status changed
            defmt::info!("Battery status updated");
            BATTERY_STATUS.signal(battery.info());
        };

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Signal the current time whenever the minute changes.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(time: TimeManager) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    let mut last_minute = None;
    loop {
        let now = time.now();
        let minute = Some((now.hour(), now.minute()));
        if minute != last_minute {
            last_minute = minute;
            TIME.signal(now);
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Own the watch face: apply events, advance the intro, paint when dirty.
///
/// The backlight is held here since dropping its pins switches it off.
#[embassy_executor::task(pool_size = 1)]
async fn run_app(mut app: WatchApp<Store>, mut display: Display, _backlight: Backlight) {
    loop {
        if TIME.signaled() {
            let time = TIME.wait().await;
            defmt::info!("Current time: {}:{}", time.hour(), time.minute());
            dispatch(&mut app, Event::Tick(time)).await;
        }

        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            dispatch(
                &mut app,
                Event::Battery {
                    percent: status.percent,
                    charging: status.charging,
                },
            )
            .await;
        }

        if CONFIG.signaled() {
            let message = CONFIG.wait().await;
            dispatch(&mut app, Event::Config(message)).await;
        }

        let animating = app.animating();
        if animating {
            dispatch(&mut app, Event::Frame(Instant::now().as_millis())).await;
        }

        display.refresh(&mut app);

        Timer::after(if animating {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        })
        .await;
    }
}

async fn dispatch(app: &mut WatchApp<Store>, event: Event) {
    if let Err(e) = app.handle(event).await {
        defmt::error!("Saving settings failed: {}", e);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Keep peripheral interrupts clear of the priorities used by the SoftDevice
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize Bluetooth
    let sd = Softdevice::enable(&SystemConfig::softdevice());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    let flash = Flash::take(sd);
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let mut backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        0,
    );

    // Initalize Battery
    let battery = BatteryStatus::init(Input::new(p.P0_12.degrade(), Pull::None), saadc).await;
    BATTERY_STATUS.signal(battery.info());

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let Some(display) = Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ) else {
        return;
    };
    backlight.set(BRIGHTNESS);
    defmt::debug!("Backlight at level {}", backlight.brightness());

    // Load settings and schedule the intro
    let time = TimeManager::init(UTC_EPOCH, TIMEZONE_OFFSET);
    let app = WatchApp::start(
        FlashSettings::new(flash, SETTINGS_OFFSET),
        TimeFormat::TwentyFourHour,
        time.now(),
        Instant::now().as_millis(),
    )
    .await;
    defmt::info!("Face mode: {}", app.state().face_mode());

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(serve_config(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_time(time)));
    unwrap!(spawner.spawn(run_app(app, display, backlight)));
}
