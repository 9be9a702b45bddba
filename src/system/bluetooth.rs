//! Bluetooth module
//!
//! Exposes a single writable characteristic that carries configuration
//! messages for the watch face.

use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};
use nrf_softdevice::{
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
        },
        gatt_server, peripheral,
    },
    Softdevice,
};
use pinetime_watchface::config::ConfigMessage;

/// Pause before advertising again after the SoftDevice refused to start
const ADVERTISE_RETRY: Duration = Duration::from_secs(1);

/// Longest configuration payload accepted in one write
pub const PAYLOAD_LEN: usize = 16;

/// Configuration service UUID in advertising (little endian) byte order
const CONFIG_SERVICE: [u8; 16] = [
    0x9e, 0xca, 0xdc, 0x24, 0x0e, 0xe5, 0xa9, 0xe0, 0x93, 0xf3, 0xa3, 0xb5, 0x01, 0x00, 0x40, 0x6e,
];

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(ServiceList::Complete, &[CONFIG_SERVICE])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub config: ConfigService,
}

#[nrf_softdevice::gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e")]
pub struct ConfigService {
    #[characteristic(uuid = "6e400002-b5a3-f393-e0a9-e50e24dcca9e", write, write_without_response)]
    pub payload: heapless::Vec<u8, PAYLOAD_LEN>,
}

/// Decode a written payload and hand it to the app task
fn on_payload(payload: &[u8], config: &Signal<ThreadModeRawMutex, ConfigMessage>) {
    match ConfigMessage::decode(payload) {
        Ok(message) => {
            defmt::info!("Configuration received: {}", message);
            config.signal(message);
        }
        Err(e) => defmt::warn!("Dropping configuration payload: {}", e),
    }
}

/// Advertise, serve one connection at a time, repeat.
pub async fn run(
    sd: &'static Softdevice,
    server: &Server,
    config: &'static Signal<ThreadModeRawMutex, ConfigMessage>,
) -> ! {
    let adv_config = peripheral::Config::default();
    loop {
        let advertisement = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, advertisement, &adv_config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {}", e);
                // The error path never yields to the executor
                Timer::after(ADVERTISE_RETRY).await;
                continue;
            }
        };
        defmt::info!("Central connected");

        let reason = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Config(ConfigServiceEvent::PayloadWrite(payload)) => {
                on_payload(&payload, config)
            }
        })
        .await;
        defmt::info!("Central disconnected: {}", reason);
    }
}
