//! Plugin for the macOS Bluetooth device cache.

use std::collections::HashSet;

use time::UtcOffset;

use crate::context::ParserContext;
use crate::error::PluginError;
use crate::event::{Event, LAST_INQUIRY_TIME, LAST_NAME_UPDATE_TIME, LAST_SERVICES_UPDATE_TIME};
use crate::plugin::PlistPlugin;
use crate::timestamp::{DateValue, interpret};

/// Data type tag of events produced by [`BluetoothPlugin`].
const DATA_TYPE: &str = "plist:bluetooth";

/// Device cache keys that hold timestamps, with what each one means.
const TIMESTAMP_KEYS: [(&str, &str); 3] = [
    ("LastInquiryUpdate", LAST_INQUIRY_TIME),
    ("LastNameUpdate", LAST_NAME_UPDATE_TIME),
    ("LastServicesUpdate", LAST_SERVICES_UPDATE_TIME),
];

/// Extracts device activity from `com.apple.bluetooth.plist`.
///
/// Every entry of `DeviceCache` is keyed by the device address. For each
/// timestamp the entry holds, one event is emitted with the fields
/// `address`, `name` (when the device reported one), and `paired` (whether
/// the address is listed in `PairedDevices`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BluetoothPlugin;

impl PlistPlugin for BluetoothPlugin {
    fn name(&self) -> &str {
        "plist_bluetooth"
    }

    fn description(&self) -> &str {
        "Parser for Bluetooth plist files."
    }

    fn plist_name(&self) -> Option<&str> {
        Some("com.apple.bluetooth.plist")
    }

    fn required_keys(&self) -> &[&str] {
        &["DeviceCache"]
    }

    fn get_entries(
        &self,
        context: &ParserContext,
        plist_name: &str,
        top_level: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        let Some(device_cache) = top_level
            .get("DeviceCache")
            .and_then(plist::Value::as_dictionary)
        else {
            return Err(PluginError::wrong_plugin(
                self.name(),
                "'DeviceCache' is not a dictionary",
            ));
        };

        let paired: HashSet<&str> = top_level
            .get("PairedDevices")
            .and_then(plist::Value::as_array)
            .map(|devices| devices.iter().filter_map(plist::Value::as_string).collect())
            .unwrap_or_default();

        let zone = context.knowledge_base().zone()?;
        for (address, entry) in device_cache.iter() {
            let Some(device) = entry.as_dictionary() else {
                context.produce_parse_error(
                    self.name(),
                    plist_name,
                    format!("device cache entry '{address}' is not a dictionary"),
                )?;
                continue;
            };
            let device_ref = DeviceRef {
                address,
                paired: paired.contains(address.as_str()),
            };
            self.device_events(context, plist_name, zone, device_ref, device)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct DeviceRef<'a> {
    address: &'a str,
    paired: bool,
}

impl BluetoothPlugin {
    fn device_events(
        &self,
        context: &ParserContext,
        plist_name: &str,
        zone: UtcOffset,
        device_ref: DeviceRef<'_>,
        device: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        let device_name = device.get("Name").and_then(plist::Value::as_string);

        for (key, description) in TIMESTAMP_KEYS {
            let Some(value) = device.get(key) else {
                continue;
            };
            let timestamp = match interpret(value, zone) {
                DateValue::Timestamp(timestamp) => timestamp,
                DateValue::Malformed(message) => {
                    context.produce_parse_error(
                        self.name(),
                        plist_name,
                        format!("{}/{key}: {message}", device_ref.address),
                    )?;
                    continue;
                }
                DateValue::NotADate => {
                    context.produce_parse_error(
                        self.name(),
                        plist_name,
                        format!("{}/{key} is not a date", device_ref.address),
                    )?;
                    continue;
                }
            };

            let mut event = Event::new(timestamp, description, DATA_TYPE)
                .with_field("address", device_ref.address)
                .with_field("paired", device_ref.paired)
                .with_message(format!(
                    "Bluetooth device {} {}",
                    device_ref.address,
                    description.to_ascii_lowercase()
                ));
            if let Some(device_name) = device_name {
                event = event.with_field("name", device_name);
            }
            context.produce_event(self.name(), event)?;
        }
        Ok(())
    }
}
