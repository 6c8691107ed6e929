use bitflags::bitflags;
use log::{debug, info};
use rusb::{
    Context, Device, DeviceDescriptor, DeviceHandle, Direction, Recipient, RequestType,
    TransferType, UsbContext,
};
use std::time::Duration;

use crate::{command::CommandBuilder, error::Error};

/// Argox vendor id.
pub const DEFAULT_VENDOR_ID: u16 = 0x1664;
/// Product id of the Argox printer this driver was written against.
pub const DEFAULT_PRODUCT_ID: u16 = 0x032a;

// USB printer class requests
const GET_DEVICE_ID: u8 = 0x00;
const GET_PORT_STATUS: u8 = 0x01;
const SOFT_RESET: u8 = 0x02;

const DEVICE_ID_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Endpoint {
    config: u8,
    iface: u8,
    setting: u8,
    address: u8,
    max_packet_size: u16,
}

/// Connection to a PPLA printer over its bulk endpoint pair.
pub struct Printer {
    handle: Box<DeviceHandle<Context>>,
    endpoint_out: Endpoint,
    endpoint_in: Endpoint,
    config: Config,
}

impl Printer {
    pub fn new(config: Config) -> Result<Self, Error> {
        match Context::new() {
            Ok(mut context) => {
                match Self::open_device(
                    &mut context,
                    config.vendor_id,
                    config.product_id,
                    config.serial.as_deref(),
                ) {
                    Ok((mut device, device_desc, mut handle)) => {
                        let endpoint_out = match Self::find_endpoint(
                            &mut device,
                            &device_desc,
                            Direction::Out,
                            TransferType::Bulk,
                            None,
                        ) {
                            Some(endpoint) => endpoint,
                            None => return Err(Error::MissingEndpoint),
                        };

                        // only the OUT endpoint's interface gets claimed
                        let endpoint_in = match Self::find_endpoint(
                            &mut device,
                            &device_desc,
                            Direction::In,
                            TransferType::Bulk,
                            Some(endpoint_out.iface),
                        ) {
                            Some(endpoint) => endpoint,
                            None => return Err(Error::MissingEndpoint),
                        };

                        // usblp claims the interface on Linux
                        if let Err(err) = handle.set_auto_detach_kernel_driver(true) {
                            debug!("Kernel driver auto detach unavailable: {:?}", err);
                        }
                        let has_kernel_driver = matches!(
                            handle.kernel_driver_active(endpoint_out.iface),
                            Ok(true)
                        );
                        info!("Kernel driver active: {}", has_kernel_driver);
                        handle.set_active_configuration(endpoint_out.config)?;
                        handle.claim_interface(endpoint_out.iface)?;
                        handle.set_alternate_setting(endpoint_out.iface, endpoint_out.setting)?;

                        Ok(Printer {
                            handle: Box::new(handle),
                            endpoint_out,
                            endpoint_in,
                            config,
                        })
                    }
                    Err(err) => {
                        debug!("{:?}", err);
                        Err(Error::DeviceOffline)
                    }
                }
            }
            Err(err) => Err(Error::UsbError(err)),
        }
    }

    fn open_device(
        context: &mut Context,
        vid: u16,
        pid: u16,
        serial: Option<&str>,
    ) -> Result<(Device<Context>, DeviceDescriptor, DeviceHandle<Context>), Error> {
        let devices = context.devices()?;

        if devices.is_empty() {
            debug!("Failed to read device list");
            return Err(Error::DeviceListNotReadable);
        }
        for device in devices.iter() {
            let device_desc = match device.device_descriptor() {
                Ok(d) => d,
                Err(err) => {
                    debug!("{:?}", err);
                    continue;
                }
            };

            if device_desc.vendor_id() != vid || device_desc.product_id() != pid {
                continue;
            }
            debug!("{:?}", device_desc);

            let handle = match device.open() {
                Ok(handle) => handle,
                Err(err) => {
                    debug!("Failed to open device: {:?}", err);
                    continue;
                }
            };

            let serial = match serial {
                Some(serial) => serial,
                None => return Ok((device, device_desc, handle)),
            };

            let timeout = Duration::from_secs(1);
            let languages = handle.read_languages(timeout)?;
            if let Some(language) = languages.first() {
                match handle.read_serial_number_string(*language, &device_desc, timeout) {
                    Ok(s) if s == serial => return Ok((device, device_desc, handle)),
                    Ok(_) => continue,
                    Err(err) => {
                        debug!("Failed to read serial number string: {:?}", err);
                        continue;
                    }
                }
            }
        }
        debug!("No device match {:04x}:{:04x} {:?}", vid, pid, serial);
        Err(Error::DeviceOffline)
    }

    fn find_endpoint(
        device: &mut Device<Context>,
        device_desc: &DeviceDescriptor,
        direction: Direction,
        transfer_type: TransferType,
        iface: Option<u8>,
    ) -> Option<Endpoint> {
        let mut candidates = Vec::new();
        for n in 0..device_desc.num_configurations() {
            let config_desc = match device.config_descriptor(n) {
                Ok(c) => c,
                Err(_) => continue,
            };
            for interface in config_desc.interfaces() {
                for interface_desc in interface.descriptors() {
                    for endpoint_desc in interface_desc.endpoint_descriptors() {
                        candidates.push((
                            endpoint_desc.direction(),
                            endpoint_desc.transfer_type(),
                            Endpoint {
                                config: config_desc.number(),
                                iface: interface_desc.interface_number(),
                                setting: interface_desc.setting_number(),
                                address: endpoint_desc.address(),
                                max_packet_size: endpoint_desc.max_packet_size(),
                            },
                        ));
                    }
                }
            }
        }
        pick_endpoint(candidates, direction, transfer_type, iface)
    }

    /// Write `buf` to the bulk OUT endpoint, one packet at a time.
    ///
    /// Returns the number of bytes written, which is always `buf.len()`.
    pub fn send(&self, buf: &[u8]) -> Result<usize, Error> {
        let timeout = self.config.timeout;
        let address = self.endpoint_out.address;
        write_chunked(buf, self.endpoint_out.max_packet_size as usize, |chunk| {
            Ok(self.handle.write_bulk(address, chunk, timeout)?)
        })
    }

    /// Read at most `max_length` bytes from the bulk IN endpoint.
    pub fn receive(&self, max_length: usize) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0x00; max_length];
        let n = self
            .handle
            .read_bulk(self.endpoint_in.address, &mut buf, self.config.timeout)?;
        buf.truncate(n);
        debug!("received {} bytes: {:X?}", n, buf);
        Ok(buf)
    }

    /// Send every command accumulated in `commands`.
    pub fn print(&self, commands: &CommandBuilder) -> Result<usize, Error> {
        debug!("print job of {} bytes", commands.len());
        self.send(commands.get_bytes())
    }

    fn class_request(&self, request: u8, buf: &mut [u8]) -> Result<usize, Error> {
        let request_type =
            rusb::request_type(Direction::In, RequestType::Class, Recipient::Interface);
        let n = self.handle.read_control(
            request_type,
            request,
            0,
            self.endpoint_out.iface as u16,
            buf,
            self.config.timeout,
        )?;
        Ok(n)
    }

    /// IEEE 1284 device id string.
    pub fn device_id(&self) -> Result<String, Error> {
        let mut buf = [0x00; DEVICE_ID_LENGTH];
        let n = self.class_request(GET_DEVICE_ID, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }

    pub fn port_status(&self) -> Result<PortStatus, Error> {
        let mut buf = [0x00; 1];
        match self.class_request(GET_PORT_STATUS, &mut buf)? {
            1 => {
                let status = PortStatus::from_byte(buf[0]);
                debug!("Raw port status {:08b}: {:?}", buf[0], status);
                Ok(status)
            }
            n => Err(Error::InvalidResponse(n)),
        }
    }

    pub fn soft_reset(&self) -> Result<(), Error> {
        self.class_request(SOFT_RESET, &mut [])?;
        Ok(())
    }
}

impl Drop for Printer {
    fn drop(&mut self) {
        if let Err(err) = self.handle.release_interface(self.endpoint_out.iface) {
            debug!("Failed to release interface: {:?}", err);
        }
    }
}

/// First endpoint matching `direction` and `transfer_type`, restricted to
/// interface `iface` when given.
fn pick_endpoint(
    candidates: impl IntoIterator<Item = (Direction, TransferType, Endpoint)>,
    direction: Direction,
    transfer_type: TransferType,
    iface: Option<u8>,
) -> Option<Endpoint> {
    candidates
        .into_iter()
        .find(|(d, t, endpoint)| {
            *d == direction
                && *t == transfer_type
                && iface.map_or(true, |iface| endpoint.iface == iface)
        })
        .map(|(_, _, endpoint)| endpoint)
}

/// Split `buf` into packets of at most `packet_size` bytes and hand them to
/// `write` in order, advancing by what each call reports as written.
pub(crate) fn write_chunked<F>(
    buf: &[u8],
    packet_size: usize,
    mut write: F,
) -> Result<usize, Error>
where
    F: FnMut(&[u8]) -> Result<usize, Error>,
{
    let packet_size = packet_size.max(1);
    let mut offset = 0;
    while offset < buf.len() {
        let end = (offset + packet_size).min(buf.len());
        let n = write(&buf[offset..end])?;
        if n == 0 {
            debug!("bulk write stalled at {} of {} bytes", offset, buf.len());
            return Err(Error::WriteFailed { offset });
        }
        offset += n;
    }
    Ok(offset)
}

bitflags! {
    struct PortBits: u8 {
        const NOT_ERROR = 0b0000_1000;
        const SELECT = 0b0001_0000;
        const PAPER_EMPTY = 0b0010_0000;
    }
}

///
/// Port status of the USB printer class, decoded to Rust friendly type.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStatus {
    pub paper_empty: bool,
    pub select: bool,
    pub error: bool,
}

impl PortStatus {
    pub fn from_byte(byte: u8) -> Self {
        let bits = PortBits::from_bits_truncate(byte);
        PortStatus {
            paper_empty: bits.contains(PortBits::PAPER_EMPTY),
            select: bits.contains(PortBits::SELECT),
            error: !bits.contains(PortBits::NOT_ERROR),
        }
    }
}

/// Config
///
#[derive(Debug, Clone)]
pub struct Config {
    vendor_id: u16,
    product_id: u16,
    serial: Option<String>,
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID)
    }
}

impl Config {
    /// Match the first printer with the given ids.
    ///
    /// # Example
    ///
    /// ```
    /// use ppla::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::new(0x1664, 0x032a).timeout(Duration::from_secs(5));
    /// ```
    ///
    pub fn new(vendor_id: u16, product_id: u16) -> Config {
        Config {
            vendor_id,
            product_id,
            serial: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Only accept a device reporting this serial number.
    pub fn serial(self, serial: String) -> Self {
        Config {
            serial: Some(serial),
            ..self
        }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        Config { timeout, ..self }
    }
}
