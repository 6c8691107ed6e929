//! Error types for PPLA printer operations.
//!
//! Two kinds of failure live here: transport errors raised while talking
//! to the printer over USB, and caller errors raised by the command
//! builder before anything is appended to the stream.

use crate::options::BarcodeType;
use rusb;
use thiserror::Error;

/// Main error type for PPLA printer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// USB communication error.
    ///
    /// Wraps underlying rusb errors for device communication issues,
    /// timeouts, or permission problems.
    #[error(transparent)]
    UsbError(#[from] rusb::Error),

    /// No device matched the configured vendor id, product id and serial.
    #[error("Device is offline")]
    DeviceOffline,

    #[error("Can't read device list, permission issue ?")]
    DeviceListNotReadable,

    #[error("Device is missing endpoint")]
    MissingEndpoint,

    /// The bulk endpoint accepted zero bytes while data was still pending.
    #[error("USB bulk write error at offset {offset}")]
    WriteFailed { offset: usize },

    #[error("Received invalid response from printer")]
    InvalidResponse(usize),

    /// An option label that is not part of its table.
    ///
    /// The message lists every accepted label since the tables are
    /// numerous and easy to misspell.
    #[error("Invalid {kind} selection: {selection}. Valid selections are: {}", .valid.join(", "))]
    InvalidSelection {
        kind: &'static str,
        selection: String,
        valid: Vec<&'static str>,
    },

    /// Human readable output was requested for a symbology without one.
    #[error("Invalid barcode type: {0:?} has no human readable variant")]
    InvalidBarcodeType(BarcodeType),

    #[error("Heat value {0} is out of range 2..=20")]
    HeatValueOutOfRange(u8),

    #[error("Graphic name is {0} bytes long, at most 16 are allowed")]
    NameTooLong(usize),

    #[error("Data is not plain ASCII: {0:?}")]
    NonAscii(String),

    /// A numeric value that does not fit into its fixed-width field.
    #[error("Value {value} does not fit into the {width} digit {field} field")]
    FieldOverflow {
        field: &'static str,
        value: i64,
        width: usize,
    },

    #[error("Invalid global register {0:?}, expected A-Z")]
    InvalidRegister(char),
}
