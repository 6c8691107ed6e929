//! PPLA Printer Driver
//!
//! This crate drives Argox thermal label printers speaking PPLA over USB.
//! [`CommandBuilder`] assembles the command stream, [`transcode`] turns a
//! monochrome bitmap into the hex graphics the printer stores, and
//! [`Printer`] moves the bytes over the bulk endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use ppla::{transcode, CommandBuilder, Config, MemoryBank, MonoBitmap, Orientation, Printer};
//!
//! let logo = MonoBitmap::new(16, 1, vec![0; 16]).unwrap();
//!
//! let mut ppla = CommandBuilder::new();
//! ppla.clear_memory(MemoryBank::Ram)
//!     .set_label_length(2.65)?
//!     .download_graphics("LOGO", &transcode(&logo), MemoryBank::Ram)?
//!     .enter_label_mode()
//!     .label_graphic(100, 16, "LOGO", Orientation::Portrait)?
//!     .label_end_job();
//!
//! let printer = Printer::new(Config::default())?;
//! printer.print(&ppla)?;
//! # Ok::<(), ppla::Error>(())
//! ```

mod command;
mod error;
mod options;
mod printer;
mod raster;

pub use crate::{
    command::{BarcodeStyle, CommandBuilder, TextStyle, CR, MAX_GRAPHIC_NAME_LEN, SOH, STX},
    error::Error,
    options::{BarcodeType, FeedRate, Font, MemoryBank, Orientation, Scale, TransferType},
    printer::{Config, PortStatus, Printer, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID},
    raster::{transcode, Bitmap, MonoBitmap, INK_THRESHOLD, SUBSTITUTION_TABLE},
};
