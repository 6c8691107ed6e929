//! PPLA command stream builder.
//!
//! [`CommandBuilder`] appends one complete command per call to an internal
//! buffer. Printer level commands start with `SOH` or `STX`; label
//! formatting commands have no prefix and are only understood after
//! [`CommandBuilder::enter_label_mode`]. Every command ends with a carriage
//! return.
//!
//! Numeric fields are fixed-width zero padded decimal, since the firmware
//! reads them at fixed offsets. Values that do not fit are rejected. Any
//! rejected call leaves the buffer untouched.
//!
//! A builder is a plain mutable value owned by the code producing one
//! label job; share it between threads only behind a lock.
//!
//! # Example
//!
//! ```rust
//! use ppla::{CommandBuilder, Font, TextStyle};
//!
//! let mut ppla = CommandBuilder::new();
//! ppla.enter_label_mode()
//!     .label_text_with(100, 2, "Hello World!", &TextStyle::default().font(Font::Asd12))
//!     .unwrap()
//!     .label_end_job();
//! assert!(ppla.get_bytes().ends_with(b"E\r"));
//! ```

use chrono::NaiveDateTime;
use log::debug;

use crate::{
    error::Error,
    options::{BarcodeType, FeedRate, Font, MemoryBank, Orientation, Scale, TransferType},
};

pub const SOH: u8 = 0x01;
pub const STX: u8 = 0x02;
pub const CR: u8 = b'\r';

/// Longest graphic name the printer stores.
pub const MAX_GRAPHIC_NAME_LEN: usize = 16;

fn decimal(field: &'static str, value: i64, width: usize) -> Result<Vec<u8>, Error> {
    if value < 0 || value >= 10_i64.pow(width as u32) {
        return Err(Error::FieldOverflow {
            field,
            value,
            width,
        });
    }
    Ok(format!("{:0width$}", value, width = width).into_bytes())
}

/// Inches as hundredths, rounded to the nearest one.
fn hundredths(field: &'static str, inches: f64, width: usize) -> Result<Vec<u8>, Error> {
    let value = (inches * 100.0).round();
    if !value.is_finite() {
        return Err(Error::FieldOverflow {
            field,
            value: i64::MAX,
            width,
        });
    }
    decimal(field, value as i64, width)
}

fn ascii<'a>(data: &'a str) -> Result<&'a [u8], Error> {
    if data.is_ascii() {
        Ok(data.as_bytes())
    } else {
        Err(Error::NonAscii(data.to_string()))
    }
}

/// Placement options of [`CommandBuilder::label_text_with`].
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    orientation: Orientation,
    font: Font,
    horizontal_scale: Scale,
    vertical_scale: Scale,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            orientation: Orientation::Portrait,
            font: Font::Font4,
            horizontal_scale: Scale::default(),
            vertical_scale: Scale::default(),
        }
    }
}

impl TextStyle {
    pub fn orientation(self, orientation: Orientation) -> Self {
        TextStyle {
            orientation,
            ..self
        }
    }

    pub fn font(self, font: Font) -> Self {
        TextStyle { font, ..self }
    }

    pub fn scale(self, horizontal_scale: Scale, vertical_scale: Scale) -> Self {
        TextStyle {
            horizontal_scale,
            vertical_scale,
            ..self
        }
    }
}

/// Placement options of [`CommandBuilder::label_barcode_with`].
///
/// Defaults to a human readable Code 128 with a wide bar of 5 and a narrow
/// bar of 2 dots at the printer's default height.
#[derive(Debug, Clone, Copy)]
pub struct BarcodeStyle {
    orientation: Orientation,
    barcode_type: BarcodeType,
    wide_bar_width: u8,
    narrow_bar_width: u8,
    height: u16,
    human_readable: bool,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        BarcodeStyle {
            orientation: Orientation::Portrait,
            barcode_type: BarcodeType::Code128,
            wide_bar_width: 5,
            narrow_bar_width: 2,
            height: 0,
            human_readable: true,
        }
    }
}

impl BarcodeStyle {
    pub fn orientation(self, orientation: Orientation) -> Self {
        BarcodeStyle {
            orientation,
            ..self
        }
    }

    pub fn barcode_type(self, barcode_type: BarcodeType) -> Self {
        BarcodeStyle {
            barcode_type,
            ..self
        }
    }

    pub fn bar_widths(self, wide_bar_width: u8, narrow_bar_width: u8) -> Self {
        BarcodeStyle {
            wide_bar_width,
            narrow_bar_width,
            ..self
        }
    }

    pub fn height(self, height: u16) -> Self {
        BarcodeStyle { height, ..self }
    }

    pub fn human_readable(self, human_readable: bool) -> Self {
        BarcodeStyle {
            human_readable,
            ..self
        }
    }
}

/// Appendable PPLA command stream.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    data: Vec<u8>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        CommandBuilder { data: Vec::new() }
    }

    /// Accumulated commands. The buffer is not reset.
    pub fn get_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn push(&mut self, parts: &[&[u8]]) -> &mut Self {
        for part in parts {
            self.data.extend_from_slice(part);
        }
        self.data.push(CR);
        self
    }

    // SOH commands

    pub fn reset(&mut self) -> &mut Self {
        self.push(&[&[SOH], b"#"])
    }

    pub fn request_status(&mut self) -> &mut Self {
        self.push(&[&[SOH], b"A"])
    }

    pub fn toggle_pause(&mut self) -> &mut Self {
        self.push(&[&[SOH], b"B"])
    }

    // STX commands

    /// Set the real time clock, using the local time when `date_time` is `None`.
    ///
    /// Sent as weekday, month, day, hour, minute and day of year.
    pub fn set_date_time(&mut self, date_time: Option<NaiveDateTime>) -> &mut Self {
        let date_time = date_time.unwrap_or_else(|| chrono::Local::now().naive_local());
        let stamp = date_time.format("%w%m%d%H%M%j").to_string();
        self.push(&[&[STX], b"A", stamp.as_bytes()])
    }

    pub fn enable_label_echo_character(&mut self) -> &mut Self {
        self.push(&[&[STX], b"a"])
    }

    /// Dump memory starting at `address`, sent as 7 uppercase hex digits.
    pub fn dump_memory_content(&mut self, address: u32) -> Result<&mut Self, Error> {
        if address > 0x0FFF_FFFF {
            return Err(Error::FieldOverflow {
                field: "address",
                value: address as i64,
                width: 7,
            });
        }
        let address = format!("{:07X}", address);
        Ok(self.push(&[&[STX], b"D", address.as_bytes()]))
    }

    pub fn feed_label(&mut self) -> &mut Self {
        self.push(&[&[STX], b"F"])
    }

    pub fn set_stop_position_and_automatic_backfeed(
        &mut self,
        inches: f64,
    ) -> Result<&mut Self, Error> {
        let backfeed = hundredths("backfeed", inches, 3)?;
        Ok(self.push(&[&[STX], b"f", &backfeed]))
    }

    /// Print the last stored label `count` times.
    pub fn print_stored_label(&mut self, count: u16) -> Result<&mut Self, Error> {
        let count = decimal("label count", count as i64, 4)?;
        self.push(&[&[STX], b"E", &count]);
        Ok(self.push(&[&[STX], b"G"]))
    }

    pub fn set_label_feed_rate(&mut self, rate: FeedRate) -> &mut Self {
        self.push(&[&[STX], b"S", &[rate.code()]])
    }

    pub fn print_test_pattern(&mut self) -> &mut Self {
        self.push(&[&[STX], b"T"])
    }

    pub fn replace_form_data(&mut self, field_number: u8, data: &str) -> Result<&mut Self, Error> {
        let field_number = decimal("field number", field_number as i64, 2)?;
        let data = ascii(data)?;
        Ok(self.push(&[&[STX], b"U", &field_number, data]))
    }

    pub fn enable_cutter_dispenser(&mut self) -> &mut Self {
        self.push(&[&[STX], b"V1"])
    }

    pub fn disable_cutter_dispenser(&mut self) -> &mut Self {
        self.push(&[&[STX], b"V0"])
    }

    pub fn inquire_printer_version(&mut self) -> &mut Self {
        self.push(&[&[STX], b"v"])
    }

    pub fn inquire_font_memory_status(&mut self) -> &mut Self {
        self.push(&[&[STX], b"WF"])
    }

    pub fn inquire_graphics_memory_status(&mut self) -> &mut Self {
        self.push(&[&[STX], b"WG"])
    }

    pub fn inquire_label_memory_status(&mut self) -> &mut Self {
        self.push(&[&[STX], b"WL"])
    }

    pub fn set_pause_after_each_label(&mut self) -> &mut Self {
        self.push(&[&[STX], b"J"])
    }

    pub fn cancel_pause_after_each_label(&mut self) -> &mut Self {
        self.push(&[&[STX], b"j"])
    }

    pub fn inquire_system_configuration(&mut self) -> &mut Self {
        self.push(&[&[STX], b"KQ"])
    }

    pub fn set_reflective_sensor(&mut self) -> &mut Self {
        self.push(&[&[STX], b"r"])
    }

    pub fn set_transparent_sensor(&mut self) -> &mut Self {
        self.push(&[&[STX], b"e"])
    }

    /// Start a label format. Label commands are valid until `label_end_job`.
    pub fn enter_label_mode(&mut self) -> &mut Self {
        self.push(&[&[STX], b"L"])
    }

    pub fn set_transfer_type(&mut self, transfer_type: TransferType) -> &mut Self {
        self.push(&[&[STX], b"KI7", &[transfer_type.code()]])
    }

    pub fn set_max_label_length(&mut self, inches: f64) -> Result<&mut Self, Error> {
        let length = hundredths("max label length", inches, 4)?;
        Ok(self.push(&[&[STX], b"M", &length]))
    }

    pub fn set_label_length(&mut self, inches: f64) -> Result<&mut Self, Error> {
        let length = hundredths("label length", inches, 4)?;
        Ok(self.push(&[&[STX], b"c", &length]))
    }

    pub fn set_print_start_position(&mut self, inches: f64) -> Result<&mut Self, Error> {
        let position = hundredths("print start position", inches, 4)?;
        Ok(self.push(&[&[STX], b"O", &position]))
    }

    pub fn enter_data_dump_mode(&mut self) -> &mut Self {
        self.push(&[&[STX], b"P"])
    }

    pub fn clear_all_memory(&mut self) -> &mut Self {
        self.push(&[&[STX], b"Q"])
    }

    pub fn clear_memory(&mut self, memory: MemoryBank) -> &mut Self {
        self.push(&[&[STX], b"q", &[memory.code()]])
    }

    pub fn clear_ram_memory(&mut self) -> &mut Self {
        self.clear_memory(MemoryBank::Ram)
    }

    /// Store a raster block produced by [`crate::transcode`] under `name`.
    ///
    /// The block carries its own `FFFF` terminator and is copied verbatim.
    pub fn download_graphics(
        &mut self,
        name: &str,
        raster: &[u8],
        memory: MemoryBank,
    ) -> Result<&mut Self, Error> {
        let name = ascii(name)?;
        if name.len() > MAX_GRAPHIC_NAME_LEN {
            return Err(Error::NameTooLong(name.len()));
        }
        debug!(
            "download graphics {:?} to {:?}, {} bytes",
            String::from_utf8_lossy(name),
            memory,
            raster.len()
        );
        self.push(&[&[STX], b"I", &[memory.code()], b"F", name]);
        Ok(self.push(&[raster]))
    }

    // Label commands

    /// Cut after `amount` labels, sent in hundredths like the other lengths.
    pub fn label_set_cut_by_amount(&mut self, amount: f64) -> Result<&mut Self, Error> {
        let amount = hundredths("cut amount", amount, 4)?;
        Ok(self.push(&[b":", &amount]))
    }

    pub fn label_set_xor_printing(&mut self) -> &mut Self {
        self.push(&[b"A1"])
    }

    pub fn label_set_or_printing(&mut self) -> &mut Self {
        self.push(&[b"A2"])
    }

    pub fn label_set_left_margin(&mut self, inches: f64) -> Result<&mut Self, Error> {
        let margin = hundredths("left margin", inches, 4)?;
        Ok(self.push(&[b"C", &margin]))
    }

    /// Dot width and height multipliers, one digit each.
    pub fn label_set_pixel_size(&mut self, width: u8, height: u8) -> Result<&mut Self, Error> {
        let width = decimal("pixel width", width as i64, 1)?;
        let height = decimal("pixel height", height as i64, 1)?;
        Ok(self.push(&[b"D", &width, &height]))
    }

    pub fn label_end_job(&mut self) -> &mut Self {
        self.push(&[b"E"])
    }

    pub fn label_store_previous_to_global_register(&mut self) -> &mut Self {
        self.push(&[b"G"])
    }

    pub fn label_retrieve_from_global_register(
        &mut self,
        register: char,
    ) -> Result<&mut Self, Error> {
        if !register.is_ascii_uppercase() {
            return Err(Error::InvalidRegister(register));
        }
        Ok(self.push(&[b"S", &[register as u8]]))
    }

    /// Print head heat, 2 to 20.
    pub fn label_set_heat_value(&mut self, heat_value: u8) -> Result<&mut Self, Error> {
        if !(2..=20).contains(&heat_value) {
            return Err(Error::HeatValueOutOfRange(heat_value));
        }
        let heat_value = decimal("heat value", heat_value as i64, 2)?;
        Ok(self.push(&[b"H", &heat_value]))
    }

    pub fn label_toggle_mirror_mode(&mut self) -> &mut Self {
        self.push(&[b"M"])
    }

    pub fn label_set_print_speed(&mut self, speed: FeedRate) -> &mut Self {
        self.push(&[b"P", &[speed.code()]])
    }

    pub fn label_set_quantity(&mut self, quantity: u16) -> Result<&mut Self, Error> {
        let quantity = decimal("quantity", quantity as i64, 4)?;
        Ok(self.push(&[b"Q", &quantity]))
    }

    pub fn label_set_vertical_offset(&mut self, inches: f64) -> Result<&mut Self, Error> {
        let offset = hundredths("vertical offset", inches, 4)?;
        Ok(self.push(&[b"V", &offset]))
    }

    pub fn label_normal_zero(&mut self) -> &mut Self {
        self.push(&[b"z"])
    }

    pub fn label_date_and_time(&mut self, format: &str) -> Result<&mut Self, Error> {
        let format = ascii(format)?;
        Ok(self.push(&[b"T", format]))
    }

    /// Text in the default font, portrait, unscaled.
    pub fn label_text(&mut self, x: u16, y: u16, data: &str) -> Result<&mut Self, Error> {
        self.label_text_with(x, y, data, &TextStyle::default())
    }

    pub fn label_text_with(
        &mut self,
        x: u16,
        y: u16,
        data: &str,
        style: &TextStyle,
    ) -> Result<&mut Self, Error> {
        let x = decimal("x", x as i64, 4)?;
        let y = decimal("y", y as i64, 4)?;
        let data = ascii(data)?;
        Ok(self.push(&[
            &[
                style.orientation.code(),
                style.font.font_type(),
                style.horizontal_scale.code(),
                style.vertical_scale.code(),
            ],
            style.font.subtype(),
            &y,
            &x,
            data,
        ]))
    }

    pub fn label_barcode(&mut self, x: u16, y: u16, data: &str) -> Result<&mut Self, Error> {
        self.label_barcode_with(x, y, data, &BarcodeStyle::default())
    }

    pub fn label_barcode_with(
        &mut self,
        x: u16,
        y: u16,
        data: &str,
        style: &BarcodeStyle,
    ) -> Result<&mut Self, Error> {
        let barcode_type = style.barcode_type.code(style.human_readable)?;
        let wide = decimal("wide bar width", style.wide_bar_width as i64, 1)?;
        let narrow = decimal("narrow bar width", style.narrow_bar_width as i64, 1)?;
        let height = decimal("barcode height", style.height as i64, 3)?;
        let x = decimal("x", x as i64, 4)?;
        let y = decimal("y", y as i64, 4)?;
        let data = ascii(data)?;
        debug!(
            "barcode {} at ({}, {})",
            style.barcode_type.label(),
            String::from_utf8_lossy(&x),
            String::from_utf8_lossy(&y)
        );
        Ok(self.push(&[
            &[style.orientation.code(), barcode_type],
            &wide,
            &narrow,
            &height,
            &y,
            &x,
            data,
        ]))
    }

    /// Rectangle outline with the given line thickness in dots.
    #[allow(clippy::too_many_arguments)]
    pub fn label_box(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        orientation: Orientation,
        top_bottom_thickness: u16,
        left_right_thickness: u16,
    ) -> Result<&mut Self, Error> {
        let x = decimal("x", x as i64, 4)?;
        let y = decimal("y", y as i64, 4)?;
        let width = decimal("box width", width as i64, 3)?;
        let height = decimal("box height", height as i64, 3)?;
        let top_bottom = decimal("top/bottom thickness", top_bottom_thickness as i64, 3)?;
        let left_right = decimal("left/right thickness", left_right_thickness as i64, 3)?;
        Ok(self.push(&[
            &[orientation.code()],
            b"X11000",
            &y,
            &x,
            b"B",
            &width,
            &height,
            &top_bottom,
            &left_right,
        ]))
    }

    pub fn label_line(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        orientation: Orientation,
    ) -> Result<&mut Self, Error> {
        let x = decimal("x", x as i64, 4)?;
        let y = decimal("y", y as i64, 4)?;
        let width = decimal("line width", width as i64, 3)?;
        let height = decimal("line height", height as i64, 3)?;
        Ok(self.push(&[&[orientation.code()], b"X11000", &y, &x, b"L", &width, &height]))
    }

    /// Place a graphic stored with [`CommandBuilder::download_graphics`].
    pub fn label_graphic(
        &mut self,
        x: u16,
        y: u16,
        name: &str,
        orientation: Orientation,
    ) -> Result<&mut Self, Error> {
        let x = decimal("x", x as i64, 4)?;
        let y = decimal("y", y as i64, 4)?;
        let name = ascii(name)?;
        Ok(self.push(&[&[orientation.code()], b"Y11000", &y, &x, name]))
    }
}
