//! Option tables of the PPLA command set.
//!
//! Every enumerated command parameter maps to a fixed device code. Each
//! enum can also be parsed from the label printed in the PPLA manual, e.g.
//! `"code-128".parse::<BarcodeType>()`.

use crate::error::Error;
use std::str::FromStr;

fn lookup<T: Copy>(
    kind: &'static str,
    selection: &str,
    all: &[T],
    label: impl Fn(&T) -> &'static str,
) -> Result<T, Error> {
    match all.iter().find(|option| label(*option) == selection) {
        Some(option) => Ok(*option),
        None => Err(Error::InvalidSelection {
            kind,
            selection: selection.to_string(),
            valid: all.iter().map(label).collect(),
        }),
    }
}

// Orientation

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Self::Portrait,
        Self::Landscape,
        Self::ReversePortrait,
        Self::ReverseLandscape,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Portrait => b'1',
            Self::Landscape => b'4',
            Self::ReversePortrait => b'3',
            Self::ReverseLandscape => b'2',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::ReversePortrait => "reverse-portrait",
            Self::ReverseLandscape => "reverse-landscape",
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Portrait
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("orientation", s, &Self::ALL, Self::label)
    }
}

// Font

/// Resident fonts.
///
/// The device code is a font type byte followed by a three digit subtype,
/// which selects the point size of the ASD smooth fonts and the symbol set
/// of the Courier fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Font0,
    Font1,
    Font2,
    Font3,
    Font4,
    Font5,
    Font6,
    Font7,
    Font8,
    Asd4,
    Asd6,
    Asd8,
    Asd10,
    Asd12,
    Asd14,
    Asd16,
    CourierRoman8,
    CourierEcma94,
    CourierPc,
    CourierPcA,
    CourierPcB,
    Legal,
    Greek,
    Russian,
}

impl Font {
    pub const ALL: [Font; 24] = [
        Self::Font0,
        Self::Font1,
        Self::Font2,
        Self::Font3,
        Self::Font4,
        Self::Font5,
        Self::Font6,
        Self::Font7,
        Self::Font8,
        Self::Asd4,
        Self::Asd6,
        Self::Asd8,
        Self::Asd10,
        Self::Asd12,
        Self::Asd14,
        Self::Asd16,
        Self::CourierRoman8,
        Self::CourierEcma94,
        Self::CourierPc,
        Self::CourierPcA,
        Self::CourierPcB,
        Self::Legal,
        Self::Greek,
        Self::Russian,
    ];

    pub fn font_type(&self) -> u8 {
        match self {
            Self::Font0 => b'0',
            Self::Font1 => b'1',
            Self::Font2 => b'2',
            Self::Font3 => b'3',
            Self::Font4 => b'4',
            Self::Font5 => b'5',
            Self::Font6 => b'6',
            Self::Font7 => b'7',
            Self::Font8 => b'8',
            Self::Asd4
            | Self::Asd6
            | Self::Asd8
            | Self::Asd10
            | Self::Asd12
            | Self::Asd14
            | Self::Asd16 => b'9',
            Self::CourierRoman8
            | Self::CourierEcma94
            | Self::CourierPc
            | Self::CourierPcA
            | Self::CourierPcB
            | Self::Legal
            | Self::Greek
            | Self::Russian => b':',
        }
    }

    pub fn subtype(&self) -> &'static [u8; 3] {
        match self {
            Self::Asd6 | Self::CourierEcma94 => b"001",
            Self::Asd8 | Self::CourierPc => b"002",
            Self::Asd10 | Self::CourierPcA => b"003",
            Self::Asd12 | Self::CourierPcB => b"004",
            Self::Asd14 | Self::Legal => b"005",
            Self::Asd16 | Self::Greek => b"006",
            Self::Russian => b"007",
            _ => b"000",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Font0 => "font-0",
            Self::Font1 => "font-1",
            Self::Font2 => "font-2",
            Self::Font3 => "font-3",
            Self::Font4 => "font-4",
            Self::Font5 => "font-5",
            Self::Font6 => "font-6",
            Self::Font7 => "font-7",
            Self::Font8 => "font-8",
            Self::Asd4 => "asd-4",
            Self::Asd6 => "asd-6",
            Self::Asd8 => "asd-8",
            Self::Asd10 => "asd-10",
            Self::Asd12 => "asd-12",
            Self::Asd14 => "asd-14",
            Self::Asd16 => "asd-16",
            Self::CourierRoman8 => "courier-roman8",
            Self::CourierEcma94 => "courier-ecma94",
            Self::CourierPc => "courier-pc",
            Self::CourierPcA => "courier-pc-a",
            Self::CourierPcB => "courier-pc-b",
            Self::Legal => "legal",
            Self::Greek => "greek",
            Self::Russian => "russian",
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::Font4
    }
}

impl FromStr for Font {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("font", s, &Self::ALL, Self::label)
    }
}

// Scale

/// Horizontal or vertical text multiplier, 0 to 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale(u8);

const SCALE_LABELS: [&str; 25] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
    "17", "18", "19", "20", "21", "22", "23", "24",
];

impl Scale {
    pub const MAX: u8 = 24;

    pub const ALL: [Scale; 25] = [
        Scale(0),
        Scale(1),
        Scale(2),
        Scale(3),
        Scale(4),
        Scale(5),
        Scale(6),
        Scale(7),
        Scale(8),
        Scale(9),
        Scale(10),
        Scale(11),
        Scale(12),
        Scale(13),
        Scale(14),
        Scale(15),
        Scale(16),
        Scale(17),
        Scale(18),
        Scale(19),
        Scale(20),
        Scale(21),
        Scale(22),
        Scale(23),
        Scale(24),
    ];

    pub fn new(factor: u8) -> Result<Self, Error> {
        match Self::ALL.get(factor as usize) {
            Some(scale) => Ok(*scale),
            None => Err(Error::InvalidSelection {
                kind: "scale",
                selection: factor.to_string(),
                valid: SCALE_LABELS.to_vec(),
            }),
        }
    }

    /// `0`-`9`, then `A` for 10 up to `O` for 24.
    pub fn code(&self) -> u8 {
        match self.0 {
            n @ 0..=9 => b'0' + n,
            n => b'A' + (n - 10),
        }
    }

    pub fn label(&self) -> &'static str {
        SCALE_LABELS[self.0 as usize]
    }
}

impl FromStr for Scale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("scale", s, &Self::ALL, Self::label)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale(1)
    }
}

// BarcodeType

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeType {
    Code39,
    UpcA,
    UpcE,
    I25,
    Code128,
    Ean13,
    Ean8,
    Hbic,
    Codabar,
    Ji2of5,
    Plessey,
    I25ChecksumBearer,
    Upc2,
    Upc5,
    Code93,
    Postnet,
    UccEan128,
    UccEan128Kmart,
    Telepen,
    Fim,
    Maxicode,
    Pdf417,
}

impl BarcodeType {
    pub const ALL: [BarcodeType; 22] = [
        Self::Code39,
        Self::UpcA,
        Self::UpcE,
        Self::I25,
        Self::Code128,
        Self::Ean13,
        Self::Ean8,
        Self::Hbic,
        Self::Codabar,
        Self::Ji2of5,
        Self::Plessey,
        Self::I25ChecksumBearer,
        Self::Upc2,
        Self::Upc5,
        Self::Code93,
        Self::Postnet,
        Self::UccEan128,
        Self::UccEan128Kmart,
        Self::Telepen,
        Self::Fim,
        Self::Maxicode,
        Self::Pdf417,
    ];

    /// Code printing the data as text below the bars, if the symbology has one.
    pub fn readable_code(&self) -> Option<u8> {
        match self {
            Self::Postnet | Self::Fim | Self::Maxicode | Self::Pdf417 => None,
            other => Some(other.non_readable_code().to_ascii_uppercase()),
        }
    }

    pub fn non_readable_code(&self) -> u8 {
        match self {
            Self::Code39 => b'a',
            Self::UpcA => b'b',
            Self::UpcE => b'c',
            Self::I25 => b'd',
            Self::Code128 => b'e',
            Self::Ean13 => b'f',
            Self::Ean8 => b'g',
            Self::Hbic => b'h',
            Self::Codabar => b'i',
            Self::Ji2of5 => b'j',
            Self::Plessey => b'k',
            Self::I25ChecksumBearer => b'l',
            Self::Upc2 => b'm',
            Self::Upc5 => b'n',
            Self::Code93 => b'o',
            Self::Postnet => b'p',
            Self::UccEan128 => b'q',
            Self::UccEan128Kmart => b'r',
            Self::Telepen => b't',
            Self::Fim => b'v',
            Self::Maxicode => b'u',
            Self::Pdf417 => b'z',
        }
    }

    pub fn code(&self, human_readable: bool) -> Result<u8, Error> {
        if human_readable {
            self.readable_code()
                .ok_or(Error::InvalidBarcodeType(*self))
        } else {
            Ok(self.non_readable_code())
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Code39 => "code-39",
            Self::UpcA => "upc-a",
            Self::UpcE => "upc-e",
            Self::I25 => "i25",
            Self::Code128 => "code-128",
            Self::Ean13 => "ean-13",
            Self::Ean8 => "ean-8",
            Self::Hbic => "hbic",
            Self::Codabar => "codabar",
            Self::Ji2of5 => "ji-2of5",
            Self::Plessey => "plessey",
            Self::I25ChecksumBearer => "i25-checksum-bearer",
            Self::Upc2 => "upc2",
            Self::Upc5 => "upc5",
            Self::Code93 => "code-93",
            Self::Postnet => "postnet",
            Self::UccEan128 => "ucc-ean-128",
            Self::UccEan128Kmart => "ucc-ean-128-kmart",
            Self::Telepen => "telepen",
            Self::Fim => "fim",
            Self::Maxicode => "maxicode",
            Self::Pdf417 => "pdf-417",
        }
    }
}

impl Default for BarcodeType {
    fn default() -> Self {
        Self::Code128
    }
}

impl FromStr for BarcodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("barcode type", s, &Self::ALL, Self::label)
    }
}

// TransferType

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    DirectThermal,
    ThermalTransfer,
}

impl TransferType {
    pub const ALL: [TransferType; 2] = [Self::DirectThermal, Self::ThermalTransfer];

    pub fn code(&self) -> u8 {
        match self {
            Self::DirectThermal => b'0',
            Self::ThermalTransfer => b'1',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectThermal => "direct-thermal",
            Self::ThermalTransfer => "thermal-transfer",
        }
    }
}

impl FromStr for TransferType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("transfer type", s, &Self::ALL, Self::label)
    }
}

// MemoryBank

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryBank {
    Ram,
    Flash,
}

impl MemoryBank {
    pub const ALL: [MemoryBank; 2] = [Self::Ram, Self::Flash];

    pub fn code(&self) -> u8 {
        match self {
            Self::Ram => b'A',
            Self::Flash => b'B',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ram => "ram",
            Self::Flash => "flash",
        }
    }
}

impl Default for MemoryBank {
    fn default() -> Self {
        Self::Ram
    }
}

impl FromStr for MemoryBank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("memory", s, &Self::ALL, Self::label)
    }
}

// FeedRate

/// Feed and print speed in inches per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedRate {
    Ips1_0,
    Ips1_5,
    Ips2_0,
    Ips2_5,
    Ips3_0,
    Ips3_5,
    Ips4_0,
    Ips4_5,
    Ips5_0,
    Ips5_5,
    Ips6_0,
}

impl FeedRate {
    pub const ALL: [FeedRate; 11] = [
        Self::Ips1_0,
        Self::Ips1_5,
        Self::Ips2_0,
        Self::Ips2_5,
        Self::Ips3_0,
        Self::Ips3_5,
        Self::Ips4_0,
        Self::Ips4_5,
        Self::Ips5_0,
        Self::Ips5_5,
        Self::Ips6_0,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Ips1_0 => b'A',
            Self::Ips1_5 => b'B',
            Self::Ips2_0 => b'C',
            Self::Ips2_5 => b'D',
            Self::Ips3_0 => b'E',
            Self::Ips3_5 => b'F',
            Self::Ips4_0 => b'G',
            Self::Ips4_5 => b'H',
            Self::Ips5_0 => b'I',
            Self::Ips5_5 => b'J',
            Self::Ips6_0 => b'K',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ips1_0 => "1.0",
            Self::Ips1_5 => "1.5",
            Self::Ips2_0 => "2.0",
            Self::Ips2_5 => "2.5",
            Self::Ips3_0 => "3.0",
            Self::Ips3_5 => "3.5",
            Self::Ips4_0 => "4.0",
            Self::Ips4_5 => "4.5",
            Self::Ips5_0 => "5.0",
            Self::Ips5_5 => "5.5",
            Self::Ips6_0 => "6.0",
        }
    }
}

impl FromStr for FeedRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("feed rate", s, &Self::ALL, Self::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels() {
        assert_eq!("landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!("asd-12".parse::<Font>().unwrap(), Font::Asd12);
        assert_eq!("pdf-417".parse::<BarcodeType>().unwrap(), BarcodeType::Pdf417);
        assert_eq!("flash".parse::<MemoryBank>().unwrap(), MemoryBank::Flash);
        assert_eq!("4.5".parse::<FeedRate>().unwrap(), FeedRate::Ips4_5);
        assert_eq!(
            "thermal-transfer".parse::<TransferType>().unwrap(),
            TransferType::ThermalTransfer
        );
    }

    #[test]
    fn invalid_selection_lists_valid_labels() {
        let err = "sideways".parse::<Orientation>().unwrap_err();
        match &err {
            Error::InvalidSelection {
                kind,
                selection,
                valid,
            } => {
                assert_eq!(*kind, "orientation");
                assert_eq!(selection, "sideways");
                assert_eq!(valid.len(), 4);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Invalid orientation selection: sideways. Valid selections are: \
             portrait, landscape, reverse-portrait, reverse-landscape"
        );
    }

    #[test]
    fn font_codes() {
        assert_eq!(Font::Font4.font_type(), b'4');
        assert_eq!(Font::Font4.subtype(), b"000");
        assert_eq!(Font::Asd12.font_type(), b'9');
        assert_eq!(Font::Asd12.subtype(), b"004");
        assert_eq!(Font::Russian.font_type(), b':');
        assert_eq!(Font::Russian.subtype(), b"007");
        assert_eq!(Font::CourierRoman8.subtype(), b"000");
    }

    #[test]
    fn scale_codes() {
        assert_eq!(Scale::new(0).unwrap().code(), b'0');
        assert_eq!(Scale::new(9).unwrap().code(), b'9');
        assert_eq!(Scale::new(10).unwrap().code(), b'A');
        assert_eq!(Scale::new(24).unwrap().code(), b'O');
        assert_eq!(Scale::new(24).unwrap().label(), "24");
        assert_eq!("12".parse::<Scale>().unwrap(), Scale::new(12).unwrap());
    }

    #[test]
    fn scale_out_of_range_lists_valid_factors() {
        let err = Scale::new(25).unwrap_err();
        match &err {
            Error::InvalidSelection {
                kind,
                selection,
                valid,
            } => {
                assert_eq!(*kind, "scale");
                assert_eq!(selection, "25");
                assert_eq!(valid.len(), 25);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Invalid scale selection: 25. Valid selections are: \
             0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, \
             17, 18, 19, 20, 21, 22, 23, 24"
        );
        assert!(matches!(
            "A".parse::<Scale>(),
            Err(Error::InvalidSelection { kind: "scale", .. })
        ));
    }

    #[test]
    fn barcode_readability() {
        assert_eq!(BarcodeType::Code128.code(true).unwrap(), b'E');
        assert_eq!(BarcodeType::Code128.code(false).unwrap(), b'e');
        assert_eq!(BarcodeType::Telepen.code(true).unwrap(), b'T');
        assert_eq!(BarcodeType::Maxicode.code(false).unwrap(), b'u');
        for barcode in [
            BarcodeType::Postnet,
            BarcodeType::Fim,
            BarcodeType::Maxicode,
            BarcodeType::Pdf417,
        ]
        .iter()
        {
            assert!(matches!(
                barcode.code(true),
                Err(Error::InvalidBarcodeType(b)) if b == *barcode
            ));
        }
    }
}
