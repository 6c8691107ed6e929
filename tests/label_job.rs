use pretty_assertions::assert_eq;
use ppla::{
    transcode, BarcodeStyle, BarcodeType, Bitmap, CommandBuilder, Error, MemoryBank, MonoBitmap,
    Orientation, SUBSTITUTION_TABLE,
};

/// Diagonal line, 16 pixels wide, computed on the fly.
struct Diagonal;

impl Bitmap for Diagonal {
    fn width(&self) -> u32 {
        16
    }

    fn height(&self) -> u32 {
        16
    }

    fn pixel(&self, x: u32, y: u32) -> u8 {
        if x == y {
            0
        } else {
            255
        }
    }
}

#[test]
fn raster_rows_have_declared_length() {
    let block = transcode(&Diagonal);
    let (rows, sentinel) = block.split_at(block.len() - 4);

    assert_eq!(sentinel, b"FFFF");
    assert_eq!(rows.len(), 16 * (2 + 2 + 2 * 2));
    for (y, record) in rows.chunks(8).enumerate() {
        assert_eq!(&record[..4], b"8002");
        let (left, right) = if y < 8 {
            (0x80u8 >> y, 0x00)
        } else {
            (0x00, 0x80u8 >> (y - 8))
        };
        let expected = format!(
            "{:02x}{:02x}",
            SUBSTITUTION_TABLE[left as usize], SUBSTITUTION_TABLE[right as usize]
        );
        assert_eq!(&record[4..], expected.as_bytes());
    }
}

#[test]
fn full_label_job() {
    let logo = MonoBitmap::new(8, 1, vec![0, 0, 0, 0, 255, 255, 255, 255]).unwrap();

    let mut ppla = CommandBuilder::new();
    ppla.clear_memory(MemoryBank::Ram)
        .set_label_length(2.65)
        .unwrap()
        .download_graphics("LOGO", &transcode(&logo), MemoryBank::Ram)
        .unwrap()
        .enter_label_mode()
        .label_set_heat_value(7)
        .unwrap()
        .label_graphic(100, 16, "LOGO", Orientation::Portrait)
        .unwrap()
        .label_barcode_with(
            260,
            40,
            "ATUX",
            &BarcodeStyle::default().orientation(Orientation::Landscape),
        )
        .unwrap()
        .label_end_job();

    let expected: &[u8] = b"\x02qA\r\
        \x02c0265\r\
        \x02IAFLOGO\r8001f0FFFF\r\
        \x02L\r\
        H07\r\
        1Y1100000160100LOGO\r\
        4E5200000400260ATUX\r\
        E\r";
    assert_eq!(ppla.get_bytes(), expected);
}

#[test]
fn rejected_commands_leave_stream_untouched() {
    let mut ppla = CommandBuilder::new();
    ppla.enter_label_mode();
    let before = ppla.get_bytes().to_vec();

    let postnet = BarcodeStyle::default().barcode_type(BarcodeType::Postnet);
    assert!(matches!(
        ppla.label_barcode_with(10, 10, "12345", &postnet),
        Err(Error::InvalidBarcodeType(BarcodeType::Postnet))
    ));
    assert!(ppla.label_set_heat_value(30).is_err());
    assert!(ppla
        .download_graphics("SEVENTEEN-LETTERS", b"FFFF", MemoryBank::Ram)
        .is_err());
    assert!(ppla.label_text(10_000, 0, "x").is_err());
    assert!("qr-code".parse::<BarcodeType>().is_err());

    assert_eq!(ppla.get_bytes(), &before[..]);
}

#[test]
fn option_labels_round_trip_through_parse() {
    for barcode in BarcodeType::ALL.iter() {
        assert_eq!(barcode.label().parse::<BarcodeType>().unwrap(), *barcode);
    }
    for orientation in Orientation::ALL.iter() {
        assert_eq!(
            orientation.label().parse::<Orientation>().unwrap(),
            *orientation
        );
    }
}
