use ppla::{
    transcode, BarcodeStyle, BarcodeType, CommandBuilder, Config, Font, MemoryBank, MonoBitmap,
    Orientation, Printer, TextStyle, TransferType, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID,
};
use std::env;
//
// cargo run --example print_label tux.jpg
//
// Printer ids are read from PPLA_VENDOR_ID / PPLA_PRODUCT_ID (hex), a .env file works too.
//

fn id_from_env(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|value| u16::from_str_radix(value.trim_start_matches("0x"), 16).ok())
        .unwrap_or(default)
}

fn load_bitmap(file: &str) -> MonoBitmap {
    let image = image::open(file).unwrap().to_luma8();
    // the printer stores rows bottom up
    let image = image::imageops::flip_vertical(&image);
    let (width, height) = image.dimensions();
    MonoBitmap::new(width, height, image.into_raw()).unwrap()
}

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();
    dotenvy::dotenv().ok();

    let file = match env::args().nth(1) {
        Some(file) => file,
        None => {
            println!("usage: print_label <image>");
            return;
        }
    };
    let tux = transcode(&load_bitmap(&file));

    let config = Config::new(
        id_from_env("PPLA_VENDOR_ID", DEFAULT_VENDOR_ID),
        id_from_env("PPLA_PRODUCT_ID", DEFAULT_PRODUCT_ID),
    );

    let mut ppla = CommandBuilder::new();
    let built = (|| -> Result<(), ppla::Error> {
        ppla.clear_memory(MemoryBank::Ram)
            .set_transfer_type(TransferType::DirectThermal)
            .set_label_length(2.65)?
            .download_graphics("TUX", &tux, MemoryBank::Ram)?
            .enter_label_mode()
            .label_set_pixel_size(1, 1)?
            .label_graphic(100, 16, "TUX", Orientation::Portrait)?
            .label_text_with(100, 2, "Hello World!", &TextStyle::default().font(Font::Asd12))?
            .label_barcode_with(
                260,
                40,
                "ATUX",
                &BarcodeStyle::default()
                    .barcode_type(BarcodeType::Code128)
                    .orientation(Orientation::Landscape),
            )?
            .label_end_job();
        Ok(())
    })();
    if let Err(err) = built {
        panic!("Invalid label: {}", err);
    }

    match Printer::new(config) {
        Ok(printer) => {
            println!("{}", printer.device_id().unwrap_or_default());
            match printer.print(&ppla) {
                Ok(n) => println!("sent {} bytes", n),
                Err(err) => println!("print failed {:?}", err),
            }
        }
        Err(err) => panic!("Printer not available: {}", err),
    }
}
