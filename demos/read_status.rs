use ppla::{Config, Printer};
//
// cargo run --example read_status
//

fn main() {
    env_logger::init();

    match Printer::new(Config::default()) {
        Ok(printer) => {
            match printer.device_id() {
                Ok(id) => println!("{}", id),
                Err(err) => println!("Error {:?}", err),
            }
            match printer.port_status() {
                Ok(status) => println!("{:?}", status),
                Err(err) => println!("Error {:?}", err),
            }
            match printer.soft_reset() {
                Ok(()) => println!("soft reset done"),
                Err(err) => println!("Error {:?}", err),
            }
        }
        Err(err) => panic!("Invalid configuration settings: {}", err),
    }
}
