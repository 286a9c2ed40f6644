//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffpack::compression::compress::compress_file;
use huffpack::compression::decompress::decompress_file;
use huffpack::tools::cli::{huffopts_init, Mode};
use huffpack::HuffError;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this.
    // Logs go to stderr because stdout may be carrying compressed data.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }

    let options = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_file(&options),
        Mode::Unzip => decompress_file(&options),
    };

    match &result {
        Ok(()) => info!("Done."),
        Err(e) => error!("{}", e),
    }
    result
}
