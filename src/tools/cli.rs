use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Extension added to compressed files.
pub const EXTENSION: &str = ".huf";

/// Zip, Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Optional name of file to read for input. Stdin when None.
    pub file: Option<String>,
    /// Optional explicit name of the file to write
    pub out_file: Option<String>,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            file: None,
            out_file: None,
            op_mode: Mode::Zip,
            output: Output::File,
            force_overwrite: false,
        }
    }

    /// Name of the file to write, or None when output goes to stdout.
    pub fn output_name(&self) -> Option<String> {
        if self.output == Output::Stdout {
            return None;
        }
        if let Some(name) = &self.out_file {
            return Some(name.clone());
        }
        let input = self.file.as_ref()?;
        Some(match self.op_mode {
            Mode::Zip => format!("{}{}", input, EXTENSION),
            Mode::Unzip => match input.strip_suffix(EXTENSION) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", input),
            },
        })
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static huffman file compressor",
    long_about = "
    Compresses a file with a single huffman code built from its byte frequencies. The code's
    trie is stored at the front of the compressed file, followed by the original length and
    the packed codes.

    With no file name, reads standard input and writes standard output."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: Option<String>,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Write output to this file instead of the default name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Parse the command line into our options and set the log level.
pub fn huffopts_init() -> HuffOpts {
    opts_from_args(Args::parse())
}

/// Put command line information from CLAP into our internal structure.
pub fn opts_from_args(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();
    opts.file = args.filename;
    opts.out_file = args.output;
    opts.force_overwrite = args.force;

    // Without an explicit mode, guess from the file name
    opts.op_mode = if args.decompress {
        Mode::Unzip
    } else if args.compress {
        Mode::Zip
    } else {
        match &opts.file {
            Some(name) if name.ends_with(EXTENSION) => Mode::Unzip,
            _ => Mode::Zip,
        }
    };

    if args.stdout || (opts.file.is_none() && opts.out_file.is_none()) {
        opts.output = Output::Stdout
    };

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    // Below we report initialization status to the user
    info!("---- Huffpack Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => warn!("Getting input from stdin"),
    }
    match opts.output_name() {
        Some(s) => info!("Sending output to the file {}", s),
        None => info!("Sending output to stdout"),
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- Huffpack Initialization End ----");
    opts
}

#[cfg(test)]
mod test {
    use super::{opts_from_args, Args, Mode, Output};
    use clap::Parser;

    fn parse(args: &[&str]) -> super::HuffOpts {
        opts_from_args(Args::parse_from(args))
    }

    #[test]
    fn compress_default_test() {
        let opts = parse(&["huffpack", "notes.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.output_name().as_deref(), Some("notes.txt.huf"));
    }

    #[test]
    fn decompress_guess_test() {
        let opts = parse(&["huffpack", "notes.txt.huf"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.output_name().as_deref(), Some("notes.txt"));

        let opts = parse(&["huffpack", "-d", "blob"]);
        assert_eq!(opts.output_name().as_deref(), Some("blob.out"));
    }

    #[test]
    fn explicit_output_test() {
        let opts = parse(&["huffpack", "-z", "-f", "-o", "out.bin", "notes.txt.huf"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert!(opts.force_overwrite);
        assert_eq!(opts.output_name().as_deref(), Some("out.bin"));
    }

    #[test]
    fn stdio_test() {
        let opts = parse(&["huffpack", "-d"]);
        assert_eq!(opts.output, Output::Stdout);
        assert!(opts.file.is_none());
        assert!(opts.output_name().is_none());

        let opts = parse(&["huffpack", "-c", "notes.txt"]);
        assert_eq!(opts.output, Output::Stdout);
        assert!(opts.output_name().is_none());
    }
}
