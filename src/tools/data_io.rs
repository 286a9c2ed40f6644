use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
};

use log::error;

use super::cli::HuffOpts;

/// Open the input named in the options, or stdin if there is none. Standard IO errors are
/// reported and returned.
pub fn open_input(opts: &HuffOpts) -> io::Result<Box<dyn Read>> {
    match &opts.file {
        Some(name) => match File::open(name) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) => {
                error!("Cannot read from the file {}: {}", name, e);
                Err(e)
            }
        },
        None => Ok(Box::new(io::stdin())),
    }
}

/// Read the whole input into memory.
pub fn read_input(opts: &HuffOpts) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input(opts)?.read_to_end(&mut data)?;
    Ok(data)
}

/// Open the output channel. Existing files are only replaced when force_overwrite is set.
pub fn open_output(opts: &HuffOpts) -> io::Result<Box<dyn Write>> {
    let name = match opts.output_name() {
        Some(name) => name,
        None => return Ok(Box::new(io::stdout())),
    };
    let mut options = OpenOptions::new();
    options.write(true);
    if opts.force_overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    match options.open(&name) {
        Ok(file) => Ok(Box::new(BufWriter::new(file))),
        Err(e) => {
            if e.kind() == ErrorKind::AlreadyExists {
                error!("Output file {} already exists (use --force to overwrite)", name);
            } else {
                error!("Cannot write to the file {}: {}", name, e);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{open_output, read_input};
    use crate::tools::cli::{HuffOpts, Mode};
    use std::io::{ErrorKind, Write};

    fn temp_name(tag: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("huffpack_data_io_{}_{}", tag, std::process::id()));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn read_input_test() {
        let name = temp_name("read");
        std::fs::write(&name, b"some bytes").unwrap();
        let mut opts = HuffOpts::new();
        opts.file = Some(name.clone());
        assert_eq!(read_input(&opts).unwrap(), b"some bytes".to_vec());
        std::fs::remove_file(&name).unwrap();
    }

    #[test]
    fn missing_input_test() {
        let mut opts = HuffOpts::new();
        opts.file = Some(temp_name("missing"));
        assert_eq!(read_input(&opts).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn overwrite_test() {
        let name = temp_name("overwrite");
        std::fs::write(&name, b"old").unwrap();
        let mut opts = HuffOpts::new();
        opts.op_mode = Mode::Zip;
        opts.out_file = Some(name.clone());

        assert_eq!(open_output(&opts).err().unwrap().kind(), ErrorKind::AlreadyExists);

        opts.force_overwrite = true;
        {
            let mut out = open_output(&opts).unwrap();
            out.write_all(b"new").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read(&name).unwrap(), b"new".to_vec());
        std::fs::remove_file(&name).unwrap();
    }
}
