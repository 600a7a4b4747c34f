use argh::FromArgs;
use bmp2c::{bitmap, Error, Format, Palette, Result};
use log::{error, info, warn};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

/// Long flags that are also accepted with a single leading dash.
const LONG_FLAGS: [&str; 5] = ["binary", "format", "outfile", "palette", "help"];

#[derive(FromArgs)]
/// Convert bitmaps into C arrays of palette indices or RLE RGB565 streams
struct Args {
    /// binary run-length output, same as `-format rle`
    #[argh(switch)]
    binary: bool,

    /// output format: nibbles (default), rle, rgb565, rgb565-rle or raw
    #[argh(option)]
    format: Option<Format>,

    /// existing file to append to, "-" for stdout; rgb565, rgb565-rle and
    /// raw output otherwise go to a .h or .bin file beside each input
    #[argh(option)]
    outfile: Option<String>,

    /// palette used for nibbles output
    #[argh(option, default = "String::from(\"paneldue\")")]
    palette: String,

    /// input bitmap files
    #[argh(positional)]
    files: Vec<String>,
}

impl Args {
    fn format(&self) -> Format {
        match (self.binary, self.format) {
            (true, Some(format)) if format != Format::Rle => {
                warn!("-binary overrides -format {}", format.name());
                Format::Rle
            }
            (true, _) => Format::Rle,
            (false, format) => format.unwrap_or_default(),
        }
    }
}

/// Rewrites `-binary` style flags into the `--binary` form.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(flag) if LONG_FLAGS.contains(&flag) => format!("--{flag}"),
            _ => arg,
        })
        .collect()
}

/// Opens the shared output stream. Files must already exist and are appended to.
fn open_output(outfile: &str) -> Result<Box<dyn Write>> {
    if outfile == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    info!("appending to {outfile}");
    let file = OpenOptions::new()
        .append(true)
        .open(outfile)
        .map_err(|source| Error::Open {
            path: outfile.into(),
            source,
        })?;
    Ok(Box::new(file))
}

fn convert_file<W: Write>(file: &str, format: Format, palette: &Palette, writer: W) -> Result<W> {
    let image = bitmap::open(file)?;
    format.convert(&image, Path::new(file), palette, writer)
}

fn run(args: Args) -> Result<()> {
    let format = args.format();
    let palette = Palette::by_name(&args.palette).ok_or(Error::UnknownPalette(args.palette))?;
    let mut files = &args.files[..];
    if files.is_empty() {
        warn!("no input files");
    }
    if format.is_binary() && files.len() > 1 {
        warn!("{} output takes one file, ignoring {} more", format.name(), files.len() - 1);
        files = &files[..1];
    }

    match args.outfile.as_deref() {
        None if format.writes_beside_input() => {
            for file in files {
                let image = bitmap::open(file)?;
                let path = format.output_path(Path::new(file));
                info!("writing {}", path.display());
                let out = File::create(&path).map_err(|source| Error::Open {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = format.convert(&image, Path::new(file), &palette, BufWriter::new(out))?;
                writer.flush()?;
            }
        }
        outfile => {
            let mut writer = BufWriter::new(open_output(outfile.unwrap_or("-"))?);
            for file in files {
                convert_file(file, format, &palette, &mut writer)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut argv = std::env::args();
    let command = argv.next().unwrap_or_else(|| String::from("bmp2c"));
    let rest = normalize_args(argv);
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    let args = match Args::from_args(&[&command], &rest) {
        Ok(args) => args,
        Err(early_exit) => {
            return match early_exit.status {
                Ok(()) => {
                    println!("{}", early_exit.output);
                    ExitCode::SUCCESS
                }
                Err(()) => {
                    eprintln!("{}", early_exit.output);
                    ExitCode::FAILURE
                }
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
