// fbasenc: encode/decode data in various encodings (GNU basenc replacement)

use std::io;
use std::process;

use anyhow::Context;
use clap::{ArgGroup, Parser};

use basenc_rs::basenc::{self, BasencError, Config, Scheme};
use basenc_rs::common::io::open_input;
use basenc_rs::common::{io_error_msg, reset_sigpipe};

const TOOL_NAME: &str = "basenc";

#[derive(Parser)]
#[command(
    name = "basenc",
    about = "basenc encode or decode FILE, or standard input, to standard output.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        When decoding, the input may contain newlines in addition to the bytes of\n\
        the formal alphabet.  Use --ignore-garbage to attempt to recover\n\
        from any other non-alphabet bytes in the encoded stream.",
    version,
    args_override_self = true,
    group(ArgGroup::new("encoding").multiple(false))
)]
struct Cli {
    /// Same as 'base64' program (RFC4648 section 4)
    #[arg(long, group = "encoding")]
    base64: bool,

    /// File- and url-safe base64 (RFC4648 section 5)
    #[arg(long, group = "encoding")]
    base64url: bool,

    /// Same as 'base32' program (RFC4648 section 6)
    #[arg(long, group = "encoding")]
    base32: bool,

    /// Extended hex alphabet base32 (RFC4648 section 7)
    #[arg(long, group = "encoding")]
    base32hex: bool,

    /// Hex encoding (RFC4648 section 8)
    #[arg(long, group = "encoding")]
    base16: bool,

    /// Bit string with most significant bit (msb) first
    #[arg(long, group = "encoding")]
    base2msbf: bool,

    /// Bit string with least significant bit (lsb) first
    #[arg(long, group = "encoding")]
    base2lsbf: bool,

    /// Ascii85-like encoding (ZeroMQ spec:32/Z85)
    #[arg(long, group = "encoding")]
    z85: bool,

    /// Decode data
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// When decoding, ignore non-alphabet characters
    #[arg(short = 'i', long = "ignore-garbage")]
    ignore_garbage: bool,

    /// Wrap encoded lines after COLS character (default 76).
    /// Use 0 to disable line wrapping
    #[arg(
        short = 'w',
        long = "wrap",
        value_name = "COLS",
        default_value_t = basenc::DEFAULT_WRAP
    )]
    wrap: usize,

    /// File to process (reads stdin if omitted or -)
    file: Option<String>,
}

impl Cli {
    fn scheme(&self) -> Option<Scheme> {
        let flags = [
            self.base64,
            self.base64url,
            self.base32,
            self.base32hex,
            self.base16,
            self.base2msbf,
            self.base2lsbf,
            self.z85,
        ];
        flags
            .iter()
            .zip(Scheme::ALL)
            .find_map(|(&on, scheme)| on.then_some(scheme))
    }

    fn config(&self, scheme: Scheme) -> Config {
        if self.decode {
            Config::decode(scheme).with_ignore_garbage(self.ignore_garbage)
        } else {
            Config::encode(scheme).with_wrap(self.wrap)
        }
    }
}

fn run(config: &Config, filename: &str) -> anyhow::Result<()> {
    let mut input = open_input(filename).with_context(|| filename.to_string())?;
    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(1024 * 1024, stdout.lock());
    basenc::run(config, &mut input, &mut out)?;
    Ok(())
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();

    let Some(scheme) = cli.scheme() else {
        eprintln!("{}: missing encoding type", TOOL_NAME);
        eprintln!("Try '{} --help' for more information.", TOOL_NAME);
        process::exit(1);
    };

    let filename = cli.file.as_deref().unwrap_or("-");

    if let Err(e) = run(&cli.config(scheme), filename) {
        if let Some(err) = e.downcast_ref::<BasencError>() {
            if err.is_broken_pipe() {
                process::exit(0);
            }
            eprintln!("{}: {}", TOOL_NAME, err);
        } else if let Some(err) = e.downcast_ref::<io::Error>() {
            eprintln!("{}: {}: {}", TOOL_NAME, e, io_error_msg(err));
        } else {
            eprintln!("{}: {:#}", TOOL_NAME, e);
        }
        process::exit(1);
    }
}
