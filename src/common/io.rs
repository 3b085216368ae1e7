use std::fs::File;
use std::io::{self, Cursor, Read, StdinLock};
use std::path::Path;

#[cfg(target_os = "linux")]
use std::sync::atomic::{AtomicBool, Ordering};

use memmap2::{Mmap, MmapOptions};

/// Regular files at least this large are memory mapped instead of read().
/// Below it, mmap setup and teardown cost more than the copies they save.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Input source for one run: stdin, an open file, or a mapped file.
/// All three are consumed through `Read`, chunk by chunk.
pub enum Input {
    Stdin(StdinLock<'static>),
    File(File),
    Mapped(Cursor<Mmap>),
}

impl Read for Input {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin(s) => s.read(buf),
            Input::File(f) => f.read(buf),
            Input::Mapped(c) => c.read(buf),
        }
    }
}

/// Track whether O_NOATIME is supported to avoid repeated failed open() attempts.
/// After the first EPERM, we never try O_NOATIME again.
#[cfg(target_os = "linux")]
static NOATIME_SUPPORTED: AtomicBool = AtomicBool::new(true);

/// Open a file with O_NOATIME on Linux to avoid atime inode writes.
#[cfg(target_os = "linux")]
fn open_noatime(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    if NOATIME_SUPPORTED.load(Ordering::Relaxed) {
        match std::fs::OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOATIME)
            .open(path)
        {
            Ok(f) => return Ok(f),
            Err(ref e) if e.raw_os_error() == Some(libc::EPERM) => {
                // O_NOATIME requires file ownership or CAP_FOWNER
                NOATIME_SUPPORTED.store(false, Ordering::Relaxed);
            }
            Err(e) => return Err(e),
        }
    }
    File::open(path)
}

#[cfg(not(target_os = "linux"))]
fn open_noatime(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Open `name` for reading. `-` means standard input.
/// Directories open fine and fail on the first read, like GNU basenc.
pub fn open_input(name: &str) -> io::Result<Input> {
    if name == "-" {
        return Ok(Input::Stdin(io::stdin().lock()));
    }

    let file = open_noatime(Path::new(name))?;
    let metadata = file.metadata()?;
    if !metadata.file_type().is_file() || metadata.len() < MMAP_THRESHOLD {
        return Ok(Input::File(file));
    }

    // SAFETY: read-only private mapping; the engine only reads through it.
    match unsafe { MmapOptions::new().map(&file) } {
        Ok(mmap) => {
            #[cfg(target_os = "linux")]
            {
                let _ = mmap.advise(memmap2::Advice::Sequential);
            }
            Ok(Input::Mapped(Cursor::new(mmap)))
        }
        // mmap failed (e.g. special filesystem): plain reads still work
        Err(_) => Ok(Input::File(file)),
    }
}

/// Read until `buf` is full or the source is exhausted, retrying on
/// partial reads and EINTR. Returns the number of bytes placed in `buf`;
/// anything short of `buf.len()` means end of input.
#[inline]
pub fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
