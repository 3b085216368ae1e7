pub mod io;

/// Restore the default SIGPIPE disposition so that `fbasenc | head` dies
/// quietly the way GNU tools do (status 141) instead of reporting EPIPE.
/// Call first thing in `main()`.
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// OS error text without Rust's " (os error N)" suffix, matching the
/// wording GNU coreutils prints.
pub fn io_error_msg(e: &std::io::Error) -> String {
    let msg = e.to_string();
    if let Some(code) = e.raw_os_error() {
        let suffix = format!(" (os error {})", code);
        if let Some(stripped) = msg.strip_suffix(&suffix) {
            return stripped.to_string();
        }
    }
    msg
}
