/// Use mimalloc as the global allocator for all binaries.
/// The drivers allocate a handful of large reusable buffers per run.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod basenc;
pub mod common;
