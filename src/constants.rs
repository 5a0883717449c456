// Centralized magic numbers & default values
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
/// Leading bytes inspected when deciding whether a file is binary.
pub const BINARY_SAMPLE_BYTES: usize = 4096;
pub const DEFAULT_FORMAT: &str = "markdown";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "CONTEXT_PACK_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Process exit codes
pub const EXIT_RUNTIME: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_CHUNK_RANGE: u8 = 3;
