//! Error types for the QR codec

use thiserror::Error;

/// Result type for codec operations
pub type QrResult<T> = Result<T, QrError>;

/// Errors that can occur while encoding or decoding a symbol
#[derive(Error, Debug)]
pub enum QrError {
    /// GF(256) division with a zero divisor and a nonzero dividend
    #[error("GF(256) division by zero (dividend {dividend})")]
    FieldDivideByZero { dividend: u8 },

    /// Generator polynomial requested with an unusable degree
    #[error("cannot build generator polynomial with {ecc_count} ECC codewords")]
    GeneratorBuild { ecc_count: usize },

    /// Reed-Solomon block has more damage than the ECC can repair
    #[error("uncorrectable ECC block: {0}")]
    EccUncorrectable(String),

    /// Bit stream is longer than the unreserved cells of the matrix
    #[error("layout capacity exceeded: {bits} bits for {capacity} data modules")]
    LayoutCapacityExceeded { bits: usize, capacity: usize },

    /// Header plus payload does not fit the data-bit budget
    #[error(
        "message too long: needs {required} data bits, version {version} holds {capacity} ({} over)",
        .required - .capacity
    )]
    MessageTooLong {
        required: usize,
        capacity: usize,
        version: u8,
    },

    /// Mode indicator outside numeric/alphanumeric/byte
    #[error("unsupported data mode indicator 0b{0:04b}")]
    UnsupportedDataMode(u8),

    /// Data stream ended before the character count was satisfied
    #[error("truncated payload: needs {needed} bits, {available} left")]
    TruncatedPayload { needed: usize, available: usize },

    /// A packed character group decoded to a value outside its alphabet
    #[error("corrupt {mode} payload: group value {value} out of range")]
    CorruptPayload { mode: &'static str, value: u32 },

    /// Character cannot be represented in the requested mode
    #[error("character {ch:?} cannot be encoded in {mode} mode")]
    InvalidCharacter { ch: char, mode: &'static str },

    /// No supported grid size produced a valid symbol
    #[error("could not detect version: no grid size in 21/25/29 has three finder patterns")]
    VersionNotDetected,

    /// The matrix does not carry three finder patterns at the expected corners
    #[error("not a QR code: finder patterns missing or misplaced in {size}x{size} grid")]
    NotAQrCode { size: usize },

    /// Neither copy of the format information could be recovered
    #[error("format information unreadable (copies 0b{primary:015b} / 0b{mirrored:015b})")]
    FormatInfoUnreadable { primary: u16, mirrored: u16 },

    /// Format descriptor of the wrong bit length given to the writer
    #[error("invalid format string: expected 15 bits, got {len}")]
    InvalidFormatString { len: usize },

    /// Version number outside 1..=3
    #[error("unsupported version {0} (only 1-3 are supported)")]
    InvalidVersion(u8),

    /// Mask id outside 0..=7
    #[error("invalid mask id {0}")]
    InvalidMask(u8),

    /// A cell still reserved-for-data was read as a module value
    #[error("module ({row}, {col}) read before it was assigned")]
    UnassignedModule { row: usize, col: usize },

    /// Grid dimensions do not match what the operation needs
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Image loading or saving failed
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
