/// Module grids (`Matrix`, `Module`) and the packed `BitMatrix`
pub mod matrix;
/// Symbol parameters (version, EC level, mask, mode) and the `QRCode` result
pub mod qr_code;

pub use matrix::{BitMatrix, Matrix, Module};
pub use qr_code::{DataMode, ECLevel, MaskPattern, QRCode, Version};
