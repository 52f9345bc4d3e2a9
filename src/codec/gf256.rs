/// GF(256) arithmetic for QR Reed-Solomon codes
/// Field defined by primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D), generator 2
use crate::error::{QrError, QrResult};

/// Primitive polynomial reducing products back into 8 bits
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Log/antilog tables for GF(256).
///
/// `exp` is doubled to 512 entries so `exp[log_a + log_b]` never needs a
/// modulo. Tables are filled once in [`Gf256::new`] and never mutated.
#[derive(Clone)]
pub struct Gf256 {
    exp: [u8; 512],
    log: [u8; 256],
}

impl Gf256 {
    /// Build the log/exp tables
    pub fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
        }
        for i in 255..512 {
            exp[i] = exp[i - 255];
        }
        Self { exp, log }
    }

    /// alpha^n for the generator alpha = 2
    pub fn exp(&self, n: usize) -> u8 {
        self.exp[n % 255]
    }

    /// Discrete log of a nonzero element
    pub fn log(&self, a: u8) -> usize {
        self.log[a as usize] as usize
    }

    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log(a) + self.log(b)]
    }

    pub fn div(&self, a: u8, b: u8) -> QrResult<u8> {
        if a == 0 {
            return Ok(0);
        }
        if b == 0 {
            return Err(QrError::FieldDivideByZero { dividend: a });
        }
        Ok(self.exp[self.log(a) + 255 - self.log(b)])
    }

    pub fn pow(&self, a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        self.exp[(self.log(a) * (n % 255)) % 255]
    }

    pub fn inverse(&self, a: u8) -> QrResult<u8> {
        if a == 0 {
            return Err(QrError::FieldDivideByZero { dividend: 1 });
        }
        self.div(1, a)
    }

    /// Multiply two polynomials (coefficients highest degree first)
    pub fn poly_mul(&self, p: &[u8], q: &[u8]) -> Vec<u8> {
        if p.is_empty() || q.is_empty() {
            return Vec::new();
        }
        let mut out = vec![0u8; p.len() + q.len() - 1];
        for (i, &a) in p.iter().enumerate() {
            for (j, &b) in q.iter().enumerate() {
                out[i + j] ^= self.mul(a, b);
            }
        }
        out
    }

    /// Evaluate a polynomial (highest degree first) at `x` with Horner's rule
    pub fn poly_eval(&self, poly: &[u8], x: u8) -> u8 {
        poly.iter().fold(0u8, |acc, &c| self.mul(acc, x) ^ c)
    }
}

impl Default for Gf256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Gf256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gf256")
            .field("primitive", &format_args!("0x{:X}", PRIMITIVE_POLY))
            .finish()
    }
}
