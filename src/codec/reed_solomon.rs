/// Reed-Solomon error correction for QR codes
/// Codewords are polynomial coefficients, highest degree first.
/// The generator has roots alpha^0 .. alpha^(ecc_count-1).
use super::gf256::Gf256;
use crate::error::{QrError, QrResult};

/// Longest block a GF(256) code can address
const MAX_BLOCK_LEN: usize = 255;

/// Build the generator polynomial prod(x - alpha^i) for i in 0..ecc_count
pub fn build_generator(field: &Gf256, ecc_count: usize) -> QrResult<Vec<u8>> {
    if ecc_count == 0 || ecc_count >= MAX_BLOCK_LEN {
        return Err(QrError::GeneratorBuild { ecc_count });
    }
    let mut generator = vec![1u8];
    for i in 0..ecc_count {
        generator = field.poly_mul(&generator, &[1, field.exp(i)]);
    }
    Ok(generator)
}

/// Systematic Reed-Solomon encoder/decoder for one block
pub struct ReedSolomon<'a> {
    field: &'a Gf256,
    ecc_count: usize,
    generator: Vec<u8>,
}

impl<'a> ReedSolomon<'a> {
    pub fn new(field: &'a Gf256, ecc_count: usize) -> QrResult<Self> {
        let generator = build_generator(field, ecc_count)?;
        Ok(Self {
            field,
            ecc_count,
            generator,
        })
    }

    pub fn ecc_count(&self) -> usize {
        self.ecc_count
    }

    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// ECC codewords for `data`: remainder of data * x^ecc_count divided by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut msg = Vec::with_capacity(data.len() + self.ecc_count);
        msg.extend_from_slice(data);
        msg.resize(data.len() + self.ecc_count, 0);

        for i in 0..data.len() {
            let coef = msg[i];
            if coef == 0 {
                continue;
            }
            for (j, &g) in self.generator.iter().enumerate() {
                msg[i + j] ^= self.field.mul(g, coef);
            }
        }

        msg.split_off(data.len())
    }

    /// Corrected copy of a received block (data followed by ECC)
    pub fn decode(&self, received: &[u8]) -> QrResult<Vec<u8>> {
        let mut block = received.to_vec();
        self.correct(&mut block)?;
        Ok(block)
    }

    /// Correct a block in place, returning how many codewords were repaired.
    ///
    /// On error the block is left untouched.
    pub fn correct(&self, received: &mut [u8]) -> QrResult<usize> {
        let n = received.len();
        if n <= self.ecc_count || n > MAX_BLOCK_LEN {
            return Err(QrError::EccUncorrectable(format!(
                "block of {} codewords cannot carry {} ECC codewords",
                n, self.ecc_count
            )));
        }

        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.find_error_locator(&syndrome)?;
        let degree = sigma.len() - 1;
        if degree > self.ecc_count / 2 {
            return Err(QrError::EccUncorrectable(format!(
                "{} errors located, at most {} correctable",
                degree,
                self.ecc_count / 2
            )));
        }

        let positions = self.find_error_positions(&sigma, n)?;
        let values = self.find_error_values(&sigma, &syndrome, &positions, n)?;

        let mut corrected = received.to_vec();
        for (&pos, &value) in positions.iter().zip(&values) {
            corrected[pos] ^= value;
        }

        if self.calculate_syndrome(&corrected).iter().any(|&s| s != 0) {
            return Err(QrError::EccUncorrectable(
                "syndrome nonzero after correction".to_string(),
            ));
        }

        tracing::trace!(errors = positions.len(), ?positions, "corrected RS block");
        received.copy_from_slice(&corrected);
        Ok(positions.len())
    }

    /// S_i = r(alpha^i)
    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.ecc_count)
            .map(|i| self.field.poly_eval(received, self.field.exp(i)))
            .collect()
    }

    /// Berlekamp-Massey; returns the locator with ascending coefficients, sigma[0] = 1
    fn find_error_locator(&self, syndrome: &[u8]) -> QrResult<Vec<u8>> {
        let gf = self.field;
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta = 1u8;
        let mut l = 0usize;
        let mut m = 1usize;

        for n in 0..syndrome.len() {
            let mut delta = syndrome[n];
            for i in 1..=l.min(sigma.len() - 1) {
                delta ^= gf.mul(sigma[i], syndrome[n - i]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let scale = gf.div(delta, prev_delta)?;
            let mut next = sigma.clone();
            if next.len() < prev.len() + m {
                next.resize(prev.len() + m, 0);
            }
            for (j, &b) in prev.iter().enumerate() {
                next[j + m] ^= gf.mul(scale, b);
            }

            if 2 * l <= n {
                prev = std::mem::replace(&mut sigma, next);
                l = n + 1 - l;
                prev_delta = delta;
                m = 1;
            } else {
                sigma = next;
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma[sigma.len() - 1] == 0 {
            sigma.pop();
        }
        if sigma.len() - 1 != l {
            return Err(QrError::EccUncorrectable(format!(
                "locator degree {} does not match register length {}",
                sigma.len() - 1,
                l
            )));
        }
        Ok(sigma)
    }

    /// Chien search: position j (power n-1-j) is in error when sigma(alpha^-(n-1-j)) = 0
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> QrResult<Vec<usize>> {
        let positions: Vec<usize> = (0..n)
            .filter(|&j| self.eval_ascending(sigma, self.root_for(n, j)) == 0)
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err(QrError::EccUncorrectable(format!(
                "Chien search found {} roots for a degree-{} locator",
                positions.len(),
                sigma.len() - 1
            )));
        }
        Ok(positions)
    }

    /// Forney: e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> QrResult<Vec<u8>> {
        let gf = self.field;

        // omega = S(x) * sigma(x) mod x^ecc_count, ascending
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(sigma.len() - 1) {
                *slot ^= gf.mul(sigma[j], syndrome[i - j]);
            }
        }

        positions
            .iter()
            .map(|&pos| {
                let x_inv = self.root_for(n, pos);
                let omega_val = self.eval_ascending(&omega, x_inv);

                let mut sigma_prime = 0u8;
                for (i, &coeff) in sigma.iter().enumerate().skip(1).step_by(2) {
                    sigma_prime ^= gf.mul(coeff, gf.pow(x_inv, i - 1));
                }
                if sigma_prime == 0 {
                    return Err(QrError::EccUncorrectable(
                        "locator derivative vanished".to_string(),
                    ));
                }

                let x_k = gf.exp(n - 1 - pos);
                Ok(gf.mul(x_k, gf.div(omega_val, sigma_prime)?))
            })
            .collect()
    }

    /// alpha^-(n-1-pos)
    fn root_for(&self, n: usize, pos: usize) -> u8 {
        let power = (n - 1 - pos) % 255;
        self.field.exp(255 - power)
    }

    fn eval_ascending(&self, poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .rev()
            .fold(0u8, |acc, &c| self.field.mul(acc, x) ^ c)
    }
}
