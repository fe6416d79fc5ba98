use crate::error::Error;
use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use s3link_core::ShortCode;
use typed_builder::TypedBuilder;

/// Upper and lowercase ASCII letters.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of random symbols per code unless configured otherwise.
pub const DEFAULT_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of symbols drawn per code, excluding the prefix.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Fixed prefix prepended to every code.
    #[builder(default, setter(into))]
    pub prefix: String,
    /// Symbols to draw from. Must be printable ASCII without duplicates.
    #[builder(default = LETTERS.to_string(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws codes of `length` symbols independently and uniformly from an alphabet.
///
/// The underlying `StdRng` is seeded once when the generator is built and
/// shared by every draw.
pub struct RandomGenerator {
    alphabet: Vec<u8>,
    length: usize,
    prefix: String,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, Error> {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed, producing a reproducible sequence.
    pub fn with_seed(settings: RandomGeneratorSettings, seed: u64) -> Result<Self, Error> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: RandomGeneratorSettings, rng: StdRng) -> Result<Self, Error> {
        if settings.length == 0 {
            return Err(Error::ZeroLength);
        }

        let alphabet = validate_alphabet(&settings.alphabet)?;

        Ok(Self {
            alphabet,
            length: settings.length,
            prefix: settings.prefix,
            rng: Mutex::new(rng),
        })
    }

    /// Draws the next code.
    pub fn next_code(&self) -> ShortCode {
        let mut code = String::with_capacity(self.prefix.len() + self.length);
        code.push_str(&self.prefix);

        let mut rng = self.rng.lock();
        for _ in 0..self.length {
            let idx = rng.random_range(0..self.alphabet.len());
            code.push(self.alphabet[idx] as char);
        }

        ShortCode::new_unchecked(code)
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomGenerator")
            .field("alphabet", &String::from_utf8_lossy(&self.alphabet))
            .field("length", &self.length)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        self.next_code()
    }
}

fn validate_alphabet(alphabet: &str) -> Result<Vec<u8>, Error> {
    if alphabet.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    let mut symbols: Vec<u8> = Vec::with_capacity(alphabet.len());
    for c in alphabet.chars() {
        if !c.is_ascii_graphic() {
            return Err(Error::NonAsciiSymbol(c));
        }
        let byte = c as u8;
        if symbols.contains(&byte) {
            return Err(Error::DuplicateSymbol(c));
        }
        symbols.push(byte);
    }

    Ok(symbols)
}
