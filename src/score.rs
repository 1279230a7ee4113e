//! Score board digits
//!
//! The board is a row of digit elements, each showing one decimal digit via a
//! texture offset. Index 0 is the least significant digit.

/// Receives one digit per board element
pub trait DigitSink {
    /// `offset` is the texture shift selecting `digit`
    fn set_digit(&mut self, index: usize, digit: u8, offset: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDisplay {
    digits: usize,
}

impl ScoreDisplay {
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }

    pub fn digit_count(&self) -> usize {
        self.digits
    }

    /// Zero-padded digits of `value`, least significant first. Values that
    /// do not fit show their lowest digits.
    pub fn digits(&self, value: u64) -> Vec<u8> {
        let mut rest = value;
        (0..self.digits)
            .map(|_| {
                let digit = (rest % 10) as u8;
                rest /= 10;
                digit
            })
            .collect()
    }

    #[inline]
    pub fn digit_offset(digit: u8) -> f32 {
        digit as f32 * 0.1
    }

    pub fn display_value(&self, value: u64, sink: &mut impl DigitSink) {
        for (index, digit) in self.digits(value).into_iter().enumerate() {
            sink.set_digit(index, digit, Self::digit_offset(digit));
        }
    }
}
