//! Output length budgets for model calls.

use synopsis_core::DetailTier;
use synopsis_llm::LengthParams;

/// Floor for `max_length`, before the input-size cap.
const MIN_MAX_LENGTH: usize = 20;
/// Floor for `min_length`.
const MIN_MIN_LENGTH: usize = 10;
/// `max_length` never exceeds this share of the input.
const INPUT_CAP: f64 = 0.8;
/// `min_length` is this share of `max_length`.
const MIN_SHARE: f64 = 0.3;

/// Token bounds for summarizing `input_words` words at `tier`.
///
/// `min_length` can exceed `max_length` for inputs under ~15 words; backends
/// either cope or fail, and a failure falls back to extraction.
pub fn length_params(input_words: usize, tier: DetailTier) -> LengthParams {
    let target = (input_words as f64 * tier.target_ratio()).floor() as usize;
    let max_length = target
        .min(input_words.saturating_sub(10))
        .max(MIN_MAX_LENGTH)
        .min((input_words as f64 * INPUT_CAP).floor() as usize);
    let min_length = ((max_length as f64 * MIN_SHARE).floor() as usize).max(MIN_MIN_LENGTH);

    LengthParams {
        max_length,
        min_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(words: usize, tier: DetailTier) -> (usize, usize) {
        let p = length_params(words, tier);
        (p.max_length, p.min_length)
    }

    #[test]
    fn scales_with_tier() {
        assert_eq!(params(100, DetailTier::Low), (30, 10));
        assert_eq!(params(100, DetailTier::Medium), (50, 15));
        assert_eq!(params(100, DetailTier::High), (70, 21));
        assert_eq!(params(1000, DetailTier::High), (700, 210));
    }

    #[test]
    fn floor_of_twenty_applies_to_mid_sized_inputs() {
        assert_eq!(params(50, DetailTier::Low), (20, 10));
        assert_eq!(params(30, DetailTier::High), (20, 10));
    }

    #[test]
    fn small_inputs_are_capped_at_eighty_percent() {
        assert_eq!(params(20, DetailTier::High), (16, 10));
        assert_eq!(params(5, DetailTier::Medium), (4, 10));
        assert_eq!(params(0, DetailTier::Low), (0, 10));
    }
}
