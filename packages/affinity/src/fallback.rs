//! Deterministic substitute verdicts for unparsable model output.
//!
//! The caller must always hand the user a usable verdict: an unparsable
//! reply is recovered with a plausible placeholder rather than surfaced as
//! a parse error. Transport-level failures are a different taxonomy and
//! must not be papered over this way.

use crate::result::AffinityResult;

/// Lower bound of a fallback score (inclusive).
const SCORE_BASE: i64 = 60;

/// Width of the uniform score range; scores land in `[60, 99]`.
const SCORE_SPAN: i64 = 40;

/// Canned commentary, one picked uniformly at random per fallback.
pub const FALLBACK_PHRASES: [&str; 5] = [
    "名字读起来挺顺，至少不会叫错。",
    "属于能一起点奶茶的关系，但未必能一起还房贷。",
    "字义不冲突，算是安全牌组合。",
    "建议先从微信聊天开始测试兼容性。",
    "虽然名字不搭，但心动往往不讲道理。",
];

/// Produces substitute verdicts from an injected random source.
///
/// Holding the `fastrand::Rng` explicitly keeps the generator seedable and
/// therefore deterministic under test; production callers that don't care
/// can use [`generate`] instead, which draws from the thread-local source.
#[derive(Debug)]
pub struct FallbackGenerator {
    rng: fastrand::Rng,
}

impl FallbackGenerator {
    /// Generator backed by a randomly-seeded source.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Generator with a fixed seed, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Produce a substitute verdict. Never fails.
    ///
    /// Score is uniform over `[60, 99]`; commentary is a uniform pick from
    /// [`FALLBACK_PHRASES`].
    pub fn generate(&mut self) -> AffinityResult {
        let score = SCORE_BASE + self.rng.i64(0..SCORE_SPAN);
        let phrase = FALLBACK_PHRASES[self.rng.usize(0..FALLBACK_PHRASES.len())];
        AffinityResult::new(score, phrase)
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Produce a substitute verdict from the process-wide thread-local random
/// source. Safe to call from concurrent requests.
pub fn generate() -> AffinityResult {
    let score = SCORE_BASE + fastrand::i64(0..SCORE_SPAN);
    let phrase = FALLBACK_PHRASES[fastrand::usize(0..FALLBACK_PHRASES.len())];
    AffinityResult::new(score, phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_stays_in_range() {
        let mut gen = FallbackGenerator::with_seed(7);
        for _ in 0..1000 {
            let result = gen.generate();
            assert!(
                (60..=99).contains(&result.score),
                "score {} out of range",
                result.score
            );
        }
    }

    #[test]
    fn test_commentary_comes_from_phrase_set() {
        let mut gen = FallbackGenerator::with_seed(42);
        for _ in 0..200 {
            let result = gen.generate();
            assert!(FALLBACK_PHRASES.contains(&result.commentary.as_str()));
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = FallbackGenerator::with_seed(99);
        let mut b = FallbackGenerator::with_seed(99);
        for _ in 0..20 {
            let ra = a.generate();
            let rb = b.generate();
            assert_eq!(ra.score, rb.score);
            assert_eq!(ra.commentary, rb.commentary);
        }
    }

    #[test]
    fn test_every_phrase_eventually_selected() {
        let mut gen = FallbackGenerator::with_seed(1);
        let mut seen = [false; FALLBACK_PHRASES.len()];
        for _ in 0..500 {
            let result = gen.generate();
            let idx = FALLBACK_PHRASES
                .iter()
                .position(|p| *p == result.commentary)
                .unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_thread_local_path_in_range() {
        for _ in 0..100 {
            let result = generate();
            assert!((60..=99).contains(&result.score));
            assert!(FALLBACK_PHRASES.contains(&result.commentary.as_str()));
        }
    }
}
