use crate::types::PatternTag;
use std::collections::HashSet;

/// Tag statistical anomalies in a byte string
///
/// Every rule is evaluated independently; tags come back in rule order. An
/// empty input has no anomalies.
pub fn detect_patterns(data: &[u8]) -> Vec<PatternTag> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };
    let mut patterns = Vec::new();

    if data.iter().all(|&b| b == first) {
        patterns.push(PatternTag::AllSameByte(first));
    }

    // Widened so a run crossing 0xFF never matches
    if data
        .iter()
        .enumerate()
        .all(|(i, &b)| b as usize == first as usize + i)
    {
        patterns.push(PatternTag::SequentialBytes);
    }

    let zeros = data.iter().filter(|&&b| b == 0).count();
    if zeros > data.len() / 2 {
        patterns.push(PatternTag::MostlyZeros {
            zeros,
            length: data.len(),
        });
    }

    // distinct > 0.8 * len, kept in integers
    if distinct_bytes(data) * 5 > data.len() * 4 {
        patterns.push(PatternTag::HighEntropy);
    }

    patterns
}

/// Number of distinct byte values
pub fn distinct_bytes(data: &[u8]) -> usize {
    data.iter().collect::<HashSet<_>>().len()
}
