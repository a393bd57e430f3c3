use std::collections::HashMap;

/// Shannon entropy of a string in bits per character.
///
/// Encoded or encrypted payloads smuggled into subdomain labels push this
/// toward log2(alphabet size); natural-language labels sit well below.
/// Empty string is 0.0 by convention.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, u32> = HashMap::new();
    let mut len = 0u32;
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
        len += 1;
    }

    let len = len as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
