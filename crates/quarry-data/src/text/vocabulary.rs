use std::collections::HashMap;

use quarry_core::constants::{OOV_TOKEN_ID, RESERVED_TOKEN_IDS};
use rayon::prelude::*;

use super::standardize::tokenize;

/// Token → id mapping learned from a set of texts.
///
/// Ids 0 and 1 are reserved for padding and out-of-vocabulary tokens; the
/// most frequent tokens get ids 2, 3, ... (ties broken alphabetically).
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Count tokens across `texts` and keep the top `max_tokens - 2`.
    pub fn fit<S: AsRef<str> + Sync>(texts: &[S], max_tokens: usize) -> Self {
        let counts = texts
            .par_iter()
            .fold(HashMap::<String, usize>::new, |mut acc, text| {
                for token in tokenize(text.as_ref()) {
                    *acc.entry(token).or_insert(0) += 1;
                }
                acc
            })
            .reduce(HashMap::new, |mut a, b| {
                for (token, n) in b {
                    *a.entry(token).or_insert(0) += n;
                }
                a
            });

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_tokens.saturating_sub(RESERVED_TOKEN_IDS));

        let tokens: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), (i + RESERVED_TOKEN_IDS) as u32))
            .collect();
        Self { tokens, index }
    }

    pub fn id(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(OOV_TOKEN_ID)
    }

    /// Token for `id`, or `None` for reserved and unknown ids.
    pub fn token(&self, id: u32) -> Option<&str> {
        (id as usize)
            .checked_sub(RESERVED_TOKEN_IDS)
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
    }

    /// Number of ids in use, including the reserved ones.
    pub fn size(&self) -> usize {
        self.tokens.len() + RESERVED_TOKEN_IDS
    }
}
