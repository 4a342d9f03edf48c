use once_cell::sync::Lazy;
use regex::Regex;

/// `\emph`, `\textbf`, ... — the whole command name is dropped.
static TEX_COMMAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-zA-Z]+").unwrap());

static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Normalize a title for comparison.
///
/// Lowercases, strips TeX commands and braces, and collapses every run of
/// non-alphanumeric characters to a single space. Commands are removed before
/// braces so that `\emph{Deep}` keeps its argument (`deep`) rather than the
/// command name fusing with it.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = TEX_COMMAND_RE.replace_all(&text, "");
    let text = text.replace(['{', '}'], "");
    let text = NON_ALNUM_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Similarity of two titles as a matching-blocks ratio in [0, 1].
///
/// Both inputs are normalized first. The ratio is `2*M / T` where `M` is the
/// total length of the non-overlapping common substrings found greedily
/// longest-first, and `T` is the sum of the two normalized lengths. Two
/// strings that normalize identically (including both empty) score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_len(a.as_bytes(), b.as_bytes());
    2.0 * matched as f64 / total as f64
}

/// Total length of matching blocks: take the longest common substring, then
/// recurse on the unmatched pieces to its left and right.
fn matched_len(a: &[u8], b: &[u8]) -> usize {
    let (i, j, k) = longest_match(a, b);
    if k == 0 {
        return 0;
    }
    k + matched_len(&a[..i], &b[..j]) + matched_len(&a[i + k..], &b[j + k..])
}

/// Longest common substring of `a` and `b` as `(start_a, start_b, len)`,
/// preferring the earliest occurrence among equally long ones.
fn longest_match(a: &[u8], b: &[u8]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len()];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len()];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = if j == 0 { 1 } else { prev[j - 1] + 1 };
                cur[j] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }
    best
}
