//! Fuzzy name matching for tool search.
//!
//! Queries are ranked against tool names with an edit-distance similarity
//! ratio on a 0-100 scale. Only candidates scoring strictly above
//! [`SCORE_THRESHOLD`] are returned.

use super::model::Tool;

/// Minimum score (exclusive) for a tool to appear in search results.
pub const SCORE_THRESHOLD: u8 = 50;

/// Similarity ratio between a query and a candidate string, 0-100.
///
/// Both strings are lowercased before comparison. The ratio is
/// `100 * (1 - distance / (len(a) + len(b)))`, rounded to the nearest
/// integer, so identical strings score 100 and fully dissimilar strings
/// approach 0.
pub fn similarity(query: &str, candidate: &str) -> u8 {
    let a = query.to_lowercase();
    let b = candidate.to_lowercase();

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len + b_len == 0 {
        return 100;
    }

    let distance = levenshtein(&a, &b);
    (100.0 * (1.0 - distance as f64 / (a_len + b_len) as f64)).round() as u8
}

/// Rank tools by similarity to `query`, best first.
///
/// Tools scoring at or below [`SCORE_THRESHOLD`] are dropped. Equal scores
/// order by name, then id, so results are deterministic.
pub fn rank_by_similarity(query: &str, tools: Vec<Tool>) -> Vec<Tool> {
    let mut matches: Vec<(u8, Tool)> = tools
        .into_iter()
        .filter_map(|tool| {
            let score = similarity(query, &tool.name);
            (score > SCORE_THRESHOLD).then_some((score, tool))
        })
        .collect();

    matches.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    matches.into_iter().map(|(_, tool)| tool).collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for i in 0..=a_len {
        matrix[i][0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for (i, ca) in a.chars().enumerate() {
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tool(name: &str) -> Tool {
        Tool {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: 1,
            description: String::new(),
            image: String::new(),
            owner_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("test", "test"), 0);
        assert_eq!(levenshtein("test", "tests"), 1);
        assert_eq!(levenshtein("test", "best"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("hammer", "hammer"), 100);
        assert_eq!(similarity("Hammer", "hammer"), 100);
    }

    #[test]
    fn test_similarity_empty_query() {
        assert_eq!(similarity("", "hammer"), 0);
        assert_eq!(similarity("", ""), 100);
    }

    #[test]
    fn test_similarity_closer_strings_score_higher() {
        let close = similarity("hamer", "hammer");
        let far = similarity("ham", "hammer");
        assert!(close > far);
        assert!(similarity("hammer", "hammer") > close);
    }

    #[test]
    fn test_rank_typo_matches_only_close_name() {
        let tools = vec![tool("Hammer"), tool("Wrench")];
        let ranked = rank_by_similarity("Hamer", tools);
        let names: Vec<&str> = ranked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Hammer"]);
    }

    #[test]
    fn test_rank_threshold_is_exclusive() {
        // "ab" vs "ba" scores exactly 50 and must be dropped.
        assert_eq!(similarity("ab", "ba"), 50);
        assert!(rank_by_similarity("ab", vec![tool("ba")]).is_empty());
    }

    #[test]
    fn test_rank_empty_query_returns_nothing() {
        let tools = vec![tool("Hammer"), tool("Wrench")];
        assert!(rank_by_similarity("", tools).is_empty());
    }

    #[test]
    fn test_rank_ties_are_deterministic() {
        // Same edit distance to the query, so equal scores.
        let tools = vec![tool("hammerb"), tool("hammera")];
        let ranked = rank_by_similarity("hammer", tools);
        let names: Vec<&str> = ranked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["hammera", "hammerb"]);
    }
}
