//! Canonical object keys for stored evaluations, diffs and packs.
//!
//! Results are addressed by repository and commit so every artifact can
//! be re-fetched (or re-derived) from the pair alone.

/// Key of a stored evaluation.
pub fn results_key(repo_id: &str, commit: &str) -> String {
    format!("{}/{}/policy_results.json", repo_id, commit)
}

/// Key of a stored diff between two commits.
pub fn diff_key(repo_id: &str, base_commit: &str, head_commit: &str) -> String {
    format!("{}/diffs/{}..{}.json", repo_id, base_commit, head_commit)
}

/// Key prefix of an evidence pack.
pub fn evidence_pack_key(repo_id: &str, commit: &str) -> String {
    format!("{}/evidence-packs/{}", repo_id, commit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_commit_addressed() {
        assert_eq!(
            results_key("acme/chatbot", "abc123"),
            "acme/chatbot/abc123/policy_results.json"
        );
        assert_eq!(
            diff_key("acme/chatbot", "abc123", "def456"),
            "acme/chatbot/diffs/abc123..def456.json"
        );
        assert_eq!(
            evidence_pack_key("acme/chatbot", "abc123"),
            "acme/chatbot/evidence-packs/abc123"
        );
    }
}
