//! Prompt construction for AI-generated commit messages.

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert at writing commit messages that follow \
the Conventional Commits specification, in English. Be precise and direct.";

/// Build the user prompt for a diff.
///
/// The diff is embedded verbatim inside a `diff` code fence.
pub fn build_commit_prompt(diff: &str) -> String {
    format!(
        r#"Analyze the following code changes and write a commit message following the Conventional Commits specification.

Rules:
1. Write in English ONLY
2. Format: type(scope): title
   - Followed by a body listing the specific changes as bullet points
3. Valid types: feat, fix, docs, style, refactor, test, chore
4. The title must be clear and direct (max 50 characters)
5. Use imperative verbs: "add", "fix", "remove", "change"
6. Do NOT use vague words like "enhance", "improve", "streamline"
7. Be specific about what changed

Example:
feat: add AI fields to Feature block in Hero collection
- Added aiPrompt and aiDescription to Feature block schema
- Updated admin UI to render new fields
- Removed unused AI config file

Code changes:
```diff
{diff}
```

Reply with the commit message only, without any extra explanation:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_diff_verbatim() {
        let diff = "diff --git a/x b/x\n+let s = \"`$(rm -rf /)`\";\n";
        let prompt = build_commit_prompt(diff);
        assert!(prompt.contains(diff));
        assert!(prompt.contains("```diff\n"));
    }

    #[test]
    fn test_prompt_lists_allowed_types() {
        let prompt = build_commit_prompt("+x");
        assert!(prompt.contains("feat, fix, docs, style, refactor, test, chore"));
        assert!(prompt.contains("type(scope): title"));
    }

    #[test]
    fn test_prompt_limits_title_and_bans_vague_verbs() {
        let prompt = build_commit_prompt("+x");
        assert!(prompt.contains("max 50 characters"));
        for word in ["enhance", "improve", "streamline"] {
            assert!(prompt.contains(word), "prompt should ban '{word}'");
        }
        assert!(prompt.contains("English ONLY"));
    }

    #[test]
    fn test_system_prompt_mentions_conventional_commits() {
        assert!(SYSTEM_PROMPT.contains("Conventional Commits"));
    }
}
