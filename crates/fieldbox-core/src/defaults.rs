//! Default configuration values and fixed portal strings.
//!
//! Environment variables override the endpoint/model values at backend
//! construction time; the fixed strings are part of the portal contract and
//! are not configurable.

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const GEN_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature for both chat and grounded explanation calls.
pub const GEN_TEMPERATURE: f64 = 0.3;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Seeded greeting turn shown when the assistant panel opens.
pub const ASSISTANT_GREETING: &str =
    "お疲れ様です。DCSSテクニカルアシスタントです。お探しの手順書や、技術的な不明点はありますか？";

/// Substituted for an empty chat reply; an empty string is never rendered
/// as if it were a valid answer.
pub const CHAT_EMPTY_REPLY: &str = "申し訳ありません。回答を生成できませんでした。";

/// Substituted for an empty grounded-explanation text.
pub const EXPLANATION_EMPTY_TEXT: &str = "解説を生成できませんでした。";

/// Returned as the explanation text when the boundary call fails.
pub const EXPLANATION_ERROR_TEXT: &str = "情報の取得中にエラーが発生しました。";

/// Placeholder title for a grounding citation that carries no title.
pub const SOURCE_TITLE_PLACEHOLDER: &str = "参照元リンク";

/// User-visible message for a failed login.
pub const LOGIN_ERROR_MESSAGE: &str = "メールアドレスまたはパスワードが正しくありません。";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_strings_are_non_empty() {
        for s in [
            ASSISTANT_GREETING,
            CHAT_EMPTY_REPLY,
            EXPLANATION_EMPTY_TEXT,
            EXPLANATION_ERROR_TEXT,
            SOURCE_TITLE_PLACEHOLDER,
            LOGIN_ERROR_MESSAGE,
        ] {
            assert!(!s.is_empty());
        }
    }

    #[test]
    fn temperature_is_conservative() {
        assert!(GEN_TEMPERATURE > 0.0 && GEN_TEMPERATURE < 1.0);
    }
}
