// Shared prompt fragments.
// Grading-specific wording lives in grading/prompts.rs.

/// Enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
出力は JSON オブジェクトのみとすること。\
JSON 以外の文章、前置き、説明、マークダウンのコードフェンスは一切含めないこと。";

/// Forbids invented facts; only the caller-supplied fields may be used.
pub const GROUNDING_INSTRUCTION: &str = "\
事実を創作しないこと。評価とコメントの根拠は入力の fields に書かれている内容だけとし、\
fields に無い実績、数値、役職、期間を推測して断定してはならない。";
