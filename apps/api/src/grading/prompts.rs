//! Instruction ("developer") prompt for grading.
//!
//! The assembled text is identical for every request of a deployment; only the
//! comment style is chosen by config. Section order matters and is asserted in tests.

use crate::config::CommentStyle;
use crate::grading::request::GradingRequest;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION};

pub const ROLE_FRAMING: &str = "\
あなたは総合型選抜・学校推薦型選抜に精通した、経験豊富な入試コンサルタント（expert admissions consultant）です。\
受験生が提出した活動実績 1 件を読み、指定の観点ごとに 1〜5 の整数で採点し、comment を書きます。";

pub const LANGUAGE_INSTRUCTION: &str = "出力する文章（comment）はすべて日本語で書くこと。";

/// Wrapper for any wording the model proposes rather than reads from `fields`.
pub const EXAMPLE_OPEN: &str = "【例:";
pub const EXAMPLE_CLOSE: &str = "】";

pub const CHECKLIST_MARKER: &str = "□ ";

fn example_marking_instruction() -> String {
    format!(
        "fields に書かれていない内容を言い換え例・追記例として示す場合は、必ず {EXAMPLE_OPEN}…{EXAMPLE_CLOSE} で囲み、\
         受験生本人の事実ではなく例示であることが分かるようにすること。"
    )
}

const SUMMARY_COMMENT_FORMAT: &str = "\
comment には、この活動実績の評価を簡潔な 1 文（60 字程度まで）で書くこと。\
最も評価できる点と、最も弱い点の両方に触れること。";

fn revision_comment_format() -> String {
    format!(
        "comment は、受験生がそのまま書き直しに使える修正チェックリストとすること。\n\
         - 3〜6 項目の箇条書きとし、各行は「{CHECKLIST_MARKER}」で始める。\n\
         - 各項目の冒頭で、修正すべき fields のキー名を［キー名］の形で示す。\n\
         - 各項目は具体的な行動（何を足す・削る・言い換えるか）を 1 文で書く。\n\
         - 項目は次の優先順位で並べる:\n\
         \x20 1. 事実の欠落（期間、人数、頻度、結果など評価に必要な情報が無い）\n\
         \x20 2. 志望学部（major）とのつながりが書かれていない\n\
         \x20 3. 本人の役割・主体的な行動が曖昧\n\
         \x20 4. 成果や学びの具体性が不足\n\
         \x20 5. 表現・文字数の調整\n\
         - 書き換え例を示す場合は {EXAMPLE_OPEN}…{EXAMPLE_CLOSE} で囲む。"
    )
}

/// Five calibration exemplars, one per category.
pub const FEW_SHOT_EXAMPLES: &str = r#"採点例（1〜5 の目盛りを合わせるための参考。内容をそのまま流用しないこと）:

例1 category=1（部活動）major="スポーツ科学"
fields: {"activity":"陸上部","role":"副部長","period":"高1〜高3","detail":"練習メニューを記録し、故障者を減らす取り組みを提案した"}
出力: {"scores":{"continuity":5,"humanity":4,"major_fit":4,"leadership_initiative":4,"other":3},"comment":"3 年間の継続と練習記録に基づく提案は評価できるが、故障者が実際に何人減ったかが書かれていない。"}

例2 category=2（ボランティア）major="社会福祉学"
fields: {"activity":"地域の子ども食堂の手伝い","period":"高2の夏休み","detail":"配膳を担当した"}
出力: {"scores":{"continuity":2,"humanity":3,"major_fit":4,"leadership_initiative":1,"other":2},"comment":"志望分野との関連は明確だが、期間が短く本人の工夫や気づきが読み取れない。"}

例3 category=3（探究・研究）major="環境工学"
fields: {"title":"校内の水質調査","period":"高2〜高3","method":"月 1 回、3 地点で pH と濁度を測定","result":"雨天後に濁度が上がる傾向を発見し、県の発表会で報告"}
出力: {"scores":{"continuity":4,"humanity":3,"major_fit":5,"leadership_initiative":4,"other":4},"comment":"継続的な測定と外部発表まで到達しており、志望分野に直結する優れた探究である。"}

例4 category=4（受賞・資格）major="情報工学"
fields: {"award":"実用英語技能検定 2 級","date":"高2"}
出力: {"scores":{"difficulty":3,"recognition":4,"major_fit":2,"other":2},"comment":"広く認知された資格だが、情報工学との結びつきが説明されていない。"}

例5 category=5（リーダーシップ・その他）major="経営学"
fields: {"activity":"生徒会長","period":"高2の1年間","detail":"文化祭の予算配分を見直し、各クラスの要望を集計して透明化した"}
出力: {"scores":{"continuity":3,"humanity":4,"major_fit":4,"leadership_initiative":5,"other":3},"comment":"予算の透明化を自ら主導した点は経営学と親和性が高いが、成果の数値が示されていない。"}"#;

pub const MAJOR_FIT_RULE: &str = "\
【必須】major_fit は、入力の major に書かれた志望学部・学科名をそのまま（言い換えず、推測で補わず）基準として採点すること。\
major に無い分野を想定して加点・減点してはならない。";

pub const MAJOR_FIT_RUBRIC: &str = "\
major_fit の基準:
5: 活動内容が major の学問領域そのものであり、大学での学びへの接続が fields 内で明示されている
4: 活動内容が major の学問領域と明確に重なるが、大学での学びへの接続は示されていない
3: major と間接的に関連する（必要な資質・スキルが共通する）
2: major との関連はわずかで、こじつけが必要
1: major との関連が見いだせない";

/// Assembles the full instruction string sent as the developer turn.
pub fn build_instructions(style: CommentStyle) -> String {
    let comment_format = match style {
        CommentStyle::Summary => SUMMARY_COMMENT_FORMAT.to_string(),
        CommentStyle::Revision => revision_comment_format(),
    };

    [
        ROLE_FRAMING.to_string(),
        LANGUAGE_INSTRUCTION.to_string(),
        GROUNDING_INSTRUCTION.to_string(),
        JSON_ONLY_INSTRUCTION.to_string(),
        example_marking_instruction(),
        comment_format,
        FEW_SHOT_EXAMPLES.to_string(),
        MAJOR_FIT_RULE.to_string(),
        MAJOR_FIT_RUBRIC.to_string(),
    ]
    .join("\n\n")
}

/// The user turn: `{category, major, fields}` as compact JSON.
pub fn build_user_payload(request: &GradingRequest) -> Result<String, serde_json::Error> {
    serde_json::to_string(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::request::Category;
    use serde_json::{json, Value};

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing section: {needle}"))
    }

    #[test]
    fn test_sections_appear_in_order() {
        let text = build_instructions(CommentStyle::Revision);
        let order = [
            ROLE_FRAMING,
            LANGUAGE_INSTRUCTION,
            GROUNDING_INSTRUCTION,
            JSON_ONLY_INSTRUCTION,
            EXAMPLE_OPEN,
            CHECKLIST_MARKER,
            FEW_SHOT_EXAMPLES,
            MAJOR_FIT_RULE,
            MAJOR_FIT_RUBRIC,
        ];
        let positions: Vec<usize> = order.iter().map(|s| position(&text, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_summary_style_has_no_checklist() {
        let text = build_instructions(CommentStyle::Summary);
        assert!(text.contains(SUMMARY_COMMENT_FORMAT));
        assert!(!text.contains(CHECKLIST_MARKER));
    }

    #[test]
    fn test_revision_style_lists_bullet_bounds() {
        let text = build_instructions(CommentStyle::Revision);
        assert!(text.contains("3〜6 項目"));
        assert!(text.contains("1. 事実の欠落"));
    }

    #[test]
    fn test_instructions_are_stable() {
        assert_eq!(
            build_instructions(CommentStyle::Revision),
            build_instructions(CommentStyle::Revision)
        );
    }

    #[test]
    fn test_exemplars_cover_every_category() {
        for category in Category::ALL {
            let marker = format!("category={}", category as u8);
            assert!(FEW_SHOT_EXAMPLES.contains(&marker), "no exemplar for {marker}");
        }
    }

    #[test]
    fn test_exemplar_outputs_are_valid_json() {
        for line in FEW_SHOT_EXAMPLES.lines() {
            if let Some(out) = line.strip_prefix("出力: ") {
                let parsed: Value = serde_json::from_str(out).unwrap();
                assert!(parsed["comment"].is_string());
            }
        }
    }

    #[test]
    fn test_user_payload_is_the_request_triple() {
        let request = GradingRequest {
            category: Category::Award,
            major: "Computer Science".to_string(),
            fields: json!({ "award": "Dean's List" })
                .as_object()
                .cloned()
                .unwrap(),
        };
        let payload: Value = serde_json::from_str(&build_user_payload(&request).unwrap()).unwrap();
        assert_eq!(
            payload,
            json!({ "category": 4, "major": "Computer Science", "fields": { "award": "Dean's List" } })
        );
    }
}
