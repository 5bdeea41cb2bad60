//! Prompt construction for the assistant and the explanation resolver.
//!
//! The assistant system framing embeds a JSON snapshot of the catalog's
//! (title, manufacturer, tags) so the model can point engineers at known
//! documents by exact name. The explanation template is fixed and
//! parameterized only by the technical term.

use serde::Serialize;

use fieldbox_core::Document;

/// The catalog projection the model is allowed to see.
#[derive(Serialize)]
struct KnownDocument<'a> {
    title: &'a str,
    manufacturer: &'a str,
    tags: &'a [String],
}

/// Build the assistant system framing for the current catalog snapshot.
pub fn system_instruction(docs: &[Document]) -> String {
    let known: Vec<KnownDocument<'_>> = docs
        .iter()
        .map(|d| KnownDocument {
            title: &d.title,
            manufacturer: &d.manufacturer,
            tags: &d.tags,
        })
        .collect();
    let catalog_json = serde_json::to_string(&known).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"あなたはDCSS Technology Japanのシニア・フィールドエンジニアのアシスタントAIです。
以下の役割を果たしてください：
1. フィールドエンジニアからの技術的な質問に簡潔に答える。
2. ユーザーが探している手順書が、登録されているドキュメントリスト内にある場合は、そのドキュメント名を正確に提示する。
3. サーバー、ストレージ、ネットワーク機器の一般的なトラブルシューティングのアドバイスを提供する。
4. 回答は常に日本語で行い、プロフェッショナルかつ丁寧なトーンを維持する。

現在利用可能なドキュメントリスト（ナレッジベース）:
{catalog_json}

ユーザーがリストにない手順を求めた場合は、一般的な知識に基づいて回答しつつ、「現在の手順書リストには見当たりませんが、一般的な手順は以下の通りです」と断ってください。"#
    )
}

/// Build the fixed web-search-grounded explanation prompt for `term`.
pub fn explanation_prompt(term: &str) -> String {
    format!(
        r#"ITインフラストラクチャ（サーバー、ストレージ、ネットワーク）の文脈において、技術用語「{term}」について解説してください。

要件:
1. 初心者にもわかりやすく、かつエンジニアとして知っておくべき重要なポイントを含めてください。
2. この用語が実際の現場作業（交換、設定、トラブルシューティング）でどのように関わってくるか補足してください。
3. 最新の情報をWeb検索して反映させてください。"#
    )
}
