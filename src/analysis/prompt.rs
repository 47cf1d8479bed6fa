use schemars::schema_for;
use serde_json::Value;

use super::description::ProblemDescription;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Instruction sent alongside the worksheet photo.
pub const DEFAULT_PROMPT: &str = "この画像は小学1年生の算数プリントです。
画像から問題文を抽出してください。

出力は以下のJSON形式で返してください：
[
  {
    \"text\": \"問題文をそのまま抽出\",
    \"type\": \"addition\" または \"subtraction\",
    \"numbers\": [問題に出てくる数字の配列],
    \"subject\": \"問題に出てくる物や人（例：いちご、こども、りんご）\"
  }
]

注意：
- 問題文は子供向けのひらがなで書かれています
- 複数の問題がある場合は配列で返してください
- JSON以外の文字は含めないでください";

/// JSON schema of the reply we expect: an array of problem descriptions.
pub fn response_schema() -> Value {
    serde_json::to_value(schema_for!(Vec<ProblemDescription>))
        .expect("derived JSON schema always serializes")
}
