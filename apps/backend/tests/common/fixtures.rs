//! Test fixtures and request builders.

use serde_json::json;

/// One item of each category: 静夜思 (4 lines, notes, translation),
/// 燕子 (4 lines) and 忆江南 (2 lines).
pub const SAMPLE_MATERIAL: &str = "古诗：
《静夜思》
唐·李白
床前明月光，疑是地上霜。
举头望明月，低头思故乡。
注释
静夜思：在安静的夜晚产生的思绪。
译文
明亮的月光洒在床前，
好像地上泛起了一层霜。

课文段落：
《燕子》（1-3自然段）
一身乌黑的羽毛，一对俊俏轻快的翅膀，加上剪刀似的尾巴，凑成了活泼机灵的小燕子。

日积月累：
语文园地一：《忆江南》（唐·白居易）
江南好，风景旧曾谙。
";

/// Create an upload request body.
pub fn upload_request(name: Option<&str>, content: &str) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n, "content": content }),
        None => json!({ "content": content }),
    }
}

/// Create a free-form evaluation request body.
pub fn evaluate_request(reference: &str, attempt: &str, mode: Option<&str>) -> serde_json::Value {
    match mode {
        Some(m) => json!({ "reference": reference, "attempt": attempt, "mode": m }),
        None => json!({ "reference": reference, "attempt": attempt }),
    }
}

/// Create a follow request body.
pub fn follow_request(line: usize, attempt: &str) -> serde_json::Value {
    json!({ "line": line, "attempt": attempt })
}

/// Create a recite request body.
pub fn recite_request(attempt: &str) -> serde_json::Value {
    json!({ "attempt": attempt })
}
