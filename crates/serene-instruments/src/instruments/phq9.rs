use crate::Instrument;
use crate::scoring::{Item, ItemRange};

/// PHQ-9: Patient Health Questionnaire, nine items.
/// Each item rated 0–3 over the last two weeks. Total 0–27.
/// Item 9 asks about thoughts of self-harm.
pub struct Phq9;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            [
                ("interest", "做事时提不起劲或没有兴趣"),
                ("mood", "感到心情低落、沮丧或绝望"),
                ("sleep", "入睡困难、睡不安稳或睡眠过多"),
                ("energy", "感觉疲倦或没有活力"),
                ("appetite", "食欲不振或吃太多"),
                ("self_worth", "觉得自己很糟，或觉得自己很失败，或让自己或家人失望"),
                ("concentration", "对事物专注有困难，例如阅读报纸或看电视时"),
                ("psychomotor", "动作或说话速度缓慢到别人已经察觉，或正好相反，烦躁或坐立不安"),
                ("self_harm", "有不如死掉或用某种方式伤害自己的念头"),
            ]
            .iter()
            .map(|(id, prompt)| Item {
                id: id.to_string(),
                prompt: prompt.to_string(),
            })
            .collect()
        });
        &ITEMS
    }

    fn item_range(&self) -> ItemRange {
        ItemRange { min: 0, max: 3 }
    }
}
