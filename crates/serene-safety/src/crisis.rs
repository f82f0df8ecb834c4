use serde::{Deserialize, Serialize};

use serene_core::models::chat::{ChatReply, Hotline};

/// Fixed safety message and hotline list returned on the crisis path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResources {
    pub message: String,
    pub hotlines: Vec<Hotline>,
}

impl CrisisResources {
    pub fn reply(&self) -> ChatReply {
        ChatReply::Crisis {
            message: self.message.clone(),
            hotlines: self.hotlines.clone(),
        }
    }
}

impl Default for CrisisResources {
    fn default() -> Self {
        Self {
            message: "我听到了你感到非常痛苦，甚至出现了伤害自己的念头。你的安全最重要。请立即联系身边可信赖的人或专业的热线支持。"
                .to_string(),
            hotlines: vec![
                hotline("中国心理援助热线", "12320"),
                hotline("紧急电话", "110"),
                hotline("校园/社区辅导中心", "请联系本地机构"),
            ],
        }
    }
}

fn hotline(label: &str, number: &str) -> Hotline {
    Hotline {
        label: label.to_string(),
        number: number.to_string(),
    }
}
