use serde::Serialize;

use crate::core::rng::RandomSource;

/// Year the simulation is set in.
pub const CURRENT_YEAR: u32 = 2025;

/// Static character sheet for the companion. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub birth_year: u32,
    pub occupation: &'static str,
    pub personality: &'static str,
    pub hobbies: &'static [&'static str],
    pub bio: &'static str,
}

impl Profile {
    pub fn age(&self) -> u32 {
        CURRENT_YEAR.saturating_sub(self.birth_year)
    }
}

pub const HUIZHEN: Profile = Profile {
    name: "惠貞",
    birth_year: 1982,
    occupation: "資深社工",
    personality: "INFJ",
    hobbies: &["村上春樹", "健走", "老歌", "烹飪"],
    bio: "1982年生，社工系畢業。經歷過921地震，對聲音敏感。外表冷靜，內心柔軟。",
};

/// Headlines the companion brings up as conversational filler.
pub const NEWS: [&str; 5] = [
    "【社會】2025年台灣邁入超高齡社會，長照據點人力荒，社工負荷瀕臨極限。",
    "【藝文】台北市立美術館《2025 台北雙年展：地平線上的低吟》本週開幕。",
    "【生活】氣象署發布大雨特報，信義區今晚降雨機率 80%。",
    "【健康】換季過敏族群激增，醫師建議減少戶外運動。",
    "【懷舊】滾石唱片推出「千禧年情歌」復刻黑膠，引發七年級生搶購熱潮。",
];

pub fn pick_news<R: RandomSource>(rng: &mut R) -> &'static str {
    *rng.choose(&NEWS)
}

/// First `max_chars` characters of a headline.
pub fn headline(item: &str, max_chars: usize) -> String {
    item.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::testing::ScriptedRandom;

    #[test]
    fn test_profile_age() {
        assert_eq!(HUIZHEN.age(), 43);
        assert_eq!(HUIZHEN.hobbies.len(), 4);
    }

    #[test]
    fn test_headline_counts_characters() {
        let short = headline(NEWS[0], 15);
        assert_eq!(short.chars().count(), 15);
        assert_eq!(short, "【社會】2025年台灣邁入超高");
        assert_eq!(headline("短", 15), "短");
    }

    #[test]
    fn test_pick_news() {
        let mut rng = ScriptedRandom::new(&[4]);
        assert_eq!(pick_news(&mut rng), NEWS[4]);
    }
}
