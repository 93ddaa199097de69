use serde::Serialize;

use crate::core::affection::Affection;
use crate::core::mood::Mood;
use crate::core::profile::{headline, pick_news};
use crate::core::rng::RandomSource;
use crate::core::schedule::ActivityState;

pub const DO_NOT_DISTURB: &str = "[系統] 對方已開啟勿擾模式，將在明早回覆。";
pub const BUSY_REPLIES: [&str; 3] = ["稍等，我在忙個案...", "現在有點忙，晚點回你。", "（已讀）"];
pub const LITERARY_REPLY: &str =
    "你也讀村上春樹嗎？那段關於『挪威的森林』的描寫，我一直記得很清楚...";
pub const EMPATHY_REPLY: &str = "謝謝...今天處理了一個安置個案，真的心很累。有你這句話好多了。";
pub const DRAINED_REPLY: &str = "我現在真的沒力氣討論這個...";
pub const SMALL_TALK_REPLY: &str = "嗯，我知道了。今天是週末，你有什麼打算嗎？";

/// Above this a conversational reply turns tender.
pub const LOVE_THRESHOLD: i32 = 80;
const NEWS_PREVIEW_CHARS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub mood: Mood,
}

impl Reply {
    fn new(text: impl Into<String>, mood: Mood) -> Self {
        Reply { text: text.into(), mood }
    }
}

/// Pick a reply for a message, first matching branch wins. Sleeping and busy
/// replies are final; conversational ones get the high-affection override.
pub fn generate<R: RandomSource>(
    text: &str,
    state: ActivityState,
    delta: i32,
    affection_after: Affection,
    rng: &mut R,
) -> Reply {
    if state == ActivityState::Sleeping {
        return Reply::new(DO_NOT_DISTURB, Mood::Neutral);
    }
    if state.is_busy() {
        return Reply::new(*rng.choose(&BUSY_REPLIES), Mood::Annoyed);
    }

    let reply = conversational_reply(text, delta, rng);
    if affection_after.value() > LOVE_THRESHOLD {
        return Reply::new(
            format!("其實...{} (她看著你的眼神變溫柔了)", reply.text),
            Mood::Love,
        );
    }
    reply
}

fn conversational_reply<R: RandomSource>(text: &str, delta: i32, rng: &mut R) -> Reply {
    match delta.signum() {
        1 if text.contains("村上") => Reply::new(LITERARY_REPLY, Mood::Happy),
        1 if text.contains("辛苦") => Reply::new(EMPATHY_REPLY, Mood::Shy),
        1 => Reply::new(news_reply(rng), Mood::Happy),
        -1 => Reply::new(DRAINED_REPLY, Mood::Annoyed),
        _ => Reply::new(SMALL_TALK_REPLY, Mood::Neutral),
    }
}

fn news_reply<R: RandomSource>(rng: &mut R) -> String {
    let news = pick_news(rng);
    format!(
        "剛好看到新聞說「{}...」，覺得這社會變動好快。你怎麼看？",
        headline(news, NEWS_PREVIEW_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::NEWS;
    use crate::core::rng::testing::ScriptedRandom;

    fn reply(text: &str, state: ActivityState, delta: i32, affection: i32, draws: &[i32]) -> Reply {
        let mut rng = ScriptedRandom::new(draws);
        generate(text, state, delta, Affection::new(affection), &mut rng)
    }

    #[test]
    fn test_sleeping_is_terminal() {
        let r = reply("村上", ActivityState::Sleeping, 3, 50, &[]);
        assert_eq!(r, Reply::new(DO_NOT_DISTURB, Mood::Neutral));
    }

    #[test]
    fn test_busy_ignores_delta() {
        for delta in [-8, 0, 4] {
            let r = reply("村上", ActivityState::WorkingOut, delta, 50, &[1]);
            assert_eq!(r.text, BUSY_REPLIES[1]);
            assert_eq!(r.mood, Mood::Annoyed);
        }
    }

    #[test]
    fn test_positive_branches() {
        let r = reply("村上春樹真的很棒", ActivityState::Free, 2, 52, &[]);
        assert_eq!(r, Reply::new(LITERARY_REPLY, Mood::Happy));

        let r = reply("今天辛苦了", ActivityState::Lunch, 1, 51, &[]);
        assert_eq!(r, Reply::new(EMPATHY_REPLY, Mood::Shy));

        let r = reply("一起去看展覽", ActivityState::Resting, 2, 52, &[0]);
        assert_eq!(r.mood, Mood::Happy);
        assert_eq!(
            r.text,
            "剛好看到新聞說「【社會】2025年台灣邁入超高...」，覺得這社會變動好快。你怎麼看？"
        );
        assert!(r.text.contains(&headline(NEWS[0], 15)));
    }

    #[test]
    fn test_negative_and_neutral_branches() {
        let r = reply("照片", ActivityState::Free, -3, 47, &[]);
        assert_eq!(r, Reply::new(DRAINED_REPLY, Mood::Annoyed));

        let r = reply("你好", ActivityState::Commuting, 0, 50, &[]);
        assert_eq!(r, Reply::new(SMALL_TALK_REPLY, Mood::Neutral));
    }

    #[test]
    fn test_love_override_boundary() {
        let r = reply("你好", ActivityState::Free, 0, 80, &[]);
        assert_eq!(r.mood, Mood::Neutral);
        assert_eq!(r.text, SMALL_TALK_REPLY);

        let r = reply("你好", ActivityState::Free, 0, 81, &[]);
        assert_eq!(r.mood, Mood::Love);
        assert_eq!(r.text, format!("其實...{} (她看著你的眼神變溫柔了)", SMALL_TALK_REPLY));
    }

    #[test]
    fn test_terminal_branches_skip_love_override() {
        let r = reply("晚安", ActivityState::Sleeping, 0, 95, &[]);
        assert_eq!(r, Reply::new(DO_NOT_DISTURB, Mood::Neutral));

        let r = reply("在嗎", ActivityState::WorkingHigh, 0, 95, &[2]);
        assert_eq!(r, Reply::new(BUSY_REPLIES[2], Mood::Annoyed));

        let r = reply("辛苦了", ActivityState::Lunch, 2, 95, &[]);
        assert_eq!(r.mood, Mood::Love);
        assert!(r.text.contains(EMPATHY_REPLY));
    }
}
