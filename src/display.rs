use colored::*;

use crate::core::{
    Affection, ChatEntry, ImageHandle, Profile, SessionView, Speaker, Standing, Turn, DAILY_SCHEDULE,
};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub struct SessionFormatter;

impl SessionFormatter {
    /// Status panel: clock, routine, affection and relationship label.
    pub fn format_status(view: &SessionView<'_>) -> String {
        let standing = match view.standing {
            Standing::Disliked => format!("\n狀態: {}", "厭惡".red().bold()),
            Standing::Favorable => format!("\n狀態: {}", "好感".blue().bold()),
            Standing::Partner => format!("\n🎈🎉 狀態: {} 🎉🎈", "男女朋友".green().bold()),
            Standing::Unremarkable => String::new(),
        };

        format!(
            "{}\n📊 系統狀態\n{}\n🕐 目前時間: {}\n📅 作息狀態: {}\n💕 好感度: {}\n{}{}\n{}",
            RULE,
            RULE,
            view.clock,
            view.slot.description,
            view.affection,
            Self::format_affection_bar(view.affection),
            standing,
            RULE
        )
    }

    /// The picture area: uploaded references, or the mood glyph as placeholder.
    pub fn format_stage(view: &SessionView<'_>, images: &[ImageHandle], name: &str) -> String {
        if view.has_reference_images {
            let files = images
                .iter()
                .map(|image| format!("  🖼  {}", image.file_name()))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{} ({})", files, name, view.mood)
        } else {
            format!("        {}\n  {}", view.glyph, "等待圖片生成中...".dimmed())
        }
    }

    pub fn format_entry(entry: &ChatEntry, name: &str) -> String {
        match entry.speaker {
            Speaker::User => format!("{} {}", "You:".cyan().bold(), entry.text),
            Speaker::Companion => format!("{} {}", format!("{}:", name).magenta().bold(), entry.text),
        }
    }

    pub fn format_transcript(history: &[ChatEntry], name: &str) -> String {
        history
            .iter()
            .map(|entry| Self::format_entry(entry, name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Companion's reply plus the score movement.
    pub fn format_turn(turn: &Turn, name: &str, show_feedback: bool) -> String {
        let mut out = format!(
            "{} {} {}",
            turn.reply.mood.glyph(),
            format!("{}:", name).magenta().bold(),
            turn.reply.text
        );

        if show_feedback {
            if let Some(feedback) = turn.change.feedback {
                out.push_str(&format!("\n{}", feedback.message().dimmed()));
            }
        }

        let delta = turn.change.delta;
        let movement = format!(
            "好感度 {} → {} ({:+})",
            turn.affection_before.value(),
            turn.affection_after.value(),
            delta
        );
        let movement = match delta.signum() {
            1 => movement.green(),
            -1 => movement.red(),
            _ => movement.normal(),
        };
        out.push_str(&format!("\n{}", movement));
        out
    }

    pub fn format_profile(profile: &Profile) -> String {
        format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                💕 {} 的個人資料                             ║
╚══════════════════════════════════════════════════════════════╝

{}
🎂 年齡: {}
💼 職業: {}
🧭 性格: {}
🎵 興趣: {}
📖 {}
{}
"#,
            profile.name,
            RULE,
            profile.age(),
            profile.occupation,
            profile.personality,
            profile.hobbies.join("、"),
            profile.bio,
            RULE
        )
    }

    /// The daily routine with the current hour's row highlighted.
    pub fn format_schedule(current_hour: u32) -> String {
        DAILY_SCHEDULE
            .iter()
            .map(|slot| {
                let row = format!(
                    "{:02}:00-{:02}:00  {:<13} {}",
                    slot.start,
                    slot.end,
                    slot.state.to_string(),
                    slot.description
                );
                if slot.contains(current_hour) {
                    format!("{} {}", "▶".yellow(), row.yellow().bold())
                } else {
                    format!("  {}", row)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_affection_bar(affection: Affection) -> String {
        let hearts = (affection.ratio() * 10.0).round() as usize;
        let filled = "❤️".repeat(hearts);
        let empty = "🤍".repeat(10 - hearts);
        format!("{}{} {:.0}%", filled, empty, affection.ratio() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{resolve, Session, HUIZHEN};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_affection_bar() {
        assert_eq!(
            SessionFormatter::format_affection_bar(Affection::new(50)),
            format!("{}{} 50%", "❤️".repeat(5), "🤍".repeat(5))
        );
        assert!(SessionFormatter::format_affection_bar(Affection::new(100)).ends_with("100%"));
        assert!(SessionFormatter::format_affection_bar(Affection::new(0)).starts_with("🤍"));
    }

    #[test]
    fn test_stage_placeholder_and_images() {
        plain();
        let mut session = Session::default();
        let view = session.view(*resolve(21), "21:00");
        let stage = SessionFormatter::format_stage(&view, session.reference_images(), HUIZHEN.name);
        assert!(stage.contains("😐"));
        assert!(stage.contains("等待圖片生成中"));

        session.attach_images(vec![ImageHandle::from_path("pics/front.jpg").unwrap()]);
        let view = session.view(*resolve(21), "21:00");
        let stage = SessionFormatter::format_stage(&view, session.reference_images(), HUIZHEN.name);
        assert!(stage.contains("front.jpg"));
        assert!(stage.contains("惠貞 (neutral)"));
    }

    #[test]
    fn test_status_labels() {
        plain();
        let session = Session::new(Affection::new(95));
        let status = SessionFormatter::format_status(&session.view(*resolve(9), "09:15"));
        assert!(status.contains("男女朋友"));
        assert!(status.contains("09:15"));
        assert!(status.contains("工作中 (忙碌)"));

        let session = Session::new(Affection::new(50));
        let status = SessionFormatter::format_status(&session.view(*resolve(9), "09:15"));
        assert!(!status.contains("\n狀態:"));
        assert!(!status.contains("男女朋友"));
    }

    #[test]
    fn test_schedule_marks_current_slot() {
        plain();
        let table = SessionFormatter::format_schedule(12);
        assert_eq!(table.lines().count(), DAILY_SCHEDULE.len());
        let marked: Vec<_> = table.lines().filter(|line| line.starts_with('▶')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("lunch"));
    }

    #[test]
    fn test_transcript_labels_speakers() {
        plain();
        let history = vec![ChatEntry::user("你好"), ChatEntry::companion("嗯")];
        let text = SessionFormatter::format_transcript(&history, "惠貞");
        assert_eq!(text, "You: 你好\n惠貞: 嗯");
    }
}
