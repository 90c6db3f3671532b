// Right-hand pane text for the selected repository
use trendscout_core::AiAnswer;

use crate::item::{AiStatus, ListItem};

const UNLOCK_PROMPT: &str = "🔒 Press [ENTER] to unlock AI Power 🤖";
const ANALYZING: &str = "🤖 AI is analyzing the project, please wait... ⏲️";
const RETRY_PROMPT: &str = "😫 AI is tired, please press [ENTER] to retry later.";

/// Build the detail text. Only `ai_status` decides the AI section, so an
/// item holding a stale answer in any other state never shows it.
pub fn render(item: &ListItem, width: u16) -> String {
    let heading = "👊 Repository Inspiration 👊";
    let name = format!("💕 {}", item.record.name);
    let url = format!("🔗 {}", item.record.url);
    let description = format!("📖 {}", item.record.description);

    let ai = match item.ai_status {
        AiStatus::Ready => UNLOCK_PROMPT.to_string(),
        AiStatus::InProgress => ANALYZING.to_string(),
        AiStatus::Failed => RETRY_PROMPT.to_string(),
        AiStatus::Success => {
            let body = item
                .ai_answer
                .as_ref()
                .map(|answer| format_answer(answer, width))
                .unwrap_or_default();
            format!("⏬ AI analysis finished ⏬\n\n{}", body)
        }
    };

    format!("{heading}\n\n{name}\n\n{url}\n\n{description}\n\n\n{ai}")
}

fn format_answer(answer: &AiAnswer, width: u16) -> String {
    let wrap_at = (width as usize).saturating_sub(4).max(1);

    let why = section("❓ WHY", "🔴", &answer.why, wrap_at);
    let how = section("🔨 HOW", "🔵", &answer.how, wrap_at);
    let more = section("📊 MORE", "🟢", &answer.related, wrap_at);

    format!("{why}\n\n{how}\n\n{more}")
}

fn section(title: &str, bullet: &str, points: &[String], wrap_at: usize) -> String {
    let mut out = format!("{}:\n", title);
    for point in points {
        out.push_str(&textwrap::fill(&format!("{} {}", bullet, point), wrap_at));
        out.push('\n');
    }
    out
}
