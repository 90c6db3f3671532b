// A repository as the list sees it: the scraped record plus AI state
use serde::{Deserialize, Serialize};
use trendscout_core::{AiAnswer, RepositoryRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiStatus {
    /// Never asked
    #[default]
    Ready,
    InProgress,
    /// Last attempt errored, can be retried
    Failed,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub index: usize,
    pub record: RepositoryRecord,
    pub ai_status: AiStatus,
    pub ai_answer: Option<AiAnswer>,
}

impl ListItem {
    pub fn new(index: usize, record: RepositoryRecord) -> Self {
        Self {
            index,
            record,
            ai_status: AiStatus::Ready,
            ai_answer: None,
        }
    }

    /// Correlates the item with its AI slot
    pub fn url(&self) -> &str {
        &self.record.url
    }

    /// Ready or Failed -> InProgress. Returns false (and changes nothing)
    /// from any other state.
    pub fn begin_analysis(&mut self) -> bool {
        match self.ai_status {
            AiStatus::Ready | AiStatus::Failed => {
                self.ai_status = AiStatus::InProgress;
                true
            }
            AiStatus::InProgress | AiStatus::Success => false,
        }
    }

    /// InProgress -> Success, keeping the answer
    pub fn complete(&mut self, answer: AiAnswer) -> bool {
        if self.ai_status != AiStatus::InProgress {
            return false;
        }
        self.ai_status = AiStatus::Success;
        self.ai_answer = Some(answer);
        true
    }

    /// InProgress -> Failed
    pub fn fail(&mut self) -> bool {
        if self.ai_status != AiStatus::InProgress {
            return false;
        }
        self.ai_status = AiStatus::Failed;
        true
    }

    /// Text the fuzzy filter matches against
    pub fn filter_text(&self) -> String {
        format!(
            "{} {} {}",
            self.record.name, self.record.description, self.record.language
        )
    }
}

#[cfg(test)]
pub(crate) fn record(name: &str) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        url: format!("https://github.com/{}", name),
        description: format!("{} does things", name),
        language: "Go".to_string(),
        stars: 1200,
        forks: 34,
        stars_today: 56,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_ready() {
        let item = ListItem::new(2, record("a/b"));
        assert_eq!(item.ai_status, AiStatus::Ready);
        assert_eq!(item.ai_answer, None);
        assert_eq!(item.url(), "https://github.com/a/b");
    }

    #[test]
    fn test_transitions() {
        let mut item = ListItem::new(0, record("a/b"));

        // can't finish what never started
        assert!(!item.complete(AiAnswer::default()));
        assert!(!item.fail());

        assert!(item.begin_analysis());
        assert!(!item.begin_analysis());
        assert!(item.fail());
        assert_eq!(item.ai_status, AiStatus::Failed);

        // retry
        assert!(item.begin_analysis());
        let answer = AiAnswer {
            what: "a thing".into(),
            why: vec!["fast".into()],
            how: vec!["rust".into()],
            related: vec![],
        };
        assert!(item.complete(answer.clone()));
        assert_eq!(item.ai_answer, Some(answer));
    }

    #[test]
    fn test_success_is_sticky() {
        let mut item = ListItem::new(0, record("a/b"));
        item.begin_analysis();
        item.complete(AiAnswer::default());

        assert!(!item.begin_analysis());
        assert!(!item.fail());
        assert!(!item.complete(AiAnswer::default()));
        assert_eq!(item.ai_status, AiStatus::Success);
    }

    #[test]
    fn test_json_round_trip() {
        let mut item = ListItem::new(4, record("owner/repo"));
        item.begin_analysis();
        item.complete(AiAnswer {
            what: "w".into(),
            why: vec!["y".into()],
            how: vec!["h".into()],
            related: vec!["r".into()],
        });

        let json = serde_json::to_string(&item).unwrap();
        let back: ListItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
