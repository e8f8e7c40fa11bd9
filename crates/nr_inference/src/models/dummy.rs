use std::fmt;

use nr_core::{Result, TextGenerator};

/// Offline generator: echoes the digest bullets of a prompt back as a report.
/// Strategy prompts get the short/mid-term headings so section extraction
/// has something to find.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str, _temperature: f32) -> Result<String> {
        let bullets: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("- "))
            .take(3)
            .collect();

        let mut report = String::from("## 요약\n");
        if bullets.is_empty() {
            report.push_str("참고할 자료가 없습니다.\n");
        } else {
            for bullet in &bullets {
                report.push_str(bullet);
                report.push('\n');
            }
        }

        if prompt.contains("단기 전략") {
            report.push_str("## 단기 전략 (3개월)\n- 주요 기사 모니터링 체계 구축\n");
            report.push_str("## 중기 전략 (1년)\n- 파트너십 및 포트폴리오 확대 검토\n");
        }

        tracing::debug!("Dummy completion with {} bullets", bullets.len());
        Ok(report.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let prompt = "지시문\n- 제목: 첫 기사\n  요약: 내용\n- 제목: 둘째 기사\n";

        let result = model.generate(prompt, 0.3).await.unwrap();
        assert!(result.contains("- 제목: 첫 기사"));
        assert!(result.contains("- 제목: 둘째 기사"));
        assert!(!result.contains("단기 전략"));
    }

    #[tokio::test]
    async fn test_dummy_model_strategy_headings() {
        let model = DummyModel::default();
        let result = model.generate("## 단기 전략 으로 작성", 0.4).await.unwrap();
        assert!(result.contains("## 단기 전략 (3개월)"));
        assert!(result.contains("## 중기 전략 (1년)"));
    }

    #[tokio::test]
    async fn test_dummy_model_empty_prompt() {
        let result = DummyModel::new().generate("", 0.3).await.unwrap();
        assert_eq!(result, "## 요약\n참고할 자료가 없습니다.");
    }
}
