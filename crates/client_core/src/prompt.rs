/// Prompt sent to the generation service for a single term. The structure asks
/// for a definition, the core concept, one usage example and one everyday
/// analogy in plain Korean prose of about 500 characters.
pub fn build_prompt(term: &str) -> String {
    format!(
        "금융 용어: \"{term}\"

위 금융 용어에 대해 아래 구조에 맞춰 한국어로 설명해주세요. 설명은 금융을 잘 모르는 사람도 쉽게 이해할 수 있도록 명확하고 친절한 어조로 작성해주세요. 전체 답변은 마크다운 형식을 사용하지 말고, 500자 내외로 요약해주세요.

1. 📖 정의:
[용어에 대한 핵심적인 정의를 1~2문장으로 간결하게 설명]

2. 💡 핵심 개념:
[용어를 이해하는 데 필요한 주요 개념이나 원리를 간략하게 설명]

3. 📈 실제 사용 예시:
[이 용어가 어떻게 사용되는지 간결한 예시 1개 제시]

4. 🤔 쉬운 비유:
[복잡한 개념을 일상적인 상황에 빗대어 한 문장으로 비유]
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_quoted_in_first_line() {
        let prompt = build_prompt("핀테크");
        assert_eq!(prompt.lines().next(), Some("금융 용어: \"핀테크\""));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt("양적완화"), build_prompt("양적완화"));
        assert_ne!(build_prompt("양적완화"), build_prompt("핀테크"));
    }

    #[test]
    fn prompt_requests_all_sections_without_markdown() {
        let prompt = build_prompt("ETF");
        for section in [
            "1. 📖 정의:",
            "2. 💡 핵심 개념:",
            "3. 📈 실제 사용 예시:",
            "4. 🤔 쉬운 비유:",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
        assert!(prompt.contains("마크다운 형식을 사용하지 말고"));
        assert!(prompt.contains("500자 내외"));
    }
}
