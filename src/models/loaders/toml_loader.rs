use crate::models::bank::TriviaBank;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 解析 TOML 文本为题库并校验
pub fn parse_trivia_bank(content: &str) -> Result<TriviaBank> {
    let bank: TriviaBank = toml::from_str(content).context("无法解析题库TOML")?;
    bank.validate().context("题库数据不合法")?;
    Ok(bank)
}

/// 从 TOML 文件加载题库
pub async fn load_trivia_bank(toml_file_path: &Path) -> Result<TriviaBank> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let bank = parse_trivia_bank(&content)
        .with_context(|| format!("无法加载题库文件: {}", toml_file_path.display()))?;

    let dangling = bank.dangling_question_ids();
    if !dangling.is_empty() {
        tracing::warn!(
            "⚠️ {} 道题目引用了不存在的分类，分类名将显示为空: {:?}",
            dangling.len(),
            dangling
        );
    }

    Ok(bank)
}

/// 加载题库，文件不存在时返回空题库
pub async fn load_or_init_trivia_bank(toml_file_path: &Path) -> Result<TriviaBank> {
    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        tracing::warn!(
            "题库文件不存在: {}，以空题库启动",
            toml_file_path.display()
        );
        return Ok(TriviaBank::default());
    }

    load_trivia_bank(toml_file_path).await
}

/// 将题库写回 TOML 文件
///
/// 先写临时文件再重命名，读方不会看到写了一半的文件
pub fn write_trivia_bank(toml_file_path: &Path, bank: &TriviaBank) -> Result<()> {
    let content = toml::to_string_pretty(bank).context("无法序列化题库")?;

    let tmp_path = temp_path_for(toml_file_path);
    std::fs::write(&tmp_path, content)
        .with_context(|| format!("无法写入临时文件: {}", tmp_path.display()))?;
    if let Err(e) = std::fs::rename(&tmp_path, toml_file_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e)
            .with_context(|| format!("无法替换题库文件: {}", toml_file_path.display()));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "trivia.toml".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[categories]]
id = 1
type = "Science"

[[categories]]
id = 2
type = "Sport"

[[questions]]
id = 1
question = "What is the answer to everything"
answer = "42"
category = 1
difficulty = 3
"#;

    #[test]
    fn test_parse_sample_bank() {
        let bank = parse_trivia_bank(SAMPLE).unwrap();
        assert_eq!(bank.categories.len(), 2);
        assert_eq!(bank.categories[1].label, "Sport");
        assert_eq!(bank.questions[0].text, "What is the answer to everything");
        assert_eq!(bank.questions[0].category_id, 1);
    }

    #[test]
    fn test_parse_rejects_duplicate_category_ids() {
        let content = r#"
[[categories]]
id = 1
type = "Science"

[[categories]]
id = 1
type = "Art"
"#;
        assert!(parse_trivia_bank(content).is_err());
    }

    #[test]
    fn test_temp_path_sits_next_to_target() {
        let tmp = temp_path_for(Path::new("/data/trivia.toml"));
        assert_eq!(tmp, PathBuf::from("/data/trivia.toml.tmp"));
    }

    #[tokio::test]
    async fn test_write_then_load_keeps_records() {
        let path = std::env::temp_dir().join(format!(
            "trivia_loader_test_{}.toml",
            std::process::id()
        ));
        let bank = parse_trivia_bank(SAMPLE).unwrap();

        write_trivia_bank(&path, &bank).unwrap();
        let loaded = load_trivia_bank(&path).await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, bank);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_bank() {
        let path = std::env::temp_dir().join("trivia_loader_missing_file.toml");
        let bank = load_or_init_trivia_bank(&path).await.unwrap();
        assert!(bank.categories.is_empty());
        assert!(bank.questions.is_empty());
    }
}
